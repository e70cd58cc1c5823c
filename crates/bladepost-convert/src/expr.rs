//! Expression rewriting shared by the conditional and echo passes.
//!
//! Converts Blade variable expressions (`$user->name`, `$user['name']`,
//! `$name ?? 'default'`, `config('app.name')`) into SparkPost dot-path
//! substitution keys. Anything the destination dialect cannot express
//! (method calls, computed indices, compound operators) is truncated or
//! passed through untouched rather than guessed at.

/// Converts one raw echo expression to SparkPost form.
pub(crate) fn convert_variable_expression(raw: &str) -> String {
    let mut expr = raw.trim();

    // config('mail.from.address') and wrapped forms like
    // strtoupper(config('app.name', 'fallback')) collapse to the key alone,
    // before any other rule.
    if let Some(key) = config_key(expr) {
        return convert_config_key(key);
    }

    // $var ?? 'default' keeps only the left-hand side.
    if let Some(idx) = expr.find("??") {
        let head = expr[..idx].trim_end();
        let tail = expr[idx + 2..].trim_start();
        if !head.is_empty() && !tail.is_empty() {
            expr = head;
        }
    }

    // $cond ? 'yes' : 'no' keeps only the condition.
    if let Some(q) = expr.find('?') {
        if has_ternary_tail(expr, q) {
            expr = expr[..q].trim_end();
        }
    }

    if let Some(stripped) = expr.strip_prefix('$') {
        convert_property_access(stripped)
    } else if expr.starts_with("this.") {
        // Loop-scope renaming has already run; finish the access chain.
        convert_property_access(expr)
    } else {
        // Not a variable reference; nothing here can be rewritten safely.
        expr.to_string()
    }
}

/// Converts a conditional directive's embedded expression.
///
/// A single (optionally negated) variable reference converts exactly. Any
/// other shape is best-effort: variable references found inside it are
/// rewritten in place while the surrounding operators and literals stay
/// verbatim, since compound boolean logic cannot be restructured for the
/// destination dialect.
pub(crate) fn convert_condition(raw: &str) -> String {
    let expr = raw.trim();
    if is_simple_variable(expr) {
        let negated = expr.starts_with('!');
        let stripped = expr.trim_start_matches(['!', ' ']);
        let converted = convert_variable_expression(stripped);
        return if negated {
            format!("!{converted}")
        } else {
            converted
        };
    }
    rewrite_embedded_variables(expr)
}

/// Converts property and array access to dot notation.
///
/// `user->name` → `user.name`, `user['name']` → `user.name`. A method call
/// is not representable, so it and everything after it are dropped
/// (`date->format('Y-m-d')` → `date`), as is any bracket access without a
/// quoted literal key.
pub(crate) fn convert_property_access(expr: &str) -> String {
    let expr = match find_method_call(expr) {
        Some(at) => &expr[..at],
        None => expr,
    };
    let dotted = expr.replace("->", ".");
    let mut out = String::with_capacity(dotted.len());
    let mut rest = dotted.as_str();
    while let Some(open) = rest.find('[') {
        match classify_bracket(&rest[open..]) {
            Bracket::Keyed { key, len } => {
                out.push_str(&rest[..open]);
                out.push('.');
                out.push_str(key);
                rest = &rest[open + len..];
            }
            Bracket::Opaque { len } => {
                out.push_str(&rest[..open]);
                rest = &rest[open + len..];
            }
            Bracket::Literal => {
                out.push_str(&rest[..open + 1]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    while out.ends_with('.') {
        out.pop();
    }
    out
}

pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the leading identifier-character run.
pub(crate) fn word_len(s: &str) -> usize {
    s.bytes().take_while(|&b| is_word_byte(b)).count()
}

/// Length of the leading whitespace run.
pub(crate) fn ws_len(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// `mail.from.address` → `MAIL_FROM_ADDRESS`.
fn convert_config_key(key: &str) -> String {
    key.replace('.', "_").to_uppercase()
}

// Locates a config('key.path') call anywhere in the expression, wrapped or
// not, with an optional default argument.
fn config_key(expr: &str) -> Option<&str> {
    let bytes = expr.as_bytes();
    let mut from = 0;
    while let Some(found) = expr[from..].find("config") {
        let at = from + found;
        from = at + "config".len();
        // Not an identifier that merely ends in "config".
        if at > 0 && is_word_byte(bytes[at - 1]) {
            continue;
        }
        let rest = expr[from..].trim_start();
        let Some(args) = rest.strip_prefix('(') else {
            continue;
        };
        let args = args.trim_start();
        let quote = match args.chars().next() {
            Some(q @ ('\'' | '"')) => q,
            _ => continue,
        };
        let body = &args[1..];
        let Some(end) = body.find(['\'', '"']) else {
            continue;
        };
        if end == 0 || !body[end..].starts_with(quote) {
            continue;
        }
        if config_args_close(&body[end + 1..]) {
            return Some(&body[..end]);
        }
    }
    None
}

// After the key's closing quote: either `)` directly or `, default)`.
fn config_args_close(rest: &str) -> bool {
    let rest = rest.trim_start();
    if rest.starts_with(')') {
        return true;
    }
    match rest.strip_prefix(',') {
        Some(default) => default.find(')').is_some_and(|p| p > 0),
        None => false,
    }
}

// True when `expr[q]` starts a `? middle : tail` with non-empty condition,
// middle, and tail.
fn has_ternary_tail(expr: &str, q: usize) -> bool {
    if q == 0 {
        return false;
    }
    expr[q + 1..]
        .match_indices(':')
        .any(|(rel, _)| rel >= 1 && q + 2 + rel < expr.len())
}

// Leftmost `->name(...)` with a closed argument list.
fn find_method_call(expr: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = expr[from..].find("->") {
        let at = from + found;
        let after = &expr[at + 2..];
        let name = word_len(after);
        if name > 0 {
            if let Some(args) = after[name..].strip_prefix('(') {
                if args.contains(')') {
                    return Some(at);
                }
            }
        }
        from = at + 2;
    }
    None
}

enum Bracket<'a> {
    /// `['key']` / `["key"]` with a word key; becomes `.key`.
    Keyed { key: &'a str, len: usize },
    /// Closed bracket group with any other content; dropped entirely.
    Opaque { len: usize },
    /// Unclosed or empty; the `[` is plain text.
    Literal,
}

fn classify_bracket(s: &str) -> Bracket<'_> {
    let Some(close) = s[1..].find(']') else {
        return Bracket::Literal;
    };
    let inner = &s[1..1 + close];
    if inner.is_empty() {
        return Bracket::Literal;
    }
    let len = close + 2;
    let quoted = inner.len() >= 3
        && inner.starts_with(['\'', '"'])
        && inner.ends_with(&inner[..1])
        && inner[1..inner.len() - 1].bytes().all(is_word_byte);
    if quoted {
        Bracket::Keyed {
            key: &inner[1..inner.len() - 1],
            len,
        }
    } else {
        Bracket::Opaque { len }
    }
}

// `$var`, `!$var`, `$var->prop`, `$var['key']` and chains thereof, nothing
// else around them.
fn is_simple_variable(expr: &str) -> bool {
    let rest = expr.strip_prefix('!').unwrap_or(expr).trim_start();
    let Some(rest) = rest.strip_prefix('$') else {
        return false;
    };
    let ident = word_len(rest);
    if ident == 0 {
        return false;
    }
    let mut rest = &rest[ident..];
    loop {
        if let Some(after) = rest.strip_prefix("->") {
            let n = after
                .bytes()
                .take_while(|&b| is_word_byte(b) || b == b'.')
                .count();
            if n == 0 {
                return false;
            }
            rest = &after[n..];
        } else if rest.starts_with('[') {
            // shortest closed group with at least one inner character
            let Some(p) = rest.get(2..).and_then(|s| s.find(']')) else {
                return false;
            };
            rest = &rest[p + 3..];
        } else {
            return rest.trim_start().is_empty();
        }
    }
}

// Best-effort rewrite of a compound expression: each `$var` reference (with
// simple `->prop` / `['key']` continuations) is converted in place, the rest
// stays as-is.
fn rewrite_embedded_variables(expr: &str) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len());
    let mut i = 0;
    while i < expr.len() {
        if bytes[i] == b'$' {
            let len = variable_reference_len(&expr[i..]);
            if len > 1 {
                out.push_str(&convert_variable_expression(&expr[i..i + len]));
                i += len;
                continue;
            }
        }
        match expr[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

// Length of `$name` plus any `->prop` / `['key']` continuations, or 0 when
// `s` is a bare sigil.
fn variable_reference_len(s: &str) -> usize {
    let ident = word_len(&s[1..]);
    if ident == 0 {
        return 0;
    }
    let mut len = 1 + ident;
    loop {
        let rest = &s[len..];
        if let Some(after) = rest.strip_prefix("->") {
            let n = word_len(after);
            if n == 0 {
                break;
            }
            len += 2 + n;
        } else if let Some(n) = bracket_continuation_len(rest) {
            len += n;
        } else {
            break;
        }
    }
    len
}

// `['key']`, `[key]`, `["key"]`: the quotes are each optional.
fn bracket_continuation_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('[')?;
    let mut len = 1;
    let rest = match rest.strip_prefix(['\'', '"']) {
        Some(r) => {
            len += 1;
            r
        }
        None => rest,
    };
    let word = word_len(rest);
    if word == 0 {
        return None;
    }
    len += word;
    let rest = &rest[word..];
    let rest = match rest.strip_prefix(['\'', '"']) {
        Some(r) => {
            len += 1;
            r
        }
        None => rest,
    };
    rest.starts_with(']').then_some(len + 1)
}
