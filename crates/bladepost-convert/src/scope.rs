//! Loop-scope rewriting.
//!
//! Inside a `@foreach` body the declared item binding becomes the fixed
//! `this` scope name and the implicit `$loop` metadata accessors become
//! their `@`-prefixed SparkPost counterparts. Identifiers are matched
//! exactly: a scope for `$item` never touches `$items`.

use crate::comments::comment_spans;
use crate::expr::word_len;

/// The fixed loop-metadata rewrites, applied at any nesting depth.
const LOOP_METADATA: [(&str, &str); 3] = [
    ("->index", "@index"),
    ("->first", "@first"),
    ("->last", "@last"),
];

/// Applies the scope for item binding `item` to a loop body.
///
/// Three shapes of the binding are rewritten: `$item->` becomes `this.`,
/// `$item['key']` becomes `this.key`, and a standalone `$item` becomes
/// `this`. A binding followed by an access the destination cannot express
/// (an unquoted index, a stray `-`) is left for the echo passes to truncate.
/// Comment interiors are copied through untouched.
pub(crate) fn apply_scope(body: &str, item: &str) -> String {
    let spans = comment_spans(body);
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut next_span = 0;
    let mut i = 0;
    'scan: while i < body.len() {
        if next_span < spans.len() && i == spans[next_span].0 {
            let (start, end) = spans[next_span];
            out.push_str(&body[start..end]);
            i = end;
            next_span += 1;
            continue;
        }
        if bytes[i] == b'$' {
            let ident_len = word_len(&body[i + 1..]);
            if ident_len > 0 {
                let after_ident = i + 1 + ident_len;
                let ident = &body[i + 1..after_ident];
                let rest = &body[after_ident..];
                if ident == item {
                    if rest.starts_with("->") {
                        out.push_str("this.");
                        i = after_ident + 2;
                        continue;
                    }
                    if let Some((key, consumed)) = quoted_key(rest) {
                        out.push_str("this.");
                        out.push_str(key);
                        i = after_ident + consumed;
                        continue;
                    }
                    if !matches!(rest.bytes().next(), Some(b'[') | Some(b'-')) {
                        out.push_str("this");
                        i = after_ident;
                        continue;
                    }
                } else if ident == "loop" {
                    for (accessor, replacement) in LOOP_METADATA {
                        if let Some(after) = rest.strip_prefix(accessor) {
                            if word_len(after) == 0 {
                                out.push_str(replacement);
                                i = after_ident + accessor.len();
                                continue 'scan;
                            }
                        }
                    }
                }
                // Some other variable; the echo passes will deal with it.
                out.push_str(&body[i..after_ident]);
                i = after_ident;
                continue;
            }
        }
        match body[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

// `['key']` / `["key"]` with matching quotes; returns the key and the bytes
// consumed.
fn quoted_key(s: &str) -> Option<(&str, usize)> {
    let rest = s.strip_prefix('[')?;
    let quote = rest.chars().next().filter(|&c| matches!(c, '\'' | '"'))?;
    let body = &rest[1..];
    let key_len = word_len(body);
    if key_len == 0 {
        return None;
    }
    let tail = &body[key_len..];
    if tail.starts_with(quote) && tail[1..].starts_with(']') {
        Some((&body[..key_len], key_len + 4))
    } else {
        None
    }
}
