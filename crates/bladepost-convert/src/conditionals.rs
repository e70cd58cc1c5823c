//! Conditional pass.
//!
//! `@if`/`@elseif`/`@else`/`@endif` and the `@unless`, `@isset`, `@empty`
//! variants become SparkPost block helpers. `@isset` narrows to `{{#if}}`
//! and `@empty` to `{{#unless}}`, a deliberate approximation: the
//! destination dialect can only test truthiness, not definedness.

use crate::comments::{comment_spans, find_unshielded};
use crate::expr::{convert_condition, ws_len};

/// Rewrites all conditional directives, each rule over the whole text, in a
/// fixed order.
pub(crate) fn convert_conditionals(input: &str) -> String {
    let text = rewrite_open(input, "@if", "{{#if ");
    let text = rewrite_open(&text, "@elseif", "{{else if ");
    let text = rewrite_else(&text);
    let text = rewrite_plain(&text, "@endif", "{{/if}}");
    let text = rewrite_open(&text, "@unless", "{{#unless ");
    let text = rewrite_plain(&text, "@endunless", "{{/unless}}");
    let text = rewrite_open(&text, "@isset", "{{#if ");
    let text = rewrite_plain(&text, "@endisset", "{{/if}}");
    let text = rewrite_open(&text, "@empty", "{{#unless ");
    rewrite_plain(&text, "@endempty", "{{/unless}}")
}

// `@name(condition)` → `prefix` + converted condition + `}}`. The condition
// runs to the first `)`; a head with no parenthesized body on the same line
// is left unconverted.
fn rewrite_open(text: &str, name: &str, prefix: &str) -> String {
    let spans = comment_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut from = 0;
    while let Some(start) = find_unshielded(text, name, from, &spans) {
        from = start + name.len();
        let mut cur = from;
        cur += ws_len(&text[cur..]);
        if !text[cur..].starts_with('(') {
            continue;
        }
        cur += 1;
        let Some(close) = text[cur..].find(')') else {
            continue;
        };
        let Some(cond) = condition_body(&text[cur..cur + close]) else {
            continue;
        };
        out.push_str(&text[pos..start]);
        out.push_str(prefix);
        out.push_str(&convert_condition(cond));
        out.push_str("}}");
        pos = cur + close + 1;
        from = pos;
    }
    out.push_str(&text[pos..]);
    out
}

// The matchable core of a raw `( ... )` body: trimmed, and on a single line.
fn condition_body(raw: &str) -> Option<&str> {
    if raw.is_empty() {
        return None;
    }
    let core = raw.trim();
    if core.is_empty() {
        // Whitespace-only parens still rewrite, to an empty condition, as
        // long as the whitespace itself is not just line breaks.
        return raw.contains([' ', '\t']).then_some("");
    }
    (!core.contains('\n')).then_some(core)
}

// `@else` → `{{else}}`, unless it is really the head of an `@else if` /
// `@elseif` leftover.
fn rewrite_else(text: &str) -> String {
    let spans = comment_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut from = 0;
    while let Some(start) = find_unshielded(text, "@else", from, &spans) {
        from = start + "@else".len();
        if text[from..].trim_start().starts_with("if") {
            continue;
        }
        out.push_str(&text[pos..start]);
        out.push_str("{{else}}");
        pos = from;
    }
    out.push_str(&text[pos..]);
    out
}

fn rewrite_plain(text: &str, name: &str, replacement: &str) -> String {
    let spans = comment_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(start) = find_unshielded(text, name, pos, &spans) {
        out.push_str(&text[pos..start]);
        out.push_str(replacement);
        pos = start + name.len();
    }
    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_if_blocks() {
        assert_eq!(
            convert_conditionals("@if($condition)Content@endif"),
            "{{#if condition}}Content{{/if}}"
        );
    }

    #[test]
    fn converts_if_elseif_else() {
        assert_eq!(
            convert_conditionals("@if($a)A@elseif($b)B@else C@endif"),
            "{{#if a}}A{{else if b}}B{{else}} C{{/if}}"
        );
    }

    #[test]
    fn converts_unless_blocks() {
        assert_eq!(
            convert_conditionals("@unless($hidden)Visible@endunless"),
            "{{#unless hidden}}Visible{{/unless}}"
        );
    }

    #[test]
    fn isset_narrows_to_if() {
        assert_eq!(
            convert_conditionals("@isset($name)Hello@endisset"),
            "{{#if name}}Hello{{/if}}"
        );
    }

    #[test]
    fn empty_narrows_to_unless() {
        assert_eq!(
            convert_conditionals("@empty($items)None@endempty"),
            "{{#unless items}}None{{/unless}}"
        );
    }

    #[test]
    fn negated_conditions_keep_the_bang() {
        assert_eq!(
            convert_conditionals("@if(!$hidden)Visible@endif"),
            "{{#if !hidden}}Visible{{/if}}"
        );
    }

    #[test]
    fn whitespace_inside_parens_is_trimmed() {
        assert_eq!(
            convert_conditionals("@if(  $condition  )x@endif"),
            "{{#if condition}}x{{/if}}"
        );
    }

    #[test]
    fn else_followed_by_if_is_left_alone() {
        assert_eq!(convert_conditionals("@else if"), "@else if");
        assert_eq!(convert_conditionals("@else"), "{{else}}");
    }

    #[test]
    fn if_without_parens_is_left_alone() {
        assert_eq!(convert_conditionals("@if this @endif"), "@if this {{/if}}");
    }

    #[test]
    fn multiline_conditions_are_left_alone() {
        let blade = "@if($a\n&& $b)x@endif";
        assert_eq!(convert_conditionals(blade), "@if($a\n&& $b)x{{/if}}");
    }

    #[test]
    fn directives_inside_comments_are_ignored() {
        let text = "{{!-- @if($x) --}}@if($y)z@endif";
        assert_eq!(
            convert_conditionals(text),
            "{{!-- @if($x) --}}{{#if y}}z{{/if}}"
        );
    }
}
