//! Echo passes.
//!
//! Raw echoes (`{!! expr !!}`) become triple-mustache unescaped output;
//! standard echoes (`{{ expr }}`) become double-mustache substitution. The
//! echo pass runs last and skips anything that already carries a SparkPost
//! helper sigil, which makes conversion idempotent on its own output.

use crate::comments::{comment_spans, find_unshielded};
use crate::expr::convert_variable_expression;

/// `{!! expr !!}` → `{{{expr}}}`.
pub(crate) fn convert_raw_echoes(text: &str) -> String {
    let spans = comment_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut from = 0;
    while let Some(start) = find_unshielded(text, "{!!", from, &spans) {
        from = start + 3;
        let Some(inner_len) = text[from..].find("!!}") else {
            break;
        };
        let inner = &text[from..from + inner_len];
        if inner.is_empty() {
            continue;
        }
        out.push_str(&text[pos..start]);
        out.push_str("{{{");
        out.push_str(&convert_variable_expression(inner));
        out.push_str("}}}");
        pos = from + inner_len + 3;
        from = pos;
    }
    out.push_str(&text[pos..]);
    out
}

/// `{{ expr }}` → `{{expr}}`, leaving spans that already carry a SparkPost
/// sigil (`#`, `/`, `!`) untouched.
pub(crate) fn convert_echoes(text: &str) -> String {
    let spans = comment_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut from = 0;
    while let Some(start) = find_unshielded(text, "{{", from, &spans) {
        from = start + 2;
        let Some(inner_len) = text[from..].find("}}") else {
            break;
        };
        let inner = &text[from..from + inner_len];
        if inner.is_empty() {
            continue;
        }
        let end = from + inner_len + 2;
        let trimmed = inner.trim();
        out.push_str(&text[pos..start]);
        if trimmed.starts_with(['#', '/', '!']) {
            // Already a SparkPost tag; pass the whole span through.
            out.push_str(&text[start..end]);
        } else {
            out.push_str("{{");
            out.push_str(&convert_variable_expression(trimmed));
            out.push_str("}}");
        }
        pos = end;
        from = pos;
    }
    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_echoes_become_triple_mustache() {
        assert_eq!(convert_raw_echoes("{!! $variable !!}"), "{{{variable}}}");
        assert_eq!(convert_raw_echoes("{!! $user->bio !!}"), "{{{user.bio}}}");
    }

    #[test]
    fn raw_echo_without_close_is_left_alone() {
        let text = "{!! $variable";
        assert_eq!(convert_raw_echoes(text), text);
    }

    #[test]
    fn echoes_become_double_mustache() {
        assert_eq!(convert_echoes("{{ $variable }}"), "{{variable}}");
        assert_eq!(convert_echoes("{{ $user->name }}"), "{{user.name}}");
    }

    #[test]
    fn sparkpost_tags_pass_through() {
        for stable in [
            "{{#if condition}}Content{{/if}}",
            "{{#each items}}{{/each}}",
            "{{!-- note --}}",
        ] {
            assert_eq!(convert_echoes(stable), stable);
        }
    }

    #[test]
    fn triple_mustache_output_is_stable() {
        assert_eq!(convert_echoes("{{{variable}}}"), "{{{variable}}}");
    }

    #[test]
    fn else_markers_are_stable() {
        assert_eq!(convert_echoes("{{else}}"), "{{else}}");
        assert_eq!(convert_echoes("{{else if cond}}"), "{{else if cond}}");
    }

    #[test]
    fn echo_without_close_is_left_alone() {
        let text = "Hello {{ name";
        assert_eq!(convert_echoes(text), text);
    }

    #[test]
    fn multiple_echoes_on_one_line() {
        assert_eq!(
            convert_echoes("<p>{{ $firstName }} {{ $lastName }} ({{ $email }})</p>"),
            "<p>{{firstName}} {{lastName}} ({{email}})</p>"
        );
    }
}
