//! Property-based tests for the converter using proptest.

use bladepost_convert::convert;
use proptest::prelude::*;

proptest! {
    /// Text with no recognized markers passes through byte-for-byte. The
    /// strategy stays clear of `{`, `}`, and `@`, which every directive and
    /// echo marker needs at least one of.
    #[test]
    fn identity_on_plain_text(text in "[a-zA-Z0-9 .,:;'\"<>/()?$!_\\n-]{0,200}") {
        prop_assert_eq!(convert(&text), text);
    }

    /// Already-converted SparkPost documents are stable under conversion.
    #[test]
    fn idempotence_on_destination_syntax(
        cond in "[a-z][a-z0-9_]{0,8}",
        collection in "[a-z][a-z0-9_]{0,8}",
        field in "[a-z][a-z0-9_]{0,8}",
    ) {
        let doc = [
            format!("{{{{#if {cond}}}}}{{{{{cond}}}}}{{{{else}}}}no{{{{/if}}}}"),
            format!("{{{{#each {collection}}}}}{{{{this.{field}}}}}{{{{@index}}}}{{{{/each}}}}"),
            format!("{{{{{{{field}}}}}}}"),
            "{{!-- a note --}}".to_string(),
        ]
        .join("\n");
        prop_assert_eq!(convert(&doc), doc);
    }

    /// Conversion twice is the same as conversion once, for simple Blade
    /// echo documents.
    #[test]
    fn conversion_is_idempotent_for_echoes(var in "[a-z][a-z0-9_]{0,8}") {
        let blade = format!("<p>{{{{ ${var} }}}}</p>");
        let once = convert(&blade);
        prop_assert_eq!(convert(&once), once);
    }

    /// Text around a directive is never touched.
    #[test]
    fn surrounding_text_is_preserved(
        prefix in "[a-zA-Z0-9 .,<>/]{0,40}",
        suffix in "[a-zA-Z0-9 .,<>/]{0,40}",
        var in "[a-z][a-z0-9_]{0,8}",
    ) {
        let input = format!("{prefix}{{{{ ${var} }}}}{suffix}");
        let expected = format!("{prefix}{{{{{var}}}}}{suffix}");
        prop_assert_eq!(convert(&input), expected);
    }

    /// Comment interiors are never rewritten, whatever they contain.
    #[test]
    fn comment_interiors_are_inert(inner in "[a-zA-Z0-9 $>(){-]{0,40}") {
        let input = format!("{{{{-- {inner} --}}}}");
        let trimmed = inner.trim();
        let expected = format!("{{{{!-- {trimmed} --}}}}");
        prop_assert_eq!(convert(&input), expected);
    }
}
