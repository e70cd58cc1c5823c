//! Comment pass and comment shielding.
//!
//! Blade comments (`{{-- ... --}}`) become SparkPost comments
//! (`{{!-- ... --}}`). This pass runs first so that every later pass can
//! treat a converted comment span as opaque: a directive or echo marker
//! inside a comment is documentation, not markup.

const OPEN: &str = "{{--";
const CLOSE: &str = "--}}";
const DEST_OPEN: &str = "{{!--";
const DEST_CLOSE: &str = "--}}";

/// Converts every paired `{{-- ... --}}` into `{{!-- ... --}}`.
///
/// Matching is non-greedy and may span multiple lines. An opener with no
/// closing marker is not a match; it and everything after it pass through
/// untouched.
pub(crate) fn convert_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    while let Some(found) = input[pos..].find(OPEN) {
        let start = pos + found;
        let inner_start = start + OPEN.len();
        let Some(inner_len) = input[inner_start..].find(CLOSE) else {
            break;
        };
        out.push_str(&input[pos..start]);
        out.push_str(DEST_OPEN);
        out.push(' ');
        out.push_str(input[inner_start..inner_start + inner_len].trim());
        out.push(' ');
        out.push_str(DEST_CLOSE);
        pos = inner_start + inner_len + CLOSE.len();
    }
    out.push_str(&input[pos..]);
    out
}

/// Byte spans of converted comments (`{{!-- ... --}}`) in `text`, in order.
///
/// Later passes use these to leave comment interiors alone.
pub(crate) fn comment_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(found) = text[pos..].find(DEST_OPEN) {
        let start = pos + found;
        let Some(inner_len) = text[start + DEST_OPEN.len()..].find(DEST_CLOSE) else {
            break;
        };
        let end = start + DEST_OPEN.len() + inner_len + DEST_CLOSE.len();
        spans.push((start, end));
        pos = end;
    }
    spans
}

/// Whether byte offset `pos` falls inside one of `spans`.
pub(crate) fn in_comment(spans: &[(usize, usize)], pos: usize) -> bool {
    spans.iter().any(|&(start, end)| pos >= start && pos < end)
}

/// First occurrence of `needle` at or after `from` that is not shielded by a
/// comment span.
pub(crate) fn find_unshielded(
    text: &str,
    needle: &str,
    mut from: usize,
    spans: &[(usize, usize)],
) -> Option<usize> {
    while let Some(found) = text[from..].find(needle) {
        let at = from + found;
        if !in_comment(spans, at) {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}
