//! Loop pass: `@foreach` blocks become `{{#each}}` blocks.
//!
//! Loops nest, so the matching `@endforeach` for an open is found by depth
//! counting rather than a first-close search. The pass rewrites the
//! outermost unprocessed loop and then re-runs until no `@foreach` head
//! remains, which hands each inner loop its own scope in turn.

use crate::comments::{comment_spans, find_unshielded};
use crate::expr::{word_len, ws_len};
use crate::scope::apply_scope;

const OPEN: &str = "@foreach";
const CLOSE: &str = "@endforeach";

/// A recognized `@foreach($collection as [$key =>] $item)` head.
struct LoopHead<'a> {
    start: usize,
    body_start: usize,
    collection: &'a str,
    item: &'a str,
}

/// Converts every structurally matched `@foreach ... @endforeach` block.
///
/// An open with no matching close stops the pass and leaves the remaining
/// text untouched: malformed input degrades instead of corrupting the
/// document.
pub(crate) fn convert_loops(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let spans = comment_spans(&text);
        let Some(head) = next_loop_head(&text, &spans) else {
            break;
        };
        let Some(close) = find_matching_close(&text, head.body_start, &spans) else {
            break;
        };
        let body = apply_scope(&text[head.body_start..close], head.item);
        let mut next = String::with_capacity(text.len());
        next.push_str(&text[..head.start]);
        next.push_str("{{#each ");
        next.push_str(head.collection);
        next.push_str("}}");
        next.push_str(&body);
        next.push_str("{{/each}}");
        next.push_str(&text[close + CLOSE.len()..]);
        text = next;
    }
    text
}

// First convertible `@foreach` head outside comment spans. Opens that do not
// parse (computed collections and the like) are skipped here but still count
// for depth in `find_matching_close`.
fn next_loop_head<'a>(text: &'a str, spans: &[(usize, usize)]) -> Option<LoopHead<'a>> {
    let mut from = 0;
    while let Some(start) = find_unshielded(text, OPEN, from, spans) {
        if let Some(head) = parse_loop_head(text, start) {
            return Some(head);
        }
        from = start + OPEN.len();
    }
    None
}

/// Depth-counted search for the close matching an open whose body starts at
/// `from`. Nested opens of the same family increment depth, closes decrement
/// it; `None` means the document ends before depth returns to zero.
fn find_matching_close(text: &str, from: usize, spans: &[(usize, usize)]) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = find_unshielded(text, CLOSE, pos, spans)?;
        match find_unshielded(text, OPEN, pos, spans) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + OPEN.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                pos = close + CLOSE.len();
            }
        }
    }
}

// `@foreach ( $collection as [$key =>] $item )` with free whitespace.
fn parse_loop_head(text: &str, start: usize) -> Option<LoopHead<'_>> {
    let mut pos = start + OPEN.len();
    pos += ws_len(&text[pos..]);
    if !text[pos..].starts_with('(') {
        return None;
    }
    pos += 1;
    pos += ws_len(&text[pos..]);
    if !text[pos..].starts_with('$') {
        return None;
    }
    pos += 1;
    let collection_len = word_len(&text[pos..]);
    if collection_len == 0 {
        return None;
    }
    let collection = &text[pos..pos + collection_len];
    pos += collection_len;
    let sep = ws_len(&text[pos..]);
    if sep == 0 {
        return None;
    }
    pos += sep;
    if !text[pos..].starts_with("as") {
        return None;
    }
    pos += 2;
    let sep = ws_len(&text[pos..]);
    if sep == 0 {
        return None;
    }
    pos += sep;
    // Optional `$key =>`; only the value binding matters.
    if let Some(skip) = key_arrow_len(&text[pos..]) {
        pos += skip;
    }
    if !text[pos..].starts_with('$') {
        return None;
    }
    pos += 1;
    let item_len = word_len(&text[pos..]);
    if item_len == 0 {
        return None;
    }
    let item = &text[pos..pos + item_len];
    pos += item_len;
    pos += ws_len(&text[pos..]);
    if !text[pos..].starts_with(')') {
        return None;
    }
    Some(LoopHead {
        start,
        body_start: pos + 1,
        collection,
        item,
    })
}

// `$key =>` plus surrounding whitespace; consumed length, or None when the
// loop declares no key binding.
fn key_arrow_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('$')?;
    let key = word_len(rest);
    if key == 0 {
        return None;
    }
    let mut len = 1 + key;
    len += ws_len(&s[len..]);
    if !s[len..].starts_with("=>") {
        return None;
    }
    len += 2;
    len += ws_len(&s[len..]);
    Some(len)
}
