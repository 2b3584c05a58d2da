use std::sync::LazyLock;

use regex::Regex;

use crate::block::Segment;

/// A `**`-delimited run, shortest match, on a single line.
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("bold span pattern is valid"));

/// Split a line into plain and bold segments.
///
/// Every `**...**` pair becomes a bold segment with the delimiters removed. Text around the
/// pairs is kept as plain segments, in order. A `**` without a closing partner on the same
/// line stays literal. Empty plain pieces are dropped, so an empty line gives no segments;
/// a bare `****` still yields one empty bold segment.
pub fn split_bold(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in BOLD_SPAN.find_iter(text) {
        push_plain(&mut segments, &text[cursor..m.start()]);
        let span = m.as_str();
        segments.push(Segment::bold(&span[2..span.len() - 2]));
        cursor = m.end();
    }
    push_plain(&mut segments, &text[cursor..]);

    segments
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::plain(text));
    }
}
