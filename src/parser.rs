use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;
use crate::inline::split_bold;

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 9;

/// `1. `, `42. ` and so on: digits, a dot, one whitespace character.
static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("numbered list pattern is valid"));

/// What a single input line means, given whether a code block is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Fence,
    CodeLine(&'a str),
    Heading { level: u8, text: &'a str },
    Rule,
    BulletItem(&'a str),
    NumberedItem(&'a str),
    Quote(&'a str),
    Blank,
    Paragraph(&'a str),
}

/// Classify one line. Pure: the result depends only on the line and the code block flag.
pub fn classify(line: &str, in_code_block: bool) -> LineKind<'_> {
    let stripped = line.trim();

    if stripped.starts_with(FENCE) {
        return LineKind::Fence;
    }
    if in_code_block {
        return LineKind::CodeLine(line.trim_end());
    }

    if let Some((level, text)) = heading(stripped) {
        return LineKind::Heading { level, text };
    }
    if stripped.starts_with("---") || stripped.starts_with("***") {
        return LineKind::Rule;
    }
    if let Some(rest) = stripped
        .strip_prefix("- ")
        .or_else(|| stripped.strip_prefix("* "))
    {
        return LineKind::BulletItem(rest.trim());
    }
    if let Some(m) = NUMBERED_PREFIX.find(stripped) {
        return LineKind::NumberedItem(stripped[m.end()..].trim());
    }
    if let Some(rest) = stripped.strip_prefix("> ") {
        return LineKind::Quote(rest.trim());
    }
    if stripped.is_empty() {
        return LineKind::Blank;
    }

    LineKind::Paragraph(stripped)
}

/// Leading `#` run followed by whitespace or end of line.
fn heading(stripped: &str) -> Option<(u8, &str)> {
    let rest = stripped.trim_start_matches('#');
    let hashes = stripped.len() - rest.len();
    if hashes == 0 {
        return None;
    }
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let level = hashes.min(MAX_HEADING_LEVEL) as u8;
    Some((level, rest.trim()))
}

/// Scan-time state: whether a fence is open and the code lines collected so far.
#[derive(Debug, Default)]
struct ParserState {
    in_code_block: bool,
    code_lines: Vec<String>,
}

/// Line-at-a-time block parser.
///
/// Feed lines with [`BlockParser::push_line`]; each call returns the block that line
/// completes, if any. Call [`BlockParser::finish`] at end of input.
#[derive(Debug, Default)]
pub struct BlockParser {
    state: ParserState,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Option<Block> {
        match classify(line, self.state.in_code_block) {
            LineKind::Fence => {
                if self.state.in_code_block {
                    self.state.in_code_block = false;
                    let lines = std::mem::take(&mut self.state.code_lines);
                    Some(Block::CodeBlock { lines })
                } else {
                    self.state.in_code_block = true;
                    None
                }
            }
            LineKind::CodeLine(text) => {
                self.state.code_lines.push(text.to_string());
                None
            }
            LineKind::Heading { level, text } => Some(Block::Heading {
                level,
                text: text.to_string(),
            }),
            LineKind::Rule => Some(Block::Rule),
            LineKind::BulletItem(text) => Some(Block::BulletItem {
                content: split_bold(text),
            }),
            LineKind::NumberedItem(text) => Some(Block::NumberedItem {
                content: split_bold(text),
            }),
            LineKind::Quote(text) => Some(Block::Quote {
                text: text.to_string(),
            }),
            LineKind::Blank => None,
            LineKind::Paragraph(text) => Some(Block::Paragraph {
                content: split_bold(text),
            }),
        }
    }

    /// End the scan. Lines of a code block that was never closed are discarded.
    pub fn finish(self) {
        if self.state.in_code_block {
            log::debug!(
                "Discarding unterminated code block ({} lines)",
                self.state.code_lines.len()
            );
        }
    }
}

/// Split markdown into lines, dropping a leading byte order mark.
pub fn lines(markdown: &str) -> std::str::Lines<'_> {
    markdown.strip_prefix('\u{feff}').unwrap_or(markdown).lines()
}

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut parser = BlockParser::new();
    let blocks = lines(markdown)
        .filter_map(|line| parser.push_line(line))
        .collect();
    parser.finish();
    blocks
}
