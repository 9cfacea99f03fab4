use crate::block::{Block, List, ListItem};
use crate::inline::format_inline;

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 4;

/// Split markdown text into a list of blocks.
///
/// Every line contributes to exactly one block. Nothing here can fail:
/// anything unrecognised becomes a paragraph.
pub fn segment(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    if text.is_empty() {
        return blocks;
    }

    let mut state = ParseState::default();
    let mut line_count = 0;

    for line in text.split('\n') {
        process_line(line, &mut state, &mut blocks);
        line_count += 1;
    }
    state.finish(&mut blocks);

    tracing::debug!(lines = line_count, blocks = blocks.len(), "Segmented markdown");
    blocks
}

/// What the segmenter is in the middle of between lines.
#[derive(Default)]
enum Mode {
    #[default]
    Idle,
    InCode {
        language: String,
        lines: Vec<String>,
    },
    InList {
        ordered: bool,
        items: Vec<ListItem>,
    },
}

#[derive(Default)]
struct ParseState {
    mode: Mode,
}

impl ParseState {
    /// Emit the open list run, if any.
    fn close_list(&mut self, blocks: &mut Vec<Block>) {
        if matches!(self.mode, Mode::InList { .. }) {
            if let Mode::InList { ordered, items } = std::mem::take(&mut self.mode) {
                blocks.push(Block::List(List { ordered, items }));
            }
        }
    }

    /// Emit the open code block, if any.
    fn close_code(&mut self, blocks: &mut Vec<Block>) {
        if matches!(self.mode, Mode::InCode { .. }) {
            if let Mode::InCode { language, lines } = std::mem::take(&mut self.mode) {
                blocks.push(Block::CodeBlock { language, lines });
            }
        }
    }

    /// Add an item to the open run, or open a new run with this item.
    fn push_item(&mut self, ordered: bool, content: &str) {
        let item = ListItem {
            content: format_inline(content),
        };
        if let Mode::InList { items, .. } = &mut self.mode {
            items.push(item);
        } else {
            self.mode = Mode::InList {
                ordered,
                items: vec![item],
            };
        }
    }

    fn finish(mut self, blocks: &mut Vec<Block>) {
        if let Mode::InCode { language, .. } = &self.mode {
            tracing::debug!(language = %language, "Code fence not closed before end of input");
        }
        self.close_code(blocks);
        self.close_list(blocks);
    }
}

/// A single line classified outside of a code block.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Fence { language: &'a str },
    ListItem { ordered: bool, content: &'a str },
    Heading { level: u8, content: &'a str },
    Rule,
    Blank,
    Text(&'a str),
}

/// Classify a line. Checks run in precedence order: fence, list item,
/// heading, rule, blank, paragraph.
fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = line.strip_prefix(FENCE) {
        return Line::Fence {
            language: rest.trim(),
        };
    }
    if let Some((ordered, content)) = list_marker(line) {
        return Line::ListItem { ordered, content };
    }
    if let Some((level, content)) = heading(line) {
        return Line::Heading { level, content };
    }
    let trimmed = line.trim();
    if trimmed == "---" {
        return Line::Rule;
    }
    if trimmed.is_empty() {
        return Line::Blank;
    }
    Line::Text(line)
}

/// Match a leading `- `, `* ` or `N. ` marker and return the text after it.
fn list_marker(line: &str) -> Option<(bool, &str)> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((false, rest));
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let space = rest.chars().next().filter(|c| c.is_whitespace())?;
    Some((true, &rest[space.len_utf8()..]))
}

/// Match `#`..`####` followed by a space.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let content = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, content))
}

fn process_line(line: &str, state: &mut ParseState, blocks: &mut Vec<Block>) {
    // Inside a fence only the closing fence is significant
    if let Mode::InCode { lines, .. } = &mut state.mode {
        if line.starts_with(FENCE) {
            state.close_code(blocks);
        } else {
            lines.push(line.to_string());
        }
        return;
    }

    // CRLF input; code lines above keep their `\r`
    let line = line.strip_suffix('\r').unwrap_or(line);
    let classified = classify(line);
    if !matches!(classified, Line::ListItem { .. }) {
        state.close_list(blocks);
    }

    match classified {
        Line::ListItem { ordered, content } => state.push_item(ordered, content),
        Line::Fence { language } => {
            state.mode = Mode::InCode {
                language: language.to_string(),
                lines: Vec::new(),
            };
        }
        Line::Heading { level, content } => {
            blocks.push(Block::Heading {
                level,
                content: format_inline(content),
            });
        }
        Line::Rule => blocks.push(Block::Rule),
        Line::Blank => blocks.push(Block::Spacer),
        Line::Text(text) => {
            blocks.push(Block::Paragraph {
                content: format_inline(text),
            });
        }
    }
}
