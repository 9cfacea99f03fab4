use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.layout.keep_heading_with_next => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, &mut out);

                // Blank lines directly under the heading come along too
                while matches!(blocks.get(i + 1), Some(Block::Spacer)) {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");

    out.push_str("#set page(paper: ");
    string_literal(&config.page.paper, out);
    if config.page.numbers {
        out.push_str(", numbering: \"1\"");
    }
    out.push_str(")\n");

    out.push_str("#show link: set text(fill: rgb(");
    string_literal(&config.links.color, out);
    out.push_str("))\n");
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push('\n');
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            line_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::CodeBlock { language, lines } => {
            let fence = raw_fence(lines);

            // Keep code blocks together when possible
            out.push_str("#block(breakable: false)[\n");
            out.push_str(&fence);
            if is_lang_tag(language) {
                out.push_str(language);
            }
            out.push('\n');
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&fence);
            out.push_str("\n]\n\n");
        }
        Block::List(list) => {
            // Wrap list to keep together when small, allow breaks when large
            if list.items.len() <= config.layout.keep_list_together_max {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
        Block::Rule => {
            out.push_str("#line(length: 100%)\n\n");
        }
        Block::Spacer => {
            out.push_str("#v(");
            out.push_str(&config.layout.spacer);
            out.push_str(")\n\n");
        }
    }
}

/// A backtick fence longer than any backtick run inside the block.
fn raw_fence(lines: &[String]) -> String {
    let longest = lines
        .iter()
        .flat_map(|line| line.split(|c: char| c != '`'))
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Typst only accepts identifier-like language tags after a fence.
fn is_lang_tag(language: &str) -> bool {
    !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        line_to_typst(&item.content, out);
        out.push('\n');
    }
}

/// Spans at the start of a line, which must not read as a heading or list marker.
fn line_to_typst(spans: &[Span], out: &mut String) {
    let start = out.len();
    spans_to_typst(spans, out);
    if matches!(out[start..].chars().next(), Some('=' | '+' | '-')) {
        out.insert(start, '\\');
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_text(text, out),
        Span::Bold(text) => {
            if !text.is_empty() {
                out.push('*');
                escape_text(text, out);
                out.push('*');
            }
        }
        Span::Code(text) => {
            // Code spans never contain backticks; empty ones are invisible
            if !text.is_empty() {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
        }
        Span::Link { text, url } => {
            out.push_str("#link(");
            string_literal(url, out);
            out.push_str(")[");
            escape_text(text, out);
            // The semicolon ends the embedded expression
            out.push_str("];");
        }
    }
}

/// Escape special Typst characters in markup text
fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// Write `value` as a quoted Typst string
fn string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
