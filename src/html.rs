//! HTML backend for the preview pane.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    let wrapper = config.html.wrapper_class.as_str();

    if !wrapper.is_empty() {
        out.push_str("<div class=\"");
        out.push_str(&encode_double_quoted_attribute(wrapper));
        out.push_str("\">\n");
    }

    for block in blocks {
        emit_block(block, config, &mut out);
        out.push('\n');
    }

    if !wrapper.is_empty() {
        out.push_str("</div>\n");
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, config, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, config, out);
            out.push_str("</p>");
        }
        Block::CodeBlock { language, lines } => {
            out.push_str("<div class=\"code-block\">");
            if !language.is_empty() && config.html.show_code_language {
                out.push_str("<div class=\"code-language\">");
                out.push_str(&encode_text(language));
                out.push_str("</div>");
            }
            if language.is_empty() {
                out.push_str("<pre><code>");
            } else {
                out.push_str("<pre><code class=\"language-");
                out.push_str(&encode_double_quoted_attribute(language));
                out.push_str("\">");
            }
            out.push_str(&encode_text(&lines.join("\n")));
            out.push_str("</code></pre></div>");
        }
        Block::List(list) => list_to_html(list, config, out),
        Block::Rule => out.push_str("<hr>"),
        Block::Spacer => out.push_str("<div class=\"spacer\"></div>"),
    }
}

fn list_to_html(list: &List, config: &Config, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };

    out.push_str(&format!("<{tag}>"));
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, config, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
}

fn spans_to_html(spans: &[Span], config: &Config, out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&encode_text(text)),
            Span::Bold(text) => {
                out.push_str("<strong>");
                out.push_str(&encode_text(text));
                out.push_str("</strong>");
            }
            Span::Code(text) => {
                out.push_str("<code>");
                out.push_str(&encode_text(text));
                out.push_str("</code>");
            }
            Span::Link { text, url } => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(url));
                out.push('"');
                if config.links.new_tab {
                    out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
                }
                out.push('>');
                out.push_str(&encode_text(text));
                out.push_str("</a>");
            }
        }
    }
}
