use serde::Serialize;

/// Inline text spans with formatting. Spans never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Code(String),
    Link { text: String, url: String },
}

impl Span {
    /// The text a reader sees for this span.
    pub fn plain_text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Code(text) => text,
            Span::Link { text, .. } => text,
        }
    }
}

/// Concatenated visible text of a line's spans.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::plain_text).collect()
}

/// A single list item with its marker stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A run of list items (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements produced by the segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        /// Empty when the fence declared no language.
        language: String,
        lines: Vec<String>,
    },
    List(List),
    Rule,
    Spacer,
}
