//! Preview rendering for generated deployment markdown.
//!
//! Text is segmented into [`Block`]s, each textual line carrying a flat list
//! of inline [`Span`]s, and the result can be rendered as HTML, Typst markup,
//! PDF or SVG pages.

mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod typst;

pub use block::{Block, List, ListItem, Span, plain_text};
pub use config::{Config, HtmlConfig, LayoutConfig, LinksConfig, PageConfig};
pub use error::Error;
pub use inline::format_inline;
pub use parser::segment;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::diag::SourceDiagnostic;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Convert markdown to an HTML fragment using default config.
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to an HTML fragment with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> String {
    let blocks = segment(markdown);
    html::blocks_to_html(&blocks, config)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    let blocks = segment(markdown);
    typst::blocks_to_typst(&blocks, config)
}

/// Typeset the preview of `markdown`. PDF and SVG export both start here.
fn typeset(markdown: &str, config: &Config) -> Result<PagedDocument, Error> {
    let markup = markdown_to_typst_with_config(markdown, config);

    // Embedded fonts only, so output does not depend on the host
    let fonts = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);
    let engine = TypstEngine::builder()
        .main_file(markup)
        .search_fonts_with(fonts)
        .build();

    let compiled = engine.compile();
    for warning in &compiled.warnings {
        tracing::warn!(message = %warning.message, "Typst warning");
    }
    let doc: PagedDocument = compiled
        .output
        .map_err(|e| Error::Compile(format!("{e:?}")))?;

    tracing::debug!(pages = doc.pages.len(), "Typeset preview");
    Ok(doc)
}

fn export_failed(diagnostics: &[SourceDiagnostic]) -> Error {
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    Error::Export(messages.join("; "))
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>, Error> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>, Error> {
    let doc = typeset(markdown, config)?;
    let bytes = typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| export_failed(&e))?;
    tracing::debug!(bytes = bytes.len(), "Exported PDF");
    Ok(bytes)
}

/// One SVG string per page. The size is that of the first page, since every
/// page shares the configured paper.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    pub pages: Vec<String>,
    pub width_pt: f64,
    pub height_pt: f64,
}

impl SvgDocument {
    fn from_pages(doc: &PagedDocument) -> Result<Self, Error> {
        let first = doc
            .pages
            .first()
            .ok_or_else(|| Error::Export("document has no pages".to_string()))?;
        let size = first.frame.size();

        Ok(Self {
            pages: doc.pages.iter().map(typst_svg::svg).collect(),
            width_pt: size.x.to_pt(),
            height_pt: size.y.to_pt(),
        })
    }
}

/// Convert markdown to SVG pages using default config.
pub fn markdown_to_svg(markdown: &str) -> Result<SvgDocument, Error> {
    markdown_to_svg_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to SVG pages with custom config.
pub fn markdown_to_svg_with_config(markdown: &str, config: &Config) -> Result<SvgDocument, Error> {
    let doc = typeset(markdown, config)?;
    SvgDocument::from_pages(&doc)
}
