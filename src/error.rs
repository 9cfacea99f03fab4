//! Errors from the fallible rendering and IO surface.
//!
//! Segmenting and inline formatting never fail; only compiling Typst,
//! exporting pages and reading files can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Typst rejected the generated markup.
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    /// The typeset document could not be exported as PDF or SVG.
    #[error("Export failed: {0}")]
    Export(String),

    /// A config file exists but is not valid.
    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document model could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
