use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
    pub page: PageConfig,
    pub layout: LayoutConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub color: String,
    pub underline: bool,
    /// Open HTML links in a new tab.
    pub new_tab: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            color: "#1a4f8b".to_string(),
            underline: true,
            new_tab: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
    pub paper: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            numbers: false,
            paper: "a4".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Typst length used for a blank line.
    pub spacer: String,
    pub keep_heading_with_next: bool,
    /// Lists up to this many items are kept on one page.
    pub keep_list_together_max: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacer: "0.5em".to_string(),
            keep_heading_with_next: true,
            keep_list_together_max: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Class of the wrapping `<div>`. Empty means no wrapper.
    pub wrapper_class: String,
    pub show_code_language: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            wrapper_class: "markdown-preview".to_string(),
            show_code_language: true,
        }
    }
}

impl Config {
    /// The config bundled with the crate.
    ///
    /// `build.rs` rejects a bundled file with a missing, unknown or mistyped
    /// key, so parsing only fails if a field is added here and not there.
    pub fn compiled_default() -> Self {
        match Self::from_toml(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Bundled default config does not parse");
                Self::default()
            }
        }
    }

    /// Parse config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a TOML file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::compiled_default());
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config");
                return Err(e.into());
            }
        };

        Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
