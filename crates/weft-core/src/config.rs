/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Site configuration.
//!
//! A site is described by a `weft.json` file at its root:
//!
//! ```json
//! {
//!   "out_dir": "dist",
//!   "markdown_dir": "src/md",
//!   "pages": {
//!     "index": ["src/html/commons", "src/html/pages/index.html"],
//!     "about": ["src/html/commons", "src/html/pages/about.html"]
//!   }
//! }
//! ```
//!
//! Each `pages` entry is one output unit: the ordered list of fragment
//! sources (files, or directories walked in sorted order) composed into
//! `<out_dir>/<name>.html`. Entry order is preserved, so builds are
//! reproducible.

use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use serde::Deserialize;

use crate::error::{CoreError, Result};

/// Default name of the config file at the site root.
pub const CONFIG_FILE: &str = "weft.json";

/// Parsed site configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Output directory, relative to the site root.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory of Markdown sources to convert, if any.
    #[serde(default)]
    pub markdown_dir: Option<PathBuf>,

    /// Output units: page name to ordered fragment sources.
    #[serde(default)]
    pub pages: LinkedHashMap<String, Vec<PathBuf>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            markdown_dir: None,
            pages: LinkedHashMap::new(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl SiteConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
