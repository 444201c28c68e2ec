/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Site build orchestration for Weft.
//!
//! This crate wraps the `weft-compose` engine with the I/O it deliberately
//! leaves out: configuration loading, fragment discovery, Markdown
//! conversion, and output writing. A build reads `weft.json`, converts the
//! Markdown tree, then composes each configured page unit independently.

pub mod build;
pub mod config;
pub mod error;
pub mod markdown;

pub use build::{BuildReport, build_site, collect_fragments};
pub use config::{CONFIG_FILE, SiteConfig};
pub use error::{CoreError, Result};
pub use markdown::markdown_to_html;

use std::path::Path;

use tracing::info;

/// Remove the site's output directory, if present.
pub fn clean(root: &Path, config: &SiteConfig) -> Result<()> {
    let out_dir = root.join(&config.out_dir);
    if out_dir.is_dir() {
        std::fs::remove_dir_all(&out_dir)?;
        info!(path = %out_dir.display(), "removed output directory");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("dist/md")).unwrap();
        std::fs::write(root.join("dist/index.html"), "x").unwrap();

        clean(root, &SiteConfig::default()).unwrap();
        assert!(!root.join("dist").exists());
    }

    #[test]
    fn test_clean_is_noop_without_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(clean(dir.path(), &SiteConfig::default()).is_ok());
    }
}
