/*
 * clean.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Clean command implementation
 */

//! Clean command implementation: delete the configured output directory.

use std::path::Path;

use anyhow::{Context, Result};
use weft_core::SiteConfig;

pub fn execute(config_path: &Path) -> Result<()> {
    let root = super::build::site_root(config_path);
    let config = SiteConfig::load(config_path)
        .with_context(|| format!("cannot load site config {}", config_path.display()))?;
    weft_core::clean(&root, &config)
        .with_context(|| "failed to remove output directory".to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_removes_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("weft.json"), "{}").unwrap();
        std::fs::create_dir_all(root.join("dist")).unwrap();
        std::fs::write(root.join("dist/index.html"), "x").unwrap();

        execute(&root.join("weft.json")).unwrap();
        assert!(!root.join("dist").exists());
    }
}
