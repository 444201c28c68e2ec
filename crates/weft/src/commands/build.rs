/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Build command implementation
 */

//! Build command implementation.
//!
//! Loads `weft.json`, builds the Markdown tree and every configured page
//! unit, and reports per-unit failures. Unit failures are independent: a
//! broken page never blocks its siblings, but any failure makes the
//! command exit nonzero.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;
use weft_compose::{MissingEnvPolicy, ProcessEnv};
use weft_core::{SiteConfig, build_site};

pub fn execute(config_path: &Path, allow_missing_env: bool) -> Result<()> {
    let root = site_root(config_path);
    let config = SiteConfig::load(config_path)
        .with_context(|| format!("cannot load site config {}", config_path.display()))?;

    let missing_env = if allow_missing_env {
        MissingEnvPolicy::Empty
    } else {
        MissingEnvPolicy::Fail
    };

    let report = build_site(&root, &config, &ProcessEnv, missing_env);
    info!(
        built = report.built.len(),
        failed = report.failed.len(),
        "build finished"
    );

    if !report.is_success() {
        for (unit, err) in &report.failed {
            eprintln!("error: unit '{unit}': {err}");
        }
        bail!("{} unit(s) failed to build", report.failed.len());
    }
    Ok(())
}

/// The site root is the directory the config file lives in.
pub(crate) fn site_root(config_path: &Path) -> std::path::PathBuf {
    match config_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => std::path::PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => std::path::PathBuf::from("."),
    }
}
