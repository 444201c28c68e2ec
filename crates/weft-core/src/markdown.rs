/*
 * markdown.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markdown conversion.
//!
//! A thin wrapper around comrak: each `.md` file under the configured
//! Markdown directory converts to HTML with a single call and is written
//! under `<out_dir>/md/` with the extension swapped. No composition
//! directives are processed in Markdown sources.

use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::error::{CoreError, Result};

/// Convert one Markdown string to HTML.
pub fn markdown_to_html(source: &str) -> String {
    comrak::markdown_to_html(source, &comrak::Options::default())
}

/// Convert every `.md` file under the configured Markdown directory.
///
/// Returns the paths written, relative to the site root. A site without a
/// `markdown_dir` builds nothing here.
pub fn build_markdowns(root: &Path, config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let Some(markdown_dir) = &config.markdown_dir else {
        return Ok(Vec::new());
    };
    let src_root = root.join(markdown_dir);
    if !src_root.is_dir() {
        return Err(CoreError::MissingSource(src_root));
    }
    let out_root = root.join(&config.out_dir).join("md");

    let mut written = Vec::new();
    let entries: Vec<PathBuf> = WalkDir::new(&src_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();

    for path in entries {
        let text = std::fs::read_to_string(&path).map_err(|source| CoreError::Read {
            path: path.clone(),
            source,
        })?;
        let html = markdown_to_html(&text);

        let relative = path.strip_prefix(&src_root).unwrap_or(&path);
        let out_path = out_root.join(relative).with_extension("html");
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out_path, html).map_err(|source| CoreError::Write {
            path: out_path.clone(),
            source,
        })?;
        info!(path = %out_path.display(), "wrote markdown output");
        written.push(out_path.strip_prefix(root).unwrap_or(&out_path).to_path_buf());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_to_html_basic() {
        let html = markdown_to_html("# Title\n\nSome *text*.\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_build_markdowns_writes_converted_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src/md/notes")).unwrap();
        std::fs::write(root.join("src/md/readme.md"), "# Hello\n").unwrap();
        std::fs::write(root.join("src/md/notes/a.md"), "plain\n").unwrap();
        std::fs::write(root.join("src/md/ignore.txt"), "not markdown").unwrap();

        let config = SiteConfig {
            markdown_dir: Some(PathBuf::from("src/md")),
            ..SiteConfig::default()
        };
        let written = build_markdowns(root, &config).unwrap();
        assert_eq!(written.len(), 2);

        let readme = std::fs::read_to_string(root.join("dist/md/readme.html")).unwrap();
        assert!(readme.contains("<h1>Hello</h1>"));
        assert!(root.join("dist/md/notes/a.html").is_file());
        assert!(!root.join("dist/md/ignore.html").exists());
    }

    #[test]
    fn test_build_markdowns_without_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        assert!(build_markdowns(dir.path(), &config).unwrap().is_empty());
    }
}
