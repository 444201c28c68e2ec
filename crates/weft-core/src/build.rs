/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Site build orchestration.
//!
//! Each `pages` entry in the configuration is one output unit: its fragment
//! sources are read in declared order (directories walked sorted), composed
//! by `weft-compose`, and written to `<out_dir>/<name>.html`. Units are
//! independent: one unit's failure is recorded and reported without
//! aborting its siblings.

use std::path::{Path, PathBuf};

use tracing::{error, info};
use walkdir::WalkDir;
use weft_compose::{EnvSource, Fragment, MissingEnvPolicy, compose};

use crate::config::SiteConfig;
use crate::error::{CoreError, Result};
use crate::markdown;

/// Outcome of one site build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Names of units built successfully.
    pub built: Vec<String>,
    /// Failed units with their errors.
    pub failed: Vec<(String, CoreError)>,
}

impl BuildReport {
    /// True when every unit built.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn unit(&mut self, name: &str, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.built.push(name.to_string()),
            Err(err) => {
                error!(unit = name, %err, "build failed");
                self.failed.push((name.to_string(), err));
            }
        }
    }
}

/// Build the whole site: Markdown sources first, then every page unit.
pub fn build_site(
    root: &Path,
    config: &SiteConfig,
    env: &dyn EnvSource,
    missing_env: MissingEnvPolicy,
) -> BuildReport {
    let mut report = BuildReport::default();

    if config.markdown_dir.is_some() {
        report.unit(
            "markdown",
            markdown::build_markdowns(root, config).map(|_| ()),
        );
    }

    for (name, sources) in &config.pages {
        report.unit(name, build_page(root, config, name, sources, env, missing_env));
    }
    report
}

/// Build one page unit.
pub fn build_page(
    root: &Path,
    config: &SiteConfig,
    name: &str,
    sources: &[PathBuf],
    env: &dyn EnvSource,
    missing_env: MissingEnvPolicy,
) -> Result<()> {
    let fragments = collect_fragments(root, sources)?;
    let html = compose(&fragments, env, missing_env)?;

    let out_path = root.join(&config.out_dir).join(name).with_extension("html");
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, html).map_err(|source| CoreError::Write {
        path: out_path.clone(),
        source,
    })?;
    info!(page = name, path = %out_path.display(), "wrote page");
    Ok(())
}

/// Read the ordered fragment list for one output unit.
///
/// A source entry is either a file or a directory; directories contribute
/// their files in sorted walk order. The logical path of each fragment is
/// its site-root-relative path with `/` separators, which is also the form
/// import directives use.
pub fn collect_fragments(root: &Path, sources: &[PathBuf]) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    for source in sources {
        let absolute = root.join(source);
        if absolute.is_file() {
            fragments.push(read_fragment(root, &absolute)?);
        } else if absolute.is_dir() {
            for entry in WalkDir::new(&absolute).sort_by_file_name() {
                let entry = entry.map_err(|err| {
                    CoreError::Io(err.into_io_error().unwrap_or_else(|| {
                        std::io::Error::other("walkdir loop")
                    }))
                })?;
                if entry.file_type().is_file() {
                    fragments.push(read_fragment(root, entry.path())?);
                }
            }
        } else {
            return Err(CoreError::MissingSource(absolute));
        }
    }
    Ok(fragments)
}

fn read_fragment(root: &Path, path: &Path) -> Result<Fragment> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Fragment::new(logical_path(root, path), content))
}

/// Derive a fragment's logical path: site-root relative, `/`-separated.
fn logical_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
