/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fragment composition and substitution engine for Weft.
//!
//! This crate assembles many small HTML source fragments (partial pages,
//! shared headers and footers, reusable snippets) into finished pages
//! through two inline directives:
//!
//! - Import: `{@IMPORT('<relative-path>')}` splices another fragment's
//!   content in place of the directive.
//! - Environment: `{@ENV('<NAME>')}` injects a deployment-time environment
//!   value into the final markup.
//!
//! # Pipeline
//!
//! An output unit (one page's fragment set) flows through seven stages as
//! one synchronous pass:
//!
//! ```text
//! Tag → Assemble → Split → Resolve → Prune → Compact → Substitute
//! ```
//!
//! Tagging wraps each fragment with a removable origin marker; assembly
//! joins them into one transport buffer; splitting rebuilds an addressable
//! [`DocumentMap`]; resolution rewrites import directives until none
//! remain; pruning drops fragments that were only ever import targets;
//! compaction collapses tag-adjacent whitespace; and substitution replaces
//! environment directives.
//!
//! Independent output units may be composed concurrently by the caller;
//! within one unit resolution order is semantically significant and the
//! pass is never parallelized.
//!
//! # Example
//!
//! ```
//! use weft_compose::{compose, Fragment, MemoryEnv, MissingEnvPolicy};
//!
//! let fragments = vec![
//!     Fragment::new("page.html", "{@IMPORT('header.html')}<p>{@ENV('STAGE')}</p>"),
//!     Fragment::new("header.html", "<h1>{@IMPORT('title.html')}</h1>"),
//!     Fragment::new("title.html", "Site"),
//! ];
//! let env = MemoryEnv::new().set("STAGE", "prod");
//! let html = compose(&fragments, &env, MissingEnvPolicy::Fail).unwrap();
//! assert_eq!(html, "<h1>Site</h1><p>prod</p>");
//! ```

mod directive;
pub mod document;
pub mod env;
pub mod error;
pub mod fragment;

pub use document::DocumentMap;
pub use env::{EnvSource, MemoryEnv, MissingEnvPolicy, ProcessEnv, substitute_env};
pub use error::{ComposeError, ComposeResult};
pub use fragment::{Fragment, assemble, tag};

use tracing::debug;

/// Compose one output unit into its final markup.
///
/// Runs the full pipeline over the supplied fragments, in order. All
/// entities live only for this call; nothing is cached across builds.
pub fn compose(
    fragments: &[Fragment],
    env: &dyn EnvSource,
    missing_env: MissingEnvPolicy,
) -> ComposeResult<String> {
    if fragments.is_empty() {
        return Ok(String::new());
    }
    let tagged = fragments
        .iter()
        .map(tag)
        .collect::<ComposeResult<Vec<_>>>()?;
    let stream = assemble(&tagged);
    debug!(fragments = fragments.len(), bytes = stream.len(), "assembled stream");

    let mut map = DocumentMap::from_stream(&stream)?;
    map.resolve_imports()?;
    map.prune_imported();
    debug!(roots = map.len(), "pruned to root documents");

    let markup = map.compact();
    substitute_env(&markup, env, missing_env)
}
