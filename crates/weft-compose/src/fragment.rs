/*
 * fragment.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fragment tagging and stream assembly.
//!
//! A fragment enters the engine as raw text plus a logical path. Tagging
//! prepends a removable origin marker so that a whole group of fragments can
//! travel through one transport buffer and still be split back into an
//! addressable document map.
//!
//! The marker and separator literals are implementation-private wire format
//! between this module and [`crate::document::DocumentMap`]; they never
//! appear in author-facing output.

use crate::error::{ComposeError, ComposeResult};

/// Opens an origin marker. The logical path follows immediately.
pub(crate) const MARKER_PREFIX: &str = "__MARKED_FILE:/";

/// Closes an origin marker.
pub(crate) const MARKER_SUFFIX: &str = "__";

/// Separates tagged fragments inside an assembled stream.
pub(crate) const SEPARATOR: &str = "__SEPARATOR__";

/// Tokens that must not occur in a fragment's raw content. No escaping is
/// performed, so a collision would silently misalign the split; we fail
/// loudly at tag time instead.
const RESERVED_IN_CONTENT: [&str; 2] = ["__MARKED_FILE:", SEPARATOR];

/// One unit of raw source markup plus its logical path identity.
///
/// `path` is a filesystem-relative identifier, unique within one build
/// invocation of a task group; `content` is raw, unparsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: String,
    pub content: String,
}

impl Fragment {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Wrap a fragment's content with its origin marker.
///
/// The path is encoded verbatim, with no transformation or escaping, so the
/// document map builder can recover it losslessly. Fails if the path or the
/// content contains a reserved wire-format token.
pub fn tag(fragment: &Fragment) -> ComposeResult<String> {
    // The marker is closed by `__`, so a path containing it would truncate.
    if fragment.path.contains(MARKER_SUFFIX) {
        return Err(ComposeError::ReservedToken {
            path: fragment.path.clone(),
            token: MARKER_SUFFIX,
        });
    }
    for token in RESERVED_IN_CONTENT {
        if fragment.content.contains(token) {
            return Err(ComposeError::ReservedToken {
                path: fragment.path.clone(),
                token,
            });
        }
    }
    Ok(format!(
        "{MARKER_PREFIX}{}{MARKER_SUFFIX}{}",
        fragment.path, fragment.content
    ))
}

/// Concatenate tagged fragments into one transport buffer.
///
/// Order is preserved exactly as supplied: deterministic ordering matters
/// for reproducible builds and for the last-write-wins duplicate-path rule.
pub fn assemble(tagged: &[String]) -> String {
    tagged.join(SEPARATOR)
}
