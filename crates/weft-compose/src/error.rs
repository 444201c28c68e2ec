//! Error types for fragment composition.

use thiserror::Error;

/// Errors that can occur while composing an output unit.
///
/// Every error is scoped to a single output unit: a failure aborts that
/// unit's build but never affects sibling units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// A piece of the assembled stream carried no recoverable origin marker.
    #[error("fragment at stream position {index} has no recoverable origin marker")]
    MalformedFragment { index: usize },

    /// A fragment's path or content contains a reserved wire-format token.
    #[error("fragment '{path}' collides with reserved token {token:?}")]
    ReservedToken { path: String, token: &'static str },

    /// An import directive referenced a path that is not in the document map.
    #[error("'{document}' imports '{referenced}', which is not in the document map")]
    UnresolvedImport { document: String, referenced: String },

    /// Import resolution did not converge within the iteration bound.
    #[error("imports of '{path}' do not converge; cyclic imports suspected")]
    CyclicImport { path: String },

    /// An environment directive referenced a variable that is not set.
    #[error("environment variable '{name}' is not set")]
    MissingEnvVar { name: String },
}

/// Result type for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;
