//! Command implementations for the Weft CLI
//!
//! Each command module handles the CLI interface and delegates to
//! weft-core for actual implementation.

pub mod build;
pub mod clean;
