/*
 * env.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Environment directive substitution.
//!
//! After compaction, the final markup may still carry `{@ENV('<NAME>')}`
//! directives. Each one is replaced with the value of the named environment
//! variable, looked up through an [`EnvSource`] so that tests never have to
//! mutate the real process environment.

use crate::directive::{self, ENV_OPEN};
use crate::error::{ComposeError, ComposeResult};

/// Source of environment values.
pub trait EnvSource {
    /// Look up a variable by exact, case-sensitive name.
    fn get(&self, name: &str) -> Option<String>;
}

/// Source backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Source backed by an in-memory map (for tests and embedding).
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: std::collections::HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, returning `self` for chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// What to do when a referenced variable is not set.
///
/// The engine never silently emits an unintended literal for an unset
/// variable; the caller must pick one of these policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingEnvPolicy {
    /// Fail the output unit with [`ComposeError::MissingEnvVar`].
    #[default]
    Fail,
    /// Substitute the empty string.
    Empty,
}

/// Replace every environment directive in `markup` with its value.
///
/// All literal occurrences of each directive text are replaced.
pub fn substitute_env(
    markup: &str,
    env: &dyn EnvSource,
    policy: MissingEnvPolicy,
) -> ComposeResult<String> {
    let mut output = markup.to_string();
    for found in directive::scan(markup, ENV_OPEN) {
        let value = match env.get(&found.argument) {
            Some(value) => value,
            None => match policy {
                MissingEnvPolicy::Fail => {
                    return Err(ComposeError::MissingEnvVar {
                        name: found.argument,
                    });
                }
                MissingEnvPolicy::Empty => String::new(),
            },
        };
        output = output.replace(&found.text, &value);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitute_known_variable() {
        let env = MemoryEnv::new().set("STAGE", "prod");
        let output = substitute_env(
            "<p>{@ENV('STAGE')}</p>",
            &env,
            MissingEnvPolicy::Fail,
        )
        .unwrap();
        assert_eq!(output, "<p>prod</p>");
    }

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let env = MemoryEnv::new().set("X", "1");
        let output =
            substitute_env("{@ENV('X')}{@ENV('X')}", &env, MissingEnvPolicy::Fail).unwrap();
        assert_eq!(output, "11");
    }

    #[test]
    fn test_missing_variable_fails_by_default() {
        let env = MemoryEnv::new();
        assert_eq!(
            substitute_env("{@ENV('NOPE')}", &env, MissingEnvPolicy::Fail).unwrap_err(),
            ComposeError::MissingEnvVar {
                name: "NOPE".to_string()
            }
        );
    }

    #[test]
    fn test_missing_variable_empty_policy() {
        let env = MemoryEnv::new();
        let output =
            substitute_env("a{@ENV('NOPE')}b", &env, MissingEnvPolicy::Empty).unwrap();
        assert_eq!(output, "ab");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let env = MemoryEnv::new().set("stage", "dev");
        assert!(
            substitute_env("{@ENV('STAGE')}", &env, MissingEnvPolicy::Fail).is_err()
        );
    }

    #[test]
    fn test_markup_without_directives_is_unchanged() {
        let env = MemoryEnv::new();
        let output = substitute_env("<p>plain</p>", &env, MissingEnvPolicy::Fail).unwrap();
        assert_eq!(output, "<p>plain</p>");
    }
}
