/*
 * directive.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Deterministic directive scanning.
//!
//! Directives are inline textual instructions embedded in markup, e.g.
//! `{@IMPORT('commons/nav.html')}` or `{@ENV('STAGE')}`. Both kinds share
//! one grammar: an opening sentinel, a bounded argument, and a closing
//! sentinel. Scanning is a plain left-to-right string walk, so arbitrary
//! markup between directives costs linear time.

/// Opening sentinel of an import directive.
pub(crate) const IMPORT_OPEN: &str = "{@IMPORT('";

/// Opening sentinel of an environment directive.
pub(crate) const ENV_OPEN: &str = "{@ENV('";

/// Closing sentinel shared by both directive kinds.
const CLOSE: &str = "')}";

/// One scanned directive occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive {
    /// The full directive text as it appears in the markup.
    pub text: String,
    /// The argument between the sentinels, verbatim.
    pub argument: String,
}

/// Scan `content` for directives with the given opening sentinel, in
/// left-to-right order. An opener with no closer of its own is not a
/// directive; it stays plain text and scanning continues past it. An
/// argument never spans another directive's opening sentinel, so an
/// unterminated opener cannot swallow a later, well-formed directive.
pub(crate) fn scan(content: &str, open: &str) -> Vec<Directive> {
    let mut directives = Vec::new();
    let mut at = 0;
    while let Some(found) = content[at..].find(open) {
        let start = at + found;
        let arg_start = start + open.len();
        match content[arg_start..].find(CLOSE) {
            Some(found_close) => {
                let arg_end = arg_start + found_close;
                // A closer that belongs to a directive further right means
                // this opener was never terminated: leave it as plain text.
                if content[arg_start..arg_end].contains("{@") {
                    at = arg_start;
                    continue;
                }
                let end = arg_end + CLOSE.len();
                directives.push(Directive {
                    text: content[start..end].to_string(),
                    argument: content[arg_start..arg_end].to_string(),
                });
                at = end;
            }
            None => at = arg_start,
        }
    }
    directives
}
