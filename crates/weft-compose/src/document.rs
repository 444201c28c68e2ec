/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document map: splitting, import resolution, pruning, compaction.
//!
//! This is the algorithmic heart of the engine. An assembled stream is split
//! back into an insertion-ordered map of logical path to fragment content,
//! import directives are rewritten in place until none remain, documents that
//! only ever served as import targets are pruned, and the survivors are
//! concatenated and whitespace-compacted into the final markup.

use std::collections::HashSet;

use hashlink::LinkedHashMap;
use tracing::debug;

use crate::directive::{self, IMPORT_OPEN};
use crate::error::{ComposeError, ComposeResult};
use crate::fragment::{MARKER_PREFIX, MARKER_SUFFIX, SEPARATOR};

/// Insertion-ordered mapping from logical path to document content.
///
/// Built once per output unit, mutated in place by import resolution, and
/// discarded after the unit's output is written. The map is exclusively
/// owned by the resolution pass; nothing is shared across units.
#[derive(Debug, Default)]
pub struct DocumentMap {
    docs: LinkedHashMap<String, String>,
    imported: HashSet<String>,
}

impl DocumentMap {
    /// Split an assembled stream back into a document map.
    ///
    /// Each piece must carry an origin marker; the marker is stripped and
    /// its path becomes the map key. A duplicate path overwrites the earlier
    /// entry (last write wins) while keeping its original position.
    pub fn from_stream(stream: &str) -> ComposeResult<Self> {
        let mut map = Self::default();
        for (index, piece) in stream.split(SEPARATOR).enumerate() {
            let start = piece
                .find(MARKER_PREFIX)
                .ok_or(ComposeError::MalformedFragment { index })?;
            let path_start = start + MARKER_PREFIX.len();
            let path_len = piece[path_start..]
                .find(MARKER_SUFFIX)
                .ok_or(ComposeError::MalformedFragment { index })?;
            let path = &piece[path_start..path_start + path_len];
            let marker = &piece[start..path_start + path_len + MARKER_SUFFIX.len()];
            let content = piece.replacen(marker, "", 1);
            // hashlink's insert would move an existing key to the back;
            // a duplicate must overwrite in place to keep its position.
            if let Some(existing) = map.docs.get_mut(path) {
                debug!(path, "duplicate fragment path, last write wins");
                *existing = content;
            } else {
                map.docs.insert(path.to_string(), content);
            }
        }
        Ok(map)
    }

    /// Rewrite every `{@IMPORT('<path>')}` directive with the referenced
    /// document's current content, until no directive remains.
    ///
    /// Directives are resolved eagerly, left to right; content spliced in by
    /// one pass is re-scanned in the next, so nested imports propagate
    /// transitively. Each referenced path is recorded for pruning.
    ///
    /// An acyclic import chain can be at most map-size deep, so a document
    /// that still carries directives after `len + 1` passes is caught in a
    /// cycle and resolution fails rather than looping forever.
    pub fn resolve_imports(&mut self) -> ComposeResult<()> {
        let max_passes = self.docs.len() + 1;
        let paths: Vec<String> = self.docs.keys().cloned().collect();
        for path in paths {
            let Some(mut content) = self.docs.get(&path).cloned() else {
                continue;
            };
            let mut passes = 0;
            loop {
                let directives = directive::scan(&content, IMPORT_OPEN);
                if directives.is_empty() {
                    break;
                }
                passes += 1;
                if passes > max_passes {
                    return Err(ComposeError::CyclicImport { path });
                }
                for import in directives {
                    let replacement = self.docs.get(&import.argument).cloned().ok_or_else(|| {
                        ComposeError::UnresolvedImport {
                            document: path.clone(),
                            referenced: import.argument.clone(),
                        }
                    })?;
                    content = content.replace(&import.text, &replacement);
                    self.imported.insert(import.argument);
                }
            }
            if let Some(slot) = self.docs.get_mut(&path) {
                *slot = content;
            }
        }
        debug!(
            documents = self.docs.len(),
            imported = self.imported.len(),
            "imports resolved"
        );
        Ok(())
    }

    /// Remove every document that was consumed as an import target.
    ///
    /// A document that existed solely to be spliced into another should not
    /// also appear standalone in the final output. What remains are the root
    /// documents destined for output.
    pub fn prune_imported(&mut self) {
        for path in &self.imported {
            self.docs.remove(path);
        }
    }

    /// Concatenate the surviving documents in map order and compact the
    /// result: whitespace runs immediately after `>` or immediately before
    /// `<` are dropped, and all line breaks are removed.
    ///
    /// This is a textual heuristic, not a markup-aware minifier: it will
    /// also disturb whitespace-significant regions such as `pre` content.
    pub fn compact(&self) -> String {
        let mut markup = String::new();
        for content in self.docs.values() {
            markup.push_str(content);
        }
        collapse_tag_whitespace(&markup)
    }

    /// Number of documents currently in the map.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when the map holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Look up a document's current content.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.docs.get(path).map(String::as_str)
    }

    /// Logical paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}

fn collapse_tag_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if !ch.is_whitespace() {
            output.push(ch);
            continue;
        }
        // Gather the whole whitespace run before deciding its fate.
        let mut run = String::new();
        run.push(ch);
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            run.push(next);
            chars.next();
        }
        let after_tag_open = output.ends_with('>');
        let before_tag_close = chars.peek() == Some(&'<');
        if after_tag_open || before_tag_close {
            continue;
        }
        for kept in run.chars() {
            if kept != '\n' && kept != '\r' {
                output.push(kept);
            }
        }
    }
    output
}
