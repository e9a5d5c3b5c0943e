//! Session-scoped short aliases for canonical shape ids.
//!
//! DESIGN
//! ======
//! An agent refers to shapes across turns, and full ids (`shape:5f0c...`)
//! are long and easy to mangle. Each listing mints fresh aliases `s1, s2, ...`
//! in listing order. The two maps are exact inverses except where duplicate
//! ids shadow earlier aliases in the reverse map.
//!
//! A `ShapeRefMap` belongs to exactly one session. It is passed explicitly to
//! whatever needs resolution; `assign` is destructive, so sharing one map
//! between sessions would corrupt both alias sets.

#[cfg(test)]
#[path = "refs_test.rs"]
mod refs_test;

use std::collections::HashMap;

use tracing::debug;

use crate::consts::ALIAS_PREFIX;
use crate::shape::canonical_id;

/// Bidirectional alias ↔ canonical id map for one session.
#[derive(Debug, Clone, Default)]
pub struct ShapeRefMap {
    by_alias: HashMap<String, String>,
    by_id: HashMap<String, String>,
}

impl ShapeRefMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alias set with `s1..sN` for `ids` in order.
    ///
    /// Every previously issued alias becomes invalid. A repeated id receives
    /// one alias per occurrence; the reverse map keeps the last one.
    pub fn assign<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.by_alias.clear();
        self.by_id.clear();
        for (n, id) in ids.into_iter().enumerate() {
            let id = id.as_ref();
            let alias = format!("{ALIAS_PREFIX}{}", n + 1);
            self.by_alias.insert(alias.clone(), id.to_owned());
            self.by_id.insert(id.to_owned(), alias);
        }
        debug!(aliases = self.by_alias.len(), "refs: aliases assigned");
    }

    /// Map an alias, canonical id, or bare id to a canonical id.
    ///
    /// Surrounding whitespace is ignored for every input form. Never fails:
    /// unknown input is returned in canonical form and whether that id exists
    /// is the caller's question.
    #[must_use]
    pub fn resolve(&self, input: &str) -> String {
        let input = input.trim();
        match self.by_alias.get(input) {
            Some(id) => id.clone(),
            None => canonical_id(input),
        }
    }

    /// Element-wise [`ShapeRefMap::resolve`].
    #[must_use]
    pub fn resolve_all<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<String> {
        inputs.iter().map(|s| self.resolve(s.as_ref())).collect()
    }

    /// Reverse lookup; `None` unless `id` was part of the latest `assign`.
    #[must_use]
    pub fn get_ref(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Alias if one exists, else the id itself. Used when echoing shapes back.
    #[must_use]
    pub fn display<'a>(&'a self, id: &'a str) -> &'a str {
        self.get_ref(id).unwrap_or(id)
    }

    /// Number of currently assigned aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
