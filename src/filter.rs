// src/filter.rs

//! The user-editable filter chain.
//!
//! Filters are regular-expression fragments typed character-by-character
//! from the dashboard. Every pattern in the chain must match a record's
//! textual projection for the record to survive (logical AND). Because the
//! chain is edited live, a pattern is often transiently invalid; a pattern
//! that does not compile matches nothing (fail-closed) until further edits
//! repair it, and is never reported as an error to the caller.

use log::{trace, warn};
use regex::Regex;

/// One pattern slot: the raw text as typed plus its compiled form, if the
/// text currently compiles.
#[derive(Debug, Clone)]
struct Entry {
    raw: String,
    compiled: Option<Regex>,
}

impl Entry {
    fn empty() -> Self {
        let mut entry = Self {
            raw: String::new(),
            compiled: None,
        };
        // An empty fragment is found in every projection, so a freshly
        // opened slot restricts nothing until the user types.
        entry.recompile();
        entry
    }

    fn recompile(&mut self) {
        self.compiled = match Regex::new(&self.raw) {
            Ok(re) => Some(re),
            Err(_) => {
                warn!("filter pattern {:?} does not compile, matching nothing", self.raw);
                None
            }
        };
    }
}

/// Ordered chain of conjunctive filter patterns.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    entries: Vec<Entry>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new empty pattern slot; subsequent `push_char` calls edit it.
    pub fn begin_entry(&mut self) {
        self.entries.push(Entry::empty());
    }

    /// Appends one character to the pattern being composed. Opens a slot
    /// first if none exists.
    pub fn push_char(&mut self, c: char) {
        if self.entries.is_empty() {
            self.entries.push(Entry::empty());
        }
        let entry = self.entries.last_mut().unwrap();
        entry.raw.push(c);
        entry.recompile();
    }

    /// Removes the trailing character of the pattern being composed.
    /// On an empty last slot, removes the slot itself, so repeated
    /// backspace first empties a term, then deletes it.
    pub fn backspace(&mut self) {
        let Some(entry) = self.entries.last_mut() else {
            return;
        };
        if entry.raw.is_empty() {
            self.entries.pop();
            return;
        }
        entry.raw.pop();
        entry.recompile();
    }

    /// Deletes one completed pattern by value. Unknown patterns are ignored.
    pub fn remove(&mut self, pattern: &str) {
        if let Some(at) = self.entries.iter().position(|e| e.raw == pattern) {
            self.entries.remove(at);
        }
    }

    /// Drops every pattern.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The raw pattern texts, in chain order.
    pub fn patterns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.raw.clone()).collect()
    }

    /// Number of pattern slots (including one being composed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the chain restricts nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff every pattern matches `projection`. Short-circuits on the
    /// first failing pattern; an empty chain matches everything; a pattern
    /// that failed to compile matches nothing.
    pub fn matches(&self, projection: &str) -> bool {
        for entry in &self.entries {
            match &entry.compiled {
                Some(re) if re.is_match(projection) => {}
                _ => {
                    trace!("filter {:?} rejected record", entry.raw);
                    return false;
                }
            }
        }
        true
    }
}
