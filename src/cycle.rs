// src/cycle.rs

//! Option cycles: fixed catalogs of named, mutually exclusive selection
//! groups with wrap-around navigation.
//!
//! Two independent cycles exist per dashboard context: one for display
//! modes (what columns to show) and one for enrichment scopes (what derived
//! columns to add). Both are fixed-size arrays with an index cursor; member
//! lists never change after startup, only the cursor moves.

use log::trace;

/// One selection group in a catalog.
///
/// `members` is the group's own column-id list. `group` is non-empty only
/// for composite entries: it names sibling entries whose members are
/// aggregated by [`OptionCycle::members`], which lets a catalog carry an
/// "all" entry that is the union of several scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntry {
    pub name: &'static str,
    pub members: Vec<&'static str>,
    pub group: Vec<&'static str>,
}

impl CycleEntry {
    fn plain(name: &'static str, members: &[&'static str]) -> Self {
        Self {
            name,
            members: members.to_vec(),
            group: Vec::new(),
        }
    }

    fn grouped(name: &'static str, group: &[&'static str]) -> Self {
        Self {
            name,
            members: Vec::new(),
            group: group.to_vec(),
        }
    }
}

/// A navigable catalog of selection groups.
#[derive(Debug, Clone)]
pub struct OptionCycle {
    entries: Vec<CycleEntry>,
    cursor: usize,
}

impl OptionCycle {
    /// Builds a cycle from a fixed catalog. Catalogs are never empty; this
    /// is a startup-time programming invariant.
    pub fn new(entries: Vec<CycleEntry>) -> Self {
        debug_assert!(!entries.is_empty(), "option cycle catalog must not be empty");
        Self { entries, cursor: 0 }
    }

    /// Advances the cursor, wrapping past the last entry.
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.entries.len();
        trace!("cycle -> {}", self.current().name);
    }

    /// Moves the cursor back, wrapping from 0 to the last entry.
    pub fn prev(&mut self) {
        self.cursor = (self.cursor + self.entries.len() - 1) % self.entries.len();
        trace!("cycle -> {}", self.current().name);
    }

    /// The active entry.
    pub fn current(&self) -> &CycleEntry {
        // The cursor is maintained in range by next()/prev(); clamp anyway
        // rather than panic if that invariant is ever broken.
        let at = self.cursor.min(self.entries.len() - 1);
        debug_assert_eq!(at, self.cursor);
        &self.entries[at]
    }

    /// The active entry's member ids. For a composite entry this is the
    /// union of the members of every sibling named in its group reference,
    /// first-seen order, deduplicated.
    pub fn members(&self) -> Vec<&'static str> {
        let current = self.current();
        if current.group.is_empty() {
            return current.members.clone();
        }
        let mut union: Vec<&'static str> = Vec::new();
        for name in &current.group {
            if let Some(entry) = self.entries.iter().find(|e| e.name == *name) {
                for id in &entry.members {
                    if !union.contains(id) {
                        union.push(id);
                    }
                }
            }
        }
        union
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Catalogs are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position (for status display and tests).
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// The display-mode catalog: which optional columns the table shows.
///
/// "standard" is the baseline (the projector substitutes its fixed fallback
/// set); "raw" collapses the table to the whole-record pseudo column.
pub fn display_modes() -> OptionCycle {
    OptionCycle::new(vec![
        CycleEntry::plain("standard", &[]),
        CycleEntry::plain("traffic", &["byt", "pkt", "td"]),
        // "rtt" is produced by some collectors but has no registered
        // column yet; the projector drops it.
        CycleEntry::plain("transport", &["pr", "sp", "dp", "flags", "rtt"]),
        CycleEntry::plain("qos", &["dscp", "tos"]),
        CycleEntry::plain("raw", &[]),
    ])
}

/// Name of the raw display mode (whole-record pseudo column).
pub const MODE_RAW: &str = "raw";

/// Name of the baseline display mode.
pub const MODE_STANDARD: &str = "standard";

/// The enrichment catalog: derived/contextual columns added to the base
/// view. "none" means the fixed address fallback; "all" aggregates every
/// sibling scope.
pub fn enrichments() -> OptionCycle {
    OptionCycle::new(vec![
        CycleEntry::plain("none", &[]),
        CycleEntry::plain("asn", &["sas", "das"]),
        CycleEntry::plain("geo", &["scc", "dcc"]),
        CycleEntry::plain("names", &["shost", "dhost"]),
        CycleEntry::grouped("all", &["asn", "geo", "names"]),
    ])
}

/// Name of the no-enrichment entry.
pub const ENRICHMENT_NONE: &str = "none";
