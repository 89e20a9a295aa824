// src/view/mod.rs

//! The view materializer: per tick, turns the live record window plus the
//! current display state into the tuple the renderer actually paints.
//!
//! The pipeline runs Snapshotting → Reconciling → Filtering → Truncating →
//! Ready. Reconciliation keeps records that aged out of the retention window
//! while still on screen, so a visible row never vanishes just because
//! eviction raced the redraw. Filtering and truncation always run after
//! reconciliation; this ordering is deliberate and uniform across capture
//! modes.
//!
//! The renderer reads only the published [`DisplayedSet`] (and its projected
//! text rows), never the live buffer.

use crate::columns::format::format_field;
use crate::columns::Column;
use crate::filter::FilterChain;
use crate::record::Record;
use log::trace;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Materializer pipeline phase, for trace logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Snapshotting,
    Reconciling,
    Filtering,
    Truncating,
    Ready,
}

/// The last materialized result: columns plus the records behind them.
#[derive(Debug, Clone, Default)]
pub struct DisplayedSet {
    pub columns: Vec<Column>,
    pub records: Vec<Arc<Record>>,
}

impl DisplayedSet {
    /// Projects every record through every column's formatting rule.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| format_field(record, &column.id))
                    .collect()
            })
            .collect()
    }
}

/// Free-text status for the dashboard's status line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub elapsed: Duration,
    pub records_accepted: u64,
    pub total_bytes: u64,
    pub mode: String,
    pub enrichment: String,
    pub filters: Vec<String>,
    pub paused: bool,
}

impl StatusSnapshot {
    /// The status strings the renderer paints verbatim.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("elapsed: {}s", self.elapsed.as_secs()),
            format!("records: {}", self.records_accepted),
            format!(
                "bytes: {}",
                crate::columns::format::human_bytes(self.total_bytes)
            ),
            format!("mode: {} / {}", self.mode, self.enrichment),
        ];
        if !self.filters.is_empty() {
            lines.push(format!("filters: {}", self.filters.join(" & ")));
        }
        if self.paused {
            lines.push("paused".to_string());
        }
        lines
    }
}

/// One frame handed to the renderer per tick.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub status: StatusSnapshot,
}

/// Owns the cross-tick reconciliation memory and runs the per-tick
/// pipeline.
#[derive(Debug, Default)]
pub struct Materializer {
    displayed: Vec<Arc<Record>>,
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records shown by the last pass (for reconciliation and tests).
    pub fn displayed(&self) -> &[Arc<Record>] {
        &self.displayed
    }

    /// Runs one pipeline pass over an already-taken buffer snapshot and
    /// publishes the result as the new displayed set.
    ///
    /// Never fails: malformed records order as earliest (logged inside
    /// [`Record::sort_key`]) and a render cycle always completes.
    pub fn materialize(
        &mut self,
        snapshot: Vec<Arc<Record>>,
        chain: &FilterChain,
        columns: Vec<Column>,
        display_count: usize,
    ) -> DisplayedSet {
        trace!("materialize: {:?} ({} records)", Phase::Snapshotting, snapshot.len());

        trace!("materialize: {:?}", Phase::Reconciling);
        let reconciled = reconcile(&self.displayed, snapshot);

        trace!("materialize: {:?}", Phase::Filtering);
        let filtered = filter_records(reconciled, chain);

        trace!("materialize: {:?}", Phase::Truncating);
        let truncated = truncate(filtered, display_count);

        trace!("materialize: {:?} ({} rows)", Phase::Ready, truncated.len());
        self.displayed = truncated.clone();
        DisplayedSet {
            columns,
            records: truncated,
        }
    }
}

/// Prepends previously displayed records that the new snapshot no longer
/// contains (evicted while still on screen), preserving time order.
///
/// Evicted records are by definition the oldest-by-sort-order, and the
/// previous displayed set was itself time-ordered, so carrying them in
/// front of the snapshot keeps the sequence sorted.
pub fn reconcile(previous: &[Arc<Record>], snapshot: Vec<Arc<Record>>) -> Vec<Arc<Record>> {
    if previous.is_empty() {
        return snapshot;
    }
    let live: HashSet<u64> = snapshot.iter().map(|r| r.seq()).collect();
    let mut merged: Vec<Arc<Record>> = previous
        .iter()
        .filter(|r| !live.contains(&r.seq()))
        .cloned()
        .collect();
    if !merged.is_empty() {
        trace!("reconcile: carrying {} evicted record(s)", merged.len());
    }
    merged.extend(snapshot);
    merged
}

/// Applies the filter chain to each record's textual projection. An empty
/// chain passes the sequence through unchanged.
pub fn filter_records(records: Vec<Arc<Record>>, chain: &FilterChain) -> Vec<Arc<Record>> {
    if chain.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| chain.matches(&r.projection()))
        .collect()
}

/// Keeps only the most recent `display_count` records (the tail of the
/// time-ordered sequence).
pub fn truncate(records: Vec<Arc<Record>>, display_count: usize) -> Vec<Arc<Record>> {
    let display_count = display_count.max(1);
    if records.len() <= display_count {
        return records;
    }
    let skip = records.len() - display_count;
    records.into_iter().skip(skip).collect()
}
