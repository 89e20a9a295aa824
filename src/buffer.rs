// src/buffer.rs

//! The bounded, time-ordered window of live records.
//!
//! `RecordBuffer` is the single store producers append into and the
//! materializer snapshots out of. It keeps records sorted by the display
//! ordering key (ties broken by sequence number), and evicts the oldest
//! entries once the configured capacity is exceeded, like a scrollback
//! buffer whose history is capped.
//!
//! The buffer itself is a plain data structure; thread safety comes from the
//! single coarse lock in [`crate::live::LiveView`] that owns it. Records are
//! stored behind `Arc` so `snapshot()` is a cheap clone of handles rather
//! than a deep copy.

use crate::record::{Fields, Record};
use log::trace;
use std::sync::Arc;

/// Capacity-bounded, sort-ordered record store.
#[derive(Debug)]
pub struct RecordBuffer {
    records: Vec<Arc<Record>>,
    capacity: usize,
    next_seq: u64,
    accepted: u64,
    total_bytes: u64,
}

impl RecordBuffer {
    /// Creates an empty buffer holding at most `capacity` records.
    /// Capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
            next_seq: 0,
            accepted: 0,
            total_bytes: 0,
        }
    }

    /// Appends one decoded record: assigns the next sequence number, inserts
    /// at its sort position and evicts the oldest entries beyond capacity.
    ///
    /// Returns the assigned sequence number. Never fails; a record with a
    /// malformed ordering field sorts as earliest (see
    /// [`Record::sort_key`]).
    pub fn append(&mut self, fields: Fields) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        let record = Arc::new(Record::new(seq, fields));
        self.accepted += 1;
        self.total_bytes += record.byte_count().unwrap_or(0);

        // Records mostly arrive in time order, so the partition point is
        // usually the tail and the insert is effectively a push.
        let key = (record.sort_key(), seq);
        let at = self
            .records
            .partition_point(|r| (r.sort_key(), r.seq()) <= key);
        self.records.insert(at, record);

        if self.records.len() > self.capacity {
            let excess = self.records.len() - self.capacity;
            trace!("buffer over capacity, evicting {} oldest", excess);
            self.records.drain(..excess);
        }
        debug_assert!(self.records.len() <= self.capacity);

        seq
    }

    /// A read-only copy of the current contents, oldest first.
    ///
    /// The returned handles are immune to subsequent appends and evictions,
    /// so filtering and rendering never race with ingestion.
    pub fn snapshot(&self) -> Vec<Arc<Record>> {
        self.records.clone()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured capacity `K`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total records ever accepted (including since-evicted ones).
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Cumulative byte count across all accepted records.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}
