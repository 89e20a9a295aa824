// src/live/mod.rs

//! The shared dashboard context: one object owning every piece of
//! display-relevant mutable state behind a single coarse lock.
//!
//! Producers (one per network source) call [`LiveView::append`]; the input
//! layer funnels UI intents through [`LiveView::apply`]; the heartbeat calls
//! [`LiveView::materialize`] once per tick. Each mutation is "read current
//! state, compute next state, write it back" inside one critical section.
//! Row formatting runs on the already-published snapshot outside the lock,
//! so producers are never blocked on rendering.

use crate::buffer::RecordBuffer;
use crate::columns::{project, Column};
use crate::config::Config;
use crate::cycle::{display_modes, enrichments, OptionCycle};
use crate::filter::FilterChain;
use crate::messages::ViewCommand;
use crate::record::Fields;
use crate::record::Record;
use crate::view::{DisplayedSet, Materializer, RenderFrame, StatusSnapshot};
use log::{debug, info, trace};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Everything the dashboard can mutate, guarded as one unit.
#[derive(Debug)]
struct State {
    buffer: RecordBuffer,
    filters: FilterChain,
    modes: OptionCycle,
    enrichments: OptionCycle,
    column_override: Vec<String>,
    paused: bool,
    ended: bool,
    frames_per_second: u32,
    display_count: usize,
    started_at: Instant,
    materializer: Materializer,
    published: DisplayedSet,
}

/// Handle to one live view. Cheap to clone; all clones share the same
/// state.
#[derive(Debug, Clone)]
pub struct LiveView {
    state: Arc<Mutex<State>>,
}

impl LiveView {
    pub fn new(config: &Config) -> Self {
        info!(
            "LiveView: window capacity {}, display count {}, {} fps",
            config.buffer.capacity, config.view.display_count, config.heartbeat.frames_per_second
        );
        Self {
            state: Arc::new(Mutex::new(State {
                buffer: RecordBuffer::new(config.buffer.capacity),
                filters: FilterChain::new(),
                modes: display_modes(),
                enrichments: enrichments(),
                column_override: Vec::new(),
                paused: false,
                ended: false,
                frames_per_second: config.heartbeat.frames_per_second.max(1),
                display_count: config.view.display_count,
                started_at: Instant::now(),
                materializer: Materializer::new(),
                published: DisplayedSet::default(),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock means a panic mid-mutation somewhere else; the
        // state itself is still structurally sound (no partial inserts are
        // observable), so keep serving rather than cascade the panic.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Appends one decoded record. Returns the assigned sequence number, or
    /// `None` when the record was dropped because the view is paused or the
    /// capture has ended.
    pub fn append(&self, fields: Fields) -> Option<u64> {
        let mut state = self.lock();
        if state.paused || state.ended {
            trace!("append: dropped (paused={}, ended={})", state.paused, state.ended);
            return None;
        }
        Some(state.buffer.append(fields))
    }

    /// Applies one UI command as a single atomic mutation.
    pub fn apply(&self, command: ViewCommand) {
        debug!("apply: {:?}", command);
        {
            let mut state = self.lock();
            match command {
                ViewCommand::NextDisplayMode => state.modes.next(),
                ViewCommand::PrevDisplayMode => state.modes.prev(),
                ViewCommand::NextEnrichment => state.enrichments.next(),
                ViewCommand::PrevEnrichment => state.enrichments.prev(),
                ViewCommand::TogglePause => {
                    state.paused = !state.paused;
                    info!("capture {}", if state.paused { "paused" } else { "resumed" });
                }
                ViewCommand::BeginFilter => state.filters.begin_entry(),
                ViewCommand::FilterChar(c) => state.filters.push_char(c),
                ViewCommand::FilterBackspace => state.filters.backspace(),
                ViewCommand::RemoveFilter(pattern) => state.filters.remove(&pattern),
                ViewCommand::ClearFilters => state.filters.clear(),
                ViewCommand::SetColumnOverride(ids) => state.column_override = ids,
                ViewCommand::ToggleColumn(id) => {
                    if let Some(at) = state.column_override.iter().position(|c| *c == id) {
                        state.column_override.remove(at);
                    } else {
                        state.column_override.push(id);
                    }
                }
                ViewCommand::SetFrameRate(fps) => {
                    state.frames_per_second = fps.max(1);
                    info!("frame rate set to {}/s", state.frames_per_second);
                }
                ViewCommand::ForceRefresh => {
                    drop(state);
                    self.materialize();
                    return;
                }
                ViewCommand::EndCapture => {
                    state.ended = true;
                    info!("capture ended");
                }
            }
        }
    }

    /// Runs one materializer pass and publishes the result.
    ///
    /// The pipeline (snapshot → reconcile → filter → truncate) runs inside
    /// the critical section, bounded by the window capacity and the display
    /// count, while per-cell text formatting runs on the published copy
    /// after the lock is released.
    pub fn materialize(&self) -> RenderFrame {
        let (set, status) = {
            let mut state = self.lock();
            let snapshot = state.buffer.snapshot();
            let columns = project(&state.modes, &state.enrichments, &state.column_override);
            let chain = state.filters.clone();
            let display_count = state.display_count;
            let set = state
                .materializer
                .materialize(snapshot, &chain, columns, display_count);
            state.published = set.clone();
            (set, Self::status_of(&state))
        };
        RenderFrame {
            rows: set.rows(),
            columns: set.columns,
            status,
        }
    }

    /// The columns of the last published displayed set.
    pub fn current_columns(&self) -> Vec<Column> {
        self.lock().published.columns.clone()
    }

    /// The projected text rows of the last published displayed set.
    /// Formatting happens outside the critical section.
    pub fn current_rows(&self) -> Vec<Vec<String>> {
        let published = self.lock().published.clone();
        published.rows()
    }

    /// The records of the last published displayed set.
    pub fn displayed_records(&self) -> Vec<Arc<Record>> {
        self.lock().published.records.clone()
    }

    /// A read-only copy of the live record window.
    pub fn snapshot(&self) -> Vec<Arc<Record>> {
        self.lock().buffer.snapshot()
    }

    /// The current status strings' source data.
    pub fn status(&self) -> StatusSnapshot {
        Self::status_of(&self.lock())
    }

    fn status_of(state: &State) -> StatusSnapshot {
        StatusSnapshot {
            elapsed: state.started_at.elapsed(),
            records_accepted: state.buffer.accepted(),
            total_bytes: state.buffer.total_bytes(),
            mode: state.modes.current().name.to_string(),
            enrichment: state.enrichments.current().name.to_string(),
            filters: state.filters.patterns(),
            paused: state.paused,
        }
    }

    /// True while ingestion is suspended.
    pub fn paused(&self) -> bool {
        self.lock().paused
    }

    /// True once the capture-ended signal was raised.
    pub fn ended(&self) -> bool {
        self.lock().ended
    }

    /// Raises the capture-ended signal (same effect as
    /// [`ViewCommand::EndCapture`]).
    pub fn end(&self) {
        self.apply(ViewCommand::EndCapture);
    }

    /// The sleep interval between render ticks, from the current frame
    /// rate.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.lock().frames_per_second.max(1);
        Duration::from_secs_f64(1.0 / f64::from(fps))
    }
}

#[cfg(test)]
mod tests;
