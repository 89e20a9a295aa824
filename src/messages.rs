// src/messages.rs

//! Command messages from the dashboard's input layer into the view core.
//!
//! The renderer (external) forwards raw key and navigation events as
//! discrete `ViewCommand`s; the core consumes them through
//! [`crate::live::LiveView::apply`]. This keeps the core free of any
//! dependency on a specific input or rendering toolkit.
//!
//! ```text
//! Renderer (keys/buttons)
//!      ↓
//!  [ViewCommand] → LiveView::apply → state mutation
//!      ↑
//!  [RenderFrame] ← Heartbeat ← materializer pass
//! ```

/// A discrete UI intent.
///
/// # Contract
///
/// **Sender** (renderer/input layer): translates raw key events into
/// commands and forwards them in the order they occurred.
///
/// **Receiver** (`LiveView::apply`): applies each command as one atomic
/// state mutation. Commands never fail; out-of-range or inapplicable
/// commands degrade to no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Advance the display-mode cycle.
    NextDisplayMode,
    /// Step the display-mode cycle back.
    PrevDisplayMode,
    /// Advance the enrichment cycle.
    NextEnrichment,
    /// Step the enrichment cycle back.
    PrevEnrichment,
    /// Toggle the ingestion pause flag. While paused, appended records are
    /// dropped (not queued); the heartbeat keeps running.
    TogglePause,
    /// Open a new empty filter slot (the user is about to type a term).
    BeginFilter,
    /// Append one character to the filter term being composed.
    FilterChar(char),
    /// Remove the trailing character of the term being composed; on an
    /// empty term, removes the slot.
    FilterBackspace,
    /// Delete one completed filter pattern by value.
    RemoveFilter(String),
    /// Drop every filter pattern.
    ClearFilters,
    /// Replace the explicit column override list. An empty list returns
    /// column selection to the option cycles.
    SetColumnOverride(Vec<String>),
    /// Toggle one column id in or out of the override list.
    ToggleColumn(String),
    /// Set the heartbeat frequency; clamped to at least 1.
    SetFrameRate(u32),
    /// Run a materializer pass immediately instead of waiting for the next
    /// tick.
    ForceRefresh,
    /// Raise the capture-ended signal; the heartbeat loop exits after its
    /// current tick.
    EndCapture,
}
