// src/config.rs

//! Configuration for the live-view engine.
//!
//! The structs here deserialize from whatever configuration source the
//! embedding dashboard uses (TOML, JSON, YAML); every field has a default so
//! a partial or absent configuration still yields a working view. `Serialize`
//! is derived as well so the running configuration can be exported.

use serde::{Deserialize, Serialize};

/// Complete configuration for one live view.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Record window settings.
    pub buffer: BufferConfig,
    /// Materialized-view settings.
    pub view: ViewConfig,
    /// Render cadence settings.
    pub heartbeat: HeartbeatConfig,
}

/// Record window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Maximum records retained in the window (`K`). The flow-table default
    /// keeps the view responsive without unbounded memory.
    pub capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig { capacity: 30 }
    }
}

/// Materialized-view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Maximum rows handed to the renderer per tick; the filtered sequence
    /// is truncated to its most recent `display_count` records.
    pub display_count: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig { display_count: 50 }
    }
}

/// Render cadence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Redraw frequency. Runtime-adjustable through
    /// [`crate::messages::ViewCommand::SetFrameRate`]; clamped to at least 1.
    pub frames_per_second: u32,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        HeartbeatConfig {
            frames_per_second: 10,
        }
    }
}
