//! Flowview library crate.
//!
//! The live-view engine behind an interactive capture dashboard: a bounded,
//! time-ordered window of decoded flow/packet records, a user-editable
//! filter chain, cyclable column and enrichment selection, and a
//! fixed-cadence materializer feeding an external renderer.

pub mod buffer;
pub mod columns;
pub mod config;
pub mod cycle;
pub mod filter;
pub mod heartbeat;
pub mod live;
pub mod messages;
pub mod record;
pub mod view;
