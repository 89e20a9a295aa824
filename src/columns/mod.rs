// src/columns/mod.rs

//! Column projection: from option-cycle state (or an explicit user
//! override) to the ordered list of columns the table renders.
//!
//! The registry of known optional fields lives here; formatting rules for
//! individual fields live in [`format`].

pub mod format;

use crate::cycle::{OptionCycle, ENRICHMENT_NONE, MODE_RAW, MODE_STANDARD};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How a column's values are rendered. Dispatched by
/// [`format::format_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Binary-prefixed human byte size ("456B", "6KB").
    Bytes,
    /// Integer millisecond count, scaled and suffixed ("340ms", "12.5s").
    DurationMillis,
    /// IP protocol number → name ("TCP"), raw number when unknown.
    Protocol,
    /// Direction code → label ("ingress"/"egress").
    Direction,
    /// DSCP code → per-hop-behavior name ("EF", "AF41").
    Dscp,
    /// Direct stringification; arrays comma-joined.
    Generic,
}

/// Static description of one known column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub width: usize,
    pub rule: FormatRule,
}

/// One projected column: the field id it reads plus its display spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub width: usize,
}

/// The identity column always leading a composed view.
pub const IDENTITY_COLUMN: &str = "te";

/// Pseudo column id carrying the whole-record projection in raw mode.
pub const RAW_COLUMN: &str = "record";

/// Fallback address pair shown when enrichment is "none".
const ENRICHMENT_FALLBACK: [&str; 2] = ["sa", "da"];

/// Fixed structural columns between enrichment and mode columns.
const STRUCTURAL_COLUMNS: [&str; 3] = ["in", "out", "dir"];

/// Baseline optional columns shown in the "standard" display mode.
const STANDARD_FALLBACK: [&str; 5] = ["pr", "sp", "dp", "byt", "pkt"];

/// Display width for column ids absent from the registry.
const DEFAULT_WIDTH: usize = 12;

/// Registry of every column id the dashboard knows how to describe.
/// Ids not present here still format (fail-closed to generic stringify)
/// but are dropped from display-mode member lists.
static REGISTRY: Lazy<HashMap<&'static str, ColumnSpec>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut put = |id, title, width, rule| {
        m.insert(id, ColumnSpec { title, width, rule });
    };
    put("te", "END", 14, FormatRule::Generic);
    put("ts", "START", 14, FormatRule::Generic);
    put("td", "DURATION", 10, FormatRule::DurationMillis);
    put("sa", "SRC ADDR", 18, FormatRule::Generic);
    put("da", "DST ADDR", 18, FormatRule::Generic);
    put("sp", "SPORT", 6, FormatRule::Generic);
    put("dp", "DPORT", 6, FormatRule::Generic);
    put("pr", "PROTO", 6, FormatRule::Protocol);
    put("byt", "BYTES", 8, FormatRule::Bytes);
    put("pkt", "PACKETS", 8, FormatRule::Generic);
    put("in", "IN IF", 6, FormatRule::Generic);
    put("out", "OUT IF", 6, FormatRule::Generic);
    put("dir", "DIR", 7, FormatRule::Direction);
    put("dscp", "DSCP", 6, FormatRule::Dscp);
    put("tos", "TOS", 5, FormatRule::Generic);
    put("flags", "FLAGS", 9, FormatRule::Generic);
    put("sas", "SRC AS", 8, FormatRule::Generic);
    put("das", "DST AS", 8, FormatRule::Generic);
    put("scc", "SRC GEO", 7, FormatRule::Generic);
    put("dcc", "DST GEO", 7, FormatRule::Generic);
    put("shost", "SRC NAME", 20, FormatRule::Generic);
    put("dhost", "DST NAME", 20, FormatRule::Generic);
    put("record", "RECORD", 0, FormatRule::Generic);
    m
});

/// Looks up a column's spec; unknown ids get a generic spec with the
/// default width and the id itself as title.
pub fn spec(id: &str) -> ColumnSpec {
    REGISTRY.get(id).copied().unwrap_or(ColumnSpec {
        title: "",
        width: DEFAULT_WIDTH,
        rule: FormatRule::Generic,
    })
}

/// True when `id` names a known optional field.
pub fn is_registered(id: &str) -> bool {
    REGISTRY.contains_key(id)
}

fn column(id: &str) -> Column {
    let spec = spec(id);
    let title = if spec.title.is_empty() {
        id.to_ascii_uppercase()
    } else {
        spec.title.to_string()
    };
    Column {
        id: id.to_string(),
        title,
        width: spec.width,
    }
}

/// Derives the active column set.
///
/// Precedence: a non-empty user override wins outright; the raw display
/// mode collapses to the whole-record pseudo column; otherwise the view is
/// composed of the identity column, the active enrichment's members (or the
/// address fallback), the fixed structural columns, and the active display
/// mode's members filtered against the registry (or the standard baseline).
pub fn project(
    modes: &OptionCycle,
    enrichments: &OptionCycle,
    override_ids: &[String],
) -> Vec<Column> {
    if !override_ids.is_empty() {
        return override_ids.iter().map(|id| column(id)).collect();
    }

    if modes.current().name == MODE_RAW {
        return vec![column(RAW_COLUMN)];
    }

    let mut ids: Vec<String> = vec![IDENTITY_COLUMN.to_string()];

    if enrichments.current().name == ENRICHMENT_NONE {
        ids.extend(ENRICHMENT_FALLBACK.iter().map(|s| s.to_string()));
    } else {
        ids.extend(enrichments.members().iter().map(|s| s.to_string()));
    }

    ids.extend(STRUCTURAL_COLUMNS.iter().map(|s| s.to_string()));

    if modes.current().name == MODE_STANDARD {
        ids.extend(STANDARD_FALLBACK.iter().map(|s| s.to_string()));
    } else {
        ids.extend(
            modes
                .members()
                .iter()
                .filter(|id| is_registered(id))
                .map(|s| s.to_string()),
        );
    }

    ids.iter().map(|id| column(id)).collect()
}

#[cfg(test)]
mod tests;
