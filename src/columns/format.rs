// src/columns/format.rs

//! Field formatting: the total `format_field(record, id) -> text` function.
//!
//! Every rule returns a placeholder for absent or null fields and falls
//! back to generic stringification on type surprises; a degraded cell is
//! the user-visible failure mode here, never an error.

use crate::columns::{spec, FormatRule, RAW_COLUMN};
use crate::record::Record;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

/// Text shown for absent or null fields.
pub const PLACEHOLDER: &str = "n/a";

/// IP protocol number → name, per IANA assigned numbers.
static PROTOCOL_NAMES: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "ICMP"),
        (2, "IGMP"),
        (6, "TCP"),
        (17, "UDP"),
        (41, "IPv6"),
        (47, "GRE"),
        (50, "ESP"),
        (51, "AH"),
        (58, "ICMPv6"),
        (89, "OSPF"),
        (132, "SCTP"),
    ])
});

/// Flow direction code → label.
static DIRECTION_NAMES: Lazy<HashMap<u64, &'static str>> =
    Lazy::new(|| HashMap::from([(0, "ingress"), (1, "egress")]));

/// DSCP code → per-hop-behavior name.
static DSCP_NAMES: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0, "BE"),
        (8, "CS1"),
        (10, "AF11"),
        (12, "AF12"),
        (14, "AF13"),
        (16, "CS2"),
        (18, "AF21"),
        (20, "AF22"),
        (22, "AF23"),
        (24, "CS3"),
        (26, "AF31"),
        (28, "AF32"),
        (30, "AF33"),
        (32, "CS4"),
        (34, "AF41"),
        (36, "AF42"),
        (38, "AF43"),
        (40, "CS5"),
        (46, "EF"),
        (48, "CS6"),
        (56, "CS7"),
    ])
});

/// Formats one column of one record. Total: unknown column ids fall back to
/// generic stringification, and the raw pseudo column renders the whole
/// record projection.
pub fn format_field(record: &Record, column_id: &str) -> String {
    if column_id == RAW_COLUMN {
        return record.projection();
    }

    let Some(value) = record.field(column_id) else {
        return PLACEHOLDER.to_string();
    };
    if value.is_null() {
        return PLACEHOLDER.to_string();
    }

    match spec(column_id).rule {
        FormatRule::Bytes => match value.as_u64() {
            Some(n) => human_bytes(n),
            None => generic(value),
        },
        FormatRule::DurationMillis => match value.as_i64() {
            Some(ms) => human_millis(ms),
            None => generic(value),
        },
        FormatRule::Protocol => coded(value, &PROTOCOL_NAMES),
        FormatRule::Direction => coded(value, &DIRECTION_NAMES),
        FormatRule::Dscp => coded(value, &DSCP_NAMES),
        FormatRule::Generic => generic(value),
    }
}

/// Coded numeric field: table lookup, raw number stringified when unknown.
fn coded(value: &Value, table: &HashMap<u64, &'static str>) -> String {
    match value.as_u64() {
        Some(code) => match table.get(&code) {
            Some(name) => (*name).to_string(),
            None => code.to_string(),
        },
        None => generic(value),
    }
}

/// Generic stringification: strings bare, arrays comma-joined, scalars via
/// their JSON rendering.
pub fn generic(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(generic)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => PLACEHOLDER.to_string(),
        other => other.to_string(),
    }
}

/// Binary-prefixed human byte size: "456B", "6KB", "1.5MB".
pub fn human_bytes(n: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if n < 1024 {
        return format!("{n}B");
    }
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if value >= 10.0 || value.fract() < 0.05 {
        format!("{:.0}{}", value, UNITS[unit])
    } else {
        format!("{:.1}{}", value, UNITS[unit])
    }
}

/// Millisecond duration, scaled: "340ms", "12.5s", "3.2m", "1.1h".
pub fn human_millis(ms: i64) -> String {
    if ms < 0 {
        // Clock skew upstream; show the raw value rather than guess.
        return format!("{ms}ms");
    }
    let ms = ms as f64;
    if ms < 1000.0 {
        format!("{ms:.0}ms")
    } else if ms < 60_000.0 {
        format!("{:.1}s", ms / 1000.0)
    } else if ms < 3_600_000.0 {
        format!("{:.1}m", ms / 60_000.0)
    } else {
        format!("{:.1}h", ms / 3_600_000.0)
    }
}
