// src/record.rs

//! Decoded capture records: a dynamic field→value map plus a stable
//! sequence number assigned at append time.
//!
//! Records arrive from the external decode step already parsed into a
//! `serde_json` map (numbers, strings, bools, arrays). This module never
//! interprets the wire format; it only reads fields back out for ordering,
//! filtering and display.

use log::debug;
use serde_json::{Map, Value};
use std::fmt;

/// Field name carrying the display ordering key (flow end time, integer
/// milliseconds). Records missing it order as earliest.
pub const SORT_FIELD: &str = "te";

/// Field name carrying the record's byte count, summed into the cumulative
/// status-line total.
pub const BYTES_FIELD: &str = "byt";

/// The set of fields for one record.
pub type Fields = Map<String, Value>;

/// One decoded capture event (flow or packet summary).
///
/// Immutable once constructed. The sequence number is assigned by the record
/// buffer at append time and is the record's identity: it is unique for the
/// lifetime of the buffer and independent of sort order, so the view layer
/// can recognize a record across ticks even after re-sorting or eviction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    seq: u64,
    fields: Fields,
}

impl Record {
    /// Creates a record from decoded fields and its assigned sequence number.
    pub fn new(seq: u64, fields: Fields) -> Self {
        Self { seq, fields }
    }

    /// The buffer-assigned sequence number (stable identity).
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Borrow of the underlying field map.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Looks up one field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The display ordering key.
    ///
    /// Reads `SORT_FIELD` as an integer millisecond timestamp. A missing or
    /// non-numeric value degrades to `i64::MIN` ("earliest") so a malformed
    /// record sorts to the front of the window and ages out first; ingestion
    /// never fails on it.
    pub fn sort_key(&self) -> i64 {
        match self.fields.get(SORT_FIELD) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(i64::MIN),
            other => {
                debug!(
                    "record {}: sort field {:?} is {:?}, ordering as earliest",
                    self.seq, SORT_FIELD, other
                );
                i64::MIN
            }
        }
    }

    /// The record's byte count, if present and numeric.
    pub fn byte_count(&self) -> Option<u64> {
        self.fields.get(BYTES_FIELD).and_then(Value::as_u64)
    }

    /// The full textual projection of the record: `key=value` pairs joined
    /// by single spaces, in the map's key order.
    ///
    /// This is the text the filter chain matches against and the payload of
    /// the raw-mode pseudo column. The underlying map is BTree-backed, so
    /// the rendering is deterministic across ticks.
    pub fn projection(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(key);
            out.push('=');
            push_value_text(&mut out, value);
        }
        out
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.seq, self.projection())
    }
}

/// Renders one dynamic value as projection text. Strings are bare (no
/// quotes), arrays comma-joined, scalars via their JSON rendering.
fn push_value_text(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_value_text(out, item);
            }
        }
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields_of(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be a JSON object"),
        }
    }

    #[test]
    fn sort_key_reads_integer_end_time() {
        let r = Record::new(1, fields_of(json!({"te": 1700000000123_i64})));
        assert_eq!(r.sort_key(), 1700000000123);
    }

    #[test]
    fn sort_key_accepts_float_end_time() {
        let r = Record::new(2, fields_of(json!({"te": 1500.75})));
        assert_eq!(r.sort_key(), 1500);
    }

    #[test]
    fn missing_or_malformed_sort_field_orders_earliest() {
        let absent = Record::new(3, fields_of(json!({"sa": "10.0.0.5"})));
        let textual = Record::new(4, fields_of(json!({"te": "yesterday"})));
        assert_eq!(absent.sort_key(), i64::MIN);
        assert_eq!(textual.sort_key(), i64::MIN);
    }

    #[test]
    fn projection_is_space_joined_key_value_text() {
        let r = Record::new(
            5,
            fields_of(json!({
                "sa": "10.0.0.5",
                "dp": 443,
                "flags": ["SYN", "ACK"],
            })),
        );
        // serde_json maps iterate in sorted key order.
        assert_eq!(r.projection(), "dp=443 flags=SYN,ACK sa=10.0.0.5");
    }

    #[test]
    fn byte_count_requires_numeric_field() {
        let good = Record::new(6, fields_of(json!({"byt": 456})));
        let bad = Record::new(7, fields_of(json!({"byt": "lots"})));
        assert_eq!(good.byte_count(), Some(456));
        assert_eq!(bad.byte_count(), None);
    }
}
