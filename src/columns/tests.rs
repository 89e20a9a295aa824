// src/columns/tests.rs

use super::format::{format_field, human_bytes, human_millis, PLACEHOLDER};
use super::{project, Column, IDENTITY_COLUMN, RAW_COLUMN};
use crate::cycle::{display_modes, enrichments};
use crate::record::{Fields, Record};
use serde_json::json;

fn record_of(value: serde_json::Value) -> Record {
    let fields: Fields = match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("fixture must be a JSON object"),
    };
    Record::new(0, fields)
}

fn ids(columns: &[Column]) -> Vec<&str> {
    columns.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn override_list_bypasses_cycles_entirely() {
    let modes = display_modes();
    let enrich = enrichments();
    let over = vec!["sa".to_string(), "byt".to_string()];
    let cols = project(&modes, &enrich, &over);
    assert_eq!(ids(&cols), vec!["sa", "byt"]);
}

#[test]
fn raw_mode_collapses_to_the_record_pseudo_column() {
    let mut modes = display_modes();
    let enrich = enrichments();
    modes.prev(); // last entry is "raw"
    assert_eq!(modes.current().name, "raw");
    let cols = project(&modes, &enrich, &[]);
    assert_eq!(ids(&cols), vec![RAW_COLUMN]);
}

#[test]
fn standard_mode_composes_identity_fallbacks_and_baseline() {
    let modes = display_modes();
    let enrich = enrichments();
    let cols = project(&modes, &enrich, &[]);
    assert_eq!(
        ids(&cols),
        vec!["te", "sa", "da", "in", "out", "dir", "pr", "sp", "dp", "byt", "pkt"]
    );
    assert_eq!(cols[0].id, IDENTITY_COLUMN);
    assert_eq!(cols[0].title, "END");
}

#[test]
fn active_enrichment_replaces_the_address_fallback() {
    let modes = display_modes();
    let mut enrich = enrichments();
    enrich.next(); // "asn"
    let cols = project(&modes, &enrich, &[]);
    let ids = ids(&cols);
    assert!(ids.contains(&"sas") && ids.contains(&"das"));
    assert!(!ids.contains(&"sa"));
}

#[test]
fn mode_members_append_after_the_structural_columns() {
    let mut modes = display_modes();
    let enrich = enrichments();
    modes.next(); // "traffic"
    let cols = project(&modes, &enrich, &[]);
    let ids = ids(&cols);
    assert!(ids.ends_with(&["byt", "pkt", "td"]));
}

#[test]
fn unregistered_mode_members_are_dropped() {
    let mut modes = display_modes();
    let enrich = enrichments();
    modes.next();
    modes.next(); // "transport", whose members include the unregistered "rtt"
    assert_eq!(modes.current().name, "transport");
    let cols = project(&modes, &enrich, &[]);
    let ids = ids(&cols);
    assert!(ids.ends_with(&["pr", "sp", "dp", "flags"]));
    assert!(!ids.contains(&"rtt"));
}

#[test]
fn unknown_override_ids_get_default_spec() {
    let modes = display_modes();
    let enrich = enrichments();
    let over = vec!["mystery".to_string()];
    let cols = project(&modes, &enrich, &over);
    assert_eq!(cols[0].title, "MYSTERY");
    assert!(cols[0].width > 0);
}

#[test]
fn byte_fields_scale_with_binary_prefixes() {
    assert_eq!(human_bytes(456), "456B");
    assert_eq!(human_bytes(6 * 1024), "6KB");
    assert_eq!(human_bytes(1536 * 1024), "1.5MB");
    assert_eq!(human_bytes(20 * 1024 * 1024), "20MB");
    let r = record_of(json!({"byt": 2048}));
    assert_eq!(format_field(&r, "byt"), "2KB");
}

#[test]
fn duration_fields_scale_from_millis() {
    assert_eq!(human_millis(340), "340ms");
    assert_eq!(human_millis(12_500), "12.5s");
    assert_eq!(human_millis(150_000), "2.5m");
    assert_eq!(human_millis(4_000_000), "1.1h");
    let r = record_of(json!({"td": 340}));
    assert_eq!(format_field(&r, "td"), "340ms");
}

#[test]
fn coded_fields_use_lookup_tables_with_raw_fallback() {
    let r = record_of(json!({"pr": 6, "dir": 1, "dscp": 46}));
    assert_eq!(format_field(&r, "pr"), "TCP");
    assert_eq!(format_field(&r, "dir"), "egress");
    assert_eq!(format_field(&r, "dscp"), "EF");

    let unknown = record_of(json!({"pr": 250}));
    assert_eq!(format_field(&unknown, "pr"), "250");
}

#[test]
fn arrays_join_with_commas() {
    let r = record_of(json!({"flags": ["SYN", "ACK", "FIN"]}));
    assert_eq!(format_field(&r, "flags"), "SYN,ACK,FIN");
}

#[test]
fn absent_and_null_fields_format_to_the_placeholder() {
    let r = record_of(json!({"tos": null}));
    assert_eq!(format_field(&r, "tos"), PLACEHOLDER);
    assert_eq!(format_field(&r, "byt"), PLACEHOLDER);
}

#[test]
fn unknown_column_ids_fail_closed_to_generic_stringify() {
    let r = record_of(json!({"mystery": 17}));
    assert_eq!(format_field(&r, "mystery"), "17");
}

#[test]
fn raw_pseudo_column_renders_the_whole_projection() {
    let r = record_of(json!({"sa": "10.0.0.5", "dp": 443}));
    assert_eq!(format_field(&r, RAW_COLUMN), "dp=443 sa=10.0.0.5");
}

#[test]
fn ill_typed_coded_field_degrades_to_generic_text() {
    let r = record_of(json!({"pr": "tcp?"}));
    assert_eq!(format_field(&r, "pr"), "tcp?");
}
