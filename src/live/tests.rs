// src/live/tests.rs

use super::*;
use serde_json::json;
use test_log::test;

fn view_with_capacity(capacity: usize) -> LiveView {
    let mut config = Config::default();
    config.buffer.capacity = capacity;
    LiveView::new(&config)
}

fn flow(te: i64, sa: &str) -> Fields {
    match json!({"te": te, "sa": sa, "byt": 64}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn append_assigns_monotonic_sequence_numbers() {
    let view = view_with_capacity(10);
    let a = view.append(flow(1, "10.0.0.1")).unwrap();
    let b = view.append(flow(2, "10.0.0.2")).unwrap();
    assert!(b > a);
}

#[test]
fn pause_drops_appends_and_resume_accretes_again() {
    let view = view_with_capacity(10);
    view.append(flow(1, "10.0.0.1"));
    view.apply(ViewCommand::TogglePause);
    assert!(view.paused());

    assert_eq!(view.append(flow(2, "10.0.0.2")), None);
    assert_eq!(view.snapshot().len(), 1);

    view.apply(ViewCommand::TogglePause);
    assert!(view.append(flow(3, "10.0.0.3")).is_some());
    assert_eq!(view.snapshot().len(), 2);
}

#[test]
fn paused_status_is_reported() {
    let view = view_with_capacity(10);
    assert!(!view.status().paused);
    view.apply(ViewCommand::TogglePause);
    assert!(view.status().paused);
}

#[test]
fn filter_commands_edit_the_chain() {
    let view = view_with_capacity(10);
    view.apply(ViewCommand::BeginFilter);
    for c in "10.0".chars() {
        view.apply(ViewCommand::FilterChar(c));
    }
    assert_eq!(view.status().filters, vec!["10.0".to_string()]);

    view.apply(ViewCommand::FilterBackspace);
    assert_eq!(view.status().filters, vec!["10.".to_string()]);

    view.apply(ViewCommand::RemoveFilter("10.".to_string()));
    assert!(view.status().filters.is_empty());
}

#[test]
fn materialize_publishes_filtered_rows() {
    let view = view_with_capacity(10);
    view.append(flow(1, "10.0.0.5"));
    view.append(flow(2, "10.0.0.5"));
    view.append(flow(3, "192.168.0.9"));

    view.apply(ViewCommand::BeginFilter);
    for c in "10\\.0\\.0\\.5".chars() {
        view.apply(ViewCommand::FilterChar(c));
    }

    let frame = view.materialize();
    assert_eq!(frame.rows.len(), 2);
    assert_eq!(view.current_rows().len(), 2);
    assert_eq!(view.current_columns().len(), frame.columns.len());
}

#[test]
fn force_refresh_publishes_without_a_tick() {
    let view = view_with_capacity(10);
    view.append(flow(1, "10.0.0.1"));
    assert!(view.current_rows().is_empty());
    view.apply(ViewCommand::ForceRefresh);
    assert_eq!(view.current_rows().len(), 1);
}

#[test]
fn cycle_commands_move_both_cursors_independently() {
    let view = view_with_capacity(10);
    view.apply(ViewCommand::NextDisplayMode);
    view.apply(ViewCommand::NextEnrichment);
    view.apply(ViewCommand::NextEnrichment);
    let status = view.status();
    assert_eq!(status.mode, "traffic");
    assert_eq!(status.enrichment, "geo");

    view.apply(ViewCommand::PrevDisplayMode);
    assert_eq!(view.status().mode, "standard");
    assert_eq!(view.status().enrichment, "geo");
}

#[test]
fn column_override_toggles_in_and_out() {
    let view = view_with_capacity(10);
    view.apply(ViewCommand::ToggleColumn("byt".to_string()));
    view.apply(ViewCommand::ToggleColumn("sa".to_string()));
    view.append(flow(1, "10.0.0.1"));
    let frame = view.materialize();
    let ids: Vec<&str> = frame.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["byt", "sa"]);

    view.apply(ViewCommand::ToggleColumn("byt".to_string()));
    view.apply(ViewCommand::ToggleColumn("sa".to_string()));
    let frame = view.materialize();
    // Back to the composed standard view.
    assert!(frame.columns.len() > 2);
}

#[test]
fn frame_rate_is_clamped_to_at_least_one() {
    let view = view_with_capacity(10);
    view.apply(ViewCommand::SetFrameRate(0));
    assert_eq!(view.frame_interval(), Duration::from_secs(1));
    view.apply(ViewCommand::SetFrameRate(4));
    assert_eq!(view.frame_interval(), Duration::from_millis(250));
}

#[test]
fn end_capture_sets_the_ended_flag_and_stops_ingestion() {
    let view = view_with_capacity(10);
    view.apply(ViewCommand::EndCapture);
    assert!(view.ended());
    assert_eq!(view.append(flow(1, "10.0.0.1")), None);
}

#[test]
fn status_counts_accepted_traffic_only() {
    let view = view_with_capacity(2);
    for te in 0..4 {
        view.append(flow(te, "10.0.0.1"));
    }
    view.apply(ViewCommand::TogglePause);
    view.append(flow(9, "10.0.0.9"));

    let status = view.status();
    assert_eq!(status.records_accepted, 4);
    assert_eq!(status.total_bytes, 4 * 64);
}

#[test]
fn displayed_set_retains_evicted_rows_across_ticks() {
    let view = view_with_capacity(2);
    view.append(flow(1, "10.0.0.1"));
    view.append(flow(2, "10.0.0.2"));
    view.materialize();

    // These two appends evict the first two records.
    view.append(flow(3, "10.0.0.3"));
    view.append(flow(4, "10.0.0.4"));
    let frame = view.materialize();
    assert_eq!(frame.rows.len(), 4);

    let displayed = view.displayed_records();
    let snapshot = view.snapshot();
    for live in &snapshot {
        assert!(displayed.iter().any(|r| r.seq() == live.seq()));
    }
}
