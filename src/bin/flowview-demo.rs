// In src/bin/flowview-demo.rs

//! Demo driver for the flowview engine: synthetic producers feed the live
//! view while a stdout "renderer" drains heartbeat frames. Stands in for
//! the real collector transport and terminal toolkit, which live outside
//! this crate.

use anyhow::Result;
use flowview::config::Config;
use flowview::heartbeat::Heartbeat;
use flowview::live::LiveView;
use flowview::messages::ViewCommand;
use flowview::record::Fields;
use log::info;
use serde_json::json;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn synthetic_flow(source: usize, n: u64) -> Fields {
    let te = 1_700_000_000_000_i64 + (n as i64) * 37;
    let value = json!({
        "te": te,
        "ts": te - 120,
        "td": 120,
        "sa": format!("10.0.{source}.{}", n % 250 + 1),
        "da": "192.168.0.10",
        "sp": 40_000 + (n % 2_000),
        "dp": if n % 3 == 0 { 443 } else { 53 },
        "pr": if n % 3 == 0 { 6 } else { 17 },
        "byt": 400 + n * 13,
        "pkt": 1 + n % 9,
        "in": source,
        "out": 1,
        "dir": n % 2,
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting flowview demo...");

    let view = LiveView::new(&Config::default());
    let (frame_tx, frame_rx) = mpsc::channel();
    let heartbeat = Heartbeat::spawn(view.clone(), frame_tx)?;

    // One producer per synthetic source.
    let mut producers = Vec::new();
    for source in 0..2 {
        let view = view.clone();
        producers.push(thread::spawn(move || {
            for n in 0..200 {
                view.append(synthetic_flow(source, n));
                thread::sleep(Duration::from_millis(5));
            }
        }));
    }

    // Show only HTTPS traffic after a moment.
    view.apply(ViewCommand::BeginFilter);
    for c in "dp=443".chars() {
        view.apply(ViewCommand::FilterChar(c));
    }

    // Drain a few frames as the renderer would.
    for _ in 0..10 {
        let frame = match frame_rx.recv_timeout(Duration::from_secs(2)) {
            Ok(frame) => frame,
            Err(_) => break,
        };
        println!("--- frame ---");
        for line in frame.status.lines() {
            println!("{line}");
        }
        let titles: Vec<&str> = frame.columns.iter().map(|c| c.title.as_str()).collect();
        println!("{}", titles.join(" | "));
        for row in frame.rows.iter().rev().take(5) {
            println!("{}", row.join(" | "));
        }
    }

    for producer in producers {
        let _ = producer.join();
    }
    view.end();
    heartbeat.join();
    info!("flowview demo done");
    Ok(())
}
