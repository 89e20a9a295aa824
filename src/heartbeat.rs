// src/heartbeat.rs

//! Heartbeat scheduler: the fixed-cadence render driver.
//!
//! Runs in a dedicated background thread, decoupled from ingestion rate:
//! sleep one frame interval, materialize, hand the frame to the renderer
//! channel, repeat until the capture-ended signal. The frame rate is read
//! from the shared state every iteration, so `SetFrameRate` takes effect
//! without restarting the loop. Pausing ingestion does not pause the
//! heartbeat; the UI keeps redrawing (and showing the paused indicator)
//! while records are dropped upstream.

use crate::live::LiveView;
use crate::view::RenderFrame;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

/// Handle to the spawned heartbeat thread.
pub struct Heartbeat {
    thread_handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    /// Spawns the render tick loop in a background thread.
    ///
    /// Frames are delivered on `frame_tx`; the loop exits when the capture
    /// ends or the renderer side of the channel is dropped.
    pub fn spawn(view: LiveView, frame_tx: Sender<RenderFrame>) -> Result<Self> {
        info!("Heartbeat: spawning render tick thread");
        let thread_handle = thread::Builder::new()
            .name("heartbeat".to_string())
            .spawn(move || Self::tick_loop(view, frame_tx))
            .context("Failed to spawn heartbeat thread")?;
        Ok(Self {
            thread_handle: Some(thread_handle),
        })
    }

    fn tick_loop(view: LiveView, frame_tx: Sender<RenderFrame>) {
        debug!("Heartbeat: starting tick loop");
        loop {
            thread::sleep(view.frame_interval());
            if view.ended() {
                info!("Heartbeat: capture ended, stopping");
                break;
            }
            let frame = view.materialize();
            if frame_tx.send(frame).is_err() {
                info!("Heartbeat: renderer channel closed, stopping");
                break;
            }
        }
    }

    /// Waits for the tick loop to exit. Call after raising the ended signal
    /// (or dropping the frame receiver); joining before either will block a
    /// full frame interval at minimum.
    pub fn join(mut self) {
        self.join_inner();
    }

    fn join_inner(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                error!("Heartbeat thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        debug!("Heartbeat dropped");
        self.join_inner();
    }
}
