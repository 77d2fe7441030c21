// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest single sleep, so a stop request is noticed well within one interval.
const STOP_POLL: Duration = Duration::from_millis(20);

/// Messages delivered to the flight loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMessage {
    Tick,
    Abort,
}

/// Periodic tick source for one flight.
///
/// Sends [`ShellMessage::Tick`] once per interval until stopped. Ticks are
/// scheduled against fixed deadlines so the cadence does not drift with
/// receiver latency. Dropping the ticker stops it.
pub struct Ticker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(interval: Duration, tx: Sender<ShellMessage>) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("tick-source".to_string())
            .spawn(move || {
                let mut ticks: u64 = 0;
                let mut deadline = Instant::now() + interval;
                while flag.load(Ordering::SeqCst) {
                    if let Some(late) = Instant::now().checked_duration_since(deadline) {
                        if late > interval {
                            log::debug!("Tick {} late by {:?}", ticks + 1, late);
                        }
                    }
                    if !sleep_until(deadline, &flag) {
                        break;
                    }
                    if tx.send(ShellMessage::Tick).is_err() {
                        break;
                    }
                    ticks += 1;
                    deadline += interval;
                }
                log::debug!("Tick source stopped after {} ticks", ticks);
            })
            .context("Failed to start the tick thread")?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stops the source and waits for its thread. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Tick thread panicked");
            }
        }
    }
}

/// Sleeps in short slices until `deadline`. Returns false if stopped meanwhile.
fn sleep_until(deadline: Instant, running: &AtomicBool) -> bool {
    loop {
        if !running.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(STOP_POLL));
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
