//! Background input thread.
//!
//! The reader polls the terminal with a short timeout so it can notice a
//! shutdown request, maps each event and hands it to the client closure.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;

use crate::map::{map_event, InputEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct InputReader {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputReader {
    /// Start reading. The thread ends when `handler` returns
    /// `ControlFlow::Break`, on a read error, or on [`shutdown`](Self::shutdown).
    pub fn spawn<F>(handler: F) -> Result<Self>
    where
        F: FnMut(InputEvent) -> ControlFlow<()> + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let thread = thread::Builder::new()
            .name("termination-input".into())
            .spawn(move || {
                if let Err(err) = pump(&flag, handler) {
                    log::warn!("input reader stopped: {err:#}");
                }
            })
            .context("spawning input thread")?;

        Ok(Self {
            shutdown,
            thread: Some(thread),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Ask the thread to stop and wait for it.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("input thread panicked");
            }
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn pump<F>(shutdown: &AtomicBool, mut handler: F) -> Result<()>
where
    F: FnMut(InputEvent) -> ControlFlow<()>,
{
    while !shutdown.load(Ordering::Relaxed) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Some(input) = map_event(event::read()?) else {
            continue;
        };
        if handler(input).is_break() {
            log::debug!("input handler requested stop");
            break;
        }
    }
    Ok(())
}
