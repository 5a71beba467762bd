//! Async driver for a router.
//!
//! The loop blocks until either an event arrives or the next timer is due.
//! Events are dispatched immediately; due timers run right after.

use std::time::Instant;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::time::sleep_until;

use crate::event::Event;
use crate::host::Host;
use crate::router::Router;
use crate::timers::Clock;

/// Clock backed by tokio's time source, so paused-time tests advance it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Sender half of an event channel feeding [`run`].
pub type EventSender = mpsc::Sender<Event>;

/// Create an event channel for [`run`].
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    mpsc::channel(capacity)
}

/// Drive `router` until the event channel closes.
///
/// Timers still pending when the channel closes are dropped.
pub async fn run<H: Host + ?Sized>(
    router: &mut Router<TokioClock>,
    host: &mut H,
    mut events: mpsc::Receiver<Event>,
) {
    info!("[runtime] event loop started");
    loop {
        let deadline = router.next_deadline();
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    router.dispatch(host, event);
                    router.run_due(host);
                }
                None => break,
            },
            _ = sleep_until_deadline(deadline) => {
                let fired = router.run_due(host);
                debug!("[runtime] woke for timers, {fired} fired");
            }
        }
    }
    info!("[runtime] event channel closed, stopping");
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
