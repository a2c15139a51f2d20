//! Terminal event abstraction and the frame driver.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel so the main loop stays non-blocking.
//! A second task emits one `Frame` message per display-refresh interval;
//! it carries an explicit cancellation handle so teardown can stop the
//! cadence instead of relying on the task to notice on its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel.
///
/// Unlike the frame driver there is no cancellation handle: `event::read`
/// has no async-safe interrupt, so the task lives until process exit (or
/// until the receiver is dropped and a final event flushes the send).
/// Teardown correctness does not depend on it — the controller's phase
/// gate discards anything it forwards after `stop()`.
pub fn spawn_event_reader(poll_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(poll_rate).unwrap_or(false);
            if !has_event {
                continue;
            }
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}

/// Cancellation handle for the frame driver task.
///
/// Held by the lifecycle controller; `cancel()` stops the cadence.  A
/// frame already sitting in the channel when the flag flips can still be
/// delivered — the controller's torn-down check neutralizes it.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    cancelled: Arc<AtomicBool>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for FrameHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the frame driver: one `()` message per refresh interval until
/// the handle is cancelled or the receiver is dropped.
pub fn spawn_frame_driver(frame_rate: u32) -> (mpsc::UnboundedReceiver<()>, FrameHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = FrameHandle::new();
    let cancelled = Arc::clone(&handle.cancelled);

    let period = Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(()).is_err() {
                break; // receiver dropped
            }
        }
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_reports_cancellation() {
        let handle = FrameHandle::new();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
        // Re-entrant cancel is harmless.
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn driver_stops_after_cancel() {
        let (mut rx, handle) = spawn_frame_driver(1000);
        // At least one frame arrives while live.
        assert!(rx.recv().await.is_some());
        handle.cancel();
        // Drain whatever was queued before the flag flipped; the channel
        // then closes rather than producing forever.
        while let Ok(Some(_)) =
            tokio::time::timeout(Duration::from_millis(50), rx.recv()).await
        {}
    }
}
