//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! same channel carries reel notifications, so the loop has a single source
//! of wake-ups.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Frame tick; wakes the loop when no input arrives.
    Tick,
    /// The reel finished a scroll while still told to scroll.
    ReelSettled,
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Spawns a background task that polls the terminal for events and sends them
/// through `tx`.  A `Tick` is sent whenever `frame` elapses without input.
pub fn spawn_event_reader(tx: EventSender, frame: Duration) {
    // crossterm's poll blocks the thread, so keep it off the async workers.
    tokio::task::spawn_blocking(move || loop {
        let has_event = event::poll(frame).unwrap_or(false);
        let app_event = if has_event {
            match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                _ => continue,
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });
}

/// Frame period for a given rate.
pub fn frame_duration(fps: u16) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}
