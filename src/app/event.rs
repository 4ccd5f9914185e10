//! Input event plumbing.
//!
//! All sources (keyboard, terminal resize, and synthetic collaborator
//! messages) merge into one ordered FIFO channel, so a frame can never
//! observe a torn viewport mid-layout.  A background task polls crossterm;
//! collaborators clone the sender and inject [`AppEvent::Synthetic`].

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tokio::sync::mpsc;

/// Closed set of collaborator messages.  Handlers match exhaustively, so
/// adding a variant forces every handler to take a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Recompute and repaint with no other state change.
    Refresh,
    /// Replace the text content of the element carrying `id`.
    SetText { id: String, text: String },
    /// Ask the frame loop to exit.
    Quit,
}

/// Events consumed by the frame loop, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Injected by collaborators (timers, plugin callbacks, network work).
    Synthetic(Message),
}

/// Spawns a background task that polls the terminal and forwards key and
/// resize events.  Returns the sender (for synthetic injection) and the
/// receiver the frame loop blocks on.
pub fn spawn_event_reader(
    poll_interval: Duration,
) -> (
    mpsc::UnboundedSender<AppEvent>,
    mpsc::UnboundedReceiver<AppEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();

    let reader_tx = tx.clone();
    tokio::spawn(async move {
        loop {
            // Poll with a timeout so the task notices a dropped receiver
            // even when the terminal is idle.
            let has_event = event::poll(poll_interval).unwrap_or(false);
            if reader_tx.is_closed() {
                break;
            }
            if !has_event {
                continue;
            }
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if reader_tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    (tx, rx)
}
