//! The frame loop: event queue and per-frame state machine.

pub mod event;
pub mod runtime;

pub use event::{spawn_event_reader, AppEvent, Message};
pub use runtime::App;
