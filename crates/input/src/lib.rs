//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into logical [`crate::types::Key`]s and drains
//! the events pending for one frame. Device key codes stop here; the session
//! only ever sees logical keys.

pub mod map;
pub mod poll;

pub use graytris_types as types;

pub use map::{is_interrupt, map_key};
pub use poll::{poll_frame, FrameInput, MAX_KEYS_PER_FRAME};
