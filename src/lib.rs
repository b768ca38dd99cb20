//! Graytris (workspace facade crate).
//!
//! Re-exports the member crates as `graytris::{core,font,input,term,types}`
//! so the binary, the integration tests and the benchmarks share one path.

pub use graytris_core as core;
pub use graytris_font as font;
pub use graytris_input as input;
pub use graytris_term as term;
pub use graytris_types as types;

use crate::core::Session;
use crate::input::FrameInput;

/// Feed one frame of input to the session, in order.
///
/// Returns false when the game should end: an interrupt ends it in every
/// state, before any key is applied; otherwise the first key the session
/// answers with false stops the batch.
pub fn apply_input(session: &mut Session, input: &FrameInput) -> bool {
    if input.quit {
        return false;
    }
    input.keys.iter().all(|&key| session.handle_input(key))
}
