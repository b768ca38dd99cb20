//! Per-frame event draining.
//!
//! One frame waits for at most one timeout, then takes every event that is
//! already queued without blocking again. The session sees the whole batch
//! before the next tick. A frame holds at most [`MAX_KEYS_PER_FRAME`] keys;
//! once full, draining stops and the rest stays queued in the terminal for
//! the next frame.

use std::time::Duration;

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::map::{is_interrupt, map_key};
use crate::types::Key;

/// Most keys read per frame.
pub const MAX_KEYS_PER_FRAME: usize = 32;

/// Input gathered during one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub keys: ArrayVec<Key, MAX_KEYS_PER_FRAME>,
    /// The terminal was resized; the renderer must redraw everything.
    pub resized: bool,
    /// `Ctrl+C` was pressed; the loop ends before any key is applied.
    pub quit: bool,
}

impl FrameInput {
    /// Record one terminal event.
    pub fn push_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => self.push_key_event(key),
            Event::Resize(_, _) => self.resized = true,
            _ => {}
        }
    }

    fn push_key_event(&mut self, key: KeyEvent) {
        // Repeats count like presses; releases are ignored.
        if key.kind == KeyEventKind::Release {
            return;
        }
        if is_interrupt(key) {
            self.quit = true;
            return;
        }
        let Some(k) = map_key(key) else {
            return;
        };
        if let Err(err) = self.keys.try_push(k) {
            // A quit must survive a flooded frame; it replaces the newest key.
            let dropped = if k == Key::Quit {
                let newest = self.keys.pop();
                self.keys.push(Key::Quit);
                newest
            } else {
                Some(err.element())
            };
            tracing::warn!(
                capacity = MAX_KEYS_PER_FRAME,
                dropped = dropped.map(|k| k.as_str()),
                "frame input full"
            );
        }
    }

    /// No room for another key this frame.
    pub fn is_full(&self) -> bool {
        self.keys.is_full()
    }
}

/// Wait up to `timeout` for input, then drain everything pending.
pub fn poll_frame(timeout: Duration) -> Result<FrameInput> {
    let mut input = FrameInput::default();
    if !event::poll(timeout)? {
        return Ok(input);
    }
    input.push_event(event::read()?);
    while !input.is_full() && !input.quit && event::poll(Duration::ZERO)? {
        input.push_event(event::read()?);
    }
    Ok(input)
}
