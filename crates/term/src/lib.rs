//! Terminal front end: drawing the game and showing it.
//!
//! `GameView` paints a session into a `Canvas` without touching the
//! terminal; `Screen` shows canvases on the real terminal, writing only the
//! cells that changed since the last frame. Field cells are `cell_w`
//! columns by `cell_h` rows, 2x1 by default to keep blocks square.

pub mod canvas;
pub mod game_view;
pub mod screen;
pub mod text;

pub use graytris_core as core;
pub use graytris_types as types;

pub use canvas::{Canvas, Cell, Rgb, Style};
pub use game_view::{GameView, Viewport, GAME_OVER_TEXT, NEXT_TEXT, PAUSED_TEXT};
pub use screen::{patch_into, repaint_into, Screen};
pub use text::TerminalText;
