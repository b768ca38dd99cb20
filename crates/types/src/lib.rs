//! Core types module - shared data structures and constants
//!
//! This module defines the value types used throughout the workspace.
//! All types are plain data with no external dependencies, so the simulation
//! core, the terminal view and the font decoder can share them freely.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 25 rows (indexed 0-24, row 0 at the top)
//! - **Spawn position**: (3, 0) for every figure
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED_MS` | 1000 | Gravity interval is `BASE_SPEED_MS / level` |
//! | `GRAYIFY_INTERVAL_MS` | 100 | One color-decay step of landed blocks |
//!
//! # Scoring
//!
//! | Level | Gravity interval | Level-up above |
//! |-------|------------------|----------------|
//! | 1 | 1000ms | 10000 |
//! | 2 | 500ms | 40000 |
//! | 3 | 333ms | 90000 |
//! | 9 | 111ms | - |
//!
//! # Examples
//!
//! ```
//! use graytris_types::{Key, RotateDirection, SessionConfig, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! // Single-step rotations of a pivot-relative offset
//! assert_eq!(RotateDirection::Clockwise.rotate_offset(1, 0), (0, 1));
//! assert_eq!(RotateDirection::CounterClockwise.rotate_offset(1, 0), (0, -1));
//!
//! // Levels outside 1..=9 are clamped
//! assert_eq!(SessionConfig::new(42).initial_level, 9);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 25);
//! assert_ne!(Key::Left, Key::Right);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (25 rows)
pub const FIELD_HEIGHT: usize = 25;

/// Side length of a figure's square block grid
pub const FIGURE_SIZE: usize = 4;

/// Column at which new figures appear
pub const FIGURE_SPAWN_X: i32 = 3;

/// Inclusive upper bound for a rotated cell inside the figure grid.
///
/// One larger than the last grid index; the rotation probe accepts it.
pub const ROTATION_BOUND: i32 = 4;

/// Interval between two grayify steps (100ms)
pub const GRAYIFY_INTERVAL_MS: u32 = 100;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_SPEED_MS: u32 = 1000;

/// Lowest playable level
pub const MIN_LEVEL: u32 = 1;

/// Highest playable level
pub const MAX_LEVEL: u32 = 9;

/// Base points per cleared line (multiplied by the level)
pub const LINE_CLEAR_SCORE: u32 = 1000;

/// Level-up threshold factor: the level rises once score exceeds
/// `level * level * LEVEL_UP_SCORE`.
pub const LEVEL_UP_SCORE: u32 = 10000;

/// Neutral gray that landed blocks fade towards; also the wall color.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(80, 80, 80);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Half-brightness variant, used for the border of a two-tone block.
    pub const fn halved(self) -> Self {
        Self {
            r: self.r / 2,
            g: self.g / 2,
            b: self.b / 2,
        }
    }
}

/// A single cell of a figure grid or of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub filled: bool,
    pub color: Rgb,
}

impl Block {
    /// A filled block of the given color.
    pub const fn filled(color: Rgb) -> Self {
        Self {
            filled: true,
            color,
        }
    }

    /// An unfilled block.
    pub const fn empty() -> Self {
        Self {
            filled: false,
            color: Rgb::new(0, 0, 0),
        }
    }
}

/// Session state machine
///
/// - **Playing**: gravity and input run
/// - **Paused**: only the pause key is recognized, gravity is frozen
/// - **GameOver**: a figure collided on spawn; confirm restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "game_over",
        }
    }
}

/// Direction of a 90° figure rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Apply one rotation step to an offset relative to the pivot.
    ///
    /// Clockwise maps `(x, y)` to `(-y, x)`, counter-clockwise to `(y, -x)`
    /// (screen coordinates, y grows downwards).
    ///
    /// # Examples
    ///
    /// ```
    /// use graytris_types::RotateDirection;
    ///
    /// assert_eq!(RotateDirection::Clockwise.rotate_offset(0, -1), (1, 0));
    /// assert_eq!(RotateDirection::CounterClockwise.rotate_offset(0, -1), (-1, 0));
    /// ```
    #[inline]
    pub fn rotate_offset(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            RotateDirection::Clockwise => (-y, x),
            RotateDirection::CounterClockwise => (y, -x),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            RotateDirection::Clockwise => RotateDirection::CounterClockwise,
            RotateDirection::CounterClockwise => RotateDirection::Clockwise,
        }
    }
}

/// Logical keys consumed by the session.
///
/// Device key codes are mapped onto these by the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the figure one column left
    Left,
    /// Move the figure one column right
    Right,
    /// Rotate the figure clockwise
    Rotate,
    /// Drop the figure to its lowest free position
    Drop,
    /// Toggle pause
    Pause,
    /// Answer "yes" on the game-over prompt
    Confirm,
    /// Answer "no" on the game-over prompt
    Cancel,
    /// Leave the game loop
    Quit,
}

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Rotate => "rotate",
            Key::Drop => "drop",
            Key::Pause => "pause",
            Key::Confirm => "confirm",
            Key::Cancel => "cancel",
            Key::Quit => "quit",
        }
    }
}

/// Construction parameters of a session and its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub grayify_interval_ms: u32,
    /// Level the session starts at (and returns to on reset), always 1..=9.
    pub initial_level: u32,
}

impl SessionConfig {
    /// Default geometry and timing with the given starting level, clamped
    /// into `MIN_LEVEL..=MAX_LEVEL`.
    pub fn new(initial_level: u32) -> Self {
        Self {
            initial_level: clamp_level(initial_level),
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            grayify_interval_ms: GRAYIFY_INTERVAL_MS,
            initial_level: MIN_LEVEL,
        }
    }
}

/// Clamp a level into the playable range.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Text measurement provided by a font.
///
/// Units are whatever the consumer lays text out in; the terminal view
/// works in columns.
pub trait TextMetrics {
    /// Total horizontal advance of `text`.
    fn text_width(&self, text: &str) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_steps_cycle_after_four() {
        for dir in [RotateDirection::Clockwise, RotateDirection::CounterClockwise] {
            let mut p = (2, -1);
            for _ in 0..4 {
                p = dir.rotate_offset(p.0, p.1);
            }
            assert_eq!(p, (2, -1));
        }
    }

    #[test]
    fn opposite_rotation_undoes_a_step() {
        let (x, y) = RotateDirection::Clockwise.rotate_offset(1, 2);
        assert_eq!(RotateDirection::Clockwise.opposite().rotate_offset(x, y), (1, 2));
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(SessionConfig::new(0).initial_level, 1);
        assert_eq!(SessionConfig::new(5).initial_level, 5);
        assert_eq!(SessionConfig::new(10).initial_level, 9);
    }

    #[test]
    fn halved_color_is_border_tone() {
        assert_eq!(Rgb::new(255, 100, 1).halved(), Rgb::new(127, 50, 0));
    }

    #[test]
    fn default_block_is_empty() {
        assert_eq!(Block::default(), Block::empty());
        assert!(Block::filled(NEUTRAL_GRAY).filled);
    }
}
