//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and the session state machine.
//! It has **no dependencies** on terminals, fonts or I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same figure sequence
//! - **Testable**: every rule is reachable without a terminal
//! - **Portable**: the same session drives any renderer
//!
//! # Module Structure
//!
//! - [`figure`]: 4x4 block grid with pivot-based rotation
//! - [`shapes`]: the seven shape specs, their colors, and the random generator
//! - [`field`]: the landed-block grid with collision, merge, line removal and grayify
//! - [`session`]: score, level, timers and the Playing/Paused/GameOver machine
//!
//! # Game Rules
//!
//! - **No lookup tables for rotation**: a figure turns around its pivot by
//!   the smallest number of quarter turns that keeps it inside a 5x5 bound
//! - **No kicks**: a rotation that collides is undone by the opposite turn
//! - **Drop** moves the figure to its resting row; the next gravity step merges it
//! - **Scoring**: `1000 * lines * level`, one level up per threshold crossing
//! - **Grayify**: landed blocks fade to gray, one color unit every 100ms
//!
//! # Example
//!
//! ```
//! use graytris_core::{FigureGenerator, Session};
//! use graytris_types::{Key, SessionConfig, SessionState};
//!
//! let mut session = Session::new(SessionConfig::new(1), FigureGenerator::classic(12345));
//!
//! session.handle_input(Key::Left);
//! session.handle_input(Key::Rotate);
//! session.handle_input(Key::Drop);
//! session.tick(1001); // the dropped figure lands on this gravity step
//!
//! assert_eq!(session.state(), SessionState::Playing);
//! assert!(session.field().blocks().iter().filter(|b| b.filled).count() == 4);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) once per frame with the
//! milliseconds elapsed since the previous frame.

pub mod field;
pub mod figure;
pub mod session;
pub mod shapes;

pub use graytris_types as types;

// Re-export commonly used types for convenience
pub use field::Field;
pub use figure::Figure;
pub use session::Session;
pub use shapes::{FigureGenerator, ShapeTable};
