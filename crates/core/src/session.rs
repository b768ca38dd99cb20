//! Session module - the game state machine
//!
//! A session owns the field, the falling figure and the next figure, and
//! drives them from two inputs: elapsed time (`tick`) and logical keys
//! (`handle_input`).
//!
//! # States
//!
//! ```text
//! Playing --pause--> Paused --pause--> Playing
//! Playing --spawn collision--> GameOver --confirm--> Playing (reset)
//! ```
//!
//! # Timing
//!
//! Gravity fires when the accumulated time exceeds `speed()` and grayify
//! when it exceeds the grayify interval. Each fires at most once per tick;
//! the timer keeps the remainder, so a slow frame never produces a burst of
//! steps.

use crate::field::Field;
use crate::figure::Figure;
use crate::shapes::FigureGenerator;
use crate::types::{
    clamp_level, Key, RotateDirection, SessionConfig, SessionState, BASE_SPEED_MS,
    LEVEL_UP_SCORE, LINE_CLEAR_SCORE, MAX_LEVEL,
};

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    field: Field,
    figure: Figure,
    next_figure: Figure,
    generator: FigureGenerator,
    score: u32,
    level: u32,
    state: SessionState,
    elapsed_ms: u32,
    grayify_ms: u32,
}

impl Session {
    /// Create a session in the `Playing` state.
    pub fn new(config: SessionConfig, mut generator: FigureGenerator) -> Self {
        let config = SessionConfig {
            initial_level: clamp_level(config.initial_level),
            ..config
        };
        let figure = generator.random();
        let next_figure = generator.random_not(&figure);

        tracing::info!(
            level = config.initial_level,
            seed = generator.seed(),
            width = config.field_width,
            height = config.field_height,
            "session created"
        );

        Self {
            field: Field::new(config.field_width, config.field_height),
            figure,
            next_figure,
            generator,
            score: 0,
            level: config.initial_level,
            state: SessionState::Playing,
            elapsed_ms: 0,
            grayify_ms: 0,
            config,
        }
    }

    /// Start over: empty field, fresh figures, initial level, zero score.
    ///
    /// The field is cleared in place rather than rebuilt.
    pub fn reset(&mut self) {
        self.field.clear();
        self.figure = self.generator.random();
        self.next_figure = self.generator.random_not(&self.figure);
        self.score = 0;
        self.level = self.config.initial_level;
        self.state = SessionState::Playing;
        self.elapsed_ms = 0;
        self.grayify_ms = 0;
        tracing::info!(level = self.level, "session reset");
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access, for setting up positions.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Mutable access to the falling figure, for setting up positions.
    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    pub fn next_figure(&self) -> &Figure {
        &self.next_figure
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn grayify_ms(&self) -> u32 {
        self.grayify_ms
    }

    /// Gravity interval for the current level.
    pub fn speed(&self) -> u32 {
        BASE_SPEED_MS / self.level
    }

    /// Add `base * level` points. Crossing `level^2 * 10000` raises the level
    /// by one, up to the maximum.
    pub fn add_score(&mut self, base: u32) {
        self.score = self.score.saturating_add(base.saturating_mul(self.level));
        if self.score > self.level * self.level * LEVEL_UP_SCORE && self.level < MAX_LEVEL {
            self.level += 1;
            tracing::info!(level = self.level, score = self.score, "level up");
        }
    }

    /// Advance the session by `delta_ms` milliseconds.
    pub fn tick(&mut self, delta_ms: u32) {
        match self.state {
            SessionState::Playing => self.tick_playing(delta_ms),
            SessionState::Paused | SessionState::GameOver => self.tick_grayify(delta_ms),
        }
    }

    fn tick_grayify(&mut self, delta_ms: u32) {
        self.grayify_ms = self.grayify_ms.saturating_add(delta_ms);
        if self.grayify_ms > self.config.grayify_interval_ms {
            self.grayify_ms -= self.config.grayify_interval_ms;
            self.field.grayify();
        }
    }

    fn tick_playing(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        self.tick_grayify(delta_ms);

        let speed = self.speed();
        if self.elapsed_ms <= speed {
            return;
        }
        self.elapsed_ms -= speed;

        if !self.field.step_collide_and_merge(&mut self.figure) {
            return;
        }
        tracing::debug!(
            class_id = self.figure.class_id(),
            x = self.figure.x,
            y = self.figure.y,
            "figure landed"
        );

        let lines = self.field.check_for_lines();
        if lines > 0 {
            self.add_score(lines * LINE_CLEAR_SCORE);
            tracing::debug!(lines, score = self.score, "lines cleared");
        }

        self.figure = self.next_figure.clone();
        if self.field.collide(&self.figure) {
            self.set_state(SessionState::GameOver);
            return;
        }
        self.next_figure = self.generator.random_not(&self.figure);
    }

    /// Apply one key. Returns false when the game loop should end.
    pub fn handle_input(&mut self, key: Key) -> bool {
        tracing::trace!(key = key.as_str(), state = self.state.as_str(), "input");
        match self.state {
            SessionState::Playing => self.handle_input_playing(key),
            SessionState::Paused => {
                if key == Key::Pause {
                    self.set_state(SessionState::Playing);
                }
                true
            }
            SessionState::GameOver => match key {
                Key::Confirm => {
                    self.reset();
                    true
                }
                Key::Cancel | Key::Quit => false,
                _ => true,
            },
        }
    }

    fn handle_input_playing(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.shift(-1),
            Key::Right => self.shift(1),
            Key::Rotate => {
                let direction = RotateDirection::Clockwise;
                self.figure.rotate(direction);
                if self.field.collide(&self.figure) {
                    self.figure.rotate(direction.opposite());
                }
            }
            Key::Drop => self.drop_figure(),
            Key::Pause => self.set_state(SessionState::Paused),
            Key::Quit => return false,
            Key::Confirm | Key::Cancel => {}
        }
        true
    }

    fn shift(&mut self, dx: i32) {
        self.figure.x += dx;
        if self.field.collide(&self.figure) {
            self.figure.x -= dx;
        }
    }

    /// Push the figure down to the last free row. Landing is left to the
    /// next gravity step.
    fn drop_figure(&mut self) {
        loop {
            if self.field.collide(&self.figure) {
                self.figure.y -= 1;
                break;
            }
            self.figure.y += 1;
        }
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            tracing::info!(
                from = self.state.as_str(),
                to = state.as_str(),
                score = self.score,
                "session state changed"
            );
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(level: u32) -> Session {
        Session::new(SessionConfig::new(level), FigureGenerator::classic(1))
    }

    #[test]
    fn speed_follows_level() {
        assert_eq!(session(1).speed(), 1000);
        assert_eq!(session(2).speed(), 500);
        assert_eq!(session(9).speed(), 111);
    }

    #[test]
    fn initial_level_is_clamped() {
        let s = Session::new(
            SessionConfig {
                initial_level: 0,
                ..SessionConfig::default()
            },
            FigureGenerator::classic(1),
        );
        assert_eq!(s.level(), 1);
        assert_eq!(session(12).level(), 9);
    }

    #[test]
    fn next_figure_differs_from_current() {
        let s = session(1);
        assert_ne!(s.figure().class_id(), s.next_figure().class_id());
    }

    #[test]
    fn level_caps_at_nine() {
        let mut s = session(9);
        s.add_score(1_000_000);
        assert_eq!(s.level(), 9);
    }

    #[test]
    fn grayify_fires_once_per_tick() {
        let mut s = session(1);
        s.tick(350);
        assert_eq!(s.grayify_ms(), 250);
        assert_eq!(s.elapsed_ms(), 350);
    }

    #[test]
    fn gravity_fires_once_per_tick() {
        let mut s = session(1);
        let y = s.figure().y;
        s.tick(3500);
        assert_eq!(s.figure().y, y + 1);
        assert_eq!(s.elapsed_ms(), 2500);
    }

    #[test]
    fn equal_to_interval_does_not_fire() {
        let mut s = session(1);
        let y = s.figure().y;
        s.tick(1000);
        assert_eq!(s.figure().y, y);
        s.tick(1);
        assert_eq!(s.figure().y, y + 1);
        assert_eq!(s.elapsed_ms(), 1);
    }
}
