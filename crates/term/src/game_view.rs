//! GameView: paints a `core::Session` onto a `Canvas`.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, top to bottom: the status line, the banner line (paused /
//! game over prompt), then the field frame with the next-figure panel to
//! its right. The frame has gray walls on the left, right and bottom and no
//! top wall.

use crate::canvas::{Canvas, Cell, Rgb, Style};
use crate::core::{Field, Figure, Session};
use crate::text::TerminalText;
use crate::types::{SessionState, TextMetrics, NEUTRAL_GRAY};

/// Text shown while paused
pub const PAUSED_TEXT: &str = "Game paused, press P to resume";

/// Text shown after a game over
pub const GAME_OVER_TEXT: &str = "Game Over, restart? y/n";

/// Label above the next-figure preview
pub const NEXT_TEXT: &str = "Next:";

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(255, 255, 255);
const PAUSED_COLOR: Rgb = Rgb::new(200, 200, 0);
const GAME_OVER_COLOR: Rgb = Rgb::new(200, 0, 0);

/// Rows above the field frame (status and banner lines).
const HEADER_ROWS: u16 = 2;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    metrics: Box<dyn TextMetrics>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            metrics: Box::new(TerminalText),
        }
    }

    /// Measure text with another font (used to center banners).
    pub fn with_metrics(mut self, metrics: Box<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Top-left corner of the field frame for a field in a viewport.
    pub fn frame_origin(&self, field: &Field, viewport: Viewport) -> (i32, i32) {
        let span = |cells: usize, size: u16| {
            i32::try_from(cells)
                .unwrap_or(i32::MAX)
                .saturating_mul(size as i32)
        };
        let frame_w = span(field.frame_width(), self.cell_w);
        let frame_h = span(field.frame_height(), self.cell_h);
        let x = (viewport.width as i32 - frame_w).max(0) / 2;
        let y = (HEADER_ROWS as i32).max((viewport.height as i32 - frame_h).max(0) / 2);
        (x, y)
    }

    /// Column where `text` starts when centered in the viewport.
    pub fn centered_x(&self, text: &str, viewport: Viewport) -> i32 {
        let w = self.metrics.text_width(text) as i32;
        ((viewport.width as i32 - w) / 2).max(0)
    }

    /// Paint the session into `canvas`, reshaping it to the viewport.
    pub fn render_into(&self, session: &Session, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(
            viewport.width,
            viewport.height,
            Cell {
                ch: ' ',
                style: Style::new(TEXT, BACKGROUND),
            },
        );

        let field = session.field();
        let (ox, oy) = self.frame_origin(field, viewport);

        self.draw_walls(canvas, field, ox, oy);
        self.draw_field(canvas, field, ox, oy);
        self.draw_figure(canvas, session.figure(), ox, oy);
        self.draw_next(canvas, session.next_figure(), field, ox, oy);

        let status = format!("Level: {} | Score: {}", session.level(), session.score());
        canvas.text(1, 0, &status, Style::new(TEXT, BACKGROUND));

        let banner = match session.state() {
            SessionState::Playing => None,
            SessionState::Paused => Some((PAUSED_TEXT, PAUSED_COLOR)),
            SessionState::GameOver => Some((GAME_OVER_TEXT, GAME_OVER_COLOR)),
        };
        if let Some((text, color)) = banner {
            let x = self.centered_x(text, viewport);
            canvas.text(x, 1, text, Style::new(color, BACKGROUND).bold());
        }
    }

    /// Paint into a fresh canvas.
    pub fn render(&self, session: &Session, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut canvas);
        canvas
    }

    fn draw_walls(&self, canvas: &mut Canvas, field: &Field, ox: i32, oy: i32) {
        let right = field.width() as i32 + 1;
        let bottom = field.height() as i32;
        for y in 0..=bottom {
            self.draw_block(canvas, ox, oy, 0, y, NEUTRAL_GRAY);
            self.draw_block(canvas, ox, oy, right, y, NEUTRAL_GRAY);
        }
        for x in 1..right {
            self.draw_block(canvas, ox, oy, x, bottom, NEUTRAL_GRAY);
        }
    }

    fn draw_field(&self, canvas: &mut Canvas, field: &Field, ox: i32, oy: i32) {
        for y in 0..field.height() as i32 {
            for x in 0..field.width() as i32 {
                if let Some(block) = field.get(x, y).filter(|b| b.filled) {
                    self.draw_block(canvas, ox, oy, x + 1, y, block.color);
                }
            }
        }
    }

    fn draw_figure(&self, canvas: &mut Canvas, figure: &Figure, ox: i32, oy: i32) {
        let (ax, ay) = figure.screen_anchor(self.cell_w as i32, self.cell_h as i32);
        for (dx, dy, block) in figure.cells() {
            self.draw_block_px(
                canvas,
                ox + ax + dx * self.cell_w as i32,
                oy + ay + dy * self.cell_h as i32,
                block.color,
            );
        }
    }

    fn draw_next(&self, canvas: &mut Canvas, next: &Figure, field: &Field, ox: i32, oy: i32) {
        let px = ox + (field.frame_width() as i32 + 1) * self.cell_w as i32;
        canvas.text(px, oy, NEXT_TEXT, Style::new(TEXT, BACKGROUND));
        for (dx, dy, block) in next.cells() {
            self.draw_block_px(
                canvas,
                px + dx * self.cell_w as i32,
                oy + 2 + dy * self.cell_h as i32,
                block.color,
            );
        }
    }

    /// Draw a block at frame cell (cx, cy).
    fn draw_block(&self, canvas: &mut Canvas, ox: i32, oy: i32, cx: i32, cy: i32, color: Rgb) {
        self.draw_block_px(
            canvas,
            ox + cx * self.cell_w as i32,
            oy + cy * self.cell_h as i32,
            color,
        );
    }

    /// Two-tone block: a half-brightness rim around a full-brightness core.
    ///
    /// The rim shows as the background of half-block glyphs on the left and
    /// right edges; with one column per cell only the core is drawn.
    fn draw_block_px(&self, canvas: &mut Canvas, x: i32, y: i32, color: Rgb) {
        let w = self.cell_w as i32;
        let h = self.cell_h as i32;
        let core = Style::new(color, color.halved());
        canvas.rect(x, y, w, h, '█', core);
        if w >= 2 {
            for dy in 0..h {
                canvas.plot(x, y + dy, '▐', core);
                canvas.plot(x + w - 1, y + dy, '▌', core);
            }
        }
    }
}
