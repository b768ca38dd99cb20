//! Screen: owns the real terminal and presents canvases on it.
//!
//! The first canvas after `open`, a size change or `invalidate` is painted
//! whole. After that only the cells that differ from the previously shown
//! canvas are written.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Cell, Rgb, Style};

pub struct Screen {
    stdout: io::Stdout,
    shown: Option<Canvas>,
    bytes: Vec<u8>,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn open(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Undo `open`.
    pub fn close(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Paint the next canvas whole.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `canvas`. Afterwards `canvas` holds the previously shown frame,
    /// which the caller repaints before the next call.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.bytes.clear();
        let mut previous = match self.shown.take() {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                patch_into(&prev, canvas, &mut self.bytes)?;
                prev
            }
            _ => {
                repaint_into(canvas, &mut self.bytes)?;
                Canvas::new(canvas.width(), canvas.height())
            }
        };
        self.write_out()?;

        std::mem::swap(&mut previous, canvas);
        self.shown = Some(previous);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits cells and only switches style when it changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<Style>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn paint(&mut self, cell: &Cell) -> Result<()> {
        let style = cell.style;
        if self.style.map(|s| s.bold) != Some(style.bold) {
            // Bold can only be switched off by a full reset, which also
            // drops the colors.
            let attr = if style.bold { Attribute::Bold } else { Attribute::Reset };
            self.out.queue(SetAttribute(attr))?;
            self.style = None;
        }
        if self.style.map(|s| (s.fg, s.bg)) != Some((style.fg, style.bg)) {
            self.out
                .queue(SetColors(Colors::new(color(style.fg), color(style.bg))))?;
        }
        self.style = Some(style);
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Clear the terminal and write every cell of `canvas`.
pub fn repaint_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..canvas.height() {
        painter.move_to(0, y)?;
        for cell in canvas.row(y) {
            painter.paint(cell)?;
        }
    }
    painter.finish()
}

/// Write the cells of `next` that differ from `prev`. Both canvases must
/// have the same size.
pub fn patch_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, end) in dirty_spans(prev.row(y), row) {
            painter.move_to(start as u16, y)?;
            for cell in &row[start..end] {
                painter.paint(cell)?;
            }
        }
    }
    painter.finish()
}

/// Half-open ranges of positions where the two rows differ.
fn dirty_spans(old: &[Cell], new: &[Cell]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (i, _) in old.iter().zip(new).enumerate().filter(|(_, (a, b))| a != b) {
        match spans.last_mut() {
            Some((_, end)) if *end == i => *end = i + 1,
            _ => spans.push((i, i + 1)),
        }
    }
    spans
}
