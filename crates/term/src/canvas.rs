//! Canvas: a grid of styled terminal cells that the game view paints into.

pub use crate::types::Rgb;

/// Colors and weight of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// One character with its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)),
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Row-major grid of cells. Drawing calls take signed coordinates and drop
/// whatever falls outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Match the viewport size and fill every cell with `cell`.
    pub fn reset(&mut self, width: u16, height: u16, cell: Cell) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, cell);
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u16::try_from(x).ok()?, u16::try_from(y).ok()?);
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x as i32, y as i32).map(|i| self.cells[i])
    }

    /// All cells of row `y`; empty past the bottom.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Characters of row `y`.
    pub fn line(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }

    pub fn plot(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    /// One column per char.
    pub fn text(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (ch, cx) in text.chars().zip(x..) {
            self.plot(cx, y, ch, style);
        }
    }

    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: Style) {
        for cy in y..y + h {
            for cx in x..x + w {
                self.plot(cx, cy, ch, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_is_clipped() {
        let mut canvas = Canvas::new(3, 2);
        let style = Style::new(Rgb::new(1, 2, 3), Rgb::new(0, 0, 0));
        canvas.text(-1, 0, "abcde", style);
        canvas.plot(0, -1, 'x', style);
        canvas.rect(2, 1, 5, 5, '#', style);
        assert_eq!(canvas.line(0), "bcd");
        assert_eq!(canvas.line(1), "  #");
        assert_eq!(canvas.cell(0, 0).unwrap().style, style);
        assert!(canvas.row(2).is_empty());
    }

    #[test]
    fn reset_refills() {
        let mut canvas = Canvas::new(2, 2);
        canvas.plot(0, 0, 'x', Style::new(Rgb::new(9, 9, 9), Rgb::new(0, 0, 0)));
        let fill = Cell {
            ch: '.',
            ..Cell::BLANK
        };
        canvas.reset(4, 3, fill);
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
        assert_eq!(canvas.line(0), "....");
        assert_eq!(canvas.line(2), "....");
    }
}
