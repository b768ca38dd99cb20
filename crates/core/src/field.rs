//! Field module - the grid of landed blocks
//!
//! The field is a width x height grid stored as a flat row-major vector.
//! Coordinates: (x, y) where x grows to the right and y grows downwards,
//! row 0 being the top. Dimensions are fixed at construction.

use crate::figure::Figure;
use crate::types::{Block, Rgb, NEUTRAL_GRAY};

/// The playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    /// Flat array of blocks, row-major order (y * width + x)
    blocks: Vec<Block>,
}

impl Field {
    /// Create an empty field.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocks: vec![Block::empty(); width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the drawn frame in cells (left and right walls included).
    pub fn frame_width(&self) -> usize {
        self.width + 2
    }

    /// Height of the drawn frame in cells (bottom wall included).
    pub fn frame_height(&self) -> usize {
        self.height + 1
    }

    /// Block at (x, y), `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        self.index(x, y).map(|idx| self.blocks[idx])
    }

    /// Overwrite the block at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, block: Block) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.blocks[idx] = block;
                true
            }
            None => false,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mark every cell unfilled, keeping the allocation.
    pub fn clear(&mut self) {
        for block in &mut self.blocks {
            block.filled = false;
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.blocks[start..start + self.width]
            .iter()
            .all(|b| b.filled)
    }

    /// Whether any filled figure cell is out of bounds or on a filled field
    /// cell. Stops at the first hit.
    pub fn collide(&self, figure: &Figure) -> bool {
        figure.cells().any(|(dx, dy, _)| {
            match self.index(figure.x + dx, figure.y + dy) {
                Some(idx) => self.blocks[idx].filled,
                None => true,
            }
        })
    }

    /// Move the figure one row down. If that collides, move it back, copy its
    /// filled cells into the field and return true (landed). Otherwise leave
    /// it one row lower and return false.
    pub fn step_collide_and_merge(&mut self, figure: &mut Figure) -> bool {
        figure.y += 1;
        if !self.collide(figure) {
            return false;
        }
        figure.y -= 1;

        for (dx, dy, block) in figure.cells() {
            self.set(figure.x + dx, figure.y + dy, block);
        }
        true
    }

    /// Remove full rows and return how many were removed.
    ///
    /// Rows are scanned top to bottom. Each full row is overwritten by
    /// shifting every row above it down by one; row 0 has no source row and
    /// keeps its old content.
    pub fn check_for_lines(&mut self) -> u32 {
        let mut lines = 0;
        for y in 0..self.height {
            if !self.is_row_full(y) {
                continue;
            }
            lines += 1;
            // Rows 0..y move to 1..=y; copy_within behaves like memmove.
            self.blocks.copy_within(0..y * self.width, self.width);
        }
        lines
    }

    /// Step every channel of every filled block one unit towards the
    /// neutral gray.
    pub fn grayify(&mut self) {
        for block in self.blocks.iter_mut().filter(|b| b.filled) {
            block.color = fade_towards(block.color, NEUTRAL_GRAY);
        }
    }
}

fn fade_channel(c: u8, target: u8) -> u8 {
    match c.cmp(&target) {
        std::cmp::Ordering::Less => c + 1,
        std::cmp::Ordering::Greater => c - 1,
        std::cmp::Ordering::Equal => c,
    }
}

fn fade_towards(color: Rgb, target: Rgb) -> Rgb {
    Rgb::new(
        fade_channel(color.r, target.r),
        fade_channel(color.g, target.g),
        fade_channel(color.b, target.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_calculation() {
        let field = Field::new(10, 25);
        assert_eq!(field.index(0, 0), Some(0));
        assert_eq!(field.index(9, 0), Some(9));
        assert_eq!(field.index(0, 1), Some(10));
        assert_eq!(field.index(9, 24), Some(249));
        assert_eq!(field.index(-1, 0), None);
        assert_eq!(field.index(10, 0), None);
        assert_eq!(field.index(0, 25), None);
    }

    #[test]
    fn fade_channel_steps_by_one() {
        assert_eq!(fade_channel(0, 80), 1);
        assert_eq!(fade_channel(255, 80), 254);
        assert_eq!(fade_channel(80, 80), 80);
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut field = Field::new(4, 3);
        field.set(1, 1, Block::filled(NEUTRAL_GRAY));
        field.clear();
        assert_eq!(field.blocks().len(), 12);
        assert!(field.blocks().iter().all(|b| !b.filled));
    }

    #[test]
    fn frame_includes_walls() {
        let field = Field::new(10, 25);
        assert_eq!(field.frame_width(), 12);
        assert_eq!(field.frame_height(), 26);
    }
}
