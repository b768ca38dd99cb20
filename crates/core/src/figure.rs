//! Figure module - a falling piece stored as a 4x4 block grid
//!
//! Figures are built from textual specs: 16 digits scanned row-major,
//! `0` = empty, `1` = filled, `2` = filled pivot. Anything else (line
//! breaks, indentation) is skipped. A figure without a pivot cannot rotate.
//!
//! Rotation does not use lookup tables. Every filled cell is turned around
//! the pivot, and a probe decides how many quarter turns to apply so that
//! all cells stay inside a 5x5 bound (`0..=ROTATION_BOUND` on both axes).

use crate::types::{
    Block, Rgb, RotateDirection, FIGURE_SIZE, FIGURE_SPAWN_X, ROTATION_BOUND,
};

/// Number of cells in a figure grid
pub const FIGURE_CELLS: usize = FIGURE_SIZE * FIGURE_SIZE;

/// Flat figure grid, row-major (y * 4 + x)
pub type FigureGrid = [Block; FIGURE_CELLS];

/// A falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Pivot cell inside the grid; `None` for figures that never rotate.
    center: Option<(i32, i32)>,
    /// Grid origin relative to the top-left field cell.
    pub x: i32,
    pub y: i32,
    blocks: FigureGrid,
    class_id: usize,
}

impl Figure {
    /// Build a figure out of a textual spec.
    ///
    /// # Panics
    ///
    /// Shape specs are compiled-in constants, so a malformed one is a
    /// programming error: more than one pivot or a cell count other than
    /// 16 panics.
    pub fn from_spec(spec: &str, color: Rgb) -> Self {
        let mut blocks = [Block::empty(); FIGURE_CELLS];
        let mut center = None;
        let mut i = 0usize;

        for c in spec.chars() {
            let (filled, pivot) = match c {
                '0' => (false, false),
                '1' => (true, false),
                '2' => (true, true),
                _ => continue,
            };
            assert!(i < FIGURE_CELLS, "figure spec has more than 16 cells: {spec:?}");
            if pivot {
                assert!(center.is_none(), "figure spec has several pivots: {spec:?}");
                center = Some(((i % FIGURE_SIZE) as i32, (i / FIGURE_SIZE) as i32));
            }
            if filled {
                blocks[i] = Block::filled(color);
            }
            i += 1;
        }
        assert_eq!(i, FIGURE_CELLS, "figure spec must describe 16 cells: {spec:?}");

        Self {
            center,
            x: FIGURE_SPAWN_X,
            y: 0,
            blocks,
            class_id: 0,
        }
    }

    /// Tag the figure with its index in the shape table.
    pub fn with_class(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }

    pub fn class_id(&self) -> usize {
        self.class_id
    }

    pub fn center(&self) -> Option<(i32, i32)> {
        self.center
    }

    pub fn is_rotatable(&self) -> bool {
        self.center.is_some()
    }

    pub fn blocks(&self) -> &FigureGrid {
        &self.blocks
    }

    /// Block at grid position (x, y), `None` outside the 4x4 grid.
    pub fn block(&self, x: usize, y: usize) -> Option<Block> {
        if x >= FIGURE_SIZE || y >= FIGURE_SIZE {
            return None;
        }
        Some(self.blocks[y * FIGURE_SIZE + x])
    }

    /// Filled cells as `(dx, dy, block)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.filled)
            .map(|(i, b)| ((i % FIGURE_SIZE) as i32, (i / FIGURE_SIZE) as i32, *b))
    }

    /// Recolor every filled cell.
    pub fn set_color(&mut self, color: Rgb) {
        for block in self.blocks.iter_mut().filter(|b| b.filled) {
            block.color = color;
        }
    }

    /// Top-left corner of the grid in view units, relative to the field
    /// frame. The extra column skips the field's left wall.
    pub fn screen_anchor(&self, cell_w: i32, cell_h: i32) -> (i32, i32) {
        ((self.x + 1) * cell_w, self.y * cell_h)
    }

    /// How many single-step rotations in `direction` keep every filled cell
    /// inside the rotation bound.
    ///
    /// Each cell gets a 4-bit mask of the turn counts (1..=4) that keep it in
    /// bounds; the masks are ANDed and the smallest surviving count wins.
    /// Returns 0 when no count is valid or the figure has no pivot.
    pub fn rotation_count(&self, direction: RotateDirection) -> u32 {
        let Some((cx, cy)) = self.center else {
            return 0;
        };

        let mut valid: u8 = 0b1111;
        for (x, y, _) in self.cells() {
            let (mut bx, mut by) = (x - cx, y - cy);
            let mut mask = 0u8;
            for turn in 0..4 {
                (bx, by) = direction.rotate_offset(bx, by);
                let (rx, ry) = (cx + bx, cy + by);
                if (0..=ROTATION_BOUND).contains(&rx) && (0..=ROTATION_BOUND).contains(&ry) {
                    mask |= 1 << turn;
                }
            }
            valid &= mask;
        }

        (0..4u32)
            .find(|turn| valid & (1 << turn) != 0)
            .map_or(0, |turn| turn + 1)
    }

    /// Rotate in place around the pivot. No-op for figures without one.
    ///
    /// The new grid is assembled separately and swapped in whole, so no
    /// cell is ever read after it has been moved.
    pub fn rotate(&mut self, direction: RotateDirection) {
        let Some((cx, cy)) = self.center else {
            return;
        };
        let turns = self.rotation_count(direction);

        let mut rotated = [Block::empty(); FIGURE_CELLS];
        for (x, y, block) in self.cells() {
            let (mut bx, mut by) = (x - cx, y - cy);
            for _ in 0..turns {
                (bx, by) = direction.rotate_offset(bx, by);
            }
            let (rx, ry) = (cx + bx, cy + by);
            // The bound admits column/row 4; flattening keeps the row-major
            // index, and anything past the grid end is lost.
            let idx = ry * FIGURE_SIZE as i32 + rx;
            match usize::try_from(idx).ok().and_then(|i| rotated.get_mut(i)) {
                Some(slot) => *slot = block,
                None => tracing::warn!(
                    class_id = self.class_id,
                    rx,
                    ry,
                    "rotated cell fell outside the figure grid"
                ),
            }
        }
        self.blocks = rotated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    #[test]
    fn spec_ignores_line_breaks() {
        let f = Figure::from_spec("\n0100\n1210\n0000\n0000\n", RED);
        let filled: Vec<_> = f.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(filled, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(f.center(), Some((1, 1)));
        assert_eq!((f.x, f.y), (FIGURE_SPAWN_X, 0));
    }

    #[test]
    fn spec_without_pivot_is_not_rotatable() {
        let f = Figure::from_spec("1100110000000000", RED);
        assert!(!f.is_rotatable());
        assert_eq!(f.rotation_count(RotateDirection::Clockwise), 0);
    }

    #[test]
    #[should_panic(expected = "several pivots")]
    fn spec_with_two_pivots_panics() {
        Figure::from_spec("2200000000000000", RED);
    }

    #[test]
    #[should_panic(expected = "16 cells")]
    fn short_spec_panics() {
        Figure::from_spec("0120", RED);
    }

    #[test]
    fn set_color_only_touches_filled_cells() {
        let mut f = Figure::from_spec("0100020001000100", RED);
        f.set_color(Rgb::new(1, 2, 3));
        assert!(f.cells().all(|(_, _, b)| b.color == Rgb::new(1, 2, 3)));
        assert_eq!(f.block(0, 0), Some(Block::empty()));
    }

    #[test]
    fn block_outside_grid_is_none() {
        let f = Figure::from_spec("0100020001000100", RED);
        assert_eq!(f.block(4, 0), None);
        assert_eq!(f.block(0, 4), None);
    }

    #[test]
    fn pivot_on_last_column_uses_extended_bound() {
        // Offset (-1, 0) turned twice lands at column 4 of a 4-wide grid.
        let mut f = Figure::from_spec("0012000000000000", RED);
        assert_eq!(f.rotation_count(RotateDirection::Clockwise), 2);

        // Column 4 of row 0 flattens onto column 0 of row 1.
        f.rotate(RotateDirection::Clockwise);
        let filled: Vec<_> = f.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(filled, vec![(3, 0), (0, 1)]);
    }
}
