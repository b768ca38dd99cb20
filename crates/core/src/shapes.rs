//! Shapes module - the shape table and random figure generation
//!
//! The table is two immutable parallel arrays (spec strings and colors).
//! It is built once and shared with the generator by `Arc`; the generator
//! owns the RNG, so a seed reproduces the whole figure sequence.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::figure::Figure;
use crate::types::Rgb;

/// Number of shape classes in a table
pub const SHAPE_COUNT: usize = 7;

// ████
//   ████
const SPEC_N: &str = "
0110
1200
0000
0000
";

//   ████
// ████
const SPEC_N_MIRRORED: &str = "
1100
0210
0000
0000
";

//   ██
// ██████
const SPEC_T: &str = "
0100
1210
0000
0000
";

// ████████
const SPEC_I: &str = "
0100
0200
0100
0100
";

// ████
// ████
const SPEC_B: &str = "
1100
1100
0000
0000
";

// ██████
// ██
const SPEC_L: &str = "
0100
0200
0110
0000
";

// ██████
//     ██
const SPEC_L_MIRRORED: &str = "
0100
0200
1100
0000
";

/// Class ids of the classic table, in table order.
pub mod class {
    pub const N: usize = 0;
    pub const N_MIRRORED: usize = 1;
    pub const T: usize = 2;
    pub const I: usize = 3;
    pub const B: usize = 4;
    pub const L: usize = 5;
    pub const L_MIRRORED: usize = 6;
}

/// Shape specs and their colors, indexed by class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    specs: [&'static str; SHAPE_COUNT],
    colors: [Rgb; SHAPE_COUNT],
}

impl ShapeTable {
    pub const fn new(specs: [&'static str; SHAPE_COUNT], colors: [Rgb; SHAPE_COUNT]) -> Self {
        Self { specs, colors }
    }

    /// The seven classic shapes.
    pub const fn classic() -> Self {
        Self::new(
            [
                SPEC_N,
                SPEC_N_MIRRORED,
                SPEC_T,
                SPEC_I,
                SPEC_B,
                SPEC_L,
                SPEC_L_MIRRORED,
            ],
            [
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(100, 100, 255),
                Rgb::new(255, 255, 255),
                Rgb::new(255, 0, 255),
                Rgb::new(255, 255, 0),
                Rgb::new(0, 255, 255),
            ],
        )
    }

    pub fn len(&self) -> usize {
        SHAPE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn spec(&self, class_id: usize) -> &'static str {
        self.specs[class_id]
    }

    pub fn color(&self, class_id: usize) -> Rgb {
        self.colors[class_id]
    }

    /// Build a fresh figure of the given class at the spawn position.
    ///
    /// # Panics
    ///
    /// Panics if `class_id` is not below [`SHAPE_COUNT`].
    pub fn figure(&self, class_id: usize) -> Figure {
        Figure::from_spec(self.spec(class_id), self.color(class_id)).with_class(class_id)
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::classic()
    }
}

/// Random figure source over a shared shape table.
#[derive(Debug, Clone)]
pub struct FigureGenerator {
    table: Arc<ShapeTable>,
    rng: StdRng,
    seed: u64,
}

impl FigureGenerator {
    /// Create a generator whose sequence is fully determined by `seed`.
    pub fn from_seed(table: Arc<ShapeTable>, seed: u64) -> Self {
        Self {
            table,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Classic table with the given seed.
    pub fn classic(seed: u64) -> Self {
        Self::from_seed(Arc::new(ShapeTable::classic()), seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Any class, uniformly.
    pub fn random(&mut self) -> Figure {
        let class_id = self.rng.random_range(0..self.table.len());
        self.table.figure(class_id)
    }

    /// Any class except the one of `figure`.
    pub fn random_not(&mut self, figure: &Figure) -> Figure {
        loop {
            let class_id = self.rng.random_range(0..self.table.len());
            if class_id != figure.class_id() {
                return self.table.figure(class_id);
            }
        }
    }
}
