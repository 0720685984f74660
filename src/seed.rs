use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::rng::Rng;

const SALT_INTERIOR: u64 = 0x5EED_0000_B0B0_0001;

/// Largest inset of the random interior from each edge.
pub const MAX_MARGIN: usize = 20;

/// Explicit activator value at one site.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSeed {
    pub row: usize,
    pub col: usize,
    pub b: f32,
}

/// How the first buffer is perturbed on top of the uniform substrate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Substrate everywhere. A fixed point of the update rule.
    Uniform,
    /// `b` uniform in `[0, 1)` over a centered sub-rectangle.
    RandomInterior { seed: u64 },
    /// `b` set at the listed sites only.
    Cells { cells: Vec<CellSeed> },
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::RandomInterior { seed: 42 }
    }
}

/// Inset of the random region: 20 cells on the default 200x200 grid,
/// shrinking to a tenth of the short side on small grids.
pub fn interior_margin(rows: usize, cols: usize) -> usize {
    (rows.min(cols) / 10).min(MAX_MARGIN)
}

impl SeedPolicy {
    pub fn validate(&self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        if let SeedPolicy::Cells { cells } = self {
            for c in cells {
                if c.row >= rows || c.col >= cols {
                    return Err(ConfigError::SeedOutOfBounds {
                        row: c.row,
                        col: c.col,
                        rows,
                        cols,
                    });
                }
                if !(0.0..=1.0).contains(&c.b) {
                    return Err(ConfigError::SeedValueOutOfRange(c.b));
                }
            }
        }
        Ok(())
    }

    /// Overwrite `grid` with substrate, then apply the perturbation.
    /// `a` stays 1.0 everywhere. Callers validate against the grid shape first.
    pub(crate) fn apply(&self, grid: &mut Grid<Cell>) {
        grid.data.fill(Cell::SUBSTRATE);

        match self {
            SeedPolicy::Uniform => {}
            SeedPolicy::RandomInterior { seed } => {
                let mut rng = Rng::new(seed ^ SALT_INTERIOR);
                let margin = interior_margin(grid.rows, grid.cols);
                for row in margin..grid.rows - margin {
                    for col in margin..grid.cols - margin {
                        let b = rng.next_f32();
                        grid.set(row, col, Cell::new(1.0, b));
                    }
                }
            }
            SeedPolicy::Cells { cells } => {
                for c in cells {
                    grid.set(c.row, c.col, Cell::new(1.0, c.b));
                }
            }
        }
    }
}
