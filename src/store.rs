use log::debug;

use crate::config::MIN_DIM;
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::seed::SeedPolicy;

/// Which of the two buffers holds the most recently completed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Active {
    Front,
    Back,
}

impl Active {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Active::Front => Active::Back,
            Active::Back => Active::Front,
        }
    }
}

/// Double-buffered pair of grids. The active buffer is only ever read;
/// the other one is written by a step and becomes active once it completes.
#[derive(Clone, Debug)]
pub struct GridStore {
    front: Grid<Cell>,
    back: Grid<Cell>,
    active: Active,
}

impl GridStore {
    pub fn initialize(rows: usize, cols: usize, seed: &SeedPolicy) -> Result<Self, ConfigError> {
        if rows < MIN_DIM || cols < MIN_DIM {
            return Err(ConfigError::GridTooSmall { rows, cols });
        }
        seed.validate(rows, cols)?;

        let mut front = Grid::filled(rows, cols, Cell::SUBSTRATE);
        seed.apply(&mut front);
        let back = Grid::filled(rows, cols, Cell::SUBSTRATE);
        debug!("grid store {}x{} seeded with {:?}", rows, cols, seed);

        Ok(Self {
            front,
            back,
            active: Active::Front,
        })
    }

    pub fn rows(&self) -> usize {
        self.front.rows
    }

    pub fn cols(&self) -> usize {
        self.front.cols
    }

    pub fn active_flag(&self) -> Active {
        self.active
    }

    pub fn active(&self) -> &Grid<Cell> {
        match self.active {
            Active::Front => &self.front,
            Active::Back => &self.back,
        }
    }

    /// Hand the active buffer (read) and the inactive one (write) to `write`,
    /// then make the freshly written buffer active. The flag flips only after
    /// `write` has returned, so readers never observe a half-written step.
    pub fn write_next<R>(&mut self, write: impl FnOnce(&Grid<Cell>, &mut Grid<Cell>) -> R) -> R {
        let out = match self.active {
            Active::Front => write(&self.front, &mut self.back),
            Active::Back => write(&self.back, &mut self.front),
        };
        self.active = self.active.other();
        out
    }
}
