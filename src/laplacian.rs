//! Discrete Laplacian over a toroidal grid, 3x3 kernel:
//!
//! ```text
//! 0.05  0.2  0.05
//! 0.2  -1.0  0.2
//! 0.05  0.2  0.05
//! ```
//!
//! Neighbor indices wrap on both axes. Per cell the sum is evaluated as
//! `ORTHOGONAL * (N + S + W + E) + DIAGONAL * (NW + NE + SW + SE) + CENTER * c`,
//! left to right, so a uniform field of ones yields exactly zero.

use rayon::prelude::*;

use crate::grid::{Cell, Grid, wrap_neighbors};

pub const CENTER: f32 = -1.0;
pub const ORTHOGONAL: f32 = 0.2;
pub const DIAGONAL: f32 = 0.05;

/// Row-major kernel, row 0 is the row above.
pub const KERNEL: [[f32; 3]; 3] = [
    [DIAGONAL, ORTHOGONAL, DIAGONAL],
    [ORTHOGONAL, CENTER, ORTHOGONAL],
    [DIAGONAL, ORTHOGONAL, DIAGONAL],
];

/// The three rows around one grid row, already wrapped.
pub struct Stencil<'a> {
    above: &'a [Cell],
    center: &'a [Cell],
    below: &'a [Cell],
}

impl<'a> Stencil<'a> {
    pub fn new(grid: &'a Grid<Cell>, row: usize) -> Self {
        let (up, down) = wrap_neighbors(row, grid.rows);
        Self {
            above: grid.row(up),
            center: grid.row(row),
            below: grid.row(down),
        }
    }

    /// Laplacian of both fields at `col`.
    #[inline]
    pub fn at(&self, col: usize) -> Cell {
        let (l, r) = wrap_neighbors(col, self.center.len());
        let (n, s, w, e) = (self.above[col], self.below[col], self.center[l], self.center[r]);
        let (nw, ne, sw, se) = (self.above[l], self.above[r], self.below[l], self.below[r]);
        let c = self.center[col];

        let orth_a = n.a + s.a + w.a + e.a;
        let orth_b = n.b + s.b + w.b + e.b;
        let diag_a = nw.a + ne.a + sw.a + se.a;
        let diag_b = nw.b + ne.b + sw.b + se.b;

        Cell {
            a: ORTHOGONAL * orth_a + DIAGONAL * diag_a + CENTER * c.a,
            b: ORTHOGONAL * orth_b + DIAGONAL * diag_b + CENTER * c.b,
        }
    }
}

/// Laplacian of both fields at a single site.
pub fn laplacian_at(grid: &Grid<Cell>, row: usize, col: usize) -> Cell {
    Stencil::new(grid, row).at(col)
}

/// Laplacian of the whole grid. `a`/`b` of each output cell hold the
/// Laplacian of the respective field.
pub fn laplacian(grid: &Grid<Cell>) -> Grid<Cell> {
    let mut out = Grid::new(grid.rows, grid.cols);
    out.data
        .par_chunks_mut(grid.cols)
        .enumerate()
        .for_each(|(row, dst)| {
            let stencil = Stencil::new(grid, row);
            for (col, cell) in dst.iter_mut().enumerate() {
                *cell = stencil.at(col);
            }
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::wrap;

    /// Straightforward nine-offset sum, visiting the kernel in row-major order.
    fn brute_force(grid: &Grid<Cell>, row: usize, col: usize) -> Cell {
        let mut acc = Cell::default();
        for (dr, krow) in KERNEL.iter().enumerate() {
            for (dc, k) in krow.iter().enumerate() {
                let r = wrap(row as isize + dr as isize - 1, grid.rows);
                let c = wrap(col as isize + dc as isize - 1, grid.cols);
                let v = grid.get(r, c);
                acc.a += k * v.a;
                acc.b += k * v.b;
            }
        }
        acc
    }

    #[test]
    fn kernel_weights_sum_to_zero() {
        assert_eq!(ORTHOGONAL * 4.0 + DIAGONAL * 4.0 + CENTER, 0.0);

        let orth: f32 = [KERNEL[0][1], KERNEL[1][0], KERNEL[1][2], KERNEL[2][1]].iter().sum();
        let diag: f32 = [KERNEL[0][0], KERNEL[0][2], KERNEL[2][0], KERNEL[2][2]].iter().sum();
        assert_eq!(orth + diag + KERNEL[1][1], 0.0);
    }

    #[test]
    fn uniform_substrate_has_zero_laplacian() {
        let g = Grid::filled(6, 7, Cell::SUBSTRATE);
        let lap = laplacian(&g);
        assert!(lap.data.iter().all(|&c| c == Cell::new(0.0, 0.0)));
    }

    #[test]
    fn perturbation_at_origin_reaches_far_corner() {
        let rows = 5;
        let cols = 4;
        let mut g = Grid::new(rows, cols);
        g.set(0, 0, Cell::new(0.0, 1.0));

        // (rows-1, cols-1) sees (0, 0) as its south-east diagonal neighbor.
        let corner = laplacian_at(&g, rows - 1, cols - 1);
        assert_eq!(corner, Cell::new(0.0, DIAGONAL));

        // Orthogonal wrap along each axis.
        assert_eq!(laplacian_at(&g, rows - 1, 0).b, ORTHOGONAL);
        assert_eq!(laplacian_at(&g, 0, cols - 1).b, ORTHOGONAL);
        assert_eq!(laplacian_at(&g, 0, 0).b, CENTER);

        // Out of reach.
        assert_eq!(laplacian_at(&g, 2, 2).b, 0.0);
    }

    #[test]
    fn grouped_sum_matches_direct_summation() {
        let mut g = Grid::new(6, 5);
        for (i, c) in g.data.iter_mut().enumerate() {
            let t = i as f32;
            *c = Cell::new((t * 0.37).fract(), (t * 0.61).fract());
        }
        let lap = laplacian(&g);
        for row in 0..g.rows {
            for col in 0..g.cols {
                let want = brute_force(&g, row, col);
                let got = lap.get(row, col);
                assert!((got.a - want.a).abs() < 1e-5, "a at ({row},{col})");
                assert!((got.b - want.b).abs() < 1e-5, "b at ({row},{col})");
            }
        }
    }

    #[test]
    fn minimum_grid_wraps_onto_itself() {
        // On 3x3 every site neighbors every other site exactly once.
        let mut g = Grid::new(3, 3);
        g.set(1, 1, Cell::new(0.0, 1.0));
        let lap = laplacian(&g);
        assert_eq!(lap.get(1, 1).b, CENTER);
        assert_eq!(lap.get(0, 1).b, ORTHOGONAL);
        assert_eq!(lap.get(2, 2).b, DIAGONAL);
    }
}
