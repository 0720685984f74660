use rayon::prelude::*;

use crate::config::Params;
use crate::grid::{Cell, Grid};
use crate::laplacian::Stencil;
use crate::store::GridStore;

/// Gray-Scott update for one site, clamped to `[0, 1]`.
/// Arithmetic runs in f64; only the clamped result is narrowed.
#[inline]
pub fn react(cell: Cell, lap: Cell, params: &Params) -> Cell {
    let a = cell.a as f64;
    let b = cell.b as f64;
    let feed = params.feed as f64;
    let kill = params.kill as f64;
    let abb = a * b * b;

    let new_a = a + (params.da as f64 * lap.a as f64 - abb + feed * (1.0 - a));
    let new_b = b + (params.db as f64 * lap.b as f64 + abb - b * (feed + kill));

    Cell {
        a: new_a.clamp(0.0, 1.0) as f32,
        b: new_b.clamp(0.0, 1.0) as f32,
    }
}

/// Compute `next` from `current`. Rows are written in parallel, each worker
/// owning one row of `next`; the call returns only after every row is done.
///
/// Panics if the buffers differ in shape.
pub fn advance(current: &Grid<Cell>, next: &mut Grid<Cell>, params: &Params) {
    assert!(
        current.same_shape(next),
        "buffer shape mismatch: {}x{} vs {}x{}",
        current.rows,
        current.cols,
        next.rows,
        next.cols
    );

    next.data
        .par_chunks_mut(current.cols)
        .enumerate()
        .for_each(|(row, dst)| {
            let stencil = Stencil::new(current, row);
            let src = current.row(row);
            for (col, out) in dst.iter_mut().enumerate() {
                *out = react(src[col], stencil.at(col), params);
            }
        });
}

/// Advance the store by one generation.
pub fn step(store: &mut GridStore, params: &Params) {
    store.write_next(|current, next| advance(current, next, params));
}
