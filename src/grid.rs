/// Row-major flat grid. No per-cell objects, f32 friendly.
/// Both axes wrap (toroidal topology).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub rows: usize,
    pub cols: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }

    pub fn filled(rows: usize, cols: usize, v: T) -> Self {
        Self {
            data: vec![v; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}

/// Concentrations of the substrate `a` and the activator `b` at one site.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub a: f32,
    pub b: f32,
}

impl Cell {
    /// Uniform background: all substrate, no activator.
    pub const SUBSTRATE: Cell = Cell { a: 1.0, b: 0.0 };

    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn in_unit_range(&self) -> bool {
        (0.0..=1.0).contains(&self.a) && (0.0..=1.0).contains(&self.b)
    }
}

/// Wrap a signed index onto `0..n`.
#[cfg(test)]
#[inline]
pub(crate) fn wrap(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

/// Previous and next index along an axis of length `n`, wrapping at both ends.
#[inline]
pub fn wrap_neighbors(i: usize, n: usize) -> (usize, usize) {
    let prev = if i == 0 { n - 1 } else { i - 1 };
    let next = if i + 1 == n { 0 } else { i + 1 };
    (prev, next)
}

/// 8-connected neighbors with wrapping on both axes.
#[cfg(test)]
pub(crate) fn neighbors8_wrap(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let offsets: [(isize, isize); 8] = [
        (-1, -1), (-1, 0), (-1, 1),
        (0, -1),           (0, 1),
        (1, -1),  (1, 0),  (1, 1),
    ];
    offsets.into_iter().map(move |(dr, dc)| {
        (
            wrap(row as isize + dr, rows),
            wrap(col as isize + dc, cols),
        )
    })
}
