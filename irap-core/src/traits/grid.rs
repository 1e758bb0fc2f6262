//! Grid access trait shared by owned and borrowed grids

/// Read access to an `(ncol, nrow)` surface grid
pub trait SurfaceGrid {
    /// Grid dimensions as `(ncol, nrow)`
    fn dimensions(&self) -> (usize, usize);

    /// Value at `(col, row)`, `None` when out of bounds
    fn get(&self, col: usize, row: usize) -> Option<f32>;

    /// Total number of cells
    fn value_count(&self) -> usize {
        let (ncol, nrow) = self.dimensions();
        ncol * nrow
    }

    /// Number of undefined (NaN) cells
    fn undefined_count(&self) -> usize {
        let (ncol, nrow) = self.dimensions();
        (0..nrow)
            .flat_map(|row| (0..ncol).map(move |col| (col, row)))
            .filter(|&(col, row)| self.get(col, row).is_some_and(f32::is_nan))
            .count()
    }
}

/// Cell-by-cell comparison of two grids, NaN equal to NaN
pub fn same_values<A, B>(a: &A, b: &B) -> bool
where
    A: SurfaceGrid + ?Sized,
    B: SurfaceGrid + ?Sized,
{
    let (ncol, nrow) = a.dimensions();
    if (ncol, nrow) != b.dimensions() {
        return false;
    }
    (0..nrow).all(|row| {
        (0..ncol).all(|col| match (a.get(col, row), b.get(col, row)) {
            (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
            _ => false,
        })
    })
}
