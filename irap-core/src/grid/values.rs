//! Owned and borrowed value grids
//!
//! [`GridView`] is a stride-aware accessor over any `&[f32]`, so a caller's
//! array can be exported in whatever layout it already has. [`ValueGrid`]
//! owns its buffer and is what imports produce.

use crate::error::{IrapError, Result};
use crate::grid::layout::{MemoryOrder, Strides};
use crate::traits::SurfaceGrid;
use crate::validation::validate_strided_len;

fn contiguous_len(ncol: usize, nrow: usize, len: usize) -> Result<usize> {
    ncol.checked_mul(nrow).ok_or(IrapError::InvalidLayout {
        len,
        required: usize::MAX,
    })
}

/// Borrowed `(ncol, nrow)` grid over a strided buffer
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    data: &'a [f32],
    ncol: usize,
    nrow: usize,
    strides: Strides,
}

impl<'a> GridView<'a> {
    /// View `data` with explicit element strides
    pub fn new(data: &'a [f32], ncol: usize, nrow: usize, strides: Strides) -> Result<Self> {
        contiguous_len(ncol, nrow, data.len())?;
        validate_strided_len(data.len(), ncol, nrow, strides)?;
        Ok(Self {
            data,
            ncol,
            nrow,
            strides,
        })
    }

    /// View a contiguous buffer laid out in `order`
    ///
    /// The buffer must hold exactly `ncol * nrow` values.
    pub fn with_order(data: &'a [f32], ncol: usize, nrow: usize, order: MemoryOrder) -> Result<Self> {
        let required = contiguous_len(ncol, nrow, data.len())?;
        if data.len() != required {
            return Err(IrapError::InvalidLayout {
                len: data.len(),
                required,
            });
        }
        Ok(Self {
            data,
            ncol,
            nrow,
            strides: order.strides(ncol, nrow),
        })
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn strides(&self) -> Strides {
        self.strides
    }

    /// Value at `(col, row)`, `None` when out of bounds
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.ncol || row >= self.nrow {
            return None;
        }
        self.data.get(self.strides.offset(col, row)).copied()
    }

    /// Iterate values in on-disk order, column index fastest
    pub fn column_major(&self) -> ColumnMajorValues<'a> {
        let count = self.ncol * self.nrow;
        match self.strides.contiguous_order(self.ncol, self.nrow) {
            Some(MemoryOrder::ColumnMajor) => ColumnMajorValues::Contiguous(self.data[..count].iter()),
            _ => ColumnMajorValues::Strided {
                view: *self,
                col: 0,
                row: 0,
                remaining: count,
            },
        }
    }

    /// Copy into an owned grid laid out in `order`
    pub fn to_grid(&self, order: MemoryOrder) -> ValueGrid {
        let mut builder = GridBuilder::new(self.ncol, self.nrow, order);
        for value in self.column_major() {
            builder.push(value);
        }
        builder.finish()
    }
}

/// Column-major iterator over a [`GridView`]
#[derive(Debug, Clone)]
pub enum ColumnMajorValues<'a> {
    /// Buffer is already in disk order
    Contiguous(core::slice::Iter<'a, f32>),
    /// Any other layout, walked through the strides
    Strided {
        view: GridView<'a>,
        col: usize,
        row: usize,
        remaining: usize,
    },
}

impl Iterator for ColumnMajorValues<'_> {
    type Item = f32;

    #[inline]
    fn next(&mut self) -> Option<f32> {
        match self {
            ColumnMajorValues::Contiguous(iter) => iter.next().copied(),
            ColumnMajorValues::Strided {
                view,
                col,
                row,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                let value = view.data[view.strides.offset(*col, *row)];
                *remaining -= 1;
                *col += 1;
                if *col == view.ncol {
                    *col = 0;
                    *row += 1;
                }
                Some(value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            ColumnMajorValues::Contiguous(iter) => iter.len(),
            ColumnMajorValues::Strided { remaining, .. } => *remaining,
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for ColumnMajorValues<'_> {}

/// Owned `(ncol, nrow)` grid of single-precision values
///
/// Equality is logical: two grids are equal when they hold the same values
/// at the same `(col, row)` positions, whatever their memory order, with
/// NaN treated as equal to NaN.
#[derive(Debug, Clone)]
pub struct ValueGrid {
    data: Vec<f32>,
    ncol: usize,
    nrow: usize,
    order: MemoryOrder,
}

impl ValueGrid {
    /// Wrap a contiguous buffer of exactly `ncol * nrow` values
    pub fn new(data: Vec<f32>, ncol: usize, nrow: usize, order: MemoryOrder) -> Result<Self> {
        let required = contiguous_len(ncol, nrow, data.len())?;
        if data.len() != required {
            return Err(IrapError::InvalidLayout {
                len: data.len(),
                required,
            });
        }
        Ok(Self {
            data,
            ncol,
            nrow,
            order,
        })
    }

    /// Build from nested columns: `columns[col][row]`
    pub fn from_columns(columns: &[Vec<f32>]) -> Result<Self> {
        let ncol = columns.len();
        let nrow = columns.first().map_or(0, Vec::len);
        if let Some(bad) = columns.iter().find(|column| column.len() != nrow) {
            return Err(IrapError::ShapeMismatch {
                expected: (ncol, nrow),
                actual: (ncol, bad.len()),
            });
        }
        let data = columns.iter().flatten().copied().collect();
        Self::new(data, ncol, nrow, MemoryOrder::RowMajor)
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn order(&self) -> MemoryOrder {
        self.order
    }

    /// Backing buffer in [`Self::order`]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Value at `(col, row)`, `None` when out of bounds
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        self.view().get(col, row)
    }

    /// Borrow as a strided view
    pub fn view(&self) -> GridView<'_> {
        GridView {
            data: &self.data,
            ncol: self.ncol,
            nrow: self.nrow,
            strides: self.order.strides(self.ncol, self.nrow),
        }
    }

    /// Copy into `order`, transposing the buffer when the order changes
    pub fn to_order(&self, order: MemoryOrder) -> ValueGrid {
        if order == self.order {
            return self.clone();
        }
        self.view().to_grid(order)
    }

    /// Nested columns: `result[col][row]`
    pub fn to_columns(&self) -> Vec<Vec<f32>> {
        let view = self.view();
        (0..self.ncol)
            .map(|col| {
                (0..self.nrow)
                    .filter_map(|row| view.get(col, row))
                    .collect()
            })
            .collect()
    }
}

impl PartialEq for ValueGrid {
    fn eq(&self, other: &Self) -> bool {
        crate::traits::grid::same_values(self, other)
    }
}

impl SurfaceGrid for ValueGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.ncol, self.nrow)
    }

    fn get(&self, col: usize, row: usize) -> Option<f32> {
        ValueGrid::get(self, col, row)
    }
}

impl SurfaceGrid for GridView<'_> {
    fn dimensions(&self) -> (usize, usize) {
        (self.ncol, self.nrow)
    }

    fn get(&self, col: usize, row: usize) -> Option<f32> {
        GridView::get(self, col, row)
    }
}

/// Fills a grid in column-major (on-disk) order
///
/// The backing buffer is allocated once at its final size and each pushed
/// value is placed at its position in the target memory order.
#[derive(Debug)]
pub struct GridBuilder {
    data: Vec<f32>,
    ncol: usize,
    nrow: usize,
    order: MemoryOrder,
    strides: Strides,
    col: usize,
    row: usize,
    filled: usize,
}

impl GridBuilder {
    pub fn new(ncol: usize, nrow: usize, order: MemoryOrder) -> Self {
        Self {
            data: vec![0.0; ncol * nrow],
            ncol,
            nrow,
            order,
            strides: order.strides(ncol, nrow),
            col: 0,
            row: 0,
            filled: 0,
        }
    }

    /// Number of values pushed so far
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Number of values still missing
    pub fn remaining(&self) -> usize {
        self.data.len() - self.filled
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Place the next on-disk value; extra values are ignored
    #[inline]
    pub fn push(&mut self, value: f32) {
        if self.is_full() {
            return;
        }
        self.data[self.strides.offset(self.col, self.row)] = value;
        self.filled += 1;
        self.col += 1;
        if self.col == self.ncol {
            self.col = 0;
            self.row += 1;
        }
    }

    /// Finish the grid; unfilled positions keep their zero initialisation
    pub fn finish(self) -> ValueGrid {
        ValueGrid {
            data: self.data,
            ncol: self.ncol,
            nrow: self.nrow,
            order: self.order,
        }
    }
}
