//! Memory layout descriptors for `(ncol, nrow)` grids
//!
//! Orders are named in array terms over the `(ncol, nrow)` shape: row-major
//! is C order (the row index varies fastest), column-major is Fortran order
//! (the column index varies fastest, which is also the on-disk order).

/// Physical ordering of a contiguous grid buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryOrder {
    /// C order: element `(col, row)` at `col * nrow + row`
    #[default]
    RowMajor,
    /// Fortran order: element `(col, row)` at `col + row * ncol`
    ColumnMajor,
}

impl MemoryOrder {
    /// Element strides of this order for an `(ncol, nrow)` grid
    pub const fn strides(self, ncol: usize, nrow: usize) -> Strides {
        match self {
            MemoryOrder::RowMajor => Strides { col: nrow, row: 1 },
            MemoryOrder::ColumnMajor => Strides { col: 1, row: ncol },
        }
    }
}

/// Element strides of a 2D grid
///
/// `col` is the distance between `(c, r)` and `(c + 1, r)`, `row` the
/// distance between `(c, r)` and `(c, r + 1)`, both counted in elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strides {
    pub col: usize,
    pub row: usize,
}

impl Strides {
    /// Buffer offset of element `(col, row)`
    #[inline]
    pub const fn offset(self, col: usize, row: usize) -> usize {
        col * self.col + row * self.row
    }

    /// The contiguous order these strides describe, if any
    ///
    /// A single row or column is contiguous in both orders; column-major
    /// wins the tie since it needs no transposition.
    pub fn contiguous_order(self, ncol: usize, nrow: usize) -> Option<MemoryOrder> {
        let column_major = (ncol <= 1 || self.col == 1) && (nrow <= 1 || self.row == ncol);
        if column_major {
            return Some(MemoryOrder::ColumnMajor);
        }
        let row_major = (nrow <= 1 || self.row == 1) && (ncol <= 1 || self.col == nrow);
        row_major.then_some(MemoryOrder::RowMajor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_strides() {
        assert_eq!(
            MemoryOrder::RowMajor.strides(3, 2),
            Strides { col: 2, row: 1 }
        );
        assert_eq!(
            MemoryOrder::ColumnMajor.strides(3, 2),
            Strides { col: 1, row: 3 }
        );
    }

    #[test]
    fn test_offsets_agree_with_orders() {
        let c = MemoryOrder::RowMajor.strides(3, 2);
        let f = MemoryOrder::ColumnMajor.strides(3, 2);
        // (col=2, row=1) is the last element in both orders
        assert_eq!(c.offset(2, 1), 5);
        assert_eq!(f.offset(2, 1), 5);
        // (col=1, row=0)
        assert_eq!(c.offset(1, 0), 2);
        assert_eq!(f.offset(1, 0), 1);
    }

    #[test]
    fn test_contiguous_order() {
        assert_eq!(
            MemoryOrder::RowMajor.strides(3, 2).contiguous_order(3, 2),
            Some(MemoryOrder::RowMajor)
        );
        assert_eq!(
            MemoryOrder::ColumnMajor.strides(3, 2).contiguous_order(3, 2),
            Some(MemoryOrder::ColumnMajor)
        );
        assert_eq!(
            Strides { col: 4, row: 2 }.contiguous_order(3, 2),
            None
        );
        // a single column is contiguous either way
        assert_eq!(
            MemoryOrder::RowMajor.strides(1, 5).contiguous_order(1, 5),
            Some(MemoryOrder::ColumnMajor)
        );
    }
}
