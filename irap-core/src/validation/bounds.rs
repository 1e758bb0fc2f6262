//! Bounds validation for strided grids and import buffers
//!
//! Pure arithmetic with overflow protection, no memory access.

use crate::error::{IrapError, Result};
use crate::grid::Strides;

/// Number of elements a `(ncol, nrow)` grid with `strides` reaches into its buffer
///
/// This is the index of the last addressed element plus one, or `None` on
/// overflow. An empty shape addresses nothing.
pub fn strided_extent(ncol: usize, nrow: usize, strides: Strides) -> Option<usize> {
    if ncol == 0 || nrow == 0 {
        return Some(0);
    }
    let last_col = (ncol - 1).checked_mul(strides.col)?;
    let last_row = (nrow - 1).checked_mul(strides.row)?;
    last_col.checked_add(last_row)?.checked_add(1)
}

/// Validate that a buffer of `len` values covers a strided `(ncol, nrow)` grid
pub fn validate_strided_len(len: usize, ncol: usize, nrow: usize, strides: Strides) -> Result<()> {
    let required = strided_extent(ncol, nrow, strides).ok_or(IrapError::InvalidLayout {
        len,
        required: usize::MAX,
    })?;
    if required > len {
        return Err(IrapError::InvalidLayout { len, required });
    }
    Ok(())
}

/// Check that `available` bytes could hold `count` values before allocating them
///
/// Every value occupies at least `min_value_bytes` of the input.
pub fn validate_value_capacity(
    count: usize,
    min_value_bytes: usize,
    available: usize,
    offset: usize,
) -> Result<()> {
    let fits = count
        .checked_mul(min_value_bytes)
        .is_some_and(|required| required <= available);
    if !fits {
        return Err(IrapError::EndOfInput {
            offset,
            detail: format!(
                "expected {count} values, got at most {}",
                available / min_value_bytes.max(1)
            ),
        });
    }
    Ok(())
}
