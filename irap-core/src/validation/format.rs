//! Format-specific validation for Irap headers and record framing

use crate::error::{IrapError, Result};
use crate::format::constants::{BINARY_FIELD_SIZE, IRAP_MAGIC};
use crate::format::{IrapHeader, SurfaceFormat};
use crate::traits::SurfaceGrid;

/// Validate `ncol`/`nrow` and convert them to sizes
///
/// Both must be strictly positive, and the grid's size in bytes must fit
/// in `usize`.
pub fn validate_dimensions(ncol: i64, nrow: i64) -> Result<(usize, usize)> {
    let invalid = || IrapError::InvalidDimensions { ncol, nrow };
    if ncol <= 0 || nrow <= 0 {
        return Err(invalid());
    }
    let ncol_size = usize::try_from(ncol).map_err(|_| invalid())?;
    let nrow_size = usize::try_from(nrow).map_err(|_| invalid())?;
    ncol_size
        .checked_mul(nrow_size)
        .and_then(|count| count.checked_mul(core::mem::size_of::<f32>()))
        .ok_or_else(invalid)?;
    Ok((ncol_size, nrow_size))
}

/// Check the leading `-996` marker
pub fn validate_magic(value: i32, format: SurfaceFormat) -> Result<()> {
    if value != IRAP_MAGIC {
        return Err(IrapError::MalformedHeader(format!(
            "First value in irap {format} file is incorrect. Expected: {IRAP_MAGIC}, got: {value}"
        )));
    }
    Ok(())
}

/// Interpret a record length prefix as a payload size
///
/// Returns `None` unless the length is positive and a whole number of
/// 4-byte fields.
pub const fn validate_record_length(length: i32) -> Option<usize> {
    if length <= 0 || length as usize % BINARY_FIELD_SIZE != 0 {
        return None;
    }
    Some(length as usize)
}

/// Check that a grid's `(ncol, nrow)` shape matches the header dimensions
pub fn validate_grid_shape<G: SurfaceGrid + ?Sized>(
    header: &IrapHeader,
    grid: &G,
) -> Result<(usize, usize)> {
    let expected = header.dimensions()?;
    let actual = grid.dimensions();
    if expected != actual {
        return Err(IrapError::ShapeMismatch { expected, actual });
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MemoryOrder, ValueGrid};

    #[test]
    fn test_validate_dimensions() {
        assert_eq!(validate_dimensions(1, 1).unwrap(), (1, 1));
        assert_eq!(validate_dimensions(6000, 6000).unwrap(), (6000, 6000));

        assert!(matches!(
            validate_dimensions(0, 5),
            Err(IrapError::InvalidDimensions { ncol: 0, nrow: 5 })
        ));
        assert!(matches!(
            validate_dimensions(5, -1),
            Err(IrapError::InvalidDimensions { ncol: 5, nrow: -1 })
        ));
    }

    #[test]
    fn test_validate_dimensions_byte_size_overflow() {
        // 2^62 values fit in a 64-bit usize, their 2^64 bytes do not
        let side = 1i64 << 31;
        assert!(matches!(
            validate_dimensions(side, side),
            Err(IrapError::InvalidDimensions { .. })
        ));
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_validate_dimensions_overflow() {
        assert!(validate_dimensions(i32::MAX as i64, i32::MAX as i64).is_err());
    }

    #[test]
    fn test_validate_magic() {
        assert!(validate_magic(-996, SurfaceFormat::Ascii).is_ok());
        let err = validate_magic(996, SurfaceFormat::Ascii).unwrap_err();
        assert!(matches!(err, IrapError::MalformedHeader(_)));
        assert!(err.to_string().contains("Expected: -996, got: 996"));
    }

    #[test]
    fn test_validate_record_length() {
        assert_eq!(validate_record_length(32), Some(32));
        assert_eq!(validate_record_length(4), Some(4));
        assert_eq!(validate_record_length(0), None);
        assert_eq!(validate_record_length(-32), None);
        assert_eq!(validate_record_length(30), None);
    }

    #[test]
    fn test_validate_grid_shape() {
        let grid = ValueGrid::new(vec![0.0; 6], 3, 2, MemoryOrder::RowMajor).unwrap();
        assert_eq!(validate_grid_shape(&IrapHeader::new(3, 2), &grid).unwrap(), (3, 2));

        let err = validate_grid_shape(&IrapHeader::new(2, 3), &grid).unwrap_err();
        assert!(matches!(
            err,
            IrapError::ShapeMismatch {
                expected: (2, 3),
                actual: (3, 2)
            }
        ));

        let err = validate_grid_shape(&IrapHeader::new(0, 2), &grid).unwrap_err();
        assert!(matches!(err, IrapError::InvalidDimensions { .. }));
    }
}
