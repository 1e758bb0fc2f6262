//! Irap header definitions
//!
//! This module contains the eleven-field surface header, the surface format
//! tag used in diagnostics, and the fixed record table of the binary header.

use crate::error::Result;
use crate::validation::validate_dimensions;

/// Header of an Irap surface
///
/// Every field is stored as read. `xmax`/`ymax` are not recomputed from the
/// origin and increments, and equality is exact field-wise equality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IrapHeader {
    /// Number of columns (x direction)
    pub ncol: i32,
    /// Number of rows (y direction)
    pub nrow: i32,
    /// x coordinate of the origin
    pub xori: f64,
    /// y coordinate of the origin
    pub yori: f64,
    /// Outer edge on the x axis, normally `xori + (ncol - 1) * xinc`
    pub xmax: f64,
    /// Outer edge on the y axis, normally `yori + (nrow - 1) * yinc`
    pub ymax: f64,
    /// Cell spacing along x
    pub xinc: f64,
    /// Cell spacing along y
    pub yinc: f64,
    /// Rotation in degrees
    pub rot: f64,
    /// x coordinate of the rotation point
    pub xrot: f64,
    /// y coordinate of the rotation point
    pub yrot: f64,
}

impl IrapHeader {
    /// Create a header with the given dimensions, unit increments and zero geometry
    pub const fn new(ncol: i32, nrow: i32) -> Self {
        Self {
            ncol,
            nrow,
            xori: 0.0,
            yori: 0.0,
            xmax: 0.0,
            ymax: 0.0,
            xinc: 1.0,
            yinc: 1.0,
            rot: 0.0,
            xrot: 0.0,
            yrot: 0.0,
        }
    }

    /// Validated `(ncol, nrow)` as unsigned sizes
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        validate_dimensions(self.ncol as i64, self.nrow as i64)
    }

    /// Number of grid values, `ncol * nrow`
    pub fn value_count(&self) -> Result<usize> {
        let (ncol, nrow) = self.dimensions()?;
        Ok(ncol * nrow)
    }

    /// Bring a negative rotation into `[0, 360)` the way Irap readers expect
    pub fn normalize_rotation(&mut self) {
        if self.rot < 0.0 {
            self.rot += 360.0;
        }
    }
}

impl Default for IrapHeader {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl core::fmt::Display for IrapHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "IrapHeader(ncol={}, nrow={}, xori={}, yori={}, xmax={}, ymax={}, xinc={}, yinc={}, rot={}, xrot={}, yrot={})",
            self.ncol,
            self.nrow,
            self.xori,
            self.yori,
            self.xmax,
            self.ymax,
            self.xinc,
            self.yinc,
            self.rot,
            self.xrot,
            self.yrot
        )
    }
}

/// The two on-disk representations of an Irap surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
    /// Whitespace separated text
    Ascii,
    /// Big-endian Fortran unformatted sequential records
    Binary,
}

impl core::fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurfaceFormat::Ascii => write!(f, "ASCII"),
            SurfaceFormat::Binary => write!(f, "binary"),
        }
    }
}

/// Records of a binary Irap file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryRecord {
    /// Marker, nrow, xori, xmax, yori, ymax, xinc, yinc
    Geometry,
    /// ncol, rot, xrot, yrot
    Rotation,
    /// Two floats and five integers, always zero on export
    Reserved,
    /// Up to [`VALUES_PER_BINARY_RECORD`](crate::format::constants::VALUES_PER_BINARY_RECORD)
    /// grid values on export; any positive multiple of four bytes on import
    Values,
}

impl BinaryRecord {
    /// The three records that make up the 100-byte binary header
    pub const HEADER: [BinaryRecord; 3] = [
        BinaryRecord::Geometry,
        BinaryRecord::Rotation,
        BinaryRecord::Reserved,
    ];

    /// Fixed payload size in bytes, `None` for variable-length data records
    pub const fn payload_size(self) -> Option<usize> {
        match self {
            BinaryRecord::Geometry => Some(32),
            BinaryRecord::Rotation => Some(16),
            BinaryRecord::Reserved => Some(28),
            BinaryRecord::Values => None,
        }
    }
}

impl core::fmt::Display for BinaryRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BinaryRecord::Geometry => write!(f, "geometry"),
            BinaryRecord::Rotation => write!(f, "rotation"),
            BinaryRecord::Reserved => write!(f, "reserved"),
            BinaryRecord::Values => write!(f, "values"),
        }
    }
}
