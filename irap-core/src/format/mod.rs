//! Irap format definitions
//!
//! Pure data structure definitions for the ASCII and binary Irap layouts.
//! No I/O happens here.

pub mod constants;
pub mod header;

pub use header::{BinaryRecord, IrapHeader, SurfaceFormat};
