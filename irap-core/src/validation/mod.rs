//! Validation and scanning utilities for Irap surfaces
//!
//! Pure functions over dimensions, strides, record lengths and text. No I/O.

pub mod bounds;
pub mod format;
pub mod parsing;

pub use bounds::{strided_extent, validate_strided_len, validate_value_capacity};
pub use format::{
    validate_dimensions, validate_grid_shape, validate_magic, validate_record_length,
};
pub use parsing::{is_space, ScanError, Scanner};
