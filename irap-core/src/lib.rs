//! Irap Core - Irap Surface Format Definitions
//!
//! This crate provides the format definitions, value grid, numeric scanner
//! and error taxonomy shared by the Irap ASCII and binary codecs. Nothing
//! here touches the file system.

pub mod error;
pub mod format;
pub mod grid;
pub mod traits;
pub mod validation;

pub use error::{ErrorCategory, IrapError, Result};
pub use format::constants;
pub use format::{BinaryRecord, IrapHeader, SurfaceFormat};
pub use grid::{ColumnMajorValues, GridBuilder, GridView, MemoryOrder, Strides, ValueGrid};
pub use traits::{same_values, StorageBackend, SurfaceGrid};
pub use validation::{ScanError, Scanner};
