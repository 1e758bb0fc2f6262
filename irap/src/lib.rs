//! Irap - Irap ASCII and binary surface codec
//!
//! This library reads and writes regular grid surfaces in the Irap ASCII and
//! Irap binary formats, with memory-mapped file import.
//!
//! ## Architecture
//!
//! - **irap-core**: Format constants, header, value grid, scanner, validation (no I/O)
//! - **irap**: Codecs, file access and the [`IrapSurface`] facade
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use irap::IrapSurface;
//!
//! fn example() -> irap::Result<()> {
//!     let surface = IrapSurface::from_ascii_file("top_reservoir.irap")?;
//!     let header = surface.header();
//!     println!("{} x {} nodes, rotated {} degrees", header.ncol, header.nrow, header.rot);
//!
//!     // Undefined nodes are NaN in memory
//!     let undefined = surface.values().as_slice().iter().filter(|v| v.is_nan()).count();
//!     println!("{undefined} undefined nodes");
//!
//!     surface.write_binary_file("top_reservoir.gri")?;
//!     Ok(())
//! }
//! ```
//!
//! Borrowed arrays in any layout can be exported without copying:
//!
//! ```rust
//! use irap::{ascii, GridView, IrapHeader, MemoryOrder};
//!
//! // Fortran-ordered (column index fastest) 3 x 2 grid
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let view = GridView::with_order(&data, 3, 2, MemoryOrder::ColumnMajor).unwrap();
//! let text = ascii::to_string(&IrapHeader::new(3, 2), &view).unwrap();
//! assert!(text.ends_with("1.000000 2.000000 3.000000 4.000000 5.000000 6.000000\n"));
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): map input files instead of reading them into memory
//! - **serde**: `Serialize`/`Deserialize` for [`IrapHeader`] and [`MemoryOrder`]

// Re-export core abstractions and format definitions
pub use irap_core::{
    // Format definitions
    constants, BinaryRecord, IrapHeader, SurfaceFormat,
    // Value grids
    GridBuilder, GridView, MemoryOrder, Strides, SurfaceGrid, ValueGrid,
    // Error handling
    ErrorCategory, IrapError, Result,
};

// Implementation modules
pub mod ascii;
pub mod binary;
pub mod mmap_backend;
pub mod surface;

pub use mmap_backend::SurfaceSource;
pub use surface::IrapSurface;
