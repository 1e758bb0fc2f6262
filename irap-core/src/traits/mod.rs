//! Abstract interfaces for Irap grids and import sources

pub mod backend;
pub mod grid;

pub use backend::StorageBackend;
pub use grid::{same_values, SurfaceGrid};
