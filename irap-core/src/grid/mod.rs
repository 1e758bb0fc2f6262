//! Value grid and layout descriptors

pub mod layout;
pub mod values;

pub use layout::{MemoryOrder, Strides};
pub use values::{ColumnMajorValues, GridBuilder, GridView, ValueGrid};
