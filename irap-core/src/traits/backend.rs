//! Storage backend trait for import sources

/// Read-only bytes backing an import
///
/// Every import goes through one, whether the bytes come from a mapped
/// file or a caller's buffer.
pub trait StorageBackend {
    /// The full contents
    fn as_slice(&self) -> &[u8];

    /// Length in bytes
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}
