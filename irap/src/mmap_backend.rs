//! Memory-mapped import sources
//!
//! A [`SurfaceSource`] holds the bytes of one import for exactly as long as
//! the import runs. Dropping it releases the mapping on every exit path.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use irap_core::{IrapError, Result, StorageBackend};
#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};
use tracing::debug;

/// Read-only bytes of a surface being imported
#[derive(Debug)]
pub enum SurfaceSource<'a> {
    /// Whole file mapped into memory
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    /// Whole file read into a buffer
    #[cfg(not(feature = "mmap"))]
    Owned(Vec<u8>),
    /// Caller-provided buffer
    Borrowed(&'a [u8]),
}

fn access_error(path: &Path, reason: impl Into<String>) -> IrapError {
    IrapError::FileAccess {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl SurfaceSource<'static> {
    /// Open and map a file for reading
    ///
    /// Missing, empty and unreadable files all fail with
    /// [`IrapError::FileAccess`] before any parsing happens.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => access_error(path, "file not found"),
            _ => access_error(path, e.to_string()),
        })?;

        let len = file
            .metadata()
            .map_err(|e| access_error(path, e.to_string()))?
            .len();
        if len == 0 {
            return Err(access_error(path, "file is empty"));
        }

        let source = Self::load(&file, path)?;
        debug!(path = %path.display(), bytes = len, "opened irap surface file");
        Ok(source)
    }

    #[cfg(feature = "mmap")]
    fn load(file: &File, path: &Path) -> Result<Self> {
        // SAFETY: Read-only mapping; the bytes are only read while the source is alive
        let mmap = unsafe { MmapOptions::new().map(file) }
            .map_err(|e| access_error(path, e.to_string()))?;
        Ok(SurfaceSource::Mapped(mmap))
    }

    #[cfg(not(feature = "mmap"))]
    fn load(file: &File, path: &Path) -> Result<Self> {
        use std::io::Read;

        let mut data = Vec::new();
        let mut reader = file;
        reader
            .read_to_end(&mut data)
            .map_err(|e| access_error(path, e.to_string()))?;
        Ok(SurfaceSource::Owned(data))
    }
}

impl<'a> SurfaceSource<'a> {
    /// Wrap an in-memory buffer
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        SurfaceSource::Borrowed(bytes)
    }

    /// Whether the bytes come from a file mapping
    pub fn is_mapped(&self) -> bool {
        match self {
            #[cfg(feature = "mmap")]
            SurfaceSource::Mapped(_) => true,
            #[cfg(not(feature = "mmap"))]
            SurfaceSource::Owned(_) => false,
            SurfaceSource::Borrowed(_) => false,
        }
    }
}

impl StorageBackend for SurfaceSource<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            SurfaceSource::Mapped(mmap) => &mmap[..],
            #[cfg(not(feature = "mmap"))]
            SurfaceSource::Owned(data) => data.as_slice(),
            SurfaceSource::Borrowed(bytes) => *bytes,
        }
    }
}

impl Deref for SurfaceSource<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}
