//! The `IrapSurface` facade: one header plus one value grid

use std::fs;
use std::path::Path;

use irap_core::validation::validate_grid_shape;
use irap_core::{GridView, IrapError, IrapHeader, Result, StorageBackend, ValueGrid};
use tracing::debug;

use crate::mmap_backend::SurfaceSource;
use crate::{ascii, binary};

/// A regular grid surface with its georeferencing header
///
/// The grid shape always equals the header's `(ncol, nrow)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IrapSurface {
    header: IrapHeader,
    values: ValueGrid,
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| IrapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote irap surface file");
    Ok(())
}

impl IrapSurface {
    /// Pair a header with a grid of matching shape
    pub fn new(header: IrapHeader, values: ValueGrid) -> Result<Self> {
        validate_grid_shape(&header, &values)?;
        Ok(Self { header, values })
    }

    pub fn header(&self) -> &IrapHeader {
        &self.header
    }

    pub fn values(&self) -> &ValueGrid {
        &self.values
    }

    pub fn into_parts(self) -> (IrapHeader, ValueGrid) {
        (self.header, self.values)
    }

    fn from_parts((header, values): (IrapHeader, ValueGrid)) -> Self {
        Self { header, values }
    }

    fn from_ascii_source<S: StorageBackend + ?Sized>(source: &S) -> Result<Self> {
        ascii::from_bytes(source.as_slice()).map(Self::from_parts)
    }

    fn from_binary_source<S: StorageBackend + ?Sized>(source: &S) -> Result<Self> {
        binary::from_bytes(source.as_slice()).map(Self::from_parts)
    }

    /// Import an ASCII surface file
    pub fn from_ascii_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_ascii_source(&SurfaceSource::open(path)?)
    }

    pub fn from_ascii_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_ascii_source(&SurfaceSource::from_slice(bytes))
    }

    pub fn from_ascii_str(text: &str) -> Result<Self> {
        Self::from_ascii_bytes(text.as_bytes())
    }

    /// Import a binary surface file
    pub fn from_binary_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_binary_source(&SurfaceSource::open(path)?)
    }

    pub fn from_binary_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_binary_source(&SurfaceSource::from_slice(bytes))
    }

    fn view(&self) -> GridView<'_> {
        self.values.view()
    }

    pub fn to_ascii_string(&self) -> Result<String> {
        ascii::to_string(&self.header, &self.view())
    }

    /// Export as ASCII text to `path`, replacing any existing file
    pub fn write_ascii_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.to_ascii_string()?;
        write_file(path.as_ref(), text.as_bytes())
    }

    pub fn to_binary_bytes(&self) -> Result<Vec<u8>> {
        binary::to_bytes(&self.header, &self.view())
    }

    /// Export as binary to `path`, replacing any existing file
    pub fn write_binary_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_binary_bytes()?;
        write_file(path.as_ref(), &bytes)
    }
}

impl core::fmt::Display for IrapSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "IrapSurface(header={}, values=<{}x{} grid>)",
            self.header,
            self.values.ncol(),
            self.values.nrow()
        )
    }
}
