//! Error types for Irap operations

use std::path::PathBuf;

use thiserror::Error;

use crate::format::SurfaceFormat;

/// Errors that can occur while importing, exporting or constructing surfaces
#[derive(Debug, Error)]
pub enum IrapError {
    /// The input file could not be opened or mapped (missing, empty, unreadable)
    #[error("failed to map file {}: {reason}", path.display())]
    FileAccess { path: PathBuf, reason: String },

    /// Header tokens are missing, non-numeric, or the format marker is wrong
    #[error("Failed to read irap headers: {0}")]
    MalformedHeader(String),

    /// `ncol` or `nrow` is not strictly positive, or their product overflows
    #[error("Incorrect dimensions encountered: ncol={ncol}, nrow={nrow}")]
    InvalidDimensions { ncol: i64, nrow: i64 },

    /// Input ended before a required token, record or byte range
    #[error("End of file reached at byte offset {offset}: {detail}")]
    EndOfInput { offset: usize, detail: String },

    /// A data token or a record length field failed to parse
    #[error("Failed to read values during Irap {format} import at byte offset {offset}: {detail}")]
    InvalidValue {
        format: SurfaceFormat,
        offset: usize,
        detail: String,
    },

    /// Binary record length prefix and suffix disagree, or a header record has the wrong size
    #[error("Malformed record framing at byte offset {offset}: {detail}")]
    MalformedFraming { offset: usize, detail: String },

    /// Grid shape does not match the header dimensions
    #[error("grid shape {actual:?} does not match header dimensions {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Backing buffer is too short for the declared shape and strides
    #[error("grid buffer holds {len} values but the declared layout addresses {required}")]
    InvalidLayout { len: usize, required: usize },

    /// Writing an exported surface failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rendering ASCII text failed
    #[error("failed to format surface text")]
    Format(#[from] core::fmt::Error),
}

/// Coarse classification of an [`IrapError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The bytes or text being imported are not a valid surface
    Input,
    /// Caller-supplied header or grid is inconsistent
    Construction,
    /// The file system refused an open, map or write, or a writer failed
    Environment,
}

impl IrapError {
    /// Classify the error so callers can tell bad input from a bad environment
    pub fn category(&self) -> ErrorCategory {
        match self {
            IrapError::FileAccess { .. } | IrapError::Io { .. } | IrapError::Format(_) => {
                ErrorCategory::Environment
            }
            IrapError::ShapeMismatch { .. } | IrapError::InvalidLayout { .. } => {
                ErrorCategory::Construction
            }
            IrapError::MalformedHeader(_)
            | IrapError::InvalidDimensions { .. }
            | IrapError::EndOfInput { .. }
            | IrapError::InvalidValue { .. }
            | IrapError::MalformedFraming { .. } => ErrorCategory::Input,
        }
    }
}

/// Result type for Irap operations
pub type Result<T> = core::result::Result<T, IrapError>;
