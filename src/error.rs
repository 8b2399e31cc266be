//! Error types for the viewer host.
//!
//! Renderers trust their inputs and never fail; errors only arise where the
//! host loads arrays or talks to the system.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, VezdaError>;

/// Errors that can occur while loading or exporting frames.
#[derive(Debug, Error)]
pub enum VezdaError {
    /// Failed to open a file.
    #[error("Failed to open file {path}: {reason}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying NetCDF message.
        reason: String,
    },

    /// Failed to read NetCDF data.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// A variable the viewer needs is absent from the file.
    #[error("Variable not found: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// A variable has the wrong number of dimensions or mismatched lengths.
    #[error("Variable '{name}' has shape {found:?}, expected {expected}")]
    Shape {
        /// Name of the offending variable.
        name: String,
        /// Human-readable description of the expected layout.
        expected: String,
        /// Actual shape.
        found: Vec<usize>,
    },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VezdaError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FileOpen {
            path,
            reason: reason.into(),
        }
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Create a Shape error.
    pub fn shape(name: impl Into<String>, expected: impl Into<String>, found: &[usize]) -> Self {
        Self::Shape {
            name: name.into(),
            expected: expected.into(),
            found: found.to_vec(),
        }
    }
}

impl From<netcdf::Error> for VezdaError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
