//! Error types for lattice generation and `.cube` serialization.
//!
//! Every failure in this crate is reported through [`CubeError`]. Nothing
//! here terminates the process; the `cubegen` binary decides how to exit.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cube operations.
pub type CubeResult<T> = Result<T, CubeError>;

/// Errors that can occur while generating or writing a cube LUT.
#[derive(Debug, Error)]
pub enum CubeError {
    /// Size token is not a decimal integer or is out of range.
    #[error("invalid LUT size '{token}': {reason}")]
    InvalidResolution {
        /// The rejected input.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Malformed domain or precision override.
    #[error("invalid {name} value '{value}': {reason}")]
    InvalidConfiguration {
        /// Name of the setting (usually the environment variable).
        name: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Output path is already present. Existing files are never overwritten.
    #[error("output file already exists: {}", path.display())]
    OutputAlreadyExists {
        /// Target path.
        path: PathBuf,
    },

    /// Output path could not be created.
    #[error("output file could not be created: {}: {source}", path.display())]
    OutputUnwritable {
        /// Target path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Pixel buffer does not hold N³ records for the configured size.
    #[error("pixel buffer holds {actual} records, expected {expected}")]
    BufferSizeMismatch {
        /// N³ for the configured resolution.
        expected: usize,
        /// Records actually present.
        actual: usize,
    },

    /// Parse error when reading `.cube` files.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
