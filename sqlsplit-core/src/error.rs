//! Error types for splitting operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for split operations
#[derive(Debug, Error)]
pub enum SplitError {
    /// The input stream could not be opened or read
    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        /// Path of the input that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A segment could not be written to its target file
    #[error("Error writing file {}: {source}", .path.display())]
    Write {
        /// Target path of the segment
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    /// Path of the file involved in the failure
    pub fn path(&self) -> &PathBuf {
        match self {
            SplitError::Read { path, .. } | SplitError::Write { path, .. } => path,
        }
    }
}

/// Result type for split operations
pub type Result<T> = std::result::Result<T, SplitError>;
