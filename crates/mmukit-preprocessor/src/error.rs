//! Error types for the preprocessor crate.
//!
//! Unrecognized gcode lines are never errors: the passes are permissive by
//! design and pass unknown content through untouched. Errors here are
//! limited to missing files and I/O failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning or rewriting a gcode file.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// The source file does not exist.
    #[error("File does not exist: {}", .path.display())]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The source path exists but is not a regular file.
    #[error("Path is not a file: {}", .path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// I/O failure while reading the source or writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for preprocessor operations.
pub type Result<T> = std::result::Result<T, PreprocessError>;
