//! Gcode file access for the two passes.
//!
//! Wraps path validation and buffered line reading so the extraction and
//! rewrite passes can stay generic over any `BufRead` source. Large files
//! are streamed, never loaded whole.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{PreprocessError, Result};
use crate::patterns;

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// A validated gcode source file.
pub struct GcodeFile {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFile {
    /// Validate a path and capture its size.
    ///
    /// # Errors
    /// Returns [`PreprocessError::FileNotFound`] or
    /// [`PreprocessError::NotAFile`] when the path is unusable.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(PreprocessError::FileNotFound { path });
        }

        if !path.is_file() {
            return Err(PreprocessError::NotAFile { path });
        }

        let metadata = fs::metadata(&path)?;

        Ok(Self {
            file_size: metadata.len(),
            path,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file size in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// True when the file name carries the given extension.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Open a fresh buffered reader over the file.
    ///
    /// Each pass opens its own reader; the passes never share a handle.
    pub fn open(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path)?;
        Ok(BufReader::with_capacity(READ_BUFFER_SIZE, file))
    }

    /// True when the first line carries the processed-file marker.
    ///
    /// Files that test positive have been through the rewrite pass
    /// already and must be skipped, otherwise the marker would be
    /// duplicated and tool changes rewritten twice.
    pub fn is_processed(&self) -> Result<bool> {
        let mut reader = self.open()?;
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;
        Ok(patterns::is_processed_marker(first_line.trim_end_matches(['\r', '\n'])))
    }
}
