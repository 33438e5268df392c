//! Per-file orchestration: eligibility, idempotence, the two passes, and
//! atomic replacement of the original file.
//!
//! The rewrite always goes to a temporary file in the target's directory;
//! the original is replaced by rename only after the rewrite completed
//! and produced different content. A failure at any point leaves the
//! original untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use mmukit_preprocessor::{extract, rewrite, GcodeFile};
use mmukit_settings::ProcessingSettings;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was rewritten and replaced.
    Rewritten,
    /// The first line already carries the processed marker.
    AlreadyProcessed,
    /// The extension does not match the configured gcode extension.
    NotEligible,
    /// No placeholders found and no tool changes to enrich.
    NothingToDo,
    /// The rewrite produced identical content; the original was kept.
    Unchanged,
}

/// Run the full pipeline on one file.
///
/// Extraction completes before the rewrite begins; the rewrite needs the
/// whole [`ExtractionResult`](mmukit_preprocessor::ExtractionResult) and
/// the two passes are never interleaved.
pub fn process_file(path: &Path, settings: &ProcessingSettings) -> Result<Outcome> {
    let file = GcodeFile::new(path)?;
    info!("Pre-processing file: {}", path.display());

    if !file.matches_extension(&settings.file_extension) {
        info!(
            "Skipping file without .{} extension: {}",
            settings.file_extension,
            path.display()
        );
        return Ok(Outcome::NotEligible);
    }

    if file.is_processed()? {
        info!("File already processed, skipping: {}", path.display());
        return Ok(Outcome::AlreadyProcessed);
    }

    if !settings.insert_placeholders && !settings.insert_next_pos {
        info!(
            "Processing disabled by configuration, skipping: {}",
            path.display()
        );
        return Ok(Outcome::NothingToDo);
    }

    let start = Instant::now();
    let mut metadata = extract(file.open()?)?;
    info!(
        "Reading placeholders took {:.2}s. Detected gcode by slicer: {}",
        start.elapsed().as_secs_f64(),
        metadata.slicer.as_deref().unwrap_or("unknown")
    );

    if !settings.insert_placeholders {
        // Substitution disabled: keep the scan results for the next-pos
        // decision but leave every token in the file untouched.
        metadata.placeholders.clear();
    }

    let wants_next_pos = settings.insert_next_pos && !metadata.tools_used.is_empty();
    if !metadata.has_placeholders() && !wants_next_pos {
        info!(
            "No MMU metadata placeholders found in file: {}",
            path.display()
        );
        return Ok(Outcome::NothingToDo);
    }

    // Replace the real file, not the symlink pointing at it.
    let target = if path.is_symlink() {
        fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let temp = tempfile::Builder::new()
        .prefix(".mmukit-")
        .tempfile_in(parent)
        .context("creating temporary rewrite destination")?;

    let start = Instant::now();
    let stats = {
        let mut writer = BufWriter::new(temp.as_file());
        rewrite(file.open()?, &mut writer, &metadata, settings.insert_next_pos)?
    };
    info!(
        "Rewrote {} tool changes across {} lines in {:.2}s",
        stats.tool_changes,
        stats.lines_read,
        start.elapsed().as_secs_f64()
    );

    if files_identical(temp.path(), &target)? {
        info!(
            "Files are the same, skipping replacement of: {}",
            target.display()
        );
        return Ok(Outcome::Unchanged);
    }

    temp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("replacing {}", target.display()))?;

    Ok(Outcome::Rewritten)
}

/// Byte-for-byte file comparison, size check first.
fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(File::open(a)?);
    let mut reader_b = BufReader::new(File::open(b)?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let n = reader_a.read(&mut buf_a)?;
        if n == 0 {
            return Ok(true);
        }
        reader_b.read_exact(&mut buf_b[..n])?;
        if buf_a[..n] != buf_b[..n] {
            return Ok(false);
        }
    }
}
