//! # MMUKit Preprocessor
//!
//! Streaming engine that enriches slicer-produced gcode with the metadata
//! a multi-material unit (MMU) controller needs. A file is handled in two
//! strictly sequential passes, each a single forward scan:
//!
//! ## Extraction Pass
//! - Scans once, harvesting referenced tools, filament colors,
//!   temperatures, materials, purge volumes and the slicer signature
//! - Detects which placeholder tokens the slicer profile embedded
//! - Produces an immutable [`ExtractionResult`]
//!
//! ## Rewrite Pass
//! - Re-streams the file to a separate destination
//! - Substitutes placeholder tokens with the extracted tables
//! - Rewrites bare tool-select lines into `MMU_CHANGE_TOOL` commands,
//!   buffering lines after a tool-select until the next move reveals the
//!   toolhead position (optionally injected as `NEXT_POS`)
//! - Stamps every output file with a processed-by marker so the caller
//!   can skip files that have been through the pass before
//!
//! Gcode is treated as a line-oriented text stream: the engine recognizes
//! a fixed set of patterns ([`patterns`]) and passes everything else
//! through untouched. Both passes are single-threaded and forward-only;
//! memory use is bounded by the metadata found plus, during rewrite, the
//! longest run of lines between a tool-select and its qualifying move.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mmukit_preprocessor::{extract, rewrite, GcodeFile};
//!
//! let file = GcodeFile::new("part.gcode")?;
//! let metadata = extract(file.open()?)?;
//! let mut out = std::fs::File::create("part.out.gcode")?;
//! rewrite(file.open()?, &mut out, &metadata, true)?;
//! ```

pub mod error;
pub mod extract;
pub mod file_io;
pub mod metadata;
pub mod patterns;
pub mod rewrite;

pub use error::{PreprocessError, Result};
pub use extract::extract;
pub use file_io::GcodeFile;
pub use metadata::{ExtractionResult, Placeholder, PlaceholderSet};
pub use rewrite::{rewrite, substitute_placeholders, RewriteStats};
