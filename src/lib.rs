//! # MMUKit
//!
//! A gcode file pre-processor for multi-material unit (MMU) printing.
//! Slicers embed MMU-relevant metadata in their output as comments and
//! placeholder tokens; MMUKit harvests that metadata and rewrites the
//! file so the MMU controller receives enriched tool-change commands and
//! populated color/temperature/material/purge tables.
//!
//! ## Architecture
//!
//! MMUKit is organized as a workspace with multiple crates:
//!
//! 1. **mmukit-preprocessor** - the streaming engine: pattern catalog,
//!    extraction pass, rewrite pass, placeholder substitution
//! 2. **mmukit-settings** - configuration management (TOML/JSON)
//! 3. **mmukit** - the command-line binary and per-file orchestration
//!
//! ## Processing model
//!
//! Each file goes through eligibility and idempotence checks, then a full
//! extraction pass, then a rewrite pass into a temporary file that
//! atomically replaces the original only on success. One corrupt or
//! unreadable file never stops the remaining files from being processed.

pub mod runner;

pub use mmukit_preprocessor::{
    extract, rewrite, ExtractionResult, GcodeFile, Placeholder, PlaceholderSet, PreprocessError,
    RewriteStats,
};
pub use mmukit_settings::{Config, ProcessingSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout stays clean for shell pipelines)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
