//! # MMUKit Settings
//!
//! Configuration management for MMUKit: a typed settings struct with
//! serde, persisted as TOML or JSON in the platform config directory,
//! validated on load and save.

pub mod config;
pub mod error;

pub use config::{Config, ProcessingSettings};
pub use error::{SettingsError, SettingsResult};
