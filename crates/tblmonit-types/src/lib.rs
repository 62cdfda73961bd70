//! # tblmonit Types
//!
//! Core types, enums, and errors shared across the tblmonit crates.
//!
//! This crate provides:
//!
//! - The startup error type and result alias
//! - Log verbosity tiers and configuration file formats
//! - The decoded configuration and its location
//!
//! ## Example
//!
//! ```
//! use tblmonit_types::{ConfigFormat, LogVerbosity};
//!
//! assert_eq!(LogVerbosity::default(), LogVerbosity::Disabled);
//! assert_eq!(ConfigFormat::from_path("settings.yml"), Some(ConfigFormat::Yaml));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{TblmonitError, Result};
pub use enums::{ConfigFormat, LogVerbosity};
pub use config::{ConfigLocation, ResolvedConfig, CONFIG_BASE_NAME};
