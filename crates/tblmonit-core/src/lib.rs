//! # tblmonit Core
//!
//! Startup layer for the tblmonit BigQuery monitoring tool.
//!
//! This crate provides:
//!
//! - **Configuration**: file discovery, environment overrides, explicit decoding
//! - **Time**: the process clock locale derived from `timeZone`
//! - **Logging**: verbosity selection and the stderr log sink
//! - **Bootstrap**: the fixed startup sequence producing a [`Context`]
//!
//! ## Example
//!
//! ```no_run
//! use tblmonit_core::bootstrap::{self, BootstrapOptions, ProcessEnv};
//!
//! let options = BootstrapOptions { verbose: true, ..Default::default() };
//! let ctx = bootstrap::run(&options, &ProcessEnv::capture())?;
//! tblmonit_core::log::init(ctx.verbosity, ctx.clock)?;
//! # Ok::<(), tblmonit_core::TblmonitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod config;
pub mod log;
pub mod time;
pub mod util;

// Re-export commonly used items
pub use bootstrap::{BootstrapOptions, Context, ProcessEnv};
pub use time::{ClockLocale, TimeZonePolicy};
pub use tblmonit_types::{LogVerbosity, ResolvedConfig, Result, TblmonitError};

/// tblmonit application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tblmonit application name
pub const APP_NAME: &str = "tblmonit";
