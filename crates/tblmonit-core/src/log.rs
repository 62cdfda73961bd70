//! Log verbosity selection and log sink installation.
//!
//! Verbosity comes from two root flags evaluated as a priority chain:
//! `--verbose` beats `--debug`, and with neither set nothing is logged.

use crate::time::ClockLocale;
use tblmonit_types::{LogVerbosity, Result, TblmonitError};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Crate targets whose events the sink lets through.
const TARGETS: &[&str] = &["tblmonit", "tblmonit_cli", "tblmonit_core", "tblmonit_types"];

/// Pick the verbosity tier from the `--verbose` and `--debug` flags.
///
/// First match wins: verbose gives `Info` even when debug is also set.
pub fn resolve_verbosity(verbose: bool, debug: bool) -> LogVerbosity {
    let mut level = LogVerbosity::Disabled;
    if verbose {
        level = LogVerbosity::Info;
    } else if debug {
        level = LogVerbosity::Debug;
    }
    level
}

/// Maximum tracing level for a verbosity tier.
pub fn level_filter(verbosity: LogVerbosity) -> LevelFilter {
    match verbosity {
        LogVerbosity::Disabled => LevelFilter::OFF,
        LogVerbosity::Info => LevelFilter::INFO,
        LogVerbosity::Debug => LevelFilter::DEBUG,
    }
}

/// Filter directives: everything off except our own crates at the chosen level.
pub fn filter_directives(verbosity: LogVerbosity) -> String {
    let level = level_filter(verbosity);
    if level == LevelFilter::OFF {
        return "off".to_string();
    }

    let mut directives = vec!["off".to_string()];
    directives.extend(TARGETS.iter().map(|target| format!("{}={}", target, level)));
    directives.join(",")
}

/// Install the process-wide log sink.
///
/// Writes to stderr, stamping events with the clock locale. Can only succeed
/// once per process.
pub fn init(verbosity: LogVerbosity, clock: ClockLocale) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directives(verbosity))
        .map_err(|e| TblmonitError::Logging(format!("Invalid filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(clock)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init()
        .map_err(|e| TblmonitError::Logging(e.to_string()))
}
