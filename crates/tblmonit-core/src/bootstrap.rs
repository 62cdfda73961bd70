//! One-time startup sequence.
//!
//! [`run`] loads the configuration, resolves the clock locale, and picks the
//! log verbosity, in that order. The result is a [`Context`] that owns all
//! of it for the rest of the process. Errors are returned to the caller;
//! nothing here exits the process.
//!
//! The log sink is installed from the finished context, so nothing logged
//! during [`run`] would be seen. What the loader found is kept in
//! [`Context::report`] and written out by [`Context::log_startup`].

use crate::config::{self, ConfigLayer, LoadReport};
use crate::log::resolve_verbosity;
use crate::time::{resolve_time_zone, ClockLocale, TimeZonePolicy};
use std::collections::HashMap;
use std::path::PathBuf;
use tblmonit_types::{LogVerbosity, ResolvedConfig, Result};
use tracing::{debug, info};

/// Inputs taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Value of `--config`; empty means discover in the home directory
    pub config_path: String,
    /// `--verbose`
    pub verbose: bool,
    /// `--debug`
    pub debug: bool,
    /// How to treat a configured zone that resolves
    pub time_zone_policy: TimeZonePolicy,
}

/// Snapshot of the host environment the bootstrap reads from.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    /// Current user's home directory
    pub home_dir: Option<PathBuf>,
    /// Environment variables
    pub vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Capture the real process environment.
    pub fn capture() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            vars: std::env::vars().collect(),
        }
    }
}

/// Everything established at startup.
///
/// Read-only once built; subcommands receive it by reference.
#[derive(Debug, Clone)]
pub struct Context {
    /// Decoded configuration
    pub config: ResolvedConfig,
    /// Process clock locale
    pub clock: ClockLocale,
    /// Selected log verbosity
    pub verbosity: LogVerbosity,
    /// Non-fatal problems to show the user
    pub warnings: Vec<String>,
    /// Where the configuration came from
    pub report: LoadReport,
}

impl Context {
    /// Log what startup discovered. Call once the log sink is installed.
    pub fn log_startup(&self) {
        let how = if self.report.location.is_explicit() {
            "from --config"
        } else {
            "discovered"
        };
        info!("Using config file {} ({})", self.report.file.display(), how);

        for candidate in &self.report.searched {
            debug!("Looked for config at {}", candidate.display());
        }
        for (key, layer) in &self.report.origins {
            match layer {
                ConfigLayer::Environment => debug!("{} set by ${}", key.name, key.env_var()),
                _ => debug!("{} set by {} layer", key.name, layer),
            }
        }

        match self.clock.configured() {
            Some(zone) if zone != self.clock.effective() => debug!(
                "Clock locale {} (configured {} not applied)",
                self.clock.effective().name(),
                zone.name()
            ),
            _ => debug!("Clock locale {}", self.clock.effective().name()),
        }
    }
}

/// Run the startup sequence.
pub fn run(options: &BootstrapOptions, env: &ProcessEnv) -> Result<Context> {
    let (config, report) = config::load(&options.config_path, env.home_dir.as_deref(), &env.vars)?;

    let mut warnings = Vec::new();
    if !config.extra_keys.is_empty() {
        warnings.push(format!(
            "Config file {} has keys not used at startup: {}",
            config.source.display(),
            config.extra_keys.join(", ")
        ));
    }

    let zone = resolve_time_zone(&config.time_zone, options.time_zone_policy);
    if let Some(warning) = zone.warning {
        warnings.push(warning.to_string());
    }

    let verbosity = resolve_verbosity(options.verbose, options.debug);

    Ok(Context {
        config,
        clock: zone.clock,
        verbosity,
        warnings,
        report,
    })
}
