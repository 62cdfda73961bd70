//! CLI structure and command definitions.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tblmonit_core::{BootstrapOptions, Context, TimeZonePolicy};

#[derive(Parser)]
#[command(name = "tblmonit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monitoring tool for Bigquery tables")]
#[command(long_about = "Monitoring BigQuery table metadata to ensure the data pipeline jobs are correctly worked.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default is $HOME/.tblmonit.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Enable verbose log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug log output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Apply the configured time zone instead of always running on UTC
    #[arg(long, global = true)]
    pub honor_time_zone: bool,

    /// Help message for toggle
    #[arg(short, long)]
    pub toggle: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the configuration established at startup
    Config,

    /// Show version information
    Version {
        /// Show build details
        #[arg(short, long)]
        build: bool,
    },
}

impl Cli {
    /// Startup inputs taken from the root flags.
    pub fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            config_path: self.config.clone().unwrap_or_default(),
            verbose: self.verbose,
            debug: self.debug,
            time_zone_policy: if self.honor_time_zone {
                TimeZonePolicy::Honor
            } else {
                TimeZonePolicy::AlwaysUtc
            },
        }
    }

    pub fn execute(&self, ctx: &Context) -> Result<()> {
        use crate::commands::*;

        match &self.command {
            Some(Commands::Config) => config::execute(ctx),
            Some(Commands::Version { build }) => version::execute(*build),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}
