//! tblmonit CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tblmonit_core::bootstrap::{self, ProcessEnv};

mod cli;
mod commands;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Bootstrap once, install logging, then dispatch.
fn run(cli: &Cli) -> Result<()> {
    let ctx = bootstrap::run(&cli.bootstrap_options(), &ProcessEnv::capture())?;

    for warning in &ctx.warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    tblmonit_core::log::init(ctx.verbosity, ctx.clock)?;
    ctx.log_startup();

    cli.execute(&ctx)
}
