//! Show the configuration established at startup.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tblmonit_core::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    println!("{}", "Startup Configuration".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("  Config file: {}", ctx.config.config_file_used().display());

    let configured = match ctx.clock.configured() {
        Some(zone) => zone.name().to_string(),
        None if ctx.config.time_zone.is_empty() => "(none)".to_string(),
        None => format!("{} (invalid)", ctx.config.time_zone),
    };
    println!("  Time zone (configured): {}", configured);
    println!("  Time zone (effective): {}", ctx.clock.effective().name().green());
    println!("  Local time: {}", ctx.clock.now().format("%Y-%m-%d %H:%M:%S %Z"));
    println!("  Log verbosity: {}", ctx.verbosity);

    let yaml = serde_yaml::to_string(&ctx.config).context("Failed to render configuration")?;
    println!("\n{}:", "Decoded".green().bold());
    for line in yaml.lines() {
        println!("  {}", line);
    }

    Ok(())
}
