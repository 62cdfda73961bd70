//! Show version information.

use anyhow::Result;
use colored::Colorize;

pub fn execute(build: bool) -> Result<()> {
    println!("{} {}", tblmonit_core::APP_NAME.cyan().bold(), tblmonit_core::VERSION);

    if build {
        println!("\nBuild Information:");
        println!("  Version: {}", env!("CARGO_PKG_VERSION"));
        println!("  Target: {}", std::env::consts::ARCH);
        println!("  OS: {}", std::env::consts::OS);
    }

    Ok(())
}
