// src/bin/shellify.rs

//! The `shellify` command-line tool.

use anyhow::Result;
use colored::*;
use shellify::{PackageInfo, Shell, ShellConfig, cli::handlers};

/// The entry point of the `shellify` tool.
/// It sets up logging, dispatches the process arguments and reports errors centrally.
fn main() {
    env_logger::init();

    println!();
    let result = run_cli();
    println!();

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let config = ShellConfig::new()
        .package(PackageInfo::new(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        ))
        .command("init", handlers::init::descriptor());

    let shell = Shell::new(config).handler("init", handlers::init::handle);
    let result = shell.run_env()?;
    log::debug!(
        "Dispatch finished: {:?} ({:?}) with input {}",
        result.command_name,
        result.outcome,
        serde_json::to_string(&result.input)?
    );
    Ok(())
}
