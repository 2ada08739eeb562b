//! Command-line tool for interval tree clock stamps
//!
//! Reads stamps in text form, applies one clock operation and prints the
//! result, so clocks can be inspected and exercised from scripts.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;

use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "itc")]
#[command(about = "Interval tree clock stamp tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "itc.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&cli.config)?;
    for line in commands::run(&cli.command, &config)? {
        println!("{line}");
    }

    Ok(())
}
