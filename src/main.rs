mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::TrackerConfig;

#[derive(Parser)]
#[command(name = "event-tracker")]
#[command(about = "Create, edit, delete and filter personal events")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/event-tracker/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (the default)
    Shell,
    /// Apply JSON intents, one per line, and print a JSON view after each
    Run {
        /// Intent file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Pin the current time (RFC 3339) instead of reading the clock
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config_path = TrackerConfig::resolve_path(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let config = TrackerConfig::load(&config_path)?;
            commands::shell::run(&config)
        }
        Commands::Run { file, now } => {
            let config = TrackerConfig::load(&config_path)?;
            commands::run::run(&config, file.as_deref(), now.as_deref())
        }
        Commands::Config { init } => commands::config::run(&config_path, init),
    }
}

/// Logs go to stderr so `run` output stays valid JSON lines.
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
