//! Roadwind CLI - Command-line interface for Roadwind.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::Fixture;
use config::CliConfig;
use logging::LogFormat;

/// Roadwind - map, traffic and weather front-end tooling
#[derive(Parser, Debug)]
#[command(name = "roadwind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a fixture data set as JSON
    Fixtures {
        /// Which data set
        #[arg(value_enum)]
        kind: Fixture,
    },

    /// Run the identity bridge against an in-memory host
    Identity {
        /// Raw host reply to deliver, in order (repeatable)
        #[arg(short, long = "reply")]
        replies: Vec<String>,
        /// Run without a host channel
        #[arg(long)]
        no_host: bool,
    },

    /// Show version information
    Version,
}

fn run(cli: Cli, config: CliConfig) -> commands::Result<()> {
    match cli.command {
        Commands::Fixtures { kind } => {
            println!("{}", commands::fixture(kind)?);
        }
        Commands::Identity { replies, no_host } => {
            let report = commands::identity(&replies, no_host, config.bridge)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Version => {
            println!("roadwind {}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    logging::init_logging(log_level, LogFormat::parse(&config.log_format));

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
