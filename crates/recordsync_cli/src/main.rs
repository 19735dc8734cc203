//! RecordSync CLI
//!
//! Command-line runner for the RecordSync pipeline.
//!
//! # Commands
//!
//! - `run` - Run one sync against the simulated ERP and automation engine
//! - `verify` - Compare two record-set files with the consistency checker

mod commands;

use clap::{Parser, Subcommand};
use commands::OutputFormat;
use recordsync_engine::CheckMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RecordSync command-line tools.
#[derive(Parser)]
#[command(name = "recordsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync: fetch, submit, verify, notify
    Run {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Source system endpoint (overrides the config file)
        #[arg(long)]
        source_url: Option<String>,

        /// Processing system endpoint (overrides the config file)
        #[arg(long)]
        processing_url: Option<String>,

        /// JSON file with the records the source should serve
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Consistency check mode (positional, keyed)
        #[arg(long)]
        check_mode: Option<CheckMode>,

        /// Skip the completion notification
        #[arg(long)]
        no_notify: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a result record set against the submitted one
    Verify {
        /// JSON file with the submitted records
        original: PathBuf,

        /// JSON file with the returned records
        result: PathBuf,

        /// Consistency check mode (positional, keyed)
        #[arg(long, default_value = "positional")]
        check_mode: CheckMode,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            source_url,
            processing_url,
            records,
            check_mode,
            no_notify,
            format,
        } => {
            let options = commands::run::RunOptions {
                config,
                source_url,
                processing_url,
                records,
                check_mode,
                no_notify,
            };
            commands::run::run(&options, format)?;
        }
        Commands::Verify {
            original,
            result,
            check_mode,
            format,
        } => {
            commands::verify::run(&original, &result, check_mode, format)?;
        }
        Commands::Version => {
            println!("RecordSync CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_accepts_known_values() {
        let cli = Cli::try_parse_from(["recordsync", "verify", "a.json", "b.json", "-f", "json"])
            .unwrap();
        match cli.command {
            Commands::Verify { format, check_mode, .. } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(check_mode, CheckMode::Positional);
            }
            _ => panic!("expected verify"),
        }

        let cli = Cli::try_parse_from(["recordsync", "run"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run {
                format: OutputFormat::Text,
                ..
            }
        ));
    }

    #[test]
    fn format_rejects_unknown_values() {
        assert!(Cli::try_parse_from(["recordsync", "run", "--format", "yaml"]).is_err());
        assert!(
            Cli::try_parse_from(["recordsync", "verify", "a.json", "b.json", "-f", "jsn"]).is_err()
        );
    }
}
