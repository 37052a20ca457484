//! Kdlt CLI - a command-line tool for KDL documents.
//!
//! This is the main entry point for the kdlt CLI application. It uses clap
//! for argument parsing and dispatches to the appropriate command handlers.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    check::{run_check, CheckArgs},
    fmt::{run_fmt, FmtArgs},
};
use config::Config;
use error::{KdltError, Result};

/// Kdlt - a CLI tool for KDL documents
///
/// Kdlt parses KDL files, reports grammar errors with source locations, and
/// reformats documents to a canonical style.
#[derive(Parser, Debug)]
#[command(name = "kdlt")]
#[command(author = "KDL Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for KDL documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "KDLT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "KDLT_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "KDLT_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the kdlt CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse files and report errors
    ///
    /// Each file is parsed as a complete KDL document. Grammar errors are
    /// reported with a location snapshot; the exit status is non-zero when
    /// any file fails.
    Check(CheckCommand),

    /// Reformat files to the canonical style
    ///
    /// Parses each file and reprints it with sorted properties, normalized
    /// whitespace, and the configured indentation.
    Fmt(FmtCommand),
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// Arguments for the fmt subcommand.
#[derive(Parser, Debug)]
struct FmtCommand {
    /// Files to format
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Rewrite files in place
    #[arg(short, long)]
    write: bool,

    /// Exit non-zero if any file is not already formatted
    #[arg(long, conflicts_with = "write")]
    check: bool,
}

/// Main entry point for the kdlt CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose || config.verbose, config)
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| KdltError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Check(args) => run_check(CheckArgs {
            files: args.files,
            verbose,
        }),
        Commands::Fmt(args) => run_fmt(FmtArgs {
            files: args.files,
            write: args.write,
            check: args.check,
            config: config.format.to_print_config()?,
            verbose,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["kdlt", "check", "a.kdl"]);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_check_multiple_files() {
        let cli = Cli::parse_from(["kdlt", "check", "a.kdl", "b.kdl"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.files.len(), 2);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_fmt_with_write() {
        let cli = Cli::parse_from(["kdlt", "fmt", "--write", "a.kdl"]);
        if let Commands::Fmt(args) = cli.command {
            assert!(args.write);
            assert!(!args.check);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_parse_fmt_with_check() {
        let cli = Cli::parse_from(["kdlt", "fmt", "--check", "a.kdl"]);
        if let Commands::Fmt(args) = cli.command {
            assert!(args.check);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_fmt_write_conflicts_with_check() {
        assert!(Cli::try_parse_from(["kdlt", "fmt", "--write", "--check", "a.kdl"]).is_err());
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["kdlt", "check"]).is_err());
        assert!(Cli::try_parse_from(["kdlt", "fmt"]).is_err());
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::parse_from(["kdlt", "--verbose", "--no-color", "check", "a.kdl"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["kdlt", "--config", "/path/to/kdlt.toml", "check", "a.kdl"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/kdlt.toml")));
    }
}
