//! Wiki CLI.
//!
//! Provides commands for:
//! - `serve`: Start the wiki server

mod commands;
mod error;
mod output;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// Wiki - minimal wiki server.
#[derive(Parser)]
#[command(name = "wiki", version, about)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace). Overrides `RUST_LOG`.
    #[arg(long, global = true, value_name = "LEVEL")]
    log: Option<LevelFilter>,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wiki server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for serve command
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    if let Err(err) = init_tracing(log_filter(cli.log, verbose), cli.log_file.as_deref()) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Pick the log filter.
///
/// `--log` wins, then `--verbose` (debug), then `RUST_LOG`, then `info`.
fn log_filter(level: Option<LevelFilter>, verbose: bool) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

/// Install the global subscriber, writing to `log_file` or stderr.
fn init_tracing(filter: EnvFilter, log_file: Option<&Path>) -> Result<(), CliError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
