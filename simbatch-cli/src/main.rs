//! SimBatch CLI - Command-line interface
//!
//! Declares SIM profile batches and drives profiles through the ES2+
//! interface of an SM-DP+.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use commands::batch::BatchArgs;
use commands::config::ConfigCommands;
use commands::es2::Es2Args;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "simbatch", version, about = "SIM batch declaration and ES2+ profile management")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Call ES2+ functions on an SM-DP+
    Es2(Es2Args),

    /// Validate a batch and print its descriptor as JSON
    DeclareBatch(BatchArgs),

    /// Validate a batch and print its CSV import payload
    BatchPayload(BatchArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Es2(args) => commands::es2::run(args, config_path),
        Commands::DeclareBatch(args) => commands::batch::run_declare(&args, config_path),
        Commands::BatchPayload(args) => commands::batch::run_payload(&args, config_path),
        Commands::Config(command) => commands::config::run(command, config_path),
    }
}

fn main() {
    let cli = Cli::parse();

    let _guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
