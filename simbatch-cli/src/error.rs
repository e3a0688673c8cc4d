//! CLI error type.

use simbatch::batch::BatchError;
use simbatch::config::ConfigError;
use simbatch::es2plus::Es2PlusError;
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required setting is missing or unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file could not be loaded or written.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// The batch declaration was rejected.
    #[error("Invalid batch: {0}")]
    Batch(#[from] BatchError),

    /// An ES2+ call failed.
    #[error("ES2+ error: {0}")]
    Es2Plus(#[from] Es2PlusError),

    /// Logging could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Output could not be rendered or written.
    #[error("Failed to write output: {0}")]
    Output(String),
}
