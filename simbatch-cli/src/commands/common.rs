//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use simbatch::config::{ConfigError, ConfigFile};
use simbatch::es2plus::Es2PlusConfig;

use crate::error::CliError;

/// Load the configuration file, from `path` when given.
///
/// A platform without a config directory is not an error; defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let loaded = match path {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    };
    match loaded {
        Err(ConfigError::NoConfigDir) => Ok(ConfigFile::default()),
        other => Ok(other?),
    }
}

/// Connection flags for ES2+ commands. Unset flags fall back to `[es2plus]`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// SM-DP+ host name
    #[arg(long)]
    pub host: Option<String>,

    /// SM-DP+ port
    #[arg(long)]
    pub port: Option<u16>,

    /// Function requester identifier
    #[arg(long)]
    pub requester_id: Option<String>,

    /// PEM file with the TLS client certificate
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// PEM file with the TLS client key
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Verify the server certificate against the system trust roots
    #[arg(long)]
    pub verify_server_certs: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log request and response payloads (at debug level)
    #[arg(long)]
    pub log_payloads: bool,
}

fn required<T>(value: Option<T>, flag: &str, key: &str) -> Result<T, CliError> {
    value.ok_or_else(|| {
        CliError::Config(format!(
            "missing {}. Use --{} or set {} in the [es2plus] section of config.ini",
            key, flag, key
        ))
    })
}

/// Resolve the client configuration. CLI takes precedence, then config.
pub fn resolve_es2plus(
    args: &ConnectionArgs,
    config: &ConfigFile,
) -> Result<Es2PlusConfig, CliError> {
    let file = &config.es2plus;

    let host = required(args.host.clone().or_else(|| file.host.clone()), "host", "host")?;
    let port = required(args.port.or(file.port), "port", "port")?;
    let requester_id = required(
        args.requester_id.clone().or_else(|| file.requester_id.clone()),
        "requester-id",
        "requester_id",
    )?;
    let cert = required(args.cert.clone().or_else(|| file.cert.clone()), "cert", "cert")?;
    let key = required(args.key.clone().or_else(|| file.key.clone()), "key", "key")?;

    let accept_invalid = if args.verify_server_certs {
        false
    } else {
        file.accept_invalid_server_certs.unwrap_or(true)
    };

    let mut resolved = Es2PlusConfig::new(host, port, requester_id, cert, key)
        .with_accept_invalid_server_certs(accept_invalid)
        .with_log_payloads(args.log_payloads);
    if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
        resolved = resolved.with_timeout(Duration::from_secs(secs));
    }
    Ok(resolved)
}
