//! Batch declaration commands.
//!
//! `declare-batch` validates a batch and prints its descriptor as JSON;
//! `batch-payload` prints the per-profile CSV for the inventory import.

use std::path::Path;

use clap::Args;
use simbatch::batch::{BatchDeclaration, BatchDescriptor};
use simbatch::config::UploadSettings;

use super::common::load_config;
use crate::error::CliError;

/// Batch description flags. Upload settings fall back to `[upload]`.
#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// ICCID of the first profile (18 digits, or 19 with check digit)
    #[arg(long)]
    pub first_iccid: String,

    /// ICCID of the last profile
    #[arg(long)]
    pub last_iccid: String,

    /// IMSI of the first profile
    #[arg(long)]
    pub first_imsi: String,

    /// IMSI of the last profile
    #[arg(long)]
    pub last_imsi: String,

    /// MSISDN of the first profile
    #[arg(long)]
    pub first_msisdn: String,

    /// MSISDN of the last profile
    #[arg(long)]
    pub last_msisdn: String,

    /// SIM profile type, e.g. OYA_M1_BF76
    #[arg(long)]
    pub profile_type: String,

    /// Number of profiles in the batch
    #[arg(long)]
    pub batch_quantity: String,

    /// Host of the SIM inventory service
    #[arg(long)]
    pub upload_hostname: Option<String>,

    /// Port of the SIM inventory service
    #[arg(long)]
    pub upload_port: Option<u16>,

    /// HSS vendor name
    #[arg(long)]
    pub hss_vendor: Option<String>,

    /// Profile vendor name
    #[arg(long)]
    pub profile_vendor: Option<String>,

    /// HSS state for imported profiles (ACTIVATED or NOT_ACTIVATED)
    #[arg(long)]
    pub initial_hss_state: Option<String>,
}

impl BatchArgs {
    /// Combine flags with upload settings into a declaration.
    pub fn to_declaration(&self, upload: &UploadSettings) -> BatchDeclaration {
        BatchDeclaration {
            first_iccid: self.first_iccid.clone(),
            last_iccid: self.last_iccid.clone(),
            first_imsi: self.first_imsi.clone(),
            last_imsi: self.last_imsi.clone(),
            first_msisdn: self.first_msisdn.clone(),
            last_msisdn: self.last_msisdn.clone(),
            profile_type: self.profile_type.clone(),
            quantity: self.batch_quantity.clone(),
            upload_hostname: self
                .upload_hostname
                .clone()
                .unwrap_or_else(|| upload.hostname.clone()),
            upload_port: self.upload_port.unwrap_or(upload.port),
            hss_vendor: self
                .hss_vendor
                .clone()
                .unwrap_or_else(|| upload.hss_vendor.clone()),
            profile_vendor: self
                .profile_vendor
                .clone()
                .unwrap_or_else(|| upload.profile_vendor.clone()),
            initial_hss_state: self
                .initial_hss_state
                .clone()
                .unwrap_or_else(|| upload.initial_hss_state.clone()),
        }
    }
}

fn declare(args: &BatchArgs, config_path: Option<&Path>) -> Result<BatchDescriptor, CliError> {
    let config = load_config(config_path)?;
    Ok(BatchDescriptor::declare(&args.to_declaration(&config.upload))?)
}

/// Print the batch descriptor as JSON.
pub fn run_declare(args: &BatchArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let batch = declare(args, config_path)?;
    let json =
        serde_json::to_string_pretty(&batch).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Print the CSV import payload.
pub fn run_payload(args: &BatchArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let batch = declare(args, config_path)?;
    batch
        .write_csv(std::io::stdout().lock())
        .map_err(|e| CliError::Output(e.to_string()))
}
