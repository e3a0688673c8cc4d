//! ES2+ commands against an SM-DP+.

use std::path::Path;

use clap::{Args, Subcommand, ValueEnum};
use simbatch::es2plus::{Es2PlusClient, ProfileState, ProfileStatus};

use super::common::{load_config, resolve_es2plus, ConnectionArgs};
use crate::error::CliError;

/// States a profile may be sent back to by recover/cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetState {
    #[value(name = "AVAILABLE")]
    Available,
}

impl TargetState {
    fn as_profile_state(self) -> ProfileState {
        match self {
            TargetState::Available => ProfileState::Available,
        }
    }
}

#[derive(Debug, Args)]
pub struct Es2Args {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Es2Commands,
}

/// ES2+ subcommands.
#[derive(Debug, Subcommand)]
pub enum Es2Commands {
    /// Show the state and activation code of a profile
    GetStatus { iccid: String },

    /// Move a profile back to a target state
    RecoverProfile {
        iccid: String,

        #[arg(long, value_enum, default_value = "AVAILABLE")]
        target_state: TargetState,
    },

    /// Cancel a pending order for a profile
    CancelOrder {
        iccid: String,

        #[arg(long, value_enum, default_value = "AVAILABLE")]
        target_state: TargetState,
    },

    /// Reserve a profile for download
    DownloadOrder { iccid: String },

    /// Confirm a reserved profile and release it
    ConfirmOrder { iccid: String },

    /// Download and confirm as needed, then show the final status
    Activate { iccid: String },
}

/// Run an ES2+ subcommand.
pub fn run(args: Es2Args, config_path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let es2plus = resolve_es2plus(&args.connection, &config)?;
    let client = Es2PlusClient::connect(&es2plus)?;

    match args.command {
        Es2Commands::GetStatus { iccid } => {
            let status = client.get_status(&iccid)?;
            print_status(&iccid, status.as_ref());
        }
        Es2Commands::RecoverProfile {
            iccid,
            target_state,
        } => {
            let state = target_state.as_profile_state();
            let response = client.recover_profile(&iccid, state.as_str())?;
            println!(
                "recoverProfile iccid='{}' target='{}': {}",
                iccid, state, response.header.function_execution_status.status
            );
        }
        Es2Commands::CancelOrder {
            iccid,
            target_state,
        } => {
            let state = target_state.as_profile_state();
            let response = client.cancel_order(&iccid, state.as_str())?;
            println!(
                "cancelOrder iccid='{}' target='{}': {}",
                iccid, state, response.header.function_execution_status.status
            );
        }
        Es2Commands::DownloadOrder { iccid } => {
            let response = client.download_order(&iccid)?;
            println!(
                "downloadOrder iccid='{}': {}",
                iccid, response.header.function_execution_status.status
            );
        }
        Es2Commands::ConfirmOrder { iccid } => {
            let response = client.confirm_order(&iccid)?;
            println!(
                "confirmOrder iccid='{}': {}",
                iccid, response.header.function_execution_status.status
            );
        }
        Es2Commands::Activate { iccid } => {
            let status = client.activate(&iccid)?;
            print_status(&iccid, status.as_ref());
        }
    }

    Ok(())
}

fn format_status(iccid: &str, status: Option<&ProfileStatus>) -> String {
    match status {
        Some(status) => format!(
            "iccid='{}', state='{}', acToken='{}'",
            status.iccid, status.state, status.ac_token
        ),
        None => format!("iccid='{}': no such profile", iccid),
    }
}

fn print_status(iccid: &str, status: Option<&ProfileStatus>) {
    println!("{}", format_status(iccid, status));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_state_maps_to_wire_name() {
        assert_eq!(TargetState::Available.as_profile_state().as_str(), "AVAILABLE");
    }

    #[test]
    fn test_format_status() {
        let status = ProfileStatus {
            iccid: "8901000000000000001".to_string(),
            state: ProfileState::Released,
            ac_token: "LPA:1$smdp.example$XYZ".to_string(),
            ..ProfileStatus::default()
        };
        assert_eq!(
            format_status("8901000000000000001", Some(&status)),
            "iccid='8901000000000000001', state='RELEASED', acToken='LPA:1$smdp.example$XYZ'"
        );
        assert_eq!(
            format_status("8901000000000000001", None),
            "iccid='8901000000000000001': no such profile"
        );
    }
}
