//! Client for the GSMA ES2+ profile management interface.
//!
//! ES2+ is the operator-facing interface of an SM-DP+: JSON over mutually
//! authenticated HTTPS, one POST per function. This module provides:
//!
//! - [`Es2PlusClient`]: the five functions this system uses
//!   (`getProfileStatus`, `recoverProfile`, `cancelOrder`, `downloadOrder`,
//!   `confirmOrder`) plus [`Es2PlusClient::activate`], which walks a profile
//!   through download and confirm.
//! - [`HttpTransport`]: the seam between the client and the network, with
//!   [`ReqwestTransport`] as the real implementation.
//!
//! # Example
//!
//! ```ignore
//! use simbatch::es2plus::{Es2PlusClient, Es2PlusConfig};
//!
//! let config = Es2PlusConfig::new("smdp.example", 8443, "ostelco", "cert.pem", "key.pem");
//! let client = Es2PlusClient::connect(&config)?;
//! let status = client.activate("8901000000000000001")?;
//! ```

mod activation;
mod client;
mod config;
mod correlation;
mod error;
mod http;
mod types;

pub use activation::ActivationStep;
pub use client::Es2PlusClient;
pub use config::Es2PlusConfig;
pub use correlation::{CallIdSource, UuidCallIds};
pub use error::{Es2PlusError, Es2PlusResult};
pub use http::{HttpReply, HttpTransport, ReqwestTransport, ADMIN_PROTOCOL, ADMIN_PROTOCOL_HEADER};
pub use types::{
    CancelOrderResponse, ConfirmOrderResponse, DownloadOrderResponse, Es2PlusCommand,
    Es2PlusResponse, FunctionExecutionStatus, ProfileState, ProfileStatus,
    RecoverProfileResponse, ResponseHeader, StatusCodeData, EXECUTED_SUCCESS,
};
