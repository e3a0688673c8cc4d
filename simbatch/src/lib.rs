//! SimBatch - SIM profile batch declaration and ES2+ lifecycle management
//!
//! This library provides the two halves of SIM administration that carry
//! real invariants:
//!
//! - [`batch`]: validating ICCID/IMSI/MSISDN ranges and deriving batch
//!   descriptors for upload to the SIM inventory.
//! - [`es2plus`]: a blocking client for the GSMA ES2+ interface of an SM-DP+,
//!   including a profile activation walk.
//!
//! [`config`] loads shared defaults from the user's configuration file.

pub mod batch;
pub mod config;
pub mod es2plus;
