//! Error types for batch declaration.

use thiserror::Error;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur while validating or declaring a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// A single field failed its syntax or checksum check.
    #[error("not a valid {label}: '{value}' ({expected})")]
    InvalidFormat {
        /// Name of the field as the operator supplied it (e.g. `first-iccid`).
        label: String,
        /// The offending value, verbatim.
        value: String,
        /// What the field should have looked like.
        expected: String,
    },

    /// The three identifier ranges and the declared quantity disagree.
    #[error(
        "identifier ranges are not the same length: iccid={iccid_len}, imsi={imsi_len}, \
         msisdn={msisdn_len}, declared quantity={quantity}"
    )]
    SequenceMismatch {
        iccid_len: u64,
        imsi_len: u64,
        msisdn_len: u64,
        quantity: u64,
    },
}

impl BatchError {
    pub(crate) fn invalid(
        label: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            label: label.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}
