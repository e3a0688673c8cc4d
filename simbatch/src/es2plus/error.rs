//! Error types for the ES2+ client.

use std::path::PathBuf;

use thiserror::Error;

use super::types::StatusCodeData;

/// Result type for ES2+ operations.
pub type Es2PlusResult<T> = Result<T, Es2PlusError>;

/// Errors that can occur while talking ES2+.
///
/// Nothing here is retried by the client; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum Es2PlusError {
    /// The TLS client certificate or key could not be read.
    #[error("failed to read TLS credential {path}: {source}")]
    CredentialRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The TLS client certificate or key was read but is not usable.
    #[error("invalid TLS client identity: {0}")]
    Credentials(String),

    /// No function call identifier could be generated for a request.
    #[error("failed to generate function call identifier: {0}")]
    CorrelationId(String),

    /// The request payload could not be serialised.
    #[error("failed to encode {command} request: {source}")]
    Encode {
        command: &'static str,
        source: serde_json::Error,
    },

    /// The HTTP exchange itself failed.
    #[error("{command} request to {url} failed: {source}")]
    Transport {
        command: &'static str,
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode {command} response (HTTP {http_status}): {source}")]
    Decode {
        command: &'static str,
        http_status: u16,
        source: serde_json::Error,
    },

    /// The server answered, but reported that the function did not succeed.
    ///
    /// `response` holds the decoded response body for inspection.
    #[error("{command} execution status was '{status}' ({status_code_data})")]
    CommandFailed {
        command: &'static str,
        status: String,
        status_code_data: StatusCodeData,
        response: serde_json::Value,
    },

    /// A status query for one ICCID returned more than one profile.
    #[error("getProfileStatus returned {count} profiles for iccid {iccid}")]
    MultipleProfiles { iccid: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let err = Es2PlusError::CommandFailed {
            command: "downloadOrder",
            status: "Failed".to_string(),
            status_code_data: StatusCodeData {
                subject_code: "8.2.1".to_string(),
                reason_code: "3.9".to_string(),
                subject_identifier: "8901000000000000001".to_string(),
                message: "Profile ICCID unknown".to_string(),
            },
            response: serde_json::Value::Null,
        };
        let msg = err.to_string();
        assert!(msg.contains("downloadOrder"));
        assert!(msg.contains("'Failed'"));
        assert!(msg.contains("Profile ICCID unknown"));
    }

    #[test]
    fn test_multiple_profiles_display() {
        let err = Es2PlusError::MultipleProfiles {
            iccid: "8901000000000000001".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "getProfileStatus returned 2 profiles for iccid 8901000000000000001"
        );
    }
}
