//! Configuration for an ES2+ client.

use std::path::PathBuf;
use std::time::Duration;

/// Everything needed to construct an [`Es2PlusClient`](super::Es2PlusClient).
///
/// The configuration is fixed for the lifetime of the client: one requester
/// identity, one TLS identity, one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Es2PlusConfig {
    /// Host name of the SM-DP+ ES2+ endpoint.
    pub host: String,

    /// Port of the SM-DP+ ES2+ endpoint.
    pub port: u16,

    /// `functionRequesterIdentifier` sent with every request.
    pub requester_id: String,

    /// PEM file holding the TLS client certificate (chain).
    pub cert_path: PathBuf,

    /// PEM file holding the TLS client private key.
    pub key_path: PathBuf,

    /// Accept any server certificate chain.
    ///
    /// The SM-DP+ certificates are signed by a private CA whose chain is not
    /// distributed to operators yet, so this defaults to `true`. Turning it
    /// off makes the client verify against the platform trust roots.
    pub accept_invalid_server_certs: bool,

    /// Per-request timeout. `None` leaves the HTTP stack's default in place.
    pub timeout: Option<Duration>,

    /// Log request/response headers, outgoing JSON payloads and raw responses
    /// at debug level.
    pub log_payloads: bool,
}

impl Es2PlusConfig {
    /// Create a configuration with defaults for the optional settings.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        requester_id: impl Into<String>,
        cert_path: impl Into<PathBuf>,
        key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            requester_id: requester_id.into(),
            cert_path: cert_path.into(),
            key_path: key_path.into(),
            accept_invalid_server_certs: true,
            timeout: None,
            log_payloads: false,
        }
    }

    /// Set whether unverifiable server certificates are accepted.
    pub fn with_accept_invalid_server_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_server_certs = accept;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable payload logging.
    pub fn with_log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// URL of the endpoint for an ES2+ function.
    pub fn endpoint_url(&self, function: &str) -> String {
        format!(
            "https://{}:{}/gsma/rsp2/es2plus/{}",
            self.host, self.port, function
        )
    }
}
