//! HTTP transport for ES2+ requests.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Identity;

use super::config::Es2PlusConfig;
use super::error::{Es2PlusError, Es2PlusResult};
use super::types::Es2PlusCommand;

/// Name of the header announcing the ES2+ protocol version.
pub const ADMIN_PROTOCOL_HEADER: &str = "X-Admin-Protocol";

/// Protocol version this client speaks.
pub const ADMIN_PROTOCOL: &str = "gsma/rsp/v2.0.0";

/// Raw reply to an ES2+ POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `X-Admin-Protocol` response header, if present.
    pub admin_protocol: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

/// Trait for posting ES2+ JSON bodies.
///
/// This abstraction lets the command layer run against an in-memory
/// transport in tests.
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body to the endpoint of `command` and return the reply.
    fn post(&self, command: Es2PlusCommand, body: Vec<u8>) -> Es2PlusResult<HttpReply>;
}

/// Mutually authenticated HTTPS transport using reqwest.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    config: Es2PlusConfig,
}

impl ReqwestTransport {
    /// Load the TLS client identity and build the HTTP client.
    ///
    /// The certificate and key are read once, here; the resulting client is
    /// reused for every request.
    pub fn new(config: &Es2PlusConfig) -> Es2PlusResult<Self> {
        let identity = load_identity(&config.cert_path, &config.key_path)?;

        if config.accept_invalid_server_certs {
            tracing::warn!(
                host = %config.host,
                "server certificate verification is disabled for ES2+ endpoint"
            );
        }

        let mut builder = Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .danger_accept_invalid_certs(config.accept_invalid_server_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Es2PlusError::Credentials(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, command: Es2PlusCommand, body: Vec<u8>) -> Es2PlusResult<HttpReply> {
        let url = self.config.endpoint_url(command.name());
        let transport_err = |source: reqwest::Error| Es2PlusError::Transport {
            command: command.name(),
            url: url.clone(),
            source,
        };

        let request = self
            .client
            .post(&url)
            .header(ADMIN_PROTOCOL_HEADER, ADMIN_PROTOCOL)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(transport_err)?;
        if self.config.log_payloads {
            tracing::debug!(
                %command,
                method = %request.method(),
                url = %request.url(),
                headers = %format_headers(request.headers()),
                "ES2+ request headers"
            );
        }

        let response = self.client.execute(request).map_err(transport_err)?;

        let status = response.status().as_u16();
        if self.config.log_payloads {
            tracing::debug!(
                %command,
                http_status = status,
                headers = %format_headers(response.headers()),
                "ES2+ response headers"
            );
        }
        let admin_protocol = response
            .headers()
            .get(ADMIN_PROTOCOL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().map_err(transport_err)?.to_vec();

        Ok(HttpReply {
            status,
            admin_protocol,
            body,
        })
    }
}

/// Render headers one per line as `Name: value`, for debug logging.
fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            format!("{}: {}", name, value.to_str().unwrap_or("<non-ascii>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a TLS client identity from a PEM certificate and a PEM private key.
fn load_identity(cert_path: &Path, key_path: &Path) -> Es2PlusResult<Identity> {
    let read = |path: &Path| {
        fs::read(path).map_err(|e| Es2PlusError::CredentialRead {
            path: path.to_path_buf(),
            source: e,
        })
    };

    let mut pem = read(cert_path)?;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend_from_slice(&read(key_path)?);

    Identity::from_pem(&pem).map_err(|e| {
        Es2PlusError::Credentials(format!(
            "{} / {}: {}",
            cert_path.display(),
            key_path.display(),
            e
        ))
    })
}
