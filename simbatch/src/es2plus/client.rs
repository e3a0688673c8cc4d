//! ES2+ function calls.
//!
//! Every function is one blocking request/response round trip through
//! [`Es2PlusClient::execute`], which stamps the request header, encodes the
//! payload, posts it and decodes the reply. The public methods only shape
//! the request and interpret the response.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::Es2PlusConfig;
use super::correlation::{CallIdSource, UuidCallIds};
use super::error::{Es2PlusError, Es2PlusResult};
use super::http::{HttpTransport, ReqwestTransport, ADMIN_PROTOCOL};
use super::types::{
    CancelOrderRequest, CancelOrderResponse, ConfirmOrderRequest, ConfirmOrderResponse,
    DownloadOrderRequest, DownloadOrderResponse, Es2PlusCommand, Es2PlusResponse,
    GetProfileStatusRequest, GetProfileStatusResponse, IccidEntry, ProfileStatus,
    RecoverProfileRequest, RecoverProfileResponse, RequestHeader,
};

/// Client for one ES2+ endpoint, acting as one requester.
pub struct Es2PlusClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
    call_ids: Box<dyn CallIdSource>,
    requester_id: String,
    log_payloads: bool,
}

impl Es2PlusClient<ReqwestTransport> {
    /// Connect-ready client over mutually authenticated HTTPS.
    ///
    /// Loads the TLS client identity named in `config`; fails if it cannot.
    pub fn connect(config: &Es2PlusConfig) -> Es2PlusResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(transport, config.requester_id.clone())
            .with_log_payloads(config.log_payloads))
    }
}

impl<T: HttpTransport> Es2PlusClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: T, requester_id: impl Into<String>) -> Self {
        Self {
            transport,
            call_ids: Box::new(UuidCallIds),
            requester_id: requester_id.into(),
            log_payloads: false,
        }
    }

    /// Replace the function call identifier source.
    pub fn with_call_ids(mut self, call_ids: impl CallIdSource + 'static) -> Self {
        self.call_ids = Box::new(call_ids);
        self
    }

    /// Enable or disable payload logging.
    pub fn with_log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    /// The `functionRequesterIdentifier` this client sends.
    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn new_header(&self) -> Es2PlusResult<RequestHeader> {
        Ok(RequestHeader {
            function_requester_identifier: self.requester_id.clone(),
            function_call_identifier: self.call_ids.next_call_id()?,
        })
    }

    /// Run one ES2+ function.
    ///
    /// `build` receives a freshly stamped header and returns the request
    /// payload. If no call identifier can be generated, nothing is sent.
    fn execute<Req, Resp>(
        &self,
        command: Es2PlusCommand,
        build: impl FnOnce(RequestHeader) -> Req,
    ) -> Es2PlusResult<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let header = self.new_header()?;
        let call_id = header.function_call_identifier.clone();
        let payload = build(header);

        let body = serde_json::to_vec(&payload).map_err(|source| Es2PlusError::Encode {
            command: command.name(),
            source,
        })?;
        if self.log_payloads {
            tracing::debug!(%command, payload = %String::from_utf8_lossy(&body), "ES2+ request");
        }

        let reply = self.transport.post(command, body)?;
        if self.log_payloads {
            tracing::debug!(
                %command,
                http_status = reply.status,
                body = %String::from_utf8_lossy(&reply.body),
                "ES2+ response"
            );
        }
        if reply.admin_protocol.as_deref() != Some(ADMIN_PROTOCOL) {
            tracing::warn!(
                %command,
                admin_protocol = ?reply.admin_protocol,
                "response does not announce {}", ADMIN_PROTOCOL
            );
        }

        let response = serde_json::from_slice(&reply.body).map_err(|source| Es2PlusError::Decode {
            command: command.name(),
            http_status: reply.status,
            source,
        })?;
        tracing::debug!(%command, %call_id, "ES2+ call completed");
        Ok(response)
    }

    /// Query the status of one profile.
    ///
    /// Returns `None` if the server knows no profile for `iccid`.
    pub fn get_status(&self, iccid: &str) -> Es2PlusResult<Option<ProfileStatus>> {
        let response: GetProfileStatusResponse =
            self.execute(Es2PlusCommand::GetProfileStatus, |header| {
                GetProfileStatusRequest {
                    header,
                    iccid_list: vec![IccidEntry {
                        iccid: iccid.to_string(),
                    }],
                }
            })?;

        let mut list = response.profile_status_list;
        match list.len() {
            0 => Ok(None),
            1 => Ok(list.pop()),
            count => Err(Es2PlusError::MultipleProfiles {
                iccid: iccid.to_string(),
                count,
            }),
        }
    }

    /// Ask the server to move a profile back to `target_state`.
    ///
    /// The target state is passed through as given.
    pub fn recover_profile(
        &self,
        iccid: &str,
        target_state: &str,
    ) -> Es2PlusResult<RecoverProfileResponse> {
        self.execute(Es2PlusCommand::RecoverProfile, |header| RecoverProfileRequest {
            header,
            iccid: iccid.to_string(),
            profile_status: target_state.to_string(),
        })
    }

    /// Cancel a pending order, leaving the profile in `target_state`.
    ///
    /// The target state is passed through as given.
    pub fn cancel_order(
        &self,
        iccid: &str,
        target_state: &str,
    ) -> Es2PlusResult<CancelOrderResponse> {
        self.execute(Es2PlusCommand::CancelOrder, |header| CancelOrderRequest {
            header,
            iccid: iccid.to_string(),
            final_profile_status_indicator: target_state.to_string(),
        })
    }

    /// Reserve a profile for download.
    pub fn download_order(&self, iccid: &str) -> Es2PlusResult<DownloadOrderResponse> {
        let response = self.execute(Es2PlusCommand::DownloadOrder, |header| {
            DownloadOrderRequest {
                header,
                iccid: iccid.to_string(),
                eid: None,
                profiletype: None,
            }
        })?;
        require_success(Es2PlusCommand::DownloadOrder, response)
    }

    /// Confirm a reserved profile and release it for installation.
    pub fn confirm_order(&self, iccid: &str) -> Es2PlusResult<ConfirmOrderResponse> {
        let response = self.execute(Es2PlusCommand::ConfirmOrder, |header| {
            ConfirmOrderRequest {
                header,
                iccid: iccid.to_string(),
                eid: None,
                matching_id: None,
                confirmation_code: None,
                smdp_address: None,
                release_flag: true,
            }
        })?;
        require_success(Es2PlusCommand::ConfirmOrder, response)
    }
}

/// Turn a response whose execution status is not success into an error.
fn require_success<R>(command: Es2PlusCommand, response: R) -> Es2PlusResult<R>
where
    R: Es2PlusResponse + Serialize,
{
    let status = &response.header().function_execution_status;
    if status.is_success() {
        tracing::info!(%command, "executed successfully");
        return Ok(response);
    }

    tracing::info!(%command, status = %status.status, "execution failed");
    Err(Es2PlusError::CommandFailed {
        command: command.name(),
        status: status.status.clone(),
        status_code_data: status.status_code_data.clone(),
        response: serde_json::to_value(&response).unwrap_or_default(),
    })
}
