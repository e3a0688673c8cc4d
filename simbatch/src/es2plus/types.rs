//! ES2+ wire types.
//!
//! Field names follow the GSMA SGP.22 JSON binding. Decoding is lenient about
//! missing fields: an absent or `null` string decodes as empty and an absent
//! or `null` list as empty, so a sparse but well-formed response still
//! reaches the caller.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Execution status the server reports for a successful function call.
pub const EXECUTED_SUCCESS: &str = "Executed-Success";

/// Decode an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The ES2+ functions this client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Es2PlusCommand {
    GetProfileStatus,
    RecoverProfile,
    CancelOrder,
    DownloadOrder,
    ConfirmOrder,
}

impl Es2PlusCommand {
    /// Function name, used as the last path segment of the endpoint URL.
    pub fn name(self) -> &'static str {
        match self {
            Es2PlusCommand::GetProfileStatus => "getProfileStatus",
            Es2PlusCommand::RecoverProfile => "recoverProfile",
            Es2PlusCommand::CancelOrder => "cancelOrder",
            Es2PlusCommand::DownloadOrder => "downloadOrder",
            Es2PlusCommand::ConfirmOrder => "confirmOrder",
        }
    }
}

impl fmt::Display for Es2PlusCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Header carried by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    pub function_requester_identifier: String,
    pub function_call_identifier: String,
}

/// Header carried by every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    #[serde(default, deserialize_with = "null_as_default")]
    pub function_execution_status: FunctionExecutionStatus,
}

/// Outcome of a function call as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionExecutionStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code_data: StatusCodeData,
}

impl FunctionExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == EXECUTED_SUCCESS
    }
}

/// Failure details: which subject failed, why, and a human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCodeData {
    #[serde(deserialize_with = "null_as_default")]
    pub subject_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject_identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl fmt::Display for StatusCodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subject={} reason={} id={} message={:?}",
            self.subject_code, self.reason_code, self.subject_identifier, self.message
        )
    }
}

/// Responses that carry a [`ResponseHeader`].
pub trait Es2PlusResponse {
    fn header(&self) -> &ResponseHeader;
}

macro_rules! impl_response {
    ($($ty:ty),* $(,)?) => {
        $(impl Es2PlusResponse for $ty {
            fn header(&self) -> &ResponseHeader {
                &self.header
            }
        })*
    };
}

// ============================================================================
// Profile status
// ============================================================================

/// Lifecycle state of a profile on the SM-DP+.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProfileState {
    Available,
    Allocated,
    Linked,
    Confirmed,
    Released,
    Downloaded,
    Installed,
    Error,
    Unavailable,
    /// A state this client does not know, kept verbatim.
    Other(String),
}

impl ProfileState {
    pub fn as_str(&self) -> &str {
        match self {
            ProfileState::Available => "AVAILABLE",
            ProfileState::Allocated => "ALLOCATED",
            ProfileState::Linked => "LINKED",
            ProfileState::Confirmed => "CONFIRMED",
            ProfileState::Released => "RELEASED",
            ProfileState::Downloaded => "DOWNLOADED",
            ProfileState::Installed => "INSTALLED",
            ProfileState::Error => "ERROR",
            ProfileState::Unavailable => "UNAVAILABLE",
            ProfileState::Other(s) => s,
        }
    }
}

impl From<String> for ProfileState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "AVAILABLE" => ProfileState::Available,
            "ALLOCATED" => ProfileState::Allocated,
            "LINKED" => ProfileState::Linked,
            "CONFIRMED" => ProfileState::Confirmed,
            "RELEASED" => ProfileState::Released,
            "DOWNLOADED" => ProfileState::Downloaded,
            "INSTALLED" => ProfileState::Installed,
            "ERROR" => ProfileState::Error,
            "UNAVAILABLE" => ProfileState::Unavailable,
            _ => ProfileState::Other(s),
        }
    }
}

impl From<ProfileState> for String {
    fn from(state: ProfileState) -> Self {
        match state {
            ProfileState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        ProfileState::Other(String::new())
    }
}

impl fmt::Display for ProfileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server snapshot of one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStatus {
    #[serde(
        rename = "status_last_update_timestamp",
        deserialize_with = "null_as_default"
    )]
    pub status_last_update_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ac_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: ProfileState,
    #[serde(deserialize_with = "null_as_default")]
    pub eid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iccid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lock_flag: bool,
}

impl ProfileStatus {
    /// The activation code token, if the server has issued one.
    pub fn activation_code(&self) -> Option<&str> {
        Some(self.ac_token.as_str()).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfileStatusRequest {
    pub header: RequestHeader,
    pub iccid_list: Vec<IccidEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IccidEntry {
    pub iccid: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetProfileStatusResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: ResponseHeader,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_status_list: Vec<ProfileStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub completion_timestamp: String,
}

// ============================================================================
// Recover / cancel
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverProfileRequest {
    pub header: RequestHeader,
    pub iccid: String,
    pub profile_status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverProfileResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: ResponseHeader,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub header: RequestHeader,
    pub iccid: String,
    pub final_profile_status_indicator: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelOrderResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: ResponseHeader,
}

// ============================================================================
// Download / confirm
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DownloadOrderRequest {
    pub header: RequestHeader,
    pub iccid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiletype: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadOrderResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: ResponseHeader,
    #[serde(deserialize_with = "null_as_default")]
    pub iccid: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderRequest {
    pub header: RequestHeader,
    pub iccid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smdp_address: Option<String>,
    pub release_flag: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfirmOrderResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub header: ResponseHeader,
    #[serde(deserialize_with = "null_as_default")]
    pub iccid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smdp_address: Option<String>,
}

impl_response!(
    GetProfileStatusResponse,
    RecoverProfileResponse,
    CancelOrderResponse,
    DownloadOrderResponse,
    ConfirmOrderResponse,
);
