//! Integration tests for the ES2+ activation walk.
//!
//! These tests drive `Es2PlusClient::activate` against an in-memory SM-DP+
//! that keeps one profile's state and answers each ES2+ function the way a
//! real server would, recording the order of calls.
//!
//! Run with: `cargo test --test activation_flow`

use std::sync::Mutex;

use serde_json::{json, Value};

use simbatch::es2plus::{
    Es2PlusClient, Es2PlusCommand, Es2PlusError, Es2PlusResult, HttpReply, HttpTransport,
    ProfileState, ADMIN_PROTOCOL,
};

const ICCID: &str = "8901000000000000001";

// ============================================================================
// Fake SM-DP+
// ============================================================================

struct ProfileRecord {
    state: &'static str,
    ac_token: &'static str,
}

/// Single-profile SM-DP+ that moves AVAILABLE -> ALLOCATED -> RELEASED.
struct FakeSmdp {
    profile: Mutex<Option<ProfileRecord>>,
    calls: Mutex<Vec<Es2PlusCommand>>,
    fail_confirm: bool,
    /// Activation code the server attaches when it allocates a profile.
    token_on_allocate: &'static str,
}

impl FakeSmdp {
    fn with_profile(state: &'static str, ac_token: &'static str) -> Self {
        Self {
            profile: Mutex::new(Some(ProfileRecord { state, ac_token })),
            calls: Mutex::new(Vec::new()),
            fail_confirm: false,
            token_on_allocate: "",
        }
    }

    fn empty() -> Self {
        Self {
            profile: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            fail_confirm: false,
            token_on_allocate: "",
        }
    }

    fn calls(&self) -> Vec<Es2PlusCommand> {
        self.calls.lock().unwrap().clone()
    }

    fn commands_issued(&self) -> Vec<Es2PlusCommand> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Es2PlusCommand::GetProfileStatus)
            .collect()
    }

    fn status(status: &str) -> Value {
        json!({ "functionExecutionStatus": { "status": status } })
    }

    fn answer(&self, command: Es2PlusCommand, request: &Value) -> Value {
        let mut profile = self.profile.lock().unwrap();
        match command {
            Es2PlusCommand::GetProfileStatus => {
                assert_eq!(request["iccidList"][0]["iccid"], json!(ICCID));
                let list: Vec<Value> = profile
                    .iter()
                    .map(|p| {
                        json!({
                            "status_last_update_timestamp": "2019-10-01T12:00:00Z",
                            "acToken": p.ac_token,
                            "state": p.state,
                            "eid": "",
                            "iccid": ICCID,
                            "lockFlag": false
                        })
                    })
                    .collect();
                json!({
                    "header": Self::status("Executed-Success"),
                    "profileStatusList": list,
                    "completionTimestamp": "2019-10-01T12:00:01Z"
                })
            }
            Es2PlusCommand::DownloadOrder => {
                let p = profile.as_mut().expect("download on missing profile");
                assert_eq!(p.state, "AVAILABLE");
                p.state = "ALLOCATED";
                p.ac_token = self.token_on_allocate;
                json!({ "header": Self::status("Executed-Success"), "iccid": ICCID })
            }
            Es2PlusCommand::ConfirmOrder => {
                if self.fail_confirm {
                    return json!({ "header": Self::status("Failed"), "iccid": ICCID });
                }
                let p = profile.as_mut().expect("confirm on missing profile");
                assert_eq!(p.state, "ALLOCATED");
                assert_eq!(request["releaseFlag"], json!(true));
                p.state = "RELEASED";
                p.ac_token = "LPA:1$smdp.example$0123-ABCD";
                json!({ "header": Self::status("Executed-Success"), "iccid": ICCID })
            }
            Es2PlusCommand::RecoverProfile | Es2PlusCommand::CancelOrder => {
                json!({ "header": Self::status("Executed-Success") })
            }
        }
    }
}

impl HttpTransport for FakeSmdp {
    fn post(&self, command: Es2PlusCommand, body: Vec<u8>) -> Es2PlusResult<HttpReply> {
        let request: Value = serde_json::from_slice(&body).expect("request is JSON");
        self.calls.lock().unwrap().push(command);
        let reply = self.answer(command, &request);
        Ok(HttpReply {
            status: 200,
            admin_protocol: Some(ADMIN_PROTOCOL.to_string()),
            body: serde_json::to_vec(&reply).unwrap(),
        })
    }
}

fn client(smdp: FakeSmdp) -> Es2PlusClient<FakeSmdp> {
    Es2PlusClient::with_transport(smdp, "ostelco")
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_available_profile_is_downloaded_then_confirmed() {
    let client = client(FakeSmdp::with_profile("AVAILABLE", ""));

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Released);
    assert!(status.activation_code().is_some());
    assert_eq!(
        client.transport().calls(),
        vec![
            Es2PlusCommand::GetProfileStatus,
            Es2PlusCommand::DownloadOrder,
            Es2PlusCommand::GetProfileStatus,
            Es2PlusCommand::ConfirmOrder,
            Es2PlusCommand::GetProfileStatus,
        ]
    );
}

#[test]
fn test_token_issued_at_allocation_still_confirms() {
    let mut smdp = FakeSmdp::with_profile("AVAILABLE", "");
    smdp.token_on_allocate = "LPA:1$smdp.example$0123-ABCD";
    let client = client(smdp);

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Released);
    assert_eq!(
        client.transport().commands_issued(),
        vec![Es2PlusCommand::DownloadOrder, Es2PlusCommand::ConfirmOrder]
    );
}

#[test]
fn test_allocated_profile_is_only_confirmed() {
    let client = client(FakeSmdp::with_profile("ALLOCATED", ""));

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Released);
    assert_eq!(
        client.transport().commands_issued(),
        vec![Es2PlusCommand::ConfirmOrder]
    );
}

#[test]
fn test_provisioned_profile_gets_no_commands() {
    let client = client(FakeSmdp::with_profile("RELEASED", "LPA:1$smdp.example$XYZ"));

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Released);
    assert_eq!(status.activation_code(), Some("LPA:1$smdp.example$XYZ"));
    assert!(client.transport().commands_issued().is_empty());
    assert_eq!(client.transport().calls().len(), 2);
}

#[test]
fn test_available_with_token_gets_no_commands() {
    let client = client(FakeSmdp::with_profile("AVAILABLE", "LPA:1$smdp.example$XYZ"));

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Available);
    assert!(client.transport().commands_issued().is_empty());
}

#[test]
fn test_unhandled_state_falls_through() {
    let client = client(FakeSmdp::with_profile("INSTALLED", ""));

    let status = client.activate(ICCID).unwrap().unwrap();

    assert_eq!(status.state, ProfileState::Installed);
    assert!(client.transport().commands_issued().is_empty());
}

#[test]
fn test_unknown_profile_returns_none() {
    let client = client(FakeSmdp::empty());

    assert_eq!(client.activate(ICCID).unwrap(), None);
    assert!(client.transport().commands_issued().is_empty());
}

#[test]
fn test_confirm_failure_stops_the_walk() {
    let mut smdp = FakeSmdp::with_profile("AVAILABLE", "");
    smdp.fail_confirm = true;
    let client = client(smdp);

    let err = client.activate(ICCID).unwrap_err();

    assert!(matches!(err, Es2PlusError::CommandFailed { command: "confirmOrder", .. }));
    // No final poll after a failed command.
    assert_eq!(
        client.transport().calls().last(),
        Some(&Es2PlusCommand::ConfirmOrder)
    );
}
