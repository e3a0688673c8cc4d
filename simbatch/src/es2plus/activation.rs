//! Driving a profile from AVAILABLE to RELEASED.
//!
//! Activation is a short, linear walk: classify the first snapshot, issue a
//! download order if needed, then confirm whatever is ALLOCATED. Nothing
//! loops and nothing is retried. A profile in a state this walk does not
//! handle is left alone and its final snapshot returned.

use super::client::Es2PlusClient;
use super::error::Es2PlusResult;
use super::http::HttpTransport;
use super::types::{Es2PlusCommand, ProfileState, ProfileStatus};

/// Where a profile stands with respect to activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationStep {
    /// AVAILABLE and without an activation code: needs a download order.
    NeedsDownload,
    /// ALLOCATED and without an activation code: needs a confirm order.
    NeedsConfirm,
    /// An activation code has been issued; nothing left to do.
    Provisioned,
    /// Any other state, or no such profile.
    Unknown,
}

impl ActivationStep {
    /// Classify a snapshot. `None` (no such profile) is [`Unknown`](Self::Unknown).
    pub fn of(status: Option<&ProfileStatus>) -> Self {
        let Some(status) = status else {
            return ActivationStep::Unknown;
        };
        if status.activation_code().is_some() {
            return ActivationStep::Provisioned;
        }
        match status.state {
            ProfileState::Available => ActivationStep::NeedsDownload,
            ProfileState::Allocated => ActivationStep::NeedsConfirm,
            _ => ActivationStep::Unknown,
        }
    }

    /// The command that advances a profile out of this step, if any.
    pub fn next_command(self) -> Option<Es2PlusCommand> {
        match self {
            ActivationStep::NeedsDownload => Some(Es2PlusCommand::DownloadOrder),
            ActivationStep::NeedsConfirm => Some(Es2PlusCommand::ConfirmOrder),
            ActivationStep::Provisioned | ActivationStep::Unknown => None,
        }
    }
}

impl<T: HttpTransport> Es2PlusClient<T> {
    /// Take a profile through download and confirm, as far as its state allows.
    ///
    /// 1. Poll and classify. A profile that already has an activation code
    ///    gets no commands.
    /// 2. If it needs a download order, issue it and poll again.
    /// 3. If the profile is now ALLOCATED (from the start, or after the
    ///    download), issue a confirm order. A token on the re-polled snapshot
    ///    does not skip this.
    /// 4. Poll once more and return that snapshot.
    ///
    /// Any command failure stops the walk and is returned.
    pub fn activate(&self, iccid: &str) -> Es2PlusResult<Option<ProfileStatus>> {
        let snapshot = self.get_status(iccid)?;
        let step = ActivationStep::of(snapshot.as_ref());
        tracing::info!(iccid, ?step, "activation started");

        let needs_confirm = match step {
            ActivationStep::NeedsDownload => {
                self.download_order(iccid)?;
                let snapshot = self.get_status(iccid)?;
                let allocated = is_allocated(snapshot.as_ref());
                tracing::info!(iccid, allocated, "download order issued");
                allocated
            }
            ActivationStep::NeedsConfirm => true,
            ActivationStep::Provisioned | ActivationStep::Unknown => false,
        };

        if needs_confirm {
            self.confirm_order(iccid)?;
            tracing::info!(iccid, "confirm order issued");
        }

        let final_snapshot = self.get_status(iccid)?;
        tracing::info!(
            iccid,
            state = ?final_snapshot.as_ref().map(|s| s.state.to_string()),
            "activation finished"
        );
        Ok(final_snapshot)
    }
}

fn is_allocated(status: Option<&ProfileStatus>) -> bool {
    status.is_some_and(|s| s.state == ProfileState::Allocated)
}
