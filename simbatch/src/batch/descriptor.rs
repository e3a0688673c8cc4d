//! Validated, immutable batch descriptors.

use serde::Serialize;

use super::error::BatchResult;
use super::fields::{
    check_iccid, check_imsi, check_initial_hss_state, check_msisdn, check_profile_type,
    check_url, parse_quantity,
};
use super::sequence::{BatchSequences, Increment};

/// Default host of the SIM inventory service.
pub const DEFAULT_UPLOAD_HOSTNAME: &str = "localhost";

/// Default port of the SIM inventory service.
pub const DEFAULT_UPLOAD_PORT: u16 = 8080;

/// Default HSS vendor.
pub const DEFAULT_HSS_VENDOR: &str = "M1";

/// Default SIM profile vendor.
pub const DEFAULT_PROFILE_VENDOR: &str = "Idemia";

/// Default initial HSS activation state.
pub const DEFAULT_INITIAL_HSS_STATE: &str = "ACTIVATED";

/// Raw, operator-supplied description of a batch.
///
/// Nothing here has been checked yet; [`BatchDescriptor::declare`] does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDeclaration {
    pub first_iccid: String,
    pub last_iccid: String,
    pub first_imsi: String,
    pub last_imsi: String,
    pub first_msisdn: String,
    pub last_msisdn: String,
    pub profile_type: String,
    pub quantity: String,
    pub upload_hostname: String,
    pub upload_port: u16,
    pub hss_vendor: String,
    pub profile_vendor: String,
    pub initial_hss_state: String,
}

impl BatchDeclaration {
    /// Build the inventory import URL this batch will be uploaded to.
    pub fn upload_url(&self) -> String {
        format!(
            "http://{}:{}/ostelco/sim-inventory/{}/import-batch/profilevendor/{}?initialHssState={}",
            self.upload_hostname,
            self.upload_port,
            self.hss_vendor,
            self.profile_vendor,
            self.initial_hss_state
        )
    }
}

/// A fully validated batch, ready for payload generation or persistence.
///
/// Each identifier family is described by its first value and a unit
/// increment; together with `quantity` that regenerates every identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDescriptor {
    profile_type: String,
    url: String,
    quantity: u64,
    first_iccid: String,
    iccid_increment: Increment,
    first_imsi: String,
    imsi_increment: Increment,
    first_msisdn: String,
    msisdn_increment: Increment,
    #[serde(skip)]
    sequences: BatchSequences,
}

impl BatchDescriptor {
    /// Validate a declaration and derive its descriptor.
    ///
    /// Field checks run first, then the upload URL is synthesised and checked,
    /// and finally the three identifier ranges are reconciled against the
    /// declared quantity. The first failure is returned; nothing is built.
    pub fn declare(decl: &BatchDeclaration) -> BatchResult<Self> {
        check_iccid("first-iccid", &decl.first_iccid)?;
        check_iccid("last-iccid", &decl.last_iccid)?;
        check_imsi("first-imsi", &decl.first_imsi)?;
        check_imsi("last-imsi", &decl.last_imsi)?;
        check_msisdn("first-msisdn", &decl.first_msisdn)?;
        check_msisdn("last-msisdn", &decl.last_msisdn)?;
        check_profile_type("profile-type", &decl.profile_type)?;
        check_initial_hss_state("initial-hss-state", &decl.initial_hss_state)?;
        let quantity = parse_quantity("batch-quantity", &decl.quantity)?;

        let url = decl.upload_url();
        check_url("upload-url", &url)?;

        let sequences = BatchSequences::reconcile(
            (&decl.first_iccid, &decl.last_iccid),
            (&decl.first_imsi, &decl.last_imsi),
            (&decl.first_msisdn, &decl.last_msisdn),
            quantity,
        )?;

        tracing::info!(
            quantity,
            profile_type = %decl.profile_type,
            url = %url,
            "batch declared"
        );

        Ok(Self {
            profile_type: decl.profile_type.clone(),
            url,
            quantity,
            first_iccid: decl.first_iccid.clone(),
            iccid_increment: sequences.iccid.increment(),
            first_imsi: decl.first_imsi.clone(),
            imsi_increment: sequences.imsi.increment(),
            first_msisdn: decl.first_msisdn.clone(),
            msisdn_increment: sequences.msisdn.increment(),
            sequences,
        })
    }

    pub fn profile_type(&self) -> &str {
        &self.profile_type
    }

    /// Inventory import URL for this batch.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// First ICCID exactly as declared (with or without check digit).
    pub fn first_iccid(&self) -> &str {
        &self.first_iccid
    }

    pub fn iccid_increment(&self) -> Increment {
        self.iccid_increment
    }

    pub fn first_imsi(&self) -> &str {
        &self.first_imsi
    }

    pub fn imsi_increment(&self) -> Increment {
        self.imsi_increment
    }

    pub fn first_msisdn(&self) -> &str {
        &self.first_msisdn
    }

    pub fn msisdn_increment(&self) -> Increment {
        self.msisdn_increment
    }

    pub(crate) fn sequences(&self) -> &BatchSequences {
        &self.sequences
    }
}
