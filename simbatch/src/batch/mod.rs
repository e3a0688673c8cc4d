//! Batch declaration: field checks, sequence arithmetic and descriptors.
//!
//! A batch is a contiguous run of ICCIDs, IMSIs and MSISDNs that will be
//! provisioned together. Declaring one means checking every field, making
//! sure the three ranges describe the same number of subscribers, and
//! producing an immutable [`BatchDescriptor`].
//!
//! ```
//! use simbatch::batch::{BatchDeclaration, BatchDescriptor, Increment};
//!
//! let decl = BatchDeclaration {
//!     first_iccid: "8901000000000000001".to_string(),
//!     last_iccid: "8901000000000000092".to_string(),
//!     first_imsi: "242017100000228".to_string(),
//!     last_imsi: "242017100000237".to_string(),
//!     first_msisdn: "4790900700".to_string(),
//!     last_msisdn: "4790900709".to_string(),
//!     profile_type: "OYA_M1_BF76".to_string(),
//!     quantity: "10".to_string(),
//!     upload_hostname: "localhost".to_string(),
//!     upload_port: 8080,
//!     hss_vendor: "M1".to_string(),
//!     profile_vendor: "Idemia".to_string(),
//!     initial_hss_state: "ACTIVATED".to_string(),
//! };
//!
//! let batch = BatchDescriptor::declare(&decl).unwrap();
//! assert_eq!(batch.quantity(), 10);
//! assert_eq!(batch.iccid_increment(), Increment::Up);
//! ```

mod descriptor;
mod error;
mod fields;
mod luhn;
mod payload;
mod sequence;

pub use descriptor::{
    BatchDeclaration, BatchDescriptor, DEFAULT_HSS_VENDOR, DEFAULT_INITIAL_HSS_STATE,
    DEFAULT_PROFILE_VENDOR, DEFAULT_UPLOAD_HOSTNAME, DEFAULT_UPLOAD_PORT,
};
pub use error::{BatchError, BatchResult};
pub use fields::{
    check_iccid, check_imsi, check_initial_hss_state, check_msisdn, check_profile_type,
    check_url, parse_quantity, IMSI_LEN, INITIAL_HSS_STATES, MSISDN_MAX_LEN,
};
pub use luhn::{
    append_luhn_check_digit, iccid_without_check_digit, luhn_check_digit, ICCID_PAYLOAD_LEN,
};
pub use payload::{BatchEntries, BatchEntry, CSV_HEADER};
pub use sequence::{BatchSequences, IdentifierRange, Increment};
