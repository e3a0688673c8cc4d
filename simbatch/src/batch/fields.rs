//! Syntax and checksum checks for individual batch fields.
//!
//! Each check takes the operator-facing label of the field alongside its raw
//! value, so a rejected batch declaration says exactly which flag was wrong.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use super::error::{BatchError, BatchResult};
use super::luhn::{iccid_without_check_digit, luhn_check_digit, ICCID_PAYLOAD_LEN};

/// Number of digits in an IMSI.
pub const IMSI_LEN: usize = 15;

/// Maximum number of digits in an MSISDN (E.164).
pub const MSISDN_MAX_LEN: usize = 15;

/// Initial HSS activation states the inventory service understands.
pub const INITIAL_HSS_STATES: &[&str] = &["ACTIVATED", "NOT_ACTIVATED"];

fn profile_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check an ICCID: 18 digits, or 19 digits ending in the Luhn check digit.
///
/// # Examples
///
/// ```
/// use simbatch::batch::check_iccid;
///
/// assert!(check_iccid("first-iccid", "890100000000000000").is_ok());
/// assert!(check_iccid("first-iccid", "8901000000000000001").is_ok());
/// assert!(check_iccid("first-iccid", "8901000000000000002").is_err());
/// ```
pub fn check_iccid<'a>(label: &str, raw: &'a str) -> BatchResult<&'a str> {
    let len = raw.len();
    if !is_digits(raw) || !(ICCID_PAYLOAD_LEN..=ICCID_PAYLOAD_LEN + 1).contains(&len) {
        return Err(BatchError::invalid(
            label,
            raw,
            "ICCID must be 18 digits, or 19 digits including a Luhn check digit",
        ));
    }

    if len == ICCID_PAYLOAD_LEN + 1 {
        let payload = iccid_without_check_digit(raw);
        let expected = luhn_check_digit(payload).unwrap_or_default();
        let actual = raw.as_bytes()[ICCID_PAYLOAD_LEN] - b'0';
        if expected != actual {
            return Err(BatchError::invalid(
                label,
                raw,
                format!("expected Luhn check digit {}", expected),
            ));
        }
    }

    Ok(raw)
}

/// Check an IMSI: exactly 15 digits.
pub fn check_imsi<'a>(label: &str, raw: &'a str) -> BatchResult<&'a str> {
    if is_digits(raw) && raw.len() == IMSI_LEN {
        Ok(raw)
    } else {
        Err(BatchError::invalid(label, raw, "IMSI must be 15 digits"))
    }
}

/// Check an MSISDN: between 1 and 15 digits, no prefix or separators.
pub fn check_msisdn<'a>(label: &str, raw: &'a str) -> BatchResult<&'a str> {
    if is_digits(raw) && raw.len() <= MSISDN_MAX_LEN {
        Ok(raw)
    } else {
        Err(BatchError::invalid(
            label,
            raw,
            "MSISDN must be 1 to 15 digits",
        ))
    }
}

/// Check a SIM profile type name such as `OYA_M1_BF76`.
pub fn check_profile_type<'a>(label: &str, value: &'a str) -> BatchResult<&'a str> {
    if profile_type_pattern().is_match(value) {
        Ok(value)
    } else {
        Err(BatchError::invalid(
            label,
            value,
            "profile type must be upper-case letters, digits and underscores",
        ))
    }
}

/// Check that a value is an absolute http(s) URL with a host.
pub fn check_url(label: &str, value: &str) -> BatchResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| BatchError::invalid(label, value, format!("unparseable URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(BatchError::invalid(
            label,
            value,
            "URL must be http or https with a host",
        ));
    }

    Ok(url)
}

/// Check the initial HSS activation state of profiles in a batch.
pub fn check_initial_hss_state<'a>(label: &str, value: &'a str) -> BatchResult<&'a str> {
    if INITIAL_HSS_STATES.contains(&value) {
        Ok(value)
    } else {
        Err(BatchError::invalid(
            label,
            value,
            format!("must be one of {}", INITIAL_HSS_STATES.join(", ")),
        ))
    }
}

/// Parse a declared batch quantity, which must be a positive integer.
pub fn parse_quantity(label: &str, raw: &str) -> BatchResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BatchError::invalid(label, raw, "quantity must be a positive integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::luhn::append_luhn_check_digit;
    use proptest::prelude::*;

    #[test]
    fn test_iccid_lengths() {
        assert!(check_iccid("iccid", "89470000000000000").is_err()); // 17
        assert!(check_iccid("iccid", "894700000000000000").is_ok()); // 18
        assert!(check_iccid("iccid", "8947000000000000004").is_ok()); // 19, valid
        assert!(check_iccid("iccid", "89470000000000000040").is_err()); // 20
    }

    #[test]
    fn test_iccid_rejects_non_digits() {
        assert!(check_iccid("iccid", "89470000000000000a").is_err());
        assert!(check_iccid("iccid", "").is_err());
    }

    #[test]
    fn test_iccid_error_names_expected_digit() {
        let err = check_iccid("last-iccid", "8947000000000000005").unwrap_err();
        match err {
            BatchError::InvalidFormat {
                label,
                value,
                expected,
            } => {
                assert_eq!(label, "last-iccid");
                assert_eq!(value, "8947000000000000005");
                assert!(expected.contains('4'));
            }
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_imsi() {
        assert!(check_imsi("imsi", "242017100000228").is_ok());
        assert!(check_imsi("imsi", "24201710000022").is_err());
        assert!(check_imsi("imsi", "2420171000002281").is_err());
        assert!(check_imsi("imsi", "24201710000022x").is_err());
    }

    #[test]
    fn test_msisdn() {
        assert!(check_msisdn("msisdn", "4790900700").is_ok());
        assert!(check_msisdn("msisdn", "+4790900700").is_err());
        assert!(check_msisdn("msisdn", "").is_err());
        assert!(check_msisdn("msisdn", "1234567890123456").is_err());
    }

    #[test]
    fn test_profile_type() {
        assert!(check_profile_type("profile-type", "OYA_M1_BF76").is_ok());
        assert!(check_profile_type("profile-type", "oya_m1").is_err());
        assert!(check_profile_type("profile-type", "1ABC").is_err());
        assert!(check_profile_type("profile-type", "").is_err());
    }

    #[test]
    fn test_url() {
        assert!(check_url("url", "http://localhost:8080/ostelco/sim-inventory").is_ok());
        assert!(check_url("url", "https://example.com").is_ok());
        assert!(check_url("url", "ftp://example.com").is_err());
        assert!(check_url("url", "not a url").is_err());
        assert!(check_url("url", "/relative/path").is_err());
    }

    #[test]
    fn test_initial_hss_state() {
        assert!(check_initial_hss_state("state", "ACTIVATED").is_ok());
        assert!(check_initial_hss_state("state", "NOT_ACTIVATED").is_ok());
        assert!(check_initial_hss_state("state", "activated").is_err());
    }

    #[test]
    fn test_quantity() {
        assert_eq!(parse_quantity("batch-quantity", "10"), Ok(10));
        assert!(parse_quantity("batch-quantity", "0").is_err());
        assert!(parse_quantity("batch-quantity", "-3").is_err());
        assert!(parse_quantity("batch-quantity", "ten").is_err());
    }

    proptest! {
        #[test]
        fn prop_correct_check_digit_accepted(payload in "[0-9]{18}") {
            let iccid = append_luhn_check_digit(&payload).unwrap();
            prop_assert!(check_iccid("iccid", &iccid).is_ok());
        }

        #[test]
        fn prop_wrong_check_digit_rejected(payload in "[0-9]{18}", wrong in 0u8..10) {
            let correct = luhn_check_digit(&payload).unwrap();
            prop_assume!(wrong != correct);
            let iccid = format!("{}{}", payload, wrong);
            prop_assert!(check_iccid("iccid", &iccid).is_err());
        }
    }
}
