//! Luhn (mod 10) check digits for ICCIDs.
//!
//! ICCIDs are declared either as an 18 digit payload or as a 19 digit string
//! whose last digit is the Luhn check digit of the payload. Arithmetic over a
//! batch always happens on the payload.

/// Length of an ICCID payload without its check digit.
pub const ICCID_PAYLOAD_LEN: usize = 18;

/// Compute the Luhn check digit for a string of ASCII digits.
///
/// Returns `None` if the input is empty or contains a non-digit.
///
/// # Examples
///
/// ```
/// use simbatch::batch::luhn_check_digit;
///
/// assert_eq!(luhn_check_digit("7992739871"), Some(3));
/// assert_eq!(luhn_check_digit("89a"), None);
/// ```
pub fn luhn_check_digit(payload: &str) -> Option<u8> {
    if payload.is_empty() {
        return None;
    }

    let mut sum: u32 = 0;
    // The rightmost payload digit is the one that gets doubled, since the
    // check digit will be appended to its right.
    for (i, c) in payload.bytes().rev().enumerate() {
        if !c.is_ascii_digit() {
            return None;
        }
        let mut d = u32::from(c - b'0');
        if i % 2 == 0 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }

    Some(((10 - sum % 10) % 10) as u8)
}

/// Append the Luhn check digit to a digit string.
///
/// Returns `None` under the same conditions as [`luhn_check_digit`].
pub fn append_luhn_check_digit(payload: &str) -> Option<String> {
    luhn_check_digit(payload).map(|d| format!("{}{}", payload, d))
}

/// Strip the check digit from an ICCID, if it carries one.
///
/// A 19 digit ICCID loses its last digit; anything shorter is returned as is.
pub fn iccid_without_check_digit(iccid: &str) -> &str {
    if iccid.len() > ICCID_PAYLOAD_LEN {
        iccid.get(..ICCID_PAYLOAD_LEN).unwrap_or(iccid)
    } else {
        iccid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_check_digits() {
        assert_eq!(luhn_check_digit("7992739871"), Some(3));
        assert_eq!(luhn_check_digit("890100000000000000"), Some(1));
        assert_eq!(luhn_check_digit("890100000000000009"), Some(2));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert_eq!(luhn_check_digit(""), None);
        assert_eq!(luhn_check_digit("12x4"), None);
        assert_eq!(append_luhn_check_digit("-1"), None);
    }

    #[test]
    fn test_append_check_digit() {
        assert_eq!(
            append_luhn_check_digit("890100000000000000").as_deref(),
            Some("8901000000000000001")
        );
    }

    #[test]
    fn test_strip_check_digit() {
        assert_eq!(
            iccid_without_check_digit("8901000000000000001"),
            "890100000000000000"
        );
        assert_eq!(
            iccid_without_check_digit("890100000000000000"),
            "890100000000000000"
        );
    }

    proptest! {
        #[test]
        fn prop_appended_digit_validates(payload in "[0-9]{18}") {
            let full = append_luhn_check_digit(&payload).unwrap();
            prop_assert_eq!(full.len(), 19);
            prop_assert_eq!(iccid_without_check_digit(&full), payload.as_str());
            let last = full.as_bytes()[18] - b'0';
            prop_assert_eq!(luhn_check_digit(&payload), Some(last));
        }

        #[test]
        fn prop_single_digit_change_is_detected(payload in "[0-9]{18}", pos in 0usize..18, bump in 1u8..10) {
            let mut bytes = payload.clone().into_bytes();
            bytes[pos] = b'0' + (bytes[pos] - b'0' + bump) % 10;
            let altered = String::from_utf8(bytes).unwrap();
            prop_assert_ne!(luhn_check_digit(&payload), luhn_check_digit(&altered));
        }
    }
}
