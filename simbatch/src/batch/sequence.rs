//! Arithmetic over the three identifier sequences of a batch.
//!
//! A batch is described by first/last values for ICCIDs, IMSIs and MSISDNs.
//! Each pair is an arithmetic progression with a unit step in either
//! direction; all three must cover the same number of subscribers, and that
//! number must be the declared quantity.

use std::fmt;

use serde::Serialize;

use super::error::{BatchError, BatchResult};
use super::luhn::iccid_without_check_digit;

/// Direction of a unit-step identifier progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i8")]
pub enum Increment {
    Up,
    Down,
}

impl Increment {
    /// The step as a signed integer, `+1` or `-1`.
    pub fn as_i8(self) -> i8 {
        match self {
            Increment::Up => 1,
            Increment::Down => -1,
        }
    }
}

impl From<Increment> for i8 {
    fn from(increment: Increment) -> Self {
        increment.as_i8()
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.as_i8())
    }
}

/// An inclusive range of numeric identifiers of fixed digit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRange {
    first: u64,
    last: u64,
    width: usize,
}

impl IdentifierRange {
    /// Parse a range from its first and last values.
    ///
    /// The digit width of `first` is kept so regenerated identifiers keep
    /// any leading zeros.
    pub fn parse(label: &str, first: &str, last: &str) -> BatchResult<Self> {
        let parse = |which: &str, raw: &str| {
            raw.parse::<u64>().map_err(|_| {
                BatchError::invalid(
                    format!("{} {}", which, label),
                    raw,
                    "not a decimal number",
                )
            })
        };

        let (first_value, last_value) = (parse("first", first)?, parse("last", last)?);
        if first_value.abs_diff(last_value).checked_add(1).is_none() {
            return Err(BatchError::invalid(
                format!("{} range", label),
                format!("{}..{}", first, last),
                "more identifiers than can be counted",
            ));
        }

        Ok(Self {
            first: first_value,
            last: last_value,
            width: first.len(),
        })
    }

    /// Parse an ICCID range, ignoring check digits on either end.
    pub fn parse_iccid(first: &str, last: &str) -> BatchResult<Self> {
        Self::parse(
            "iccid",
            iccid_without_check_digit(first),
            iccid_without_check_digit(last),
        )
    }

    /// First identifier of the range.
    pub fn first(&self) -> u64 {
        self.first
    }

    /// Last identifier of the range.
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Number of identifiers, `|last - first| + 1`.
    ///
    /// [`parse`](Self::parse) rejects ranges where this would overflow.
    pub fn len(&self) -> u64 {
        self.first.abs_diff(self.last) + 1
    }

    /// Always false; a range holds at least its first identifier.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Step direction. A single-element range counts up.
    pub fn increment(&self) -> Increment {
        if self.last >= self.first {
            Increment::Up
        } else {
            Increment::Down
        }
    }

    /// The `index`-th identifier, zero-padded to the width of `first`.
    ///
    /// Returns `None` past the end of the range.
    pub fn nth(&self, index: u64) -> Option<String> {
        if index >= self.len() {
            return None;
        }
        let value = match self.increment() {
            Increment::Up => self.first + index,
            Increment::Down => self.first - index,
        };
        Some(format!("{:0width$}", value, width = self.width))
    }
}

/// The three reconciled identifier ranges of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSequences {
    pub iccid: IdentifierRange,
    pub imsi: IdentifierRange,
    pub msisdn: IdentifierRange,
}

impl BatchSequences {
    /// Parse all three ranges and check they agree with `quantity`.
    ///
    /// `iccid`, `imsi` and `msisdn` are `(first, last)` pairs. ICCIDs may carry
    /// check digits; those are stripped before any arithmetic.
    pub fn reconcile(
        iccid: (&str, &str),
        imsi: (&str, &str),
        msisdn: (&str, &str),
        quantity: u64,
    ) -> BatchResult<Self> {
        let sequences = Self {
            iccid: IdentifierRange::parse_iccid(iccid.0, iccid.1)?,
            imsi: IdentifierRange::parse("imsi", imsi.0, imsi.1)?,
            msisdn: IdentifierRange::parse("msisdn", msisdn.0, msisdn.1)?,
        };
        sequences.check_quantity(quantity)?;
        Ok(sequences)
    }

    fn check_quantity(&self, quantity: u64) -> BatchResult<()> {
        let (iccid_len, imsi_len, msisdn_len) =
            (self.iccid.len(), self.imsi.len(), self.msisdn.len());

        if iccid_len == imsi_len && imsi_len == msisdn_len && msisdn_len == quantity {
            return Ok(());
        }

        tracing::debug!(
            iccid_len,
            imsi_len,
            msisdn_len,
            quantity,
            "identifier ranges disagree"
        );
        Err(BatchError::SequenceMismatch {
            iccid_len,
            imsi_len,
            msisdn_len,
            quantity,
        })
    }

    /// Number of subscribers in the batch.
    pub fn len(&self) -> u64 {
        self.iccid.len()
    }

    /// Always false; see [`IdentifierRange::is_empty`].
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increasing_range() {
        let range = IdentifierRange::parse("imsi", "242017100000228", "242017100000237").unwrap();
        assert_eq!(range.len(), 10);
        assert_eq!(range.increment(), Increment::Up);
        assert_eq!(range.nth(9).as_deref(), Some("242017100000237"));
        assert_eq!(range.nth(10), None);
    }

    #[test]
    fn test_decreasing_range() {
        let range = IdentifierRange::parse("msisdn", "4790900709", "4790900700").unwrap();
        assert_eq!(range.len(), 10);
        assert_eq!(range.increment(), Increment::Down);
        assert_eq!(range.nth(1).as_deref(), Some("4790900708"));
    }

    #[test]
    fn test_single_element_counts_up() {
        let range = IdentifierRange::parse("msisdn", "4790900700", "4790900700").unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.increment(), Increment::Up);
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let range = IdentifierRange::parse("msisdn", "0047900", "0047902").unwrap();
        assert_eq!(range.nth(2).as_deref(), Some("0047902"));
    }

    #[test]
    fn test_iccid_check_digits_are_ignored() {
        // 19 digit first (with check digit), 18 digit last (without)
        let range = IdentifierRange::parse_iccid("8901000000000000001", "890100000000000009").unwrap();
        assert_eq!(range.first(), 890100000000000000);
        assert_eq!(range.len(), 10);
    }

    #[test]
    fn test_full_u64_span_is_rejected() {
        match IdentifierRange::parse("msisdn", "0", "18446744073709551615") {
            Err(BatchError::InvalidFormat { label, .. }) => assert_eq!(label, "msisdn range"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
        let widest = IdentifierRange::parse("msisdn", "1", "18446744073709551615").unwrap();
        assert_eq!(widest.len(), u64::MAX);
    }

    #[test]
    fn test_non_numeric_is_invalid_format() {
        let err = IdentifierRange::parse("imsi", "24201x", "242019").unwrap_err();
        assert!(matches!(err, BatchError::InvalidFormat { .. }));
    }

    #[test]
    fn test_reconcile_ok() {
        let seqs = BatchSequences::reconcile(
            ("8901000000000000001", "8901000000000000092"),
            ("242017100000228", "242017100000237"),
            ("4790900709", "4790900700"),
            10,
        )
        .unwrap();
        assert_eq!(seqs.len(), 10);
        assert_eq!(seqs.iccid.increment(), Increment::Up);
        assert_eq!(seqs.msisdn.increment(), Increment::Down);
    }

    #[test]
    fn test_reconcile_quantity_mismatch() {
        let err = BatchSequences::reconcile(
            ("890100000000000000", "890100000000000009"),
            ("242017100000228", "242017100000237"),
            ("4790900700", "4790900709"),
            11,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BatchError::SequenceMismatch {
                iccid_len: 10,
                imsi_len: 10,
                msisdn_len: 10,
                quantity: 11,
            }
        );
    }

    #[test]
    fn test_reconcile_family_mismatch_names_all_lengths() {
        let err = BatchSequences::reconcile(
            ("890100000000000000", "890100000000000009"),
            ("242017100000228", "242017100000238"),
            ("4790900700", "4790900708"),
            10,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("iccid=10"));
        assert!(msg.contains("imsi=11"));
        assert!(msg.contains("msisdn=9"));
    }

    #[test]
    fn test_increment_display_and_serialize() {
        assert_eq!(Increment::Up.to_string(), "+1");
        assert_eq!(Increment::Down.to_string(), "-1");
        assert_eq!(serde_json::to_string(&Increment::Down).unwrap(), "-1");
    }

    proptest! {
        #[test]
        fn prop_length_and_sign(first in 0u64..1_000_000_000, last in 0u64..1_000_000_000) {
            let range = IdentifierRange::parse("msisdn", &first.to_string(), &last.to_string()).unwrap();
            let expected_len = (last as i128 - first as i128).unsigned_abs() as u64 + 1;
            prop_assert_eq!(range.len(), expected_len);
            let expected_inc = if last >= first { Increment::Up } else { Increment::Down };
            prop_assert_eq!(range.increment(), expected_inc);
            prop_assert_eq!(range.nth(range.len() - 1).unwrap().parse::<u64>().unwrap(), last);
        }
    }
}
