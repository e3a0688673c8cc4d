//! Regenerating every subscriber of a batch from its descriptor.

use std::fmt::Write;
use std::io;

use super::descriptor::BatchDescriptor;
use super::luhn::append_luhn_check_digit;
use super::sequence::BatchSequences;

/// Header line of the inventory import CSV.
pub const CSV_HEADER: &str = "ICCID, IMSI, MSISDN, PIN1, PIN2, PUK1, PUK2, PROFILE";

/// One subscriber of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// ICCID including its Luhn check digit.
    pub iccid: String,
    pub imsi: String,
    pub msisdn: String,
}

/// Iterator over the entries of a batch, in declaration order.
#[derive(Debug, Clone)]
pub struct BatchEntries {
    sequences: BatchSequences,
    next: u64,
}

impl Iterator for BatchEntries {
    type Item = BatchEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.next;
        let payload = self.sequences.iccid.nth(i)?;
        let entry = BatchEntry {
            iccid: append_luhn_check_digit(&payload)?,
            imsi: self.sequences.imsi.nth(i)?,
            msisdn: self.sequences.msisdn.nth(i)?,
        };
        self.next += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequences.len().saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl BatchDescriptor {
    /// Iterate over every subscriber in the batch.
    pub fn entries(&self) -> BatchEntries {
        BatchEntries {
            sequences: *self.sequences(),
            next: 0,
        }
    }

    /// Render the batch as the CSV body accepted by the inventory import.
    ///
    /// PIN and PUK columns are left empty; the profile column repeats the
    /// batch profile type. Large batches are better streamed with
    /// [`write_csv`](Self::write_csv).
    pub fn csv_payload(&self) -> String {
        let mut out = String::with_capacity(presized_capacity(self.quantity()));
        out.push_str(CSV_HEADER);
        out.push('\n');
        for entry in self.entries() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{}", self.csv_line(&entry));
        }
        out
    }

    /// Stream the CSV body to `out`, one line per subscriber.
    pub fn write_csv<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", CSV_HEADER)?;
        for entry in self.entries() {
            writeln!(out, "{}", self.csv_line(&entry))?;
        }
        out.flush()
    }

    fn csv_line(&self, entry: &BatchEntry) -> String {
        format!(
            "{}, {}, {},,,,,{}",
            entry.iccid,
            entry.imsi,
            entry.msisdn,
            self.profile_type()
        )
    }
}

/// Lines reserved up front by [`BatchDescriptor::csv_payload`].
const MAX_PRESIZED_LINES: u64 = 4096;

/// Approximate bytes per CSV line.
const LINE_BYTES: usize = 64;

fn presized_capacity(quantity: u64) -> usize {
    (quantity.min(MAX_PRESIZED_LINES) as usize + 1) * LINE_BYTES
}
