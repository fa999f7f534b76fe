use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::section::{SectionKind, FOOTERS};

/// Accepted name lengths. The length byte itself precedes the name.
pub const NAME_LEN: RangeInclusive<usize> = 3..=39;

/// Delimiter that may follow a record. Not part of any record.
pub const DELIMITER: [u8; 2] = [0x79, 0x05];

/// One named variable found in a symbol file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolRecord {
    pub name: String,
    pub section: SectionKind,
    pub address: u16,
}

impl SymbolRecord {
    /// High address byte.
    pub fn page(&self) -> u8 {
        (self.address >> 8) as u8
    }

    /// Low address byte.
    pub fn low(&self) -> u8 {
        (self.address & 0xFF) as u8
    }

    /// Output order: section, then high byte, then low byte.
    pub fn sort_key(&self) -> (SectionKind, u8, u8) {
        (self.section, self.page(), self.low())
    }
}

pub fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'+'
}

// ----------------------------------------------------------------------------
// Scanner

/// Forward-only scanner over the raw bytes of a symbol file.
///
/// Records are `[len][name; len][address; 2 LE]`, scattered between
/// unrelated binary data. Anything that does not look like a record is
/// skipped one byte at a time, so a false start never desynchronizes the
/// scan. Yields records in file order.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
    section: SectionKind,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Decoder {
            data,
            offset: 0,
            section: SectionKind::RAM,
        }
    }

    /// Decode the whole buffer.
    pub fn decode(data: &'a [u8]) -> Vec<SymbolRecord> {
        Self::new(data).collect()
    }

    /// Section active at the cursor.
    pub fn section(&self) -> SectionKind {
        self.section
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn stop(&mut self, reason: &str) {
        debug!(offset = self.offset, section = %self.section, "{reason}, stopping scan");
        self.offset = self.data.len();
    }
}

impl Iterator for Decoder<'_> {
    type Item = SymbolRecord;

    fn next(&mut self) -> Option<SymbolRecord> {
        while self.offset + 2 < self.data.len() {
            let rest = &self.data[self.offset..];

            // 1. Section footer
            if let Some(footer) = FOOTERS.iter().find(|&&footer| rest.starts_with(footer)) {
                let from = self.section;
                self.section = self.section.next();
                self.offset += footer.len();
                debug!(offset = self.offset, %from, to = %self.section, "section footer");
                continue;
            }

            // 2. Length byte
            let len = rest[0] as usize;
            if !NAME_LEN.contains(&len) {
                self.offset += 1;
                continue;
            }

            // 3. Name
            let name = &rest[1..rest.len().min(1 + len)];
            if !name.iter().all(|&b| is_name_byte(b)) {
                self.offset += 1;
                continue;
            }
            if name.len() < len {
                self.stop("truncated name");
                return None;
            }

            // 4. Address
            let Some(&[lo, hi]) = rest.get(1 + len..3 + len) else {
                self.stop("truncated address");
                return None;
            };
            let record = SymbolRecord {
                name: name.iter().map(|&b| b as char).collect(),
                section: self.section,
                address: u16::from_le_bytes([lo, hi]),
            };
            trace!(offset = self.offset, name = %record.name, address = record.address, "record");

            // 5. Advance
            self.offset += 3 + len;
            if self.data[self.offset..].starts_with(&DELIMITER) {
                self.offset += DELIMITER.len();
            }
            return Some(record);
        }
        None
    }
}

impl FusedIterator for Decoder<'_> {}
