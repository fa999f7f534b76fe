use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::decoder::{Decoder, SymbolRecord};
use crate::payload::{Payload, PayloadKey};
use crate::section::SectionKind;

/// A decoded symbol annotated with what the bus message for it looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedRecord {
    pub symbol: SymbolRecord,
    pub payload: Option<Payload>,
    pub checksum: Option<u8>,
    /// Name of the first record that claimed the same payload key.
    pub alias_of: Option<String>,
}

impl EmittedRecord {
    pub fn name(&self) -> &str {
        &self.symbol.name
    }

    pub fn section(&self) -> SectionKind {
        self.symbol.section
    }

    pub fn address(&self) -> u16 {
        self.symbol.address
    }

    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }

    pub fn is_mapped(&self) -> bool {
        self.payload.is_some()
    }

    /// Checksum and payload as one uppercase hex string.
    pub fn message_hex(&self) -> Option<String> {
        self.payload.as_ref().map(Payload::message_hex)
    }
}

// ----------------------------------------------------------------------------
// Builder

/// Collects decoded symbols in decode order.
///
/// The first record with a given name wins and later ones are dropped. The
/// first record with a given payload key is its claimant, later ones are
/// kept and marked as aliases of it.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    names: HashSet<String>,
    claims: HashMap<PayloadKey, String>,
    records: Vec<EmittedRecord>,
    dropped: Vec<SymbolRecord>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: SymbolRecord) {
        if self.names.contains(&symbol.name) {
            debug!(name = %symbol.name, address = symbol.address, "duplicate name dropped");
            self.dropped.push(symbol);
            return;
        }
        self.names.insert(symbol.name.clone());

        let key = PayloadKey::derive(symbol.section, symbol.address);
        let alias_of = match self.claims.get(&key) {
            Some(first) => {
                debug!(name = %symbol.name, %key, alias_of = %first, "alias");
                Some(first.clone())
            }
            None => None,
        };
        let payload = key.payload().cloned();
        if alias_of.is_none() {
            self.claims.insert(key, symbol.name.clone());
        }

        self.records.push(EmittedRecord {
            checksum: payload.as_ref().map(Payload::checksum),
            payload,
            alias_of,
            symbol,
        });
    }

    /// Sort into output order. The sort is stable, so records with equal
    /// addresses keep decode order.
    pub fn finish(self) -> RecordSet {
        let mut records = self.records;
        records.sort_by_key(|record| record.symbol.sort_key());
        RecordSet {
            records,
            dropped: self.dropped,
        }
    }
}

impl Extend<SymbolRecord> for RecordBuilder {
    fn extend<T: IntoIterator<Item = SymbolRecord>>(&mut self, iter: T) {
        for symbol in iter {
            self.push(symbol);
        }
    }
}

// ----------------------------------------------------------------------------
// Result

/// Deduplicated records in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<EmittedRecord>,
    dropped: Vec<SymbolRecord>,
}

impl RecordSet {
    pub fn build(symbols: impl IntoIterator<Item = SymbolRecord>) -> Self {
        let mut builder = RecordBuilder::new();
        builder.extend(symbols);
        builder.finish()
    }

    /// Decode a symbol file buffer and build its record set.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::build(Decoder::new(data))
    }

    pub fn records(&self) -> &[EmittedRecord] {
        &self.records
    }

    /// Records whose name had already been seen, in decode order.
    pub fn dropped(&self) -> &[SymbolRecord] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&EmittedRecord> {
        self.records.iter().find(|record| record.name() == name)
    }

    /// Records that carry a payload and checksum.
    pub fn mapped(&self) -> impl Iterator<Item = &EmittedRecord> {
        self.records.iter().filter(|record| record.is_mapped())
    }

    pub fn aliases(&self) -> impl Iterator<Item = &EmittedRecord> {
        self.records.iter().filter(|record| record.is_alias())
    }

    pub fn in_section(&self, section: SectionKind) -> impl Iterator<Item = &EmittedRecord> {
        self.records
            .iter()
            .filter(move |record| record.section() == section)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a EmittedRecord;
    type IntoIter = std::slice::Iter<'a, EmittedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str, section: SectionKind, address: u16) -> SymbolRecord {
        SymbolRecord {
            name: name.to_string(),
            section,
            address,
        }
    }

    #[test]
    fn checksum_attached() {
        let set = RecordSet::build([sym("Vorlauf", SectionKind::RAM, 0x0010)]);
        let record = set.get("Vorlauf").unwrap();
        assert_eq!(record.payload.as_ref().unwrap().as_bytes(), &[0x01, 0x10]);
        assert_eq!(record.checksum, Some(0x4C));
        assert_eq!(record.message_hex().as_deref(), Some("4C0110"));
        assert!(!record.is_alias());
    }

    #[test]
    fn unmapped_has_no_checksum() {
        let set = RecordSet::build([sym("Flag", SectionKind::Bits, 0x0020)]);
        let record = set.get("Flag").unwrap();
        assert_eq!(record.payload, None);
        assert_eq!(record.checksum, None);
        assert_eq!(set.mapped().count(), 0);
    }

    #[test]
    fn sort_order() {
        use SectionKind::*;
        let set = RecordSet::build([
            sym("K1", Konstanten, 0x0105),
            sym("R2", RAM, 0x0020),
            sym("K0", Konstanten, 0x0010),
            sym("R1", RAM, 0x0001),
            sym("B1", Bits, 0x0000),
        ]);
        let names: Vec<_> = set.records().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["R1", "R2", "B1", "K0", "K1"]);
    }

    #[test]
    fn equal_addresses_keep_decode_order() {
        let set = RecordSet::build([
            sym("Second", SectionKind::SFR, 0x0080),
            sym("First", SectionKind::SFR, 0x0080),
        ]);
        let names: Vec<_> = set.records().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Second", "First"]);
        assert_eq!(set.get("First").unwrap().alias_of.as_deref(), Some("Second"));
    }

    #[test]
    fn unmapped_aliases_only_on_same_section_and_address() {
        use SectionKind::*;
        let set = RecordSet::build([
            sym("A", Bits, 0x0020),
            sym("B", Bits, 0x0020),
            sym("C", EndOfFile, 0x0020),
        ]);
        assert_eq!(set.get("B").unwrap().alias_of.as_deref(), Some("A"));
        assert!(!set.get("C").unwrap().is_alias());
    }

    #[test]
    fn in_section() {
        use SectionKind::*;
        let set = RecordSet::build([
            sym("R", RAM, 0x0001),
            sym("S", SFR, 0x0081),
            sym("T", SFR, 0x0082),
        ]);
        assert_eq!(set.in_section(SFR).count(), 2);
        assert_eq!(set.in_section(Bits).count(), 0);
        assert_eq!((&set).into_iter().count(), 3);
    }
}
