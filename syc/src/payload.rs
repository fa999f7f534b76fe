use std::fmt;
use std::str::FromStr;

use crate::checksum::checksum;
use crate::error::Error;
use crate::section::SectionKind;

/// Bytes a bus message carries to address one variable, checksum excluded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Payload(Vec<u8>);

impl Payload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Payload(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn checksum(&self) -> u8 {
        checksum(&self.0)
    }

    /// Checksum byte followed by the payload, as uppercase hex.
    pub fn message_hex(&self) -> String {
        format!("{:02X}{}", self.checksum(), self)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Payload {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() % 2 != 0 {
            return Err(Error::OddHexLength(s.to_string()));
        }
        let nibble = |c: char| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| Error::InvalidHexDigit(s.to_string(), c))
        };
        digits
            .chunks(2)
            .map(|pair| -> Result<u8, Error> { Ok(nibble(pair[0])? << 4 | nibble(pair[1])?) })
            .collect::<Result<Vec<_>, _>>()
            .map(Payload)
    }
}

// ----------------------------------------------------------------------------
// Address rules

/// Maps one `(section, high address byte)` pair to a payload prefix. The
/// low address byte is appended to the prefix.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub section: SectionKind,
    pub page: u8,
    pub prefix: &'static [u8],
}

pub const RULES: [Rule; 7] = [
    Rule { section: SectionKind::RAM, page: 0x00, prefix: &[0x01] },
    Rule { section: SectionKind::Konstanten, page: 0x00, prefix: &[0x02] },
    Rule { section: SectionKind::Konstanten, page: 0x01, prefix: &[0x06, 0x01, 0x02] },
    Rule { section: SectionKind::Konstanten, page: 0x02, prefix: &[0x06, 0x02, 0x02] },
    Rule { section: SectionKind::Konstanten, page: 0x03, prefix: &[0x06, 0x03, 0x02] },
    Rule { section: SectionKind::ExternalRAM, page: 0xF0, prefix: &[0x03] },
    Rule { section: SectionKind::SFR, page: 0x00, prefix: &[0x04] },
];

/// Payload addressing `address` inside `section`, or `None` when no rule
/// covers the address.
pub fn derive_payload(section: SectionKind, address: u16) -> Option<Payload> {
    let [low, page] = address.to_le_bytes();
    RULES
        .iter()
        .find(|rule| rule.section == section && rule.page == page)
        .map(|rule| {
            let mut bytes = Vec::with_capacity(rule.prefix.len() + 1);
            bytes.extend_from_slice(rule.prefix);
            bytes.push(low);
            Payload(bytes)
        })
}

/// Identity of the physical cell a record talks to. Two records with equal
/// keys are aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PayloadKey {
    Mapped(Payload),
    Unmapped { section: SectionKind, address: u16 },
}

impl PayloadKey {
    pub fn derive(section: SectionKind, address: u16) -> Self {
        match derive_payload(section, address) {
            Some(payload) => PayloadKey::Mapped(payload),
            None => PayloadKey::Unmapped { section, address },
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            PayloadKey::Mapped(payload) => Some(payload),
            PayloadKey::Unmapped { .. } => None,
        }
    }
}

impl fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKey::Mapped(payload) => write!(f, "{}", payload),
            PayloadKey::Unmapped { section, address } => {
                write!(f, "UNKNOWN_{:?}_{:04X}", section, address)
            }
        }
    }
}
