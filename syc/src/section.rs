use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Memory areas of a symbol file, in the order they appear in the file.
///
/// Each area is closed by a literal footer string. The scanner only ever
/// moves forward through this list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    EnumCount,
    Display,
)]
#[repr(u8)]
pub enum SectionKind {
    RAM,
    Bits,
    SFR,
    Konstanten,
    #[strum(to_string = "External RAM (XRAM)", serialize = "ExternalRAM", serialize = "XRAM")]
    ExternalRAM,
    #[strum(to_string = "EOF", serialize = "EndOfFile")]
    EndOfFile,
}

/// Footer strings, in file order. Matching any of them advances the
/// scanner by exactly one section.
pub const FOOTERS: [&[u8]; 5] = [
    b"Liste der RAM-Daten",
    b"Bit-Liste",
    b"SFR-Liste",
    b"Liste der Konstanten",
    b"Liste der XRAM-Daten",
];

impl SectionKind {
    pub fn index(self) -> usize {
        u8::from(self) as usize
    }

    /// Section following `self`. Saturates at `EndOfFile`.
    pub fn next(self) -> Self {
        Self::try_from(u8::from(self) + 1).unwrap_or(Self::EndOfFile)
    }

    /// Footer string closing this section, if it has one.
    pub fn footer(self) -> Option<&'static [u8]> {
        FOOTERS.get(self.index()).copied()
    }

    pub fn is_bits(self) -> bool {
        self == Self::Bits
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown section: {s}")),
        }
    }
}
