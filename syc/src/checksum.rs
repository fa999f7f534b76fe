//! Weishaupt message checksum.
//!
//! A CRC-8 variant with polynomial `0x5C`. The register is seeded with the
//! first payload byte instead of a constant; no reflection, no final XOR.

pub const POLY: u8 = 0x5C;

/// Checksum over a message payload (checksum byte excluded).
///
/// An empty payload yields 0, a single byte yields itself.
pub fn checksum(payload: &[u8]) -> u8 {
    let Some((&first, rest)) = payload.split_first() else {
        return 0;
    };
    rest.iter().fold(first, |crc, &byte| shift(crc) ^ byte)
}

/// Check a message laid out as `[checksum, payload...]`.
pub fn verify(message: &[u8]) -> bool {
    match message.split_first() {
        Some((&stored, payload)) if !payload.is_empty() => checksum(payload) == stored,
        _ => false,
    }
}

fn shift(crc: u8) -> u8 {
    (0..8).fold(crc, |crc, _| {
        if crc & 0x80 != 0 {
            (crc << 1) ^ POLY
        } else {
            crc << 1
        }
    })
}
