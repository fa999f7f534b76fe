use strum::IntoEnumIterator;
use syc::{SectionKind, SymbolRecord};

/// Human-readable listing of every decoded record, in decode order.
///
/// A heading is printed for each section the scan reached, up to `last`,
/// even when the section holds no records.
pub fn render(symbols: &[SymbolRecord], last: SectionKind) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<30} | {:<8}\n", "VARIABLE NAME", "ADDRESS"));
    out.push_str(&format!("{}\n", "=".repeat(45)));

    for section in SectionKind::iter().take_while(|&s| s <= last) {
        out.push_str(&format!("\n--- {} ---\n", section));
        for symbol in symbols.iter().filter(|s| s.section == section) {
            out.push_str(&format!("{:<30} | 0x{:04X}\n", symbol.name, symbol.address));
        }
    }
    out
}
