use std::collections::BTreeSet;

use strum::IntoEnumIterator;
use syc::{RecordSet, SectionKind};

use crate::config::Config;

pub const HEADER: &str = "# ebusd template definitions";
const RULE: &str = "# =========================================";

/// Contents of the `_template.inc` file: one template per name, grouped by
/// section and sorted by name within a group.
pub fn render(set: &RecordSet, config: &Config) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for section in SectionKind::iter() {
        let names: BTreeSet<&str> = set.in_section(section).map(|r| r.name()).collect();
        if names.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n# --- {} ---\n{}\n", RULE, section, RULE));
        let kind = config.type_of(section);
        for name in names {
            out.push_str(&format!("_{}:{},{},,,\n", name, name, kind));
        }
    }
    out
}
