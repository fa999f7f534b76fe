use syc::{EmittedRecord, RecordSet};

use crate::config::{AliasMode, Config};

pub const HEADER: &str =
    "# type,circuit,name,comment,QQ,ZZ,PBSB,ID,class,name,type,divider,unit,str";

/// Read and write definition of one register, or `None` if the record has
/// no payload.
pub fn lines(record: &EmittedRecord, circuit: &str) -> Option<(String, String)> {
    let message = record.message_hex()?;
    let name = record.name();
    let read = format!(
        "r,{},{},,,,,\"{}\",,s,_8_Skip,,, ,,s,_{},,,",
        circuit, name, message, name
    );
    let write = format!("w,{},{},,,,,\"{}\",,m,_{},,,", circuit, name, message, name);
    Some((read, write))
}

/// Contents of the `.inc` register file.
pub fn render(set: &RecordSet, config: &Config) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!("*r,,,,,,\"{}\",,,,,,,\n", config.read_id));
    out.push_str(&format!("*w,,,,,,\"{}\",,,,,,,\n", config.write_id));

    let mut current = None;
    for record in set.mapped() {
        if record.is_alias() && config.aliases == AliasMode::Omit {
            continue;
        }
        let Some((read, write)) = lines(record, &config.circuit) else {
            continue;
        };

        if current != Some(record.section()) {
            current = Some(record.section());
            out.push_str(&format!("\n# --- {} ---\n", record.section()));
        }

        match &record.alias_of {
            None => out.push_str(&format!("{}\n{}\n", read, write)),
            Some(first) => {
                out.push_str(&format!("# {}: alias of {}\n", record.name(), first));
                out.push_str(&format!("#{}\n#{}\n", read, write));
            }
        }
    }
    out
}

/// Number of active (not commented out) registers in `set`.
pub fn count(set: &RecordSet) -> usize {
    set.mapped().filter(|record| !record.is_alias()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use syc::{SectionKind, SymbolRecord};

    fn sym(name: &str, section: SectionKind, address: u16) -> SymbolRecord {
        SymbolRecord {
            name: name.to_string(),
            section,
            address,
        }
    }

    fn sample() -> RecordSet {
        use SectionKind::*;
        RecordSet::build([
            sym("Aussentemp", RAM, 0x0050),
            sym("Flag", Bits, 0x0003),
            sym("AT_Filter", RAM, 0x0050),
            sym("Sollwert", Konstanten, 0x0192),
        ])
    }

    #[test]
    fn register_lines() {
        let set = sample();
        let (read, write) = lines(set.get("Aussentemp").unwrap(), "").unwrap();
        assert_eq!(read, "r,,Aussentemp,,,,,\"0C0150\",,s,_8_Skip,,, ,,s,_Aussentemp,,,");
        assert_eq!(write, "w,,Aussentemp,,,,,\"0C0150\",,m,_Aussentemp,,,");
        assert_eq!(lines(set.get("Flag").unwrap(), ""), None);
    }

    #[test]
    fn render_file() {
        let text = render(&sample(), &Config::default());
        let expect = "\
# type,circuit,name,comment,QQ,ZZ,PBSB,ID,class,name,type,divider,unit,str
*r,,,,,,\"5000\",,,,,,,
*w,,,,,,\"5001\",,,,,,,

# --- RAM ---
r,,Aussentemp,,,,,\"0C0150\",,s,_8_Skip,,, ,,s,_Aussentemp,,,
w,,Aussentemp,,,,,\"0C0150\",,m,_Aussentemp,,,
# AT_Filter: alias of Aussentemp
#r,,AT_Filter,,,,,\"0C0150\",,s,_8_Skip,,, ,,s,_AT_Filter,,,
#w,,AT_Filter,,,,,\"0C0150\",,m,_AT_Filter,,,

# --- Konstanten ---
r,,Sollwert,,,,,\"A606010292\",,s,_8_Skip,,, ,,s,_Sollwert,,,
w,,Sollwert,,,,,\"A606010292\",,m,_Sollwert,,,
";
        println!("{}", text);
        assert_eq!(text, expect);
        assert_eq!(count(&sample()), 2);
    }

    #[test]
    fn omit_aliases() {
        let config = Config {
            aliases: AliasMode::Omit,
            circuit: "hz".to_string(),
            ..Config::default()
        };
        let text = render(&sample(), &config);
        assert!(!text.contains("AT_Filter"));
        assert!(text.contains("r,hz,Aussentemp,"));
    }
}
