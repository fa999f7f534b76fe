use std::path::{Path, PathBuf};

use color_print::cprintln;
use syc::{Decoder, RecordSet, SymbolRecord};
use tracing::info;

use crate::config::Config;
use crate::emit;
use crate::error::Error;
use crate::listing;

/// What to produce for each input file.
#[derive(Debug)]
pub struct Job<'a> {
    pub config: &'a Config,
    pub out_dir: Option<&'a Path>,
    pub listing: bool,
    pub registers: bool,
    pub templates: bool,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub decoded: usize,
    pub registers: usize,
    pub templates: usize,
    /// `(alias, first)` name pairs sharing a payload
    pub aliases: Vec<(String, String)>,
    /// Records dropped because their name was already taken
    pub dropped: Vec<SymbolRecord>,
    pub outputs: Vec<PathBuf>,
}

impl Job<'_> {
    /// Decode one symbol file and write its artifacts.
    pub fn run(&self, input: &Path) -> Result<Summary, Error> {
        let data = std::fs::read(input).map_err(|e| Error::FileRead(input.to_path_buf(), e))?;

        let mut decoder = Decoder::new(&data);
        let symbols: Vec<SymbolRecord> = decoder.by_ref().collect();
        info!(path = %input.display(), bytes = data.len(), records = symbols.len(), "decoded");

        if self.listing {
            print!("{}", listing::render(&symbols, decoder.section()));
        }

        let decoded = symbols.len();
        let set = RecordSet::build(symbols);
        let mut summary = Summary {
            decoded,
            registers: emit::register::count(&set),
            templates: set.len(),
            aliases: set
                .aliases()
                .filter_map(|r| Some((r.name().to_string(), r.alias_of.clone()?)))
                .collect(),
            dropped: set.dropped().to_vec(),
            outputs: vec![],
        };

        if self.registers {
            let path = emit::register_path(input, self.out_dir);
            emit::write(&path, &emit::register::render(&set, self.config))?;
            cprintln!(
                "  -> Generated <underline>{}</> ({} registers mapped)",
                path.display(),
                summary.registers
            );
            summary.outputs.push(path);
        }

        if self.templates {
            let path = emit::template_path(input, self.out_dir);
            emit::write(&path, &emit::template::render(&set, self.config))?;
            cprintln!(
                "  -> Generated <underline>{}</> ({} unique templates)",
                path.display(),
                summary.templates
            );
            summary.outputs.push(path);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, address: u16) -> Vec<u8> {
        let mut bytes = vec![name.len() as u8];
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(&address.to_le_bytes());
        bytes
    }

    fn symbol_file() -> Vec<u8> {
        let mut data = vec![0xFF, 0x00];
        data.extend(record("TEST", 0x0010));
        data.extend_from_slice(&[0x79, 0x05]);
        data.extend(record("TEST2", 0x0010));
        data.extend(record("TEST", 0x0011));
        data.extend_from_slice(b"Liste der RAM-Daten");
        data.extend(record("OTHER", 0x0020));
        data.extend_from_slice(&[0x00, 0x00]);
        data
    }

    #[test]
    fn writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("WH0001.SYC");
        std::fs::write(&input, symbol_file()).unwrap();

        let config = Config::default();
        let job = Job {
            config: &config,
            out_dir: None,
            listing: false,
            registers: true,
            templates: true,
        };
        let summary = job.run(&input).unwrap();

        assert_eq!(summary.decoded, 4);
        assert_eq!(summary.registers, 1);
        assert_eq!(summary.templates, 3);
        assert_eq!(summary.aliases, [("TEST2".to_string(), "TEST".to_string())]);
        assert_eq!(summary.dropped.len(), 1);
        assert_eq!(summary.dropped[0].address, 0x0011);

        let registers = std::fs::read_to_string(dir.path().join("WH0001.inc")).unwrap();
        assert!(registers.contains("r,,TEST,,,,,\"4C0110\",,s,_8_Skip,,, ,,s,_TEST,,,\n"));
        assert!(registers.contains("# TEST2: alias of TEST\n"));
        assert!(!registers.contains("OTHER"));

        let templates = std::fs::read_to_string(dir.path().join("WH0001_template.inc")).unwrap();
        assert!(templates.contains("_OTHER:OTHER,BI0,,,\n"));
        assert!(templates.contains("_TEST:TEST,UCH,,,\n"));
        assert!(templates.contains("_TEST2:TEST2,UCH,,,\n"));
    }

    #[test]
    fn out_dir_and_selection() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let input = src.path().join("fw.syc");
        std::fs::write(&input, symbol_file()).unwrap();

        let config = Config::default();
        let job = Job {
            config: &config,
            out_dir: Some(out.path()),
            listing: true,
            registers: false,
            templates: true,
        };
        let summary = job.run(&input).unwrap();
        assert_eq!(summary.outputs, [out.path().join("fw_template.inc")]);
        assert!(out.path().join("fw_template.inc").exists());
        assert!(!src.path().join("fw.inc").exists());
    }

    #[test]
    fn missing_input() {
        let config = Config::default();
        let job = Job {
            config: &config,
            out_dir: None,
            listing: false,
            registers: true,
            templates: true,
        };
        let err = job.run(Path::new("missing.SYC")).unwrap_err();
        assert!(matches!(err, Error::FileRead(..)));
    }
}
