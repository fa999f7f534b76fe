use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;

/// Emitter settings, optionally loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ebusd circuit column of every generated line
    pub circuit: String,
    /// Message id of the read default line
    pub read_id: String,
    /// Message id of the write default line
    pub write_id: String,
    /// Template type of bit variables
    pub bit_type: String,
    /// Template type of every other variable
    pub value_type: String,
    pub aliases: AliasMode,
}

/// How registers sharing a payload with an earlier one are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    /// Write them commented out, with a note naming the first register
    #[default]
    Comment,
    /// Leave them out
    Omit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            circuit: String::new(),
            read_id: "5000".to_string(),
            write_id: "5001".to_string(),
            bit_type: "BI0".to_string(),
            value_type: "UCH".to_string(),
            aliases: AliasMode::Comment,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_path_buf(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_path_buf(), e))
    }

    pub fn arg(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Template type for a variable of `section`.
    pub fn type_of(&self, section: syc::SectionKind) -> &str {
        if section.is_bits() {
            &self.bit_type
        } else {
            &self.value_type
        }
    }
}
