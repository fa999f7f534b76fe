use std::path::{Path, PathBuf};

use crate::error::Error;

pub const EXTENSION: &str = "syc";

/// `true` for `*.SYC`, `*.syc` and any other casing.
pub fn is_symbol_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
}

/// Symbol files directly inside `dir`, sorted by path.
pub fn find_symbol_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::ReadDir(dir.to_path_buf(), e))?;
    let mut files = vec![];
    for entry in entries {
        let path = entry.map_err(|e| Error::ReadDir(dir.to_path_buf(), e))?.path();
        if path.is_file() && is_symbol_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
