pub mod register;
pub mod template;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// `<stem><suffix>` next to `input`, or inside `out_dir` when given.
pub fn output_path(input: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{}{}", stem, suffix))
}

pub fn register_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    output_path(input, out_dir, ".inc")
}

pub fn template_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    output_path(input, out_dir, "_template.inc")
}

pub fn write(path: &Path, contents: &str) -> Result<(), Error> {
    let mut file = File::create(path).map_err(|e| Error::FileCreate(path.to_path_buf(), e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::FileWrite(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        let input = Path::new("dumps/WH11928.SYC");
        assert_eq!(register_path(input, None), Path::new("dumps/WH11928.inc"));
        assert_eq!(
            template_path(input, Some(Path::new("out"))),
            Path::new("out/WH11928_template.inc")
        );
        assert_eq!(register_path(Path::new("a.syc"), None), Path::new("a.inc"));
    }
}
