use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Odd number of hex digits: `{0}`")]
    OddHexLength(String),

    #[error("Invalid hex digit `{1}` in `{0}`")]
    InvalidHexDigit(String, char),
}
