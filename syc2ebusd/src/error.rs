use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file: {}", .0.display())]
    FileOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to read file: {}", .0.display())]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to create file: {}", .0.display())]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to write file: {}", .0.display())]
    FileWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to scan directory: {}", .0.display())]
    ReadDir(PathBuf, #[source] std::io::Error),

    #[error("Invalid config file: {}", .0.display())]
    Config(PathBuf, #[source] serde_yaml::Error),
}
