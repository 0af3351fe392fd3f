#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PakError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pak: {0}")]
    Invalid(String),

    #[error("path is outside input dir: {0}")]
    Outside(String),

    #[error("entry name is not ascii: {0}")]
    NonAscii(String),

    #[error("entry name exceeds 56 bytes ({len}): {path}")]
    NameTooLong { path: String, len: usize },

    #[error("archive field exceeds 32-bit range: {0}")]
    TooLarge(String),

    #[error("too many files for pak format: {0} (max 65536)")]
    TooManyFiles(usize),
}

pub type PakResult<T> = Result<T, PakError>;
