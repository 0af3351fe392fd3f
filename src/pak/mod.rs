#![forbid(unsafe_code)]

mod build;
mod error;
mod format;
mod io;
mod ops;
mod path;
mod read;

pub use build::BuildReport;

pub use error::{PakError, PakResult};
pub use format::{EntryInfo, Header, HEADER_LEN, MAGIC, MAX_FILES, NAME_LEN, RECORD_LEN};
pub use path::DEFAULT_RESERVED;

pub use ops::{build, entries, extract, list, verify};
