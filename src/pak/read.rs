#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Seek, SeekFrom};

use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{Entry, Header, HEADER_LEN, MAX_FILES, RECORD_LEN};
use crate::pak::io::read_exact;

pub(crate) fn read_header(file: &mut File) -> PakResult<Header> {
    file.seek(SeekFrom::Start(0))?;
    let buf = read_exact::<HEADER_LEN>(file)?;
    let header = Header::decode(&buf)?;

    if header.dir_offset < HEADER_LEN as i32 {
        return Err(PakError::Invalid("directory offset under header".into()));
    }
    if header.dir_size < 0 || header.dir_size as usize % RECORD_LEN != 0 {
        return Err(PakError::Invalid(format!(
            "directory size {} is not a multiple of {RECORD_LEN}",
            header.dir_size
        )));
    }
    // The engine's loader enforces the same cap when opening a pak.
    let count = header.dir_size as usize / RECORD_LEN;
    if count > MAX_FILES {
        return Err(PakError::TooManyFiles(count));
    }
    Ok(header)
}

/// Read the directory section. Records come back in stored order; the
/// format permits duplicate names, and they are surfaced as-is.
pub(crate) fn read_directory(file: &mut File) -> PakResult<(Header, Vec<Entry>)> {
    let header = read_header(file)?;
    let file_len = file.metadata()?.len();

    let dir_end = header.dir_offset as u64 + header.dir_size as u64;
    if dir_end > file_len {
        return Err(PakError::Invalid("directory outside file".into()));
    }

    file.seek(SeekFrom::Start(header.dir_offset as u64))?;
    let count = header.dir_size as usize / RECORD_LEN;
    let mut out: Vec<Entry> = Vec::with_capacity(count);
    for _ in 0..count {
        let buf = read_exact::<RECORD_LEN>(file)?;
        out.push(Entry::decode(&buf)?);
    }

    Ok((header, out))
}
