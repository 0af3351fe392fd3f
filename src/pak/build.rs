#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{Entry, Header, HEADER_LEN, MAX_FILES, NAME_LEN, RECORD_LEN};
use crate::pak::path::{is_reserved, normalize_rel_path, should_exclude};

/// What a finished build looked like, for the CLI summary line.
#[derive(Debug, Clone, Copy)]
pub struct BuildReport {
    pub files: usize,
    pub data_bytes: u64,
    pub dir_offset: i32,
}

/// PAK v1 layout:
/// - [12-byte header: "PACK", dir_offset i32, dir_size i32]
/// - concatenated file contents
/// - directory: one 64-byte record per file
///
/// Two-pass write: the directory offset and size are unknown until every
/// file has been streamed, so a placeholder header goes out first and is
/// patched in place at the end. The output must therefore be seekable.
///
/// Determinism rules:
/// - paths are normalized to forward slashes
/// - entries are sorted lexicographically by path bytes
pub fn build(
    input: &Path,
    output: &Path,
    reserved: &str,
    excludes: &[String],
) -> PakResult<BuildReport> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for ent in WalkDir::new(input).follow_links(false).into_iter() {
        let ent = ent.map_err(|e| {
            let msg = e.to_string();
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, msg));
            PakError::Io(io)
        })?;

        if !ent.file_type().is_file() {
            continue;
        }

        let rel = normalize_rel_path(input, ent.path())?;
        if is_reserved(&rel, reserved) || should_exclude(&rel, excludes) {
            continue;
        }
        check_name(&rel)?;
        files.push((rel, ent.path().to_path_buf()));
    }

    if files.len() > MAX_FILES {
        return Err(PakError::TooManyFiles(files.len()));
    }

    files.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let mut out = File::create(output)?;

    // Placeholder: real values are only known after the data pass.
    out.write_all(&Header { dir_offset: 0, dir_size: 0 }.encode())?;

    let mut entries: Vec<Entry> = Vec::with_capacity(files.len());
    let mut running: u64 = HEADER_LEN as u64;

    for (name, physical) in files {
        let mut f = File::open(&physical)?;
        let mut raw = Vec::new();
        f.read_to_end(&mut raw)?;

        let length = to_i32(raw.len() as u64, &name)?;
        let offset = to_i32(running, &name)?;

        out.write_all(&raw)?;
        running += length as u64;

        entries.push(Entry { name, offset, length });
    }

    let dir_offset = to_i32(running, "directory offset")?;
    let dir_size = (entries.len() * RECORD_LEN) as i32;

    for e in &entries {
        out.write_all(&e.encode())?;
    }

    out.seek(SeekFrom::Start(0))?;
    out.write_all(&Header { dir_offset, dir_size }.encode())?;
    out.flush()?;

    Ok(BuildReport {
        files: entries.len(),
        data_bytes: running - HEADER_LEN as u64,
        dir_offset,
    })
}

/// Offsets and lengths are signed 32-bit on the wire; anything past
/// `i32::MAX` cannot be represented and fails the build.
fn to_i32(value: u64, what: &str) -> PakResult<i32> {
    i32::try_from(value).map_err(|_| PakError::TooLarge(what.to_string()))
}

/// The directory record's name field is 56 bytes of ASCII. The original
/// tool truncated longer names silently; here that is a hard error, since
/// a truncated name is unrecoverable from the archive alone.
fn check_name(name: &str) -> PakResult<()> {
    if !name.is_ascii() {
        return Err(PakError::NonAscii(name.to_string()));
    }
    if name.len() > NAME_LEN {
        return Err(PakError::NameTooLong { path: name.to_string(), len: name.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_at_field_width_is_accepted() {
        assert!(check_name(&"x".repeat(NAME_LEN)).is_ok());
    }

    #[test]
    fn name_over_field_width_is_rejected() {
        let err = check_name(&"x".repeat(NAME_LEN + 1)).unwrap_err();
        assert!(matches!(err, PakError::NameTooLong { len: 57, .. }));
    }

    #[test]
    fn non_ascii_name_is_rejected() {
        assert!(matches!(check_name("héllo.txt"), Err(PakError::NonAscii(_))));
    }

    #[test]
    fn values_past_i32_max_are_too_large() {
        assert_eq!(to_i32(i32::MAX as u64, "x").unwrap(), i32::MAX);
        assert!(matches!(
            to_i32(i32::MAX as u64 + 1, "x"),
            Err(PakError::TooLarge(_))
        ));
    }
}
