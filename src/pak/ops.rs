#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::pak::build::{build as build_impl, BuildReport};
use crate::pak::error::{PakError, PakResult};
use crate::pak::format::{EntryInfo, HEADER_LEN};
use crate::pak::read::read_directory;

pub fn build(
    input: &Path,
    output: &Path,
    reserved: &str,
    excludes: &[String],
) -> PakResult<BuildReport> {
    build_impl(input, output, reserved, excludes)
}

/// Read pak directory entries (without extracting contents).
pub fn entries(pak: &Path) -> PakResult<Vec<EntryInfo>> {
    let mut f = File::open(pak)?;
    let (_, entries) = read_directory(&mut f)?;
    Ok(entries
        .into_iter()
        .map(|e| EntryInfo { name: e.name, offset: e.offset, length: e.length })
        .collect())
}

pub fn list(pak: &Path, verbose: bool) -> PakResult<()> {
    for e in entries(pak)? {
        if verbose {
            println!("{}  off={} len={}", e.name, e.offset, e.length);
        } else {
            println!("{}", e.name);
        }
    }
    Ok(())
}

pub fn extract(pak: &Path, output: &Path, filter: &[String]) -> PakResult<()> {
    let mut f = File::open(pak)?;
    let (header, entries) = read_directory(&mut f)?;
    std::fs::create_dir_all(output)?;

    for e in entries {
        if !filter.is_empty() && !filter.iter().any(|s| e.name.contains(s)) {
            continue;
        }
        check_extract_name(&e.name)?;
        check_bounds(&e.name, e.offset, e.length, header.dir_offset)?;

        f.seek(SeekFrom::Start(e.offset as u64))?;
        let mut raw = vec![0u8; e.length as usize];
        f.read_exact(&mut raw)?;

        let out_path = output.join(e.name.replace('/', std::path::MAIN_SEPARATOR_STR));
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out_path, &raw)?;
    }

    Ok(())
}

/// Structural verification. The format carries no checksums, so this
/// checks the header invariants and every entry's bounds.
pub fn verify(pak: &Path) -> PakResult<()> {
    let mut f = File::open(pak)?;
    let (header, entries) = read_directory(&mut f)?;
    let file_len = f.metadata()?.len();

    let dir_end = header.dir_offset as u64 + header.dir_size as u64;
    if dir_end != file_len {
        return Err(PakError::Invalid(format!(
            "trailing bytes after directory: file is {file_len}, directory ends at {dir_end}"
        )));
    }

    for e in &entries {
        check_bounds(&e.name, e.offset, e.length, header.dir_offset)?;
    }

    println!("ok: {} entries", entries.len());
    Ok(())
}

/// Entry names come from the archive, not from us. A hostile record named
/// `../x` or `/etc/x` must not place a file outside the output directory.
fn check_extract_name(name: &str) -> PakResult<()> {
    let hostile = name.starts_with('/')
        || name
            .split('/')
            .any(|c| c.is_empty() || c == "." || c == ".." || c.contains('\\'));
    if hostile {
        return Err(PakError::Invalid(format!("unsafe entry name: {name}")));
    }
    Ok(())
}

fn check_bounds(name: &str, offset: i32, length: i32, dir_offset: i32) -> PakResult<()> {
    if offset < HEADER_LEN as i32 || length < 0 {
        return Err(PakError::Invalid(format!("bad entry bounds: {name}")));
    }
    if offset as u64 + length as u64 > dir_offset as u64 {
        return Err(PakError::Invalid(format!("entry data overlaps directory: {name}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_names_stay_under_output() {
        assert!(check_extract_name("a.txt").is_ok());
        assert!(check_extract_name("sub/deeper/c.bin").is_ok());

        assert!(check_extract_name("../escaped.txt").is_err());
        assert!(check_extract_name("sub/../../escaped.txt").is_err());
        assert!(check_extract_name("/etc/escaped").is_err());
        assert!(check_extract_name("sub//x").is_err());
        assert!(check_extract_name("./x").is_err());
        assert!(check_extract_name("sub/..\\x").is_err());
    }
}
