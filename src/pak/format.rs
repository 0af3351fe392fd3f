#![forbid(unsafe_code)]

use crate::pak::error::{PakError, PakResult};

/// PAK v1 header magic, little-endian "PACK".
pub const MAGIC: [u8; 4] = *b"PACK";

/// Fixed header size: magic + dir_offset + dir_size.
pub const HEADER_LEN: usize = 12;

/// Name field width inside a directory record. Names of exactly this
/// length are stored without a NUL terminator.
pub const NAME_LEN: usize = 56;

/// Directory record size: name field + offset + length.
pub const RECORD_LEN: usize = 64;

/// Hard cap carried over from the engine's pak loader.
pub const MAX_FILES: usize = 65536;

/// The 12-byte archive header. All integer fields are signed 32-bit
/// little-endian; the format predates anyone caring about 2 GiB paks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub dir_offset: i32,
    pub dir_size: i32,
}

impl Header {
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..8].copy_from_slice(&self.dir_offset.to_le_bytes());
        buf[8..12].copy_from_slice(&self.dir_size.to_le_bytes());
        buf
    }

    pub fn decode(buf: &[u8; HEADER_LEN]) -> PakResult<Header> {
        if buf[0..4] != MAGIC {
            return Err(PakError::Invalid("bad header magic".into()));
        }
        Ok(Header {
            dir_offset: i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            dir_size: i32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }
}

/// One packed file's bookkeeping record: collected in memory during the
/// build, serialized as a 64-byte directory record at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub name: String,
    pub offset: i32,
    pub length: i32,
}

impl Entry {
    /// Serialize as a fixed 64-byte directory record. The name must
    /// already be validated (ASCII, <= 56 bytes) by the builder.
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        let name = self.name.as_bytes();
        buf[..name.len()].copy_from_slice(name);
        buf[NAME_LEN..NAME_LEN + 4].copy_from_slice(&self.offset.to_le_bytes());
        buf[NAME_LEN + 4..].copy_from_slice(&self.length.to_le_bytes());
        buf
    }

    /// Decode a directory record. The name runs to the first NUL, or the
    /// full 56 bytes when none is present.
    pub fn decode(buf: &[u8; RECORD_LEN]) -> PakResult<Entry> {
        let name_field = &buf[..NAME_LEN];
        let end = name_field.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        let name_bytes = &name_field[..end];
        if !name_bytes.is_ascii() {
            return Err(PakError::NonAscii(
                String::from_utf8_lossy(name_bytes).into_owned(),
            ));
        }
        let name = String::from_utf8_lossy(name_bytes).into_owned();
        Ok(Entry {
            name,
            offset: i32::from_le_bytes([buf[56], buf[57], buf[58], buf[59]]),
            length: i32::from_le_bytes([buf[60], buf[61], buf[62], buf[63]]),
        })
    }
}

/// Public view of a pak entry (for listings and tooling).
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub offset: i32,
    pub length: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrip() {
        let h = Header { dir_offset: 15, dir_size: 128 };
        let buf = h.encode();
        assert_eq!(&buf[0..4], b"PACK");
        assert_eq!(Header::decode(&buf).unwrap(), h);
    }

    #[test]
    fn header_rejects_bad_magic() {
        let mut buf = Header { dir_offset: 12, dir_size: 0 }.encode();
        buf[0] = b'Q';
        assert!(Header::decode(&buf).is_err());
    }

    #[test]
    fn record_roundtrip() {
        let e = Entry { name: "sub/b.txt".into(), offset: 15, length: 0 };
        let buf = e.encode();
        assert_eq!(buf.len(), RECORD_LEN);
        assert_eq!(buf[9], 0);
        assert_eq!(Entry::decode(&buf).unwrap(), e);
    }

    #[test]
    fn record_full_width_name_has_no_terminator() {
        let name = "x".repeat(NAME_LEN);
        let e = Entry { name: name.clone(), offset: 12, length: 3 };
        let buf = e.encode();
        assert!(buf[..NAME_LEN].iter().all(|&b| b != 0));
        assert_eq!(Entry::decode(&buf).unwrap().name, name);
    }
}
