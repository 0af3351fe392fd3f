#![forbid(unsafe_code)]

use std::io::Read;

use crate::pak::error::PakResult;

pub fn read_exact<const N: usize>(r: &mut dyn Read) -> PakResult<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}
