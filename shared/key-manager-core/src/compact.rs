//! LSP2 `CompactBytesArray` parsing: a run of `uint16 length || bytes` elements.

use alloc::vec::Vec;

use crate::errors::DecodeError;

/// Split a compact bytes array into its elements, checking each length with `accept`.
pub fn decode_compact_bytes_array(
    bytes: &[u8],
    accept: impl Fn(usize) -> bool,
) -> Result<Vec<&[u8]>, DecodeError> {
    let mut elements = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let len = read_u16(bytes, &mut i)? as usize;
        if !accept(len) {
            return Err(DecodeError::InvalidElementLength(len));
        }
        elements.push(read_slice(bytes, &mut i, len)?);
    }

    Ok(elements)
}

/// True if `bytes` is a well-formed compact bytes array whose elements all pass `accept`.
pub fn is_compact_bytes_array(bytes: &[u8], accept: impl Fn(usize) -> bool) -> bool {
    decode_compact_bytes_array(bytes, accept).is_ok()
}

fn read_u16(bytes: &[u8], i: &mut usize) -> Result<u16, DecodeError> {
    if bytes.len() < *i + 2 {
        return Err(DecodeError::Truncated);
    }
    let mut buf = [0u8; 2];
    buf.copy_from_slice(&bytes[*i..*i + 2]);
    *i += 2;
    Ok(u16::from_be_bytes(buf))
}

fn read_slice<'a>(bytes: &'a [u8], i: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    if bytes.len() < *i + len {
        return Err(DecodeError::Truncated);
    }
    let out = &bytes[*i..*i + len];
    *i += len;
    Ok(out)
}
