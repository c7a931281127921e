//! VarInt7: base-128 variable-length encoding of `u64`.
//!
//! ```text
//! byte 0..=7:   [continuation: 1 bit][payload: 7 bits]   least significant group first
//! byte 8:       [payload: 8 bits]                        never has a continuation bit
//! ```
//!
//! Eight 7-bit groups cover `2^56 - 1`; the ninth byte carries the remaining
//! 8 bits verbatim, so no value takes more than [`MAX_LEN`] bytes.

use std::io::{self, Read, Write};
use std::ops::Deref;

pub const MAX_LEN: usize = 9;

const GROUP_BITS: u32 = 7;
const GROUP_MASK: u64 = 0x7F;
const CONTINUATION: u8 = 0x80;

pub const fn size_of(v: u64) -> usize {
    let mut len = 1;
    let mut rest = v >> GROUP_BITS;
    while rest != 0 && len < MAX_LEN - 1 {
        rest >>= GROUP_BITS;
        len += 1;
    }
    if rest != 0 {
        MAX_LEN
    } else {
        len
    }
}

/// The encoded bytes of one value. Derefs to exactly [`size_of`] bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Encoded {
    buf: [u8; MAX_LEN],
    len: usize,
}
impl Deref for Encoded {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

pub fn encode(mut v: u64) -> Encoded {
    let mut buf = [0u8; MAX_LEN];
    for len in 0..MAX_LEN - 1 {
        let group = (v & GROUP_MASK) as u8;
        v >>= GROUP_BITS;
        if v == 0 {
            buf[len] = group;
            return Encoded { buf, len: len + 1 };
        }
        buf[len] = group | CONTINUATION;
    }
    buf[MAX_LEN - 1] = v as u8;
    Encoded { buf, len: MAX_LEN }
}

/// Decodes from a source of bytes, pulling one byte at a time.
/// Returns the value and the number of bytes consumed.
pub fn decode_with<E>(mut next: impl FnMut() -> Result<u8, E>) -> Result<(u64, usize), E> {
    let mut v = 0u64;
    for i in 0..MAX_LEN - 1 {
        let byte = next()?;
        v |= ((byte & GROUP_MASK as u8) as u64) << (GROUP_BITS * i as u32);
        if byte & CONTINUATION == 0 {
            return Ok((v, i + 1));
        }
    }
    let byte = next()?;
    v |= (byte as u64) << (GROUP_BITS * (MAX_LEN as u32 - 1));
    Ok((v, MAX_LEN))
}

/// Returns `None` if `bytes` ends before the terminating byte.
pub fn decode(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut iter = bytes.iter().copied();
    decode_with(|| iter.next().ok_or(())).ok()
}

pub fn write_to(w: &mut impl Write, v: u64) -> Result<usize, io::Error> {
    let enc = encode(v);
    w.write_all(&enc)?;
    Ok(enc.len())
}

pub fn read_from(r: &mut impl Read) -> Result<(usize, u64), io::Error> {
    let (v, r_len) = decode_with(|| {
        let mut buf = [0u8; 1];
        r.read_exact(&mut buf).map(|()| buf[0])
    })?;
    Ok((r_len, v))
}

/// Decodes a value that must fit in `usize`, e.g. a length or a count.
pub(crate) fn decode_usize(bytes: &[u8]) -> Option<(usize, usize)> {
    let (v, len) = decode(bytes)?;
    let v = usize::try_from(v).ok()?;
    Some((v, len))
}
