use crate::varint;
use crate::{Error, Result};
use std::io::{Read, Write};

const READ_CHUNK: usize = 8 * 1024;

/// Most items a sequence of zero-size values may claim.
pub const ZERO_SIZE_ITEM_LIMIT: usize = 1 << 16;

pub trait BinaryWrite {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    fn write_varint(&mut self, v: u64) -> Result<()> {
        self.write_bytes(&varint::encode(v))
    }
    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_varint(len as u64)
    }
}

pub trait BinaryRead {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes known to remain in the source. `None` if the source cannot tell.
    fn remaining(&self) -> Option<usize> {
        None
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }
    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }
    fn read_varint(&mut self) -> Result<u64> {
        let (v, _) = varint::decode_with(|| self.read_u8())?;
        Ok(v)
    }

    /// Reads a length prefix, rejecting one that cannot fit in the remaining
    /// source when each item occupies at least `min_item_size` bytes.
    fn read_len(&mut self, min_item_size: usize) -> Result<usize> {
        let len = self.read_count()?;
        self.check_len(len, min_item_size)?;
        Ok(len)
    }

    /// Reads a length prefix without bounding it.
    fn read_count(&mut self) -> Result<usize> {
        let v = self.read_varint()?;
        usize::try_from(v).map_err(|_| {
            Error::MalformedPayload(format!("Length prefix {v} exceeds the address space"))
        })
    }

    /// Fails unless `len` items of at least `min_item_size` bytes each can be
    /// read. Items of size zero are capped at [`ZERO_SIZE_ITEM_LIMIT`].
    fn check_len(&self, len: usize, min_item_size: usize) -> Result<()> {
        if min_item_size == 0 {
            if len > ZERO_SIZE_ITEM_LIMIT {
                return Err(Error::MalformedPayload(format!(
                    "{len} zero-size items exceed the limit of {ZERO_SIZE_ITEM_LIMIT}"
                )));
            }
        } else if let Some(remaining) = self.remaining() {
            if len.saturating_mul(min_item_size) > remaining {
                return Err(Error::MalformedPayload(format!(
                    "Length prefix {len} exceeds the {remaining} bytes remaining"
                )));
            }
        }
        Ok(())
    }

    /// Reads `len` bytes without trusting `len` for the up-front allocation.
    fn read_byte_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        if let Some(remaining) = self.remaining() {
            if len > remaining {
                return Err(Error::MalformedPayload(format!(
                    "{len} bytes needed, {remaining} remaining"
                )));
            }
        }
        let mut bytes = Vec::with_capacity(len.min(READ_CHUNK));
        while bytes.len() < len {
            let start = bytes.len();
            let end = len.min(start + READ_CHUNK);
            bytes.resize(end, 0);
            self.read_bytes(&mut bytes[start..])?;
        }
        Ok(bytes)
    }
}

impl BinaryWrite for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/* Fixed buffers */

pub struct BufferWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}
impl<'a> BufferWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }
    pub fn position(&self) -> usize {
        self.pos
    }
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}
impl<'a> BinaryWrite for BufferWriter<'a> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        let available = self.buf.len();
        let dst = self.buf.get_mut(self.pos..end).ok_or(Error::BufferOverflow {
            needed: end,
            available,
        })?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

pub struct BufferReader<'a> {
    buf: &'a [u8],
    pos: usize,
}
impl<'a> BufferReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
    pub fn position(&self) -> usize {
        self.pos
    }
}
impl<'a> BinaryRead for BufferReader<'a> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos + buf.len();
        let src = self.buf.get(self.pos..end).ok_or_else(|| {
            Error::MalformedPayload(format!(
                "{} bytes needed at offset {}, {} remaining",
                buf.len(),
                self.pos,
                self.buf.len() - self.pos
            ))
        })?;
        buf.copy_from_slice(src);
        self.pos = end;
        Ok(())
    }
    fn remaining(&self) -> Option<usize> {
        Some(self.buf.len() - self.pos)
    }
}

/* std::io streams */

pub struct StreamWriter<'a, W: ?Sized> {
    w: &'a mut W,
    w_len: usize,
}
impl<'a, W: Write + ?Sized> StreamWriter<'a, W> {
    pub fn new(w: &'a mut W) -> Self {
        Self { w, w_len: 0 }
    }
    pub fn w_len(&self) -> usize {
        self.w_len
    }
}
impl<'a, W: Write + ?Sized> BinaryWrite for StreamWriter<'a, W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.w.write_all(bytes)?;
        self.w_len += bytes.len();
        Ok(())
    }
}

pub struct StreamReader<'a, R: ?Sized> {
    r: &'a mut R,
    r_len: usize,
    limit: Option<usize>,
}
impl<'a, R: Read + ?Sized> StreamReader<'a, R> {
    pub fn new(r: &'a mut R) -> Self {
        Self {
            r,
            r_len: 0,
            limit: None,
        }
    }
    /// `limit` is the number of bytes the stream is known to hold past its
    /// current position.
    pub fn with_limit(r: &'a mut R, limit: usize) -> Self {
        Self {
            r,
            r_len: 0,
            limit: Some(limit),
        }
    }
    pub fn r_len(&self) -> usize {
        self.r_len
    }
}
impl<'a, R: Read + ?Sized> BinaryRead for StreamReader<'a, R> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.r.read_exact(buf)?;
        self.r_len += buf.len();
        Ok(())
    }
    fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.r_len))
    }
}
