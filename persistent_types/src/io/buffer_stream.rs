use super::stream::seek_target;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// A stream over a fixed-capacity inline buffer.
///
/// Writes that do not fit are cut short; `write_all` then fails with
/// [`io::ErrorKind::WriteZero`].
pub struct BufferStream<const N: usize> {
    buf: [u8; N],
    len: usize,
    pos: usize,
}

impl<const N: usize> Default for BufferStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BufferStream<N> {
    pub fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
            pos: 0,
        }
    }
    pub const fn capacity(&self) -> usize {
        N
    }
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const N: usize> Read for BufferStream<N> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let src = self.buf.get(self.pos..self.len).unwrap_or_default();
        let r_len = src.len().min(buf.len());
        buf[..r_len].copy_from_slice(&src[..r_len]);
        self.pos += r_len;
        Ok(r_len)
    }
}

impl<const N: usize> Write for BufferStream<N> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let w_len = N.saturating_sub(self.pos).min(buf.len());
        self.buf[self.pos..self.pos + w_len].copy_from_slice(&buf[..w_len]);
        self.pos += w_len;
        self.len = self.len.max(self.pos);
        Ok(w_len)
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<const N: usize> Seek for BufferStream<N> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let pos = seek_target(self.pos as u64, self.len as u64, target)?;
        if pos > N as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Seek to {pos} beyond capacity {N}"),
            ));
        }
        self.pos = pos as usize;
        Ok(pos)
    }
}
