use super::stream::seek_target;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::num::NonZeroUsize;

const DEFAULT_BLOCK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(n) => n,
    None => panic!("block size must be non-zero"),
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemoryStreamOptions {
    pub block_size: NonZeroUsize,
}
impl Default for MemoryStreamOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}
impl MemoryStreamOptions {
    pub fn with_block_size(mut self, block_size: NonZeroUsize) -> Self {
        self.block_size = block_size;
        self
    }
}

/// A growable in-memory stream that stores its contents in equally sized blocks,
/// so that growing never moves bytes already written.
///
/// Seeking past the end is allowed. The gap reads as zeros once something is
/// written after it.
#[derive(Debug)]
pub struct MemoryStream {
    blocks: Vec<Box<[u8]>>,
    block_size: usize,
    len: usize,
    pos: usize,
}

impl Default for MemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::with_options(MemoryStreamOptions::default())
    }
    pub fn with_options(opts: MemoryStreamOptions) -> Self {
        Self {
            blocks: vec![],
            block_size: opts.block_size.get(),
            len: 0,
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        let mut rest = self.len;
        for block in &self.blocks {
            let take = rest.min(self.block_size);
            out.extend_from_slice(&block[..take]);
            rest -= take;
        }
        out
    }

    fn reserve_to(&mut self, end: usize) {
        while self.blocks.len() * self.block_size < end {
            self.blocks.push(vec![0u8; self.block_size].into_boxed_slice());
        }
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = self.len.min(self.pos.saturating_add(buf.len()));
        let mut r_len = 0;
        while self.pos < end {
            let (block_i, offset) = (self.pos / self.block_size, self.pos % self.block_size);
            let take = (self.block_size - offset).min(end - self.pos);
            buf[r_len..r_len + take].copy_from_slice(&self.blocks[block_i][offset..offset + take]);
            r_len += take;
            self.pos += take;
        }
        Ok(r_len)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let end = self.pos.checked_add(buf.len()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::OutOfMemory, "MemoryStream length overflow")
        })?;
        self.reserve_to(end);
        let mut w_len = 0;
        while self.pos < end {
            let (block_i, offset) = (self.pos / self.block_size, self.pos % self.block_size);
            let take = (self.block_size - offset).min(end - self.pos);
            self.blocks[block_i][offset..offset + take].copy_from_slice(&buf[w_len..w_len + take]);
            w_len += take;
            self.pos += take;
        }
        self.len = self.len.max(end);
        Ok(w_len)
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let pos = seek_target(self.pos as u64, self.len as u64, target)?;
        self.pos = usize::try_from(pos)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Seek beyond usize"))?;
        Ok(pos)
    }
}
