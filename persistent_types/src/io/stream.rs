use std::io::{self, Read, Seek, SeekFrom, Write};

/// A seekable byte sink and source.
pub trait Stream: Read + Write + Seek {
    fn position(&mut self) -> Result<u64, io::Error> {
        self.stream_position()
    }
    fn set_position(&mut self, pos: u64) -> Result<(), io::Error> {
        self.seek(SeekFrom::Start(pos))?;
        Ok(())
    }
    /// Total length. Leaves the position unchanged.
    fn size(&mut self) -> Result<u64, io::Error> {
        let pos = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if pos != end {
            self.seek(SeekFrom::Start(pos))?;
        }
        Ok(end)
    }
}

impl<T: Read + Write + Seek + ?Sized> Stream for T {}

/// Resolves a seek target against the current position and length.
pub(crate) fn seek_target(pos: u64, len: u64, target: SeekFrom) -> Result<u64, io::Error> {
    let (base, offset) = match target {
        SeekFrom::Start(abs) => return Ok(abs),
        SeekFrom::End(offset) => (len, offset),
        SeekFrom::Current(offset) => (pos, offset),
    };
    base.checked_add_signed(offset).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Seek to {base} + ({offset}) is out of range"),
        )
    })
}
