//! Type-driven reading and writing of whole argument lists.
//!
//! Writing takes a tuple of references, e.g. `(&a, &b)`; reading takes a
//! tuple of mutable references, e.g. `(&mut a, &mut b)`. Fixed buffers are
//! accepted only for argument lists whose payload size is fixed, which is
//! checked at build time.

use crate::descriptor::Descriptor;
use crate::format::{Persist, ReadArgs, TypeList};
use crate::io::{BufferReader, BufferWriter, Stream, StreamReader, StreamWriter};
use crate::{Error, Result};
use derive_more::Deref;
use log::{trace, warn};
use std::any;
use std::io::Write;
use std::marker::PhantomData;

#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WriteLen(usize);

#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct ReadLen(usize);

/* Static shape */

pub fn descriptor<L: TypeList>() -> Descriptor {
    Descriptor::of::<L>()
}
pub fn descriptor_of<L: TypeList>(args: &L) -> Descriptor {
    Descriptor::of_args(args)
}

pub const fn is_fixed_size<L: Persist>() -> bool {
    L::FIXED_SIZE.is_some()
}
pub const fn is_fixed_size_of<L: Persist>(_args: &L) -> bool {
    L::FIXED_SIZE.is_some()
}

/// Payload length of the argument list.
pub fn buffer_size<L: Persist>(args: &L) -> usize {
    args.buffer_size()
}

struct FixedSize<L>(PhantomData<L>);
impl<L: Persist> FixedSize<L> {
    const SIZE: usize = match L::FIXED_SIZE {
        Some(size) => size,
        None => panic!("The argument list has no fixed payload size"),
    };
}

/// Payload length of a fixed-size argument list.
/// Fails to build for argument lists containing growable members.
pub const fn fixed_buffer_size<L: Persist>() -> usize {
    FixedSize::<L>::SIZE
}

/* Fixed buffers */

/// Writes a fixed-size argument list into `buf`.
///
/// ```
/// use persistent_types::dispatch;
///
/// let mut buf = [0u8; dispatch::fixed_buffer_size::<(&u16, &bool)>()];
/// let len = dispatch::write_fixed(&mut buf, &(&0x0102u16, &true))?;
/// assert_eq!(*len, 3);
/// assert_eq!(buf, [0x02, 0x01, 1]);
///
/// let (mut n, mut flag) = (0u16, false);
/// dispatch::read_fixed(&buf, &mut (&mut n, &mut flag))?;
/// assert_eq!((n, flag), (0x0102, true));
/// # Ok::<(), persistent_types::Error>(())
/// ```
///
/// Growable members have no fixed size, so they are rejected at build time.
///
/// ```compile_fail
/// use persistent_types::dispatch;
///
/// let mut buf = [0u8; 64];
/// let _ = dispatch::write_fixed(&mut buf, &(&String::from("x"),));
/// ```
pub fn write_fixed<L: Persist>(buf: &mut [u8], args: &L) -> Result<WriteLen> {
    let size = FixedSize::<L>::SIZE;
    if buf.len() < size {
        return Err(Error::BufferOverflow {
            needed: size,
            available: buf.len(),
        });
    }
    let mut w = BufferWriter::new(buf);
    args.write(&mut w)?;
    trace!(
        "Wrote {} bytes of {} into a fixed buffer",
        w.position(),
        any::type_name::<L>()
    );
    Ok(WriteLen(w.position()))
}

pub fn read_fixed<L: ReadArgs>(buf: &[u8], args: &mut L) -> Result<ReadLen> {
    let size = FixedSize::<L::Types>::SIZE;
    if buf.len() < size {
        return Err(Error::MalformedPayload(format!(
            "{size} bytes needed, {} available",
            buf.len()
        )));
    }
    let mut r = BufferReader::new(buf);
    args.read_args(&mut r)?;
    trace!(
        "Read {} bytes of {} from a fixed buffer",
        r.position(),
        any::type_name::<L::Types>()
    );
    Ok(ReadLen(r.position()))
}

/* Streams */

/// Encodes the whole argument list, then writes it. If the stream fails,
/// its position is restored to where it was before the call.
pub fn write<S: Stream + ?Sized, L: Persist>(stream: &mut S, args: &L) -> Result<WriteLen> {
    let mut payload = Vec::with_capacity(args.buffer_size());
    args.write(&mut payload)?;

    let start = stream.position()?;
    if let Err(e) = stream.write_all(&payload) {
        warn!(
            "Rolling back a failed write of {} bytes at position {start}: {e}",
            payload.len()
        );
        stream.set_position(start)?;
        return Err(Error::Io(e));
    }
    trace!(
        "Wrote {} bytes of {} at position {start}",
        payload.len(),
        any::type_name::<L>()
    );
    Ok(WriteLen(payload.len()))
}

/// Reads an argument list from the stream's current position.
///
/// Borrowed slices cannot be filled from a stream, only owned values can.
///
/// ```compile_fail
/// use persistent_types::dispatch;
/// use persistent_types::io::MemoryStream;
///
/// let mut stream = MemoryStream::new();
/// let mut view: &[u8] = &[];
/// let _ = dispatch::read(&mut stream, &mut (&mut view,));
/// ```
pub fn read<S: Stream + ?Sized, L: ReadArgs>(stream: &mut S, args: &mut L) -> Result<ReadLen> {
    let start = stream.position()?;
    let size = stream.size()?;
    let limit = usize::try_from(size.saturating_sub(start)).unwrap_or(usize::MAX);

    let mut r = StreamReader::with_limit(stream, limit);
    args.read_args(&mut r)?;
    trace!(
        "Read {} bytes of {} at position {start}",
        r.r_len(),
        any::type_name::<L::Types>()
    );
    Ok(ReadLen(r.r_len()))
}

/// Writes to a sink that cannot seek. Nothing is rolled back on failure.
pub fn write_to<W: Write + ?Sized, L: Persist>(w: &mut W, args: &L) -> Result<WriteLen> {
    let mut w = StreamWriter::new(w);
    args.write(&mut w)?;
    Ok(WriteLen(w.w_len()))
}
