use crate::format::{FormatBuf, Persist, PersistRead};
use crate::io::{BinaryRead, BinaryWrite};
use crate::types::{BasicTypeId, CompositeTypeId, ModifierFlags};
use crate::{varint, Error, Result};
use std::any;

/* References */

impl<T: Persist + ?Sized> Persist for &T {
    const FIXED_SIZE: Option<usize> = T::FIXED_SIZE;
    // A sequence of references is written item by item, so it never takes
    // a basic array layout.
    const BASIC_TYPE: Option<BasicTypeId> = None;

    fn format(f: &mut FormatBuf) {
        T::format(f)
    }
    fn buffer_size(&self) -> usize {
        (**self).buffer_size()
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        (**self).write(w)
    }
}

/* Fixed-size arrays */

impl<T: Persist, const N: usize> Persist for [T; N] {
    const FIXED_SIZE: Option<usize> = match T::FIXED_SIZE {
        Some(size) => Some(size * N),
        None => None,
    };

    fn format(f: &mut FormatBuf) {
        match T::BASIC_TYPE {
            Some(id) => f.push_header(id, ModifierFlags::FIXED_ARRAY),
            None => {
                f.push_header(CompositeTypeId::FixedArray, ModifierFlags::FIXED_ARRAY);
                f.push_element::<T>();
            }
        }
        f.push_varint(N as u64);
    }
    fn buffer_size(&self) -> usize {
        match T::FIXED_SIZE {
            Some(size) => size * N,
            None => self.iter().map(T::buffer_size).sum(),
        }
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        for item in self {
            item.write(w)?;
        }
        Ok(())
    }
}
impl<T: PersistRead, const N: usize> PersistRead for [T; N] {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read_new(r)?);
        }
        items.try_into().map_err(|_| {
            Error::MalformedPayload(format!("Short read of {}", any::type_name::<Self>()))
        })
    }
    fn read<R: BinaryRead + ?Sized>(&mut self, r: &mut R) -> Result<()> {
        for item in self.iter_mut() {
            item.read(r)?;
        }
        Ok(())
    }
}

/* Growable sequences */

impl<T: Persist> Persist for [T] {
    const FIXED_SIZE: Option<usize> = None;

    fn format(f: &mut FormatBuf) {
        T::format_seq(f)
    }
    fn buffer_size(&self) -> usize {
        T::seq_buffer_size(self)
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        T::write_seq(self, w)
    }
}

impl<T: Persist> Persist for Vec<T> {
    const FIXED_SIZE: Option<usize> = None;

    fn format(f: &mut FormatBuf) {
        T::format_seq(f)
    }
    fn buffer_size(&self) -> usize {
        T::seq_buffer_size(self)
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        T::write_seq(self, w)
    }
}
impl<T: PersistRead> PersistRead for Vec<T> {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        T::read_seq(r)
    }
}

/* Strings: a growable sequence of one-byte UTF-8 code units */

fn format_str(f: &mut FormatBuf) {
    f.push_header(BasicTypeId::Char, ModifierFlags::ARRAY);
}
fn str_buffer_size(s: &str) -> usize {
    varint::size_of(s.len() as u64) + s.len()
}
fn write_str<W: BinaryWrite + ?Sized>(s: &str, w: &mut W) -> Result<()> {
    w.write_len(s.len())?;
    w.write_bytes(s.as_bytes())
}

impl Persist for str {
    const FIXED_SIZE: Option<usize> = None;

    fn format(f: &mut FormatBuf) {
        format_str(f)
    }
    fn buffer_size(&self) -> usize {
        str_buffer_size(self)
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_str(self, w)
    }
}

impl Persist for String {
    const FIXED_SIZE: Option<usize> = None;

    fn format(f: &mut FormatBuf) {
        format_str(f)
    }
    fn buffer_size(&self) -> usize {
        str_buffer_size(self)
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        write_str(self, w)
    }
}
impl PersistRead for String {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        let len = r.read_len(1)?;
        let bytes = r.read_byte_vec(len)?;
        String::from_utf8(bytes).map_err(|e| Error::MalformedPayload(e.to_string()))
    }
}

/* Optional values */

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

impl<T: Persist> Persist for Option<T> {
    const FIXED_SIZE: Option<usize> = None;

    fn format(f: &mut FormatBuf) {
        f.push_header(CompositeTypeId::Optional, ModifierFlags::NONE);
        f.push_element::<T>();
    }
    fn buffer_size(&self) -> usize {
        1 + self.as_ref().map_or(0, T::buffer_size)
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        match self {
            None => w.write_bytes(&[ABSENT]),
            Some(t) => {
                w.write_bytes(&[PRESENT])?;
                t.write(w)
            }
        }
    }
}
impl<T: PersistRead> PersistRead for Option<T> {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        read_presence(r)?.then(|| T::read_new(r)).transpose()
    }
}

pub(crate) fn read_presence<R: BinaryRead + ?Sized>(r: &mut R) -> Result<bool> {
    match r.read_u8()? {
        ABSENT => Ok(false),
        PRESENT => Ok(true),
        other => Err(Error::MalformedPayload(format!(
            "Invalid presence byte {other:#04x}"
        ))),
    }
}
