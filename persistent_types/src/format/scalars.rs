use crate::format::{FormatBuf, Persist, PersistRead};
use crate::io::{BinaryRead, BinaryWrite};
use crate::types::{BasicTypeId, Char, Currency, DateTime, Guid, ModifierFlags, TimeSpan, WChar};
use crate::{varint, Result};
use std::mem;

macro_rules! persist_le_scalar {
    ($($ty:ty => $id:ident $({ $($seq:tt)* })?),* $(,)?) => { $(
        impl Persist for $ty {
            const FIXED_SIZE: Option<usize> = Some(mem::size_of::<$ty>());
            const BASIC_TYPE: Option<BasicTypeId> = Some(BasicTypeId::$id);

            fn format(f: &mut FormatBuf) {
                f.push_header(BasicTypeId::$id, ModifierFlags::NONE);
            }
            fn buffer_size(&self) -> usize {
                mem::size_of::<$ty>()
            }
            fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
                w.write_bytes(&self.to_le_bytes())
            }
        }
        impl PersistRead for $ty {
            fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
                Ok(<$ty>::from_le_bytes(r.read_array()?))
            }
            $($($seq)*)?
        }
    )* };
}

persist_le_scalar! {
    i8 => SByte,
    u8 => Byte {
        fn read_seq<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Vec<Self>> {
            let len = r.read_len(1)?;
            r.read_byte_vec(len)
        }
    },
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
}

macro_rules! persist_newtype_scalar {
    ($($ty:ident($inner:ty)),* $(,)?) => { $(
        impl Persist for $ty {
            const FIXED_SIZE: Option<usize> = Some(mem::size_of::<$inner>());
            const BASIC_TYPE: Option<BasicTypeId> = Some(BasicTypeId::$ty);

            fn format(f: &mut FormatBuf) {
                f.push_header(BasicTypeId::$ty, ModifierFlags::NONE);
            }
            fn buffer_size(&self) -> usize {
                mem::size_of::<$inner>()
            }
            fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
                w.write_bytes(&<$inner>::from(*self).to_le_bytes())
            }
        }
        impl PersistRead for $ty {
            fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
                Ok(Self::from(<$inner>::from_le_bytes(r.read_array()?)))
            }
        }
    )* };
}

persist_newtype_scalar! {
    Char(u8),
    WChar(u16),
    TimeSpan(i64),
    DateTime(i64),
    Currency(i64),
}

impl Persist for Guid {
    const FIXED_SIZE: Option<usize> = Some(16);
    const BASIC_TYPE: Option<BasicTypeId> = Some(BasicTypeId::Guid);

    fn format(f: &mut FormatBuf) {
        f.push_header(BasicTypeId::Guid, ModifierFlags::NONE);
    }
    fn buffer_size(&self) -> usize {
        16
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_bytes(&self[..])
    }
}
impl PersistRead for Guid {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(Self::from(r.read_array::<16>()?))
    }
}

/* bool: one byte as a scalar, one bit in a growable sequence */

impl Persist for bool {
    const FIXED_SIZE: Option<usize> = Some(1);
    const BASIC_TYPE: Option<BasicTypeId> = Some(BasicTypeId::Boolean);

    fn format(f: &mut FormatBuf) {
        f.push_header(BasicTypeId::Boolean, ModifierFlags::NONE);
    }
    fn buffer_size(&self) -> usize {
        1
    }
    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
        w.write_bytes(&[*self as u8])
    }

    fn seq_buffer_size(items: &[Self]) -> usize {
        varint::size_of(items.len() as u64) + items.len().div_ceil(8)
    }
    fn write_seq<W: BinaryWrite + ?Sized>(items: &[Self], w: &mut W) -> Result<()> {
        w.write_len(items.len())?;
        let packed = pack_bits(items);
        w.write_bytes(&packed)
    }
}
impl PersistRead for bool {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
        Ok(r.read_u8()? != 0)
    }
    fn read_seq<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Vec<Self>> {
        // The packed bytes are bounded by the source, the bit count alone is not.
        let bit_count = r.read_count()?;
        let packed = r.read_byte_vec(bit_count.div_ceil(8))?;
        Ok(unpack_bits(&packed, bit_count))
    }
}

/// Bit `i` goes to byte `i / 8`, at bit position `i % 8`.
pub(crate) fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << i))
        })
        .collect()
}

pub(crate) fn unpack_bits(packed: &[u8], bit_count: usize) -> Vec<bool> {
    (0..bit_count)
        .map(|i| packed[i / 8] & (1 << (i % 8)) != 0)
        .collect()
}
