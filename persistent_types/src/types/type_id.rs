use crate::{Error, Result};
use derive_more::Display;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::mem;

/// Primitive kinds. Discriminants are the wire values; zero is never a valid id.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Display, Debug)]
pub enum BasicTypeId {
    Boolean = 1,
    Char = 2,
    SByte = 3,
    Byte = 4,
    WChar = 5,
    Int16 = 6,
    UInt16 = 7,
    Int32 = 8,
    UInt32 = 9,
    Int64 = 10,
    UInt64 = 11,
    Single = 12,
    Double = 13,
    TimeSpan = 14,
    DateTime = 15,
    Currency = 16,
    Guid = 17,
}
impl BasicTypeId {
    /// Payload width of one scalar of this kind.
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Boolean | Self::Char | Self::SByte | Self::Byte => 1,
            Self::WChar | Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Single => 4,
            Self::Int64 | Self::UInt64 | Self::Double => 8,
            Self::TimeSpan | Self::DateTime | Self::Currency => mem::size_of::<i64>(),
            Self::Guid => 16,
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }
}

/// Non-primitive kinds. Their range is disjoint from [`BasicTypeId`].
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Display, Debug)]
pub enum CompositeTypeId {
    /// Fixed-length array of a non-basic element.
    FixedArray = 128,
    /// Growable sequence of a non-basic element.
    Vector = 129,
    Tuple = 202,
    Optional = 215,
    TypeList = 217,
    Adapted = 218,
}
impl CompositeTypeId {
    /// Whether the entry body is a list header followed by member entries.
    pub const fn is_list(self) -> bool {
        matches!(self, Self::Tuple | Self::TypeList | Self::Adapted)
    }
}

/// The first byte of every descriptor entry.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Display, Debug)]
pub enum TypeCode {
    Basic(BasicTypeId),
    Composite(CompositeTypeId),
}
impl From<BasicTypeId> for TypeCode {
    fn from(id: BasicTypeId) -> Self {
        Self::Basic(id)
    }
}
impl From<CompositeTypeId> for TypeCode {
    fn from(id: CompositeTypeId) -> Self {
        Self::Composite(id)
    }
}
impl From<TypeCode> for u8 {
    fn from(code: TypeCode) -> u8 {
        match code {
            TypeCode::Basic(id) => id as u8,
            TypeCode::Composite(id) => id as u8,
        }
    }
}
impl TryFrom<u8> for TypeCode {
    type Error = Error;
    fn try_from(int: u8) -> Result<Self> {
        if let Some(id) = BasicTypeId::from_u8(int) {
            return Ok(Self::Basic(id));
        }
        if let Some(id) = CompositeTypeId::from_u8(int) {
            return Ok(Self::Composite(id));
        }
        Err(Error::MalformedDescriptor(format!("Unknown type code {int}")))
    }
}
