//! Dynamic values, decoded from a payload by walking its descriptor.

mod decode;
mod printer;

pub use decode::MAX_DEPTH;
pub use printer::*;

use crate::types::{Char, Currency, DateTime, Guid, TimeSpan, WChar};
use itertools::Itertools;
use std::fmt;

#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    Char(Char),
    SByte(i8),
    Byte(u8),
    WChar(WChar),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    TimeSpan(TimeSpan),
    DateTime(DateTime),
    Currency(Currency),
    Guid(Guid),

    /// A growable sequence of UTF-8 characters.
    Str(String),
    /// A growable sequence of bytes.
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
    Adapted(Vec<Value>),
    Optional(Option<Box<Value>>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::SByte(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::WChar(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Single(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::TimeSpan(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Currency(v) => write!(f, "{v}"),
            Self::Guid(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bytes(bytes) => write!(f, "[{}]", bytes.iter().format(", ")),
            Self::Array(vals) => write!(f, "[{}]", vals.iter().format(", ")),
            Self::Tuple(vals) | Self::Adapted(vals) => write!(f, "({})", vals.iter().format(", ")),
            Self::Optional(None) => write!(f, "None"),
            Self::Optional(Some(val)) => write!(f, "{val}"),
        }
    }
}
