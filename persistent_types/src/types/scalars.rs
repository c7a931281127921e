//! Scalar kinds that have no direct Rust primitive.
//!
//! All of them persist as fixed-width little-endian integers, except [`Guid`],
//! which persists as its 16 bytes in order.

use derive_more::{Deref, Display, From, Into};
use std::fmt;

/// A one-byte character code unit.
#[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct Char(u8);
impl fmt::Display for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

/// A two-byte (UTF-16) character code unit.
#[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct WChar(u16);
impl fmt::Display for WChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = char::from_u32(self.0 as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
        write!(f, "{c}")
    }
}

/// A signed duration in 100ns ticks.
#[derive(From, Into, Deref, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct TimeSpan(i64);
impl TimeSpan {
    pub const TICKS_PER_SECOND: i64 = 10_000_000;

    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }
    pub fn ticks(self) -> i64 {
        self.0
    }
}

/// A point in time in 100ns ticks since an epoch chosen by the caller.
#[derive(From, Into, Deref, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct DateTime(i64);
impl DateTime {
    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }
    pub fn ticks(self) -> i64 {
        self.0
    }
}

/// A fixed-point amount with four decimal places.
#[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct Currency(i64);
impl Currency {
    pub const SCALE: i64 = 10_000;

    pub fn from_scaled(scaled: i64) -> Self {
        Self(scaled)
    }
    pub fn scaled(self) -> i64 {
        self.0
    }
}
impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{sign}{}.{:04}", abs / scale, abs % scale)
    }
}

#[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct Guid([u8; 16]);
impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                write!(f, "-")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
