//! # Descriptor format
//!
//! Every persistable static type has a *format*: one descriptor entry.
//! A *descriptor* wraps exactly one entry in a one-member list header.
//!
//! ```text
//! struct Descriptor {
//!     byte_size:      varint,         // length of `entry`
//!     member_count:   varint,         // always 1
//!     entry:          Entry,
//! }
//!
//! struct Entry::Basic {               // bool, i32, f64, DateTime, ...
//!     type_code:      BasicTypeId,
//!     modifiers:      NONE,
//! }
//!
//! struct Entry::BasicArray {          // Vec<i32>, [i32], String, str
//!     type_code:      BasicTypeId,
//!     modifiers:      ARRAY,
//! }
//!
//! struct Entry::FixedSizeBasicArray { // [i32; N]
//!     type_code:      BasicTypeId,
//!     modifiers:      ARRAY | FIXED,
//!     array_size:     varint,
//! }
//!
//! struct Entry::Array {               // Vec<T>, [T] of non-basic T
//!     type_code:      CompositeTypeId::Vector,
//!     modifiers:      ARRAY,
//!     element:        Descriptor,
//! }
//!
//! struct Entry::FixedSizeArray {      // [T; N] of non-basic T
//!     type_code:      CompositeTypeId::FixedArray,
//!     modifiers:      ARRAY | FIXED,
//!     element:        Descriptor,
//!     array_size:     varint,
//! }
//!
//! struct Entry::Optional {            // Option<T>
//!     type_code:      CompositeTypeId::Optional,
//!     modifiers:      NONE,
//!     element:        Descriptor,
//! }
//!
//! struct Entry::Tuple or Entry::Adapted or Entry::TypeList {
//!     type_code:      CompositeTypeId::{Tuple, Adapted, TypeList},
//!     modifiers:      NONE,
//!     byte_size:      varint,         // length of all members
//!     member_count:   varint,
//!     member_0:       Entry,
//!     ...
//! }
//! ```
//!
//! # Payload format
//!
//! Scalars are fixed-width little-endian. `[T; N]`, tuples and adapted types
//! are their members in order. Growable sequences and strings are a varint
//! count followed by the items; a sequence of `bool` packs 8 items per byte.
//! `Option<T>` is a presence byte followed by `T` if present.

mod adapted;
mod capability;
mod containers;
mod format_test;
mod scalars;
mod tuples;

pub use capability::*;
pub(crate) use containers::read_presence;

use crate::io::{BinaryRead, BinaryWrite};
use crate::types::{BasicTypeId, CompositeTypeId, ModifierFlags, TypeCode};
use crate::{varint, Result};

/// Upper bound on capacity reserved from an untrusted count.
const READ_CAPACITY_LIMIT: usize = 1024;

/// A value whose static type has a descriptor entry, and which can be written.
pub trait Persist {
    /// Payload length, if it is a function of the type alone.
    const FIXED_SIZE: Option<usize>;

    /// `Some` only for the scalar kinds.
    const BASIC_TYPE: Option<BasicTypeId> = None;

    fn format(f: &mut FormatBuf);

    /// Exact length of this value's payload.
    fn buffer_size(&self) -> usize;

    fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()>;

    /* Growable sequences of Self. Overridden where a denser layout exists. */

    fn format_seq(f: &mut FormatBuf)
    where
        Self: Sized,
    {
        match Self::BASIC_TYPE {
            Some(id) => f.push_header(id, ModifierFlags::ARRAY),
            None => {
                f.push_header(CompositeTypeId::Vector, ModifierFlags::ARRAY);
                f.push_element::<Self>();
            }
        }
    }

    fn seq_buffer_size(items: &[Self]) -> usize
    where
        Self: Sized,
    {
        let body = match Self::FIXED_SIZE {
            Some(size) => size * items.len(),
            None => items.iter().map(Self::buffer_size).sum(),
        };
        varint::size_of(items.len() as u64) + body
    }

    fn write_seq<W: BinaryWrite + ?Sized>(items: &[Self], w: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        w.write_len(items.len())?;
        for item in items {
            item.write(w)?;
        }
        Ok(())
    }
}

/// A value that can be read back in place.
///
/// Only owning types implement this. Views such as `&[T]` and `&str` are
/// write-only.
pub trait PersistRead: Persist + Sized {
    fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self>;

    fn read<R: BinaryRead + ?Sized>(&mut self, r: &mut R) -> Result<()> {
        *self = Self::read_new(r)?;
        Ok(())
    }

    fn read_seq<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Vec<Self>> {
        // A non-fixed payload always occupies at least one byte.
        let len = r.read_len(Self::FIXED_SIZE.unwrap_or(1))?;
        let mut items = Vec::with_capacity(len.min(READ_CAPACITY_LIMIT));
        for _ in 0..len {
            items.push(Self::read_new(r)?);
        }
        Ok(items)
    }
}

/// An ordered list of types: a tuple of arity 0 to 12.
pub trait TypeList: Persist + Sized {
    const LEN: usize;

    fn format_members(members: &mut MemberList);
}

/// A tuple of `&mut` read targets.
pub trait ReadArgs {
    type Types: TypeList;

    fn read_args<R: BinaryRead + ?Sized>(&mut self, r: &mut R) -> Result<()>;
}

/// A user type persisted as an explicit, ordered list of its fields.
/// Implemented by [`persistent_adapted!`](crate::persistent_adapted).
pub trait Adapted: Persist {
    type Fields: TypeList;
}

/// Sum of member sizes, or `None` if any member is not fixed.
pub const fn sum_fixed_sizes(sizes: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut i = 0;
    while i < sizes.len() {
        match sizes[i] {
            Some(size) => total += size,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}

/* Format builder */

#[derive(Default, Debug)]
pub struct FormatBuf {
    bytes: Vec<u8>,
}
impl FormatBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_header(&mut self, code: impl Into<TypeCode>, mods: ModifierFlags) {
        self.bytes.push(u8::from(code.into()));
        self.bytes.push(mods.bits());
    }

    pub fn push_varint(&mut self, v: u64) {
        self.bytes.extend_from_slice(&varint::encode(v));
    }

    /// Appends the standalone descriptor of `T`.
    pub fn push_element<T: Persist + ?Sized>(&mut self) {
        let mut entry = FormatBuf::new();
        T::format(&mut entry);
        self.push_list_body(1, &entry.bytes);
    }

    /// Appends a list-shaped entry: header, list header, members.
    pub fn push_list(&mut self, code: CompositeTypeId, members: impl FnOnce(&mut MemberList)) {
        let mut list = MemberList::default();
        members(&mut list);
        self.push_header(code, ModifierFlags::NONE);
        self.push_list_body(list.count, &list.buf.bytes);
    }

    fn push_list_body(&mut self, count: usize, entries: &[u8]) {
        self.push_varint(entries.len() as u64);
        self.push_varint(count as u64);
        self.bytes.extend_from_slice(entries);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Default, Debug)]
pub struct MemberList {
    buf: FormatBuf,
    count: usize,
}
impl MemberList {
    pub fn push<T: Persist + ?Sized>(&mut self) {
        T::format(&mut self.buf);
        self.count += 1;
    }
}
