//! Descriptors: the persisted form of a static type list.
//!
//! See [`crate::format`] for the byte layout.

mod cursor;
mod entry;

pub use cursor::*;
pub use entry::*;

use crate::format::{FormatBuf, Persist, TypeList};
use crate::types::{BasicTypeId, CompositeTypeId};
use crate::Result;
use log::debug;
use std::any::{self, TypeId};
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Immutable descriptor bytes: a one-member list header and one entry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Descriptor {
    bytes: Box<[u8]>,
}

impl Descriptor {
    /// The root descriptor of an argument list: a single `TypeList` entry.
    pub fn of<L: TypeList>() -> Self {
        let mut entry = FormatBuf::new();
        entry.push_list(CompositeTypeId::TypeList, L::format_members);
        Self::wrap(entry)
    }

    pub fn of_args<L: TypeList>(_args: &L) -> Self {
        Self::of::<L>()
    }

    /// The standalone descriptor of a single type.
    pub fn of_type<T: Persist + ?Sized>() -> Self {
        let mut f = FormatBuf::new();
        f.push_element::<T>();
        Self {
            bytes: f.into_bytes().into_boxed_slice(),
        }
    }

    /// Builds the descriptor of `L` once per process, and hands out the same
    /// instance afterwards.
    pub fn cached<L: TypeList + 'static>() -> &'static Descriptor {
        static CACHE: OnceLock<RwLock<HashMap<TypeId, &'static Descriptor>>> = OnceLock::new();

        let cache = CACHE.get_or_init(Default::default);
        let type_id = TypeId::of::<L>();
        {
            let map = cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(desc) = map.get(&type_id) {
                return *desc;
            }
        }
        let mut map = cache.write().unwrap_or_else(PoisonError::into_inner);
        let desc = *map.entry(type_id).or_insert_with(|| {
            let desc = Self::of::<L>();
            debug!(
                "Cached the {}-byte descriptor of {}",
                desc.len(),
                any::type_name::<L>()
            );
            &*Box::leak(Box::new(desc))
        });
        desc
    }

    /// Validates the outer list header of externally supplied bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        DescriptorCursor::new(&bytes)?;
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn cursor(&self) -> Result<DescriptorCursor<'_>> {
        DescriptorCursor::new(&self.bytes)
    }

    /// The kind of the only argument, when the argument list is a single
    /// basic scalar.
    pub fn single_basic_type(&self) -> Option<BasicTypeId> {
        let mut root = self.cursor().ok()?;
        let mut args = root.read_type_list_type().ok()?.cursor();
        if args.size() != 1 {
            return None;
        }
        match args.read_entry().ok()?? {
            Entry::Basic(t) => Some(t.basic_type_id()),
            _ => None,
        }
    }

    pub fn is_single_integer(&self) -> bool {
        self.single_basic_type().is_some_and(BasicTypeId::is_integer)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn wrap(entry: FormatBuf) -> Self {
        let entry = entry.into_bytes();
        let mut f = FormatBuf::new();
        f.push_varint(entry.len() as u64);
        f.push_varint(1);
        let mut bytes = f.into_bytes();
        bytes.extend_from_slice(&entry);
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl Deref for Descriptor {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}
impl AsRef<[u8]> for Descriptor {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
