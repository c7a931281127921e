use crate::descriptor::entry::*;
use crate::types::{BasicTypeId, CompositeTypeId, ModifierFlags, TypeCode};
use crate::{varint, Error, Result};

fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedDescriptor(msg.into())
}

/// The first two bytes of an entry.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct EntryHeader {
    pub type_code: TypeCode,
    pub modifiers: ModifierFlags,
}
impl EntryHeader {
    pub fn kind(&self) -> EntryKind {
        EntryKind::classify(self.type_code, self.modifiers)
    }
}

/// A forward-only reader over one list of descriptor entries.
///
/// Cloning a cursor is cheap and never copies descriptor bytes. Child cursors
/// handed out by views are independent of their parent.
#[derive(Clone, Debug)]
pub struct DescriptorCursor<'a> {
    entries: &'a [u8],
    pos: usize,
    size: usize,
    remaining: usize,
}

impl<'a> DescriptorCursor<'a> {
    /// Parses the list header at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (cursor, _) = Self::parse(bytes)?;
        Ok(cursor)
    }

    /// Returns the cursor and the length of the header plus its entries.
    fn parse(bytes: &'a [u8]) -> Result<(Self, usize)> {
        let (byte_size, size_len) =
            varint::decode_usize(bytes).ok_or_else(|| malformed("Truncated list byte size"))?;
        let (count, count_len) = varint::decode_usize(&bytes[size_len..])
            .ok_or_else(|| malformed("Truncated list member count"))?;

        let start = size_len + count_len;
        let end = start
            .checked_add(byte_size)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| {
                malformed(format!(
                    "List of {byte_size} bytes overruns the {} bytes available",
                    bytes.len() - start
                ))
            })?;
        // Every entry is at least a type code and a modifier byte.
        if count > byte_size / 2 {
            return Err(malformed(format!(
                "{count} members cannot fit in {byte_size} bytes"
            )));
        }

        let cursor = Self {
            entries: &bytes[start..end],
            pos: 0,
            size: count,
            remaining: count,
        };
        Ok((cursor, end))
    }

    /// Member count of the list.
    pub fn size(&self) -> usize {
        self.size
    }
    /// Members not read yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
    /// Length of the entries following the list header.
    pub fn byte_size(&self) -> usize {
        self.entries.len()
    }
    /// Offset of the next entry, relative to the first one.
    pub fn offset(&self) -> usize {
        self.pos
    }
    pub fn is_valid(&self) -> bool {
        self.remaining > 0
    }

    /* Peeking */

    /// The header of the next entry, or `None` once exhausted.
    pub fn current(&self) -> Result<Option<EntryHeader>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let header = match self.entries.get(self.pos..self.pos + 2) {
            Some(&[code, mods]) => EntryHeader {
                type_code: TypeCode::try_from(code)?,
                modifiers: ModifierFlags::from_bits_retain(mods),
            },
            _ => return Err(malformed(format!("Truncated entry at offset {}", self.pos))),
        };
        Ok(Some(header))
    }

    fn peek_kind(&self) -> Option<EntryKind> {
        self.current().ok().flatten().map(|header| header.kind())
    }

    pub fn modifiers(&self) -> Option<ModifierFlags> {
        self.current().ok().flatten().map(|header| header.modifiers)
    }
    pub fn basic_type_id(&self) -> Option<BasicTypeId> {
        match self.current() {
            Ok(Some(EntryHeader {
                type_code: TypeCode::Basic(id),
                ..
            })) => Some(id),
            _ => None,
        }
    }
    /// The type code of the next entry, if it is list-shaped.
    pub fn tuple_type_id(&self) -> Option<CompositeTypeId> {
        match self.current() {
            Ok(Some(EntryHeader {
                type_code: TypeCode::Composite(id),
                ..
            })) if id.is_list() => Some(id),
            _ => None,
        }
    }

    /* Reading */

    /// Decodes the next entry and moves past it.
    pub fn read_entry(&mut self) -> Result<Option<Entry<'a>>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let (entry, next) = self.decode_entry()?;
        self.pos = next;
        self.remaining -= 1;
        Ok(Some(entry))
    }

    /// Like [`Self::read_entry`], but fails without moving unless the next
    /// entry has the `expected` shape.
    fn read_expected(&mut self, expected: EntryKind) -> Result<Entry<'a>> {
        let found = self.current()?.map_or(EntryKind::End, |header| header.kind());
        if found != expected {
            return Err(Error::StructuralMismatch { expected, found });
        }
        let (entry, next) = self.decode_entry()?;
        self.pos = next;
        self.remaining -= 1;
        Ok(entry)
    }

    fn decode_entry(&self) -> Result<(Entry<'a>, usize)> {
        let header = self
            .current()?
            .ok_or_else(|| malformed("Decoding past the last entry"))?;
        let mut p = self.pos + 2;

        let entry = match header.type_code {
            TypeCode::Basic(basic_type_id) => match header.kind() {
                EntryKind::FixedSizeBasicArray => {
                    let array_size = self.varint_at(&mut p, "array size")?;
                    Entry::FixedSizeBasicArray(FixedSizeBasicArrayType {
                        basic_type_id,
                        array_size,
                    })
                }
                EntryKind::BasicArray => Entry::BasicArray(BasicArrayType { basic_type_id }),
                _ => Entry::Basic(BasicType {
                    basic_type_id,
                    modifiers: header.modifiers,
                }),
            },
            TypeCode::Composite(id) => match id {
                CompositeTypeId::FixedArray => {
                    let element = self.element_at(&mut p)?;
                    let array_size = self.varint_at(&mut p, "array size")?;
                    Entry::FixedSizeArray(FixedSizeArrayType {
                        element,
                        array_size,
                    })
                }
                CompositeTypeId::Vector => Entry::Array(ArrayType {
                    element: self.element_at(&mut p)?,
                }),
                CompositeTypeId::Optional => Entry::Optional(OptionalType {
                    element: self.element_at(&mut p)?,
                }),
                CompositeTypeId::Tuple => Entry::Tuple(TupleType {
                    members: self.list_at(&mut p)?,
                }),
                CompositeTypeId::Adapted => Entry::Adapted(AdaptedType {
                    members: self.list_at(&mut p)?,
                }),
                CompositeTypeId::TypeList => Entry::TypeList(TypeListType {
                    members: self.list_at(&mut p)?,
                }),
            },
        };
        Ok((entry, p))
    }

    fn varint_at(&self, p: &mut usize, what: &str) -> Result<usize> {
        let bytes = self.entries.get(*p..).unwrap_or_default();
        let (v, len) = varint::decode_usize(bytes)
            .ok_or_else(|| malformed(format!("Truncated {what} at offset {p}")))?;
        *p += len;
        Ok(v)
    }

    fn list_at(&self, p: &mut usize) -> Result<DescriptorCursor<'a>> {
        let entries: &'a [u8] = self.entries;
        let (list, len) = Self::parse(entries.get(*p..).unwrap_or_default())?;
        *p += len;
        Ok(list)
    }

    fn element_at(&self, p: &mut usize) -> Result<DescriptorCursor<'a>> {
        let element = self.list_at(p)?;
        if element.size() != 1 {
            return Err(malformed(format!(
                "Element descriptor with {} members",
                element.size()
            )));
        }
        Ok(element)
    }
}

macro_rules! entry_accessors {
    ($($is:ident, $read:ident => $kind:ident($view:ty);)*) => { $(
        pub fn $is(&self) -> bool {
            self.peek_kind() == Some(EntryKind::$kind)
        }
        pub fn $read(&mut self) -> Result<$view> {
            match self.read_expected(EntryKind::$kind)? {
                Entry::$kind(view) => Ok(view),
                other => Err(Error::StructuralMismatch {
                    expected: EntryKind::$kind,
                    found: other.kind(),
                }),
            }
        }
    )* };
}

impl<'a> DescriptorCursor<'a> {
    entry_accessors! {
        is_basic_type, read_basic_type => Basic(BasicType);
        is_basic_array_type, read_basic_array_type => BasicArray(BasicArrayType);
        is_fixed_size_basic_array_type, read_fixed_size_basic_array_type
            => FixedSizeBasicArray(FixedSizeBasicArrayType);
        is_array_type, read_array_type => Array(ArrayType<'a>);
        is_fixed_size_array_type, read_fixed_size_array_type
            => FixedSizeArray(FixedSizeArrayType<'a>);
        is_tuple_type, read_tuple_type => Tuple(TupleType<'a>);
        is_adapted_type, read_adapted_type => Adapted(AdaptedType<'a>);
        is_type_list_type, read_type_list_type => TypeList(TypeListType<'a>);
        is_optional_type, read_optional_type => Optional(OptionalType<'a>);
    }
}

impl<'a> Iterator for DescriptorCursor<'a> {
    type Item = Result<Entry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }
}
