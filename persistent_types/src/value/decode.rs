use crate::descriptor::{DescriptorCursor, Entry};
use crate::format::{read_presence, PersistRead};
use crate::io::BinaryRead;
use crate::types::{BasicTypeId, Char, Currency, DateTime, Guid, TimeSpan, WChar};
use crate::value::Value;
use crate::{Error, Result};

/// Deepest nesting of descriptor entries accepted while decoding.
pub const MAX_DEPTH: usize = 64;

impl Value {
    /// Decodes every argument of a payload, given the root descriptor of its
    /// argument list.
    pub fn decode_args<R: BinaryRead + ?Sized>(descriptor: &[u8], r: &mut R) -> Result<Vec<Value>> {
        let mut root = DescriptorCursor::new(descriptor)?;
        let args = root.read_type_list_type()?;
        Self::decode_members(args.cursor(), r, 1)
    }

    /// Decodes the payload of one descriptor entry.
    pub fn decode<R: BinaryRead + ?Sized>(entry: &Entry<'_>, r: &mut R) -> Result<Value> {
        Self::decode_at(entry, r, 0)
    }

    fn decode_at<R: BinaryRead + ?Sized>(entry: &Entry<'_>, r: &mut R, depth: usize) -> Result<Value> {
        check_depth(depth)?;
        let val = match entry {
            Entry::Basic(t) => Self::decode_basic(t.basic_type_id(), r)?,
            Entry::BasicArray(t) => Self::decode_basic_array(t.basic_type_id(), r)?,
            Entry::FixedSizeBasicArray(t) => {
                r.check_len(t.array_size(), t.basic_type_id().byte_size())?;
                let vals = (0..t.array_size())
                    .map(|_| Self::decode_basic(t.basic_type_id(), r))
                    .collect::<Result<_>>()?;
                Value::Array(vals)
            }
            Entry::Array(t) => {
                let elem = element_entry(t.cursor())?;
                let len = r.read_len(min_payload_size(&elem, depth + 1)?)?;
                Value::Array(Self::decode_repeated(&elem, len, r, depth + 1)?)
            }
            Entry::FixedSizeArray(t) => {
                let elem = element_entry(t.cursor())?;
                r.check_len(t.array_size(), min_payload_size(&elem, depth + 1)?)?;
                Value::Array(Self::decode_repeated(&elem, t.array_size(), r, depth + 1)?)
            }
            Entry::Tuple(t) => Value::Tuple(Self::decode_members(t.cursor(), r, depth + 1)?),
            Entry::TypeList(t) => Value::Tuple(Self::decode_members(t.cursor(), r, depth + 1)?),
            Entry::Adapted(t) => Value::Adapted(Self::decode_members(t.cursor(), r, depth + 1)?),
            Entry::Optional(t) => {
                let elem = element_entry(t.cursor())?;
                let val = match read_presence(r)? {
                    false => None,
                    true => Some(Box::new(Self::decode_at(&elem, r, depth + 1)?)),
                };
                Value::Optional(val)
            }
        };
        Ok(val)
    }

    fn decode_members<R: BinaryRead + ?Sized>(
        members: DescriptorCursor<'_>,
        r: &mut R,
        depth: usize,
    ) -> Result<Vec<Value>> {
        members
            .map(|entry| entry.and_then(|entry| Self::decode_at(&entry, r, depth)))
            .collect()
    }

    fn decode_repeated<R: BinaryRead + ?Sized>(
        elem: &Entry<'_>,
        len: usize,
        r: &mut R,
        depth: usize,
    ) -> Result<Vec<Value>> {
        (0..len).map(|_| Self::decode_at(elem, r, depth)).collect()
    }

    fn decode_basic<R: BinaryRead + ?Sized>(id: BasicTypeId, r: &mut R) -> Result<Value> {
        let val = match id {
            BasicTypeId::Boolean => Value::Bool(bool::read_new(r)?),
            BasicTypeId::Char => Value::Char(Char::read_new(r)?),
            BasicTypeId::SByte => Value::SByte(i8::read_new(r)?),
            BasicTypeId::Byte => Value::Byte(u8::read_new(r)?),
            BasicTypeId::WChar => Value::WChar(WChar::read_new(r)?),
            BasicTypeId::Int16 => Value::Int16(i16::read_new(r)?),
            BasicTypeId::UInt16 => Value::UInt16(u16::read_new(r)?),
            BasicTypeId::Int32 => Value::Int32(i32::read_new(r)?),
            BasicTypeId::UInt32 => Value::UInt32(u32::read_new(r)?),
            BasicTypeId::Int64 => Value::Int64(i64::read_new(r)?),
            BasicTypeId::UInt64 => Value::UInt64(u64::read_new(r)?),
            BasicTypeId::Single => Value::Single(f32::read_new(r)?),
            BasicTypeId::Double => Value::Double(f64::read_new(r)?),
            BasicTypeId::TimeSpan => Value::TimeSpan(TimeSpan::read_new(r)?),
            BasicTypeId::DateTime => Value::DateTime(DateTime::read_new(r)?),
            BasicTypeId::Currency => Value::Currency(Currency::read_new(r)?),
            BasicTypeId::Guid => Value::Guid(Guid::read_new(r)?),
        };
        Ok(val)
    }

    fn decode_basic_array<R: BinaryRead + ?Sized>(id: BasicTypeId, r: &mut R) -> Result<Value> {
        let val = match id {
            BasicTypeId::Boolean => {
                let bits = Vec::<bool>::read_new(r)?;
                Value::Array(bits.into_iter().map(Value::Bool).collect())
            }
            BasicTypeId::Byte => Value::Bytes(Vec::<u8>::read_new(r)?),
            // Same layout as a byte sequence.
            BasicTypeId::Char => match String::from_utf8(Vec::<u8>::read_new(r)?) {
                Ok(s) => Value::Str(s),
                Err(e) => Value::Array(
                    e.into_bytes()
                        .into_iter()
                        .map(|b| Value::Char(Char::from(b)))
                        .collect(),
                ),
            },
            _ => {
                let len = r.read_len(id.byte_size())?;
                let vals = (0..len)
                    .map(|_| Self::decode_basic(id, r))
                    .collect::<Result<_>>()?;
                Value::Array(vals)
            }
        };
        Ok(val)
    }
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::MalformedDescriptor(format!(
            "Entries nested deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

fn element_entry<'a>(mut element: DescriptorCursor<'a>) -> Result<Entry<'a>> {
    element
        .read_entry()?
        .ok_or_else(|| Error::MalformedDescriptor(String::from("Empty element descriptor")))
}

/// The fewest payload bytes any value of this entry can occupy.
fn min_payload_size(entry: &Entry<'_>, depth: usize) -> Result<usize> {
    fn members_min(mut members: DescriptorCursor<'_>, depth: usize) -> Result<usize> {
        members.try_fold(0usize, |total, entry| {
            Ok(total.saturating_add(min_payload_size(&entry?, depth)?))
        })
    }

    check_depth(depth)?;
    let size = match entry {
        Entry::Basic(t) => t.basic_type_id().byte_size(),
        Entry::FixedSizeBasicArray(t) => {
            t.basic_type_id().byte_size().saturating_mul(t.array_size())
        }
        Entry::BasicArray(_) | Entry::Array(_) | Entry::Optional(_) => 1,
        Entry::FixedSizeArray(t) => {
            let elem = element_entry(t.cursor())?;
            min_payload_size(&elem, depth + 1)?.saturating_mul(t.array_size())
        }
        Entry::Tuple(t) => members_min(t.cursor(), depth + 1)?,
        Entry::Adapted(t) => members_min(t.cursor(), depth + 1)?,
        Entry::TypeList(t) => members_min(t.cursor(), depth + 1)?,
    };
    Ok(size)
}
