use super::helpers::TimeseriesPoint;
use anyhow::Result;
use persistent_types::dispatch;
use persistent_types::{
    is_read_target, is_write_source, BasicTypeId, CompositeTypeId, Descriptor, Entry, EntryKind,
    Error,
};
use std::collections::HashMap;

pub fn test_descriptor_shapes() -> Result<()> {
    /* An adapted type as the only argument. */
    let desc = Descriptor::of::<(TimeseriesPoint,)>();
    let mut root = desc.cursor()?;
    assert_eq!(root.size(), 1);

    let args = root.read_type_list_type()?;
    assert_eq!(args.member_count(), 1);
    assert!(root.read_entry()?.is_none());

    let mut args = args.cursor();
    assert!(args.is_adapted_type());
    let point = args.read_adapted_type()?;
    assert_eq!(point.member_count(), 3);
    assert_eq!(point.tuple_type_id(), CompositeTypeId::Adapted);

    let fields = point
        .cursor()
        .map(|entry| {
            entry.and_then(|entry| match entry {
                Entry::Basic(t) => Ok(t.basic_type_id()),
                other => Err(Error::StructuralMismatch {
                    expected: EntryKind::Basic,
                    found: other.kind(),
                }),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        fields,
        [BasicTypeId::DateTime, BasicTypeId::UInt64, BasicTypeId::Double]
    );

    /* A growable sequence of adapted values. */
    let desc = Descriptor::of_type::<Vec<TimeseriesPoint>>();
    let mut cursor = desc.cursor()?;
    let array = cursor.read_array_type()?;
    let mut element = array.cursor();
    assert_eq!(element.size(), 1);
    assert_eq!(element.read_adapted_type()?.member_count(), 3);

    /* A fixed array of adapted values. */
    let desc = Descriptor::of_type::<[TimeseriesPoint; 4]>();
    let mut cursor = desc.cursor()?;
    assert!(!cursor.is_array_type());
    let array = cursor.read_fixed_size_array_type()?;
    assert_eq!(array.array_size(), 4);
    assert!(array.cursor().is_adapted_type());

    /* Mismatched reads leave the cursor in place. */
    let desc = Descriptor::of::<(String, [i32; 3], Option<TimeseriesPoint>)>();
    let mut root = desc.cursor()?;
    let mut args = root.read_type_list_type()?.cursor();
    let offset = args.offset();
    assert!(matches!(
        args.read_basic_type(),
        Err(Error::StructuralMismatch {
            expected: EntryKind::Basic,
            found: EntryKind::BasicArray,
        })
    ));
    assert_eq!(args.offset(), offset);

    let string = args.read_basic_array_type()?;
    assert_eq!(string.basic_type_id(), BasicTypeId::Char);
    let ints = args.read_fixed_size_basic_array_type()?;
    assert_eq!((ints.basic_type_id(), ints.array_size()), (BasicTypeId::Int32, 3));
    let optional = args.read_optional_type()?;
    assert!(optional.cursor().is_adapted_type());
    assert!(args.read_entry()?.is_none());

    /* The descriptor survives a trip through raw bytes. */
    let copy = Descriptor::from_bytes(desc.as_bytes().to_vec())?;
    assert_eq!(copy, desc);
    assert_eq!(
        Descriptor::cached::<(String, [i32; 3], Option<TimeseriesPoint>)>(),
        &desc
    );

    /* Fixed sizes. */
    assert!(dispatch::is_fixed_size::<(TimeseriesPoint, [TimeseriesPoint; 4])>());
    assert!(!dispatch::is_fixed_size::<(TimeseriesPoint, Option<u8>)>());
    assert_eq!(
        dispatch::fixed_buffer_size::<(TimeseriesPoint, [TimeseriesPoint; 4])>(),
        24 * 5
    );

    Ok(())
}

pub fn test_capabilities() {
    assert!(is_read_target!(TimeseriesPoint));
    assert!(is_write_source!(TimeseriesPoint));
    assert!(is_read_target!(Vec<Option<TimeseriesPoint>>));

    assert!(is_write_source!(str));
    assert!(is_write_source!(&[TimeseriesPoint]));
    assert!(!is_read_target!(&str));
    assert!(!is_read_target!(&[TimeseriesPoint]));

    assert!(!is_write_source!(HashMap<u8, u8>));
    assert!(!is_read_target!(HashMap<u8, u8>));
}
