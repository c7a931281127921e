use super::helpers::TimeseriesPoint;
use anyhow::Result;
use persistent_types::dispatch;
use persistent_types::io::{BufferReader, MemoryStream};
use persistent_types::value::{self, Printer, Value};
use persistent_types::{Currency, DateTime, Descriptor};

pub fn test_print_from_raw_bytes() -> Result<()> {
    let point = TimeseriesPoint {
        at: DateTime::from_ticks(-3),
        seq: 9,
        value: 0.5,
    };
    let label = String::from("cpu");
    let args = (
        &label,
        &point,
        &vec![true, false],
        &None::<i32>,
        &Some(Currency::from_scaled(12_345)),
    );

    /* Only the bytes travel. */
    let raw_desc = dispatch::descriptor_of(&args).as_bytes().to_vec();
    let mut stream = MemoryStream::new();
    dispatch::write(&mut stream, &args)?;
    let payload = stream.to_vec();

    let desc = Descriptor::from_bytes(raw_desc.clone())?;
    let vals = Value::decode_args(&desc, &mut BufferReader::new(&payload))?;
    assert_eq!(vals.len(), 5);
    assert_eq!(
        vals[1],
        Value::Adapted(vec![
            Value::DateTime(DateTime::from_ticks(-3)),
            Value::UInt64(9),
            Value::Double(0.5),
        ])
    );

    let printer = Printer::new("{}: {} bits={} none={} cost={}", &raw_desc)?;
    let s = printer.print(&mut BufferReader::new(&payload))?;
    assert_eq!(s, "cpu: (-3, 9, 0.5) bits=[true, false] none=None cost=1.2345");

    assert_eq!(value::render("{{{}}}", &(&point.seq,))?, "{9}");

    Ok(())
}
