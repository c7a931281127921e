use super::helpers::{gen_bits, gen_label, gen_points, TimeseriesPoint};
use anyhow::{anyhow, Result};
use itertools::Itertools;
use log::debug;
use persistent_types::dispatch;
use persistent_types::io::{MemoryStream, MemoryStreamOptions, Stream};
use persistent_types::DateTime;
use rand::Rng;
use std::num::NonZeroUsize;

type Record = (
    String,
    (i32, Option<TimeseriesPoint>),
    Vec<(u8, String)>,
    Vec<bool>,
    Vec<TimeseriesPoint>,
);

fn gen_record(rng: &mut impl Rng) -> Record {
    let point = gen_points(rng, 1).pop().filter(|_| rng.gen_bool(0.5));
    let tagged = (0..rng.gen_range(0..5))
        .map(|i| (i as u8, gen_label(rng)))
        .collect();
    let points_ct = rng.gen_range(0..8);
    (
        gen_label(rng),
        (rng.gen(), point),
        tagged,
        gen_bits(rng),
        gen_points(rng, points_ct),
    )
}

pub fn test_fixed_buffer_layout() -> Result<()> {
    type Args = (bool, TimeseriesPoint, [u16; 2]);
    const SIZE: usize = dispatch::fixed_buffer_size::<Args>();
    assert_eq!(SIZE, 1 + 24 + 4);

    let point = TimeseriesPoint {
        at: DateTime::from_ticks(-3),
        seq: 9,
        value: 0.5,
    };
    let mut buf = [0u8; SIZE];
    let w_len = dispatch::write_fixed(&mut buf, &(&true, &point, &[1u16, 2]))?;
    assert_eq!(*w_len, SIZE);

    assert_eq!(buf[0], 1);
    assert_eq!(&buf[1..9], &(-3i64).to_le_bytes());
    assert_eq!(&buf[9..17], &9u64.to_le_bytes());
    assert_eq!(&buf[17..25], &0.5f64.to_le_bytes());
    assert_eq!(&buf[25..29], &[1, 0, 2, 0]);

    let (mut flag, mut read_point, mut pair) = (false, TimeseriesPoint::default(), [0u16; 2]);
    let r_len = dispatch::read_fixed(&buf, &mut (&mut flag, &mut read_point, &mut pair))?;
    assert_eq!(*r_len, SIZE);
    assert_eq!((flag, read_point, pair), (true, point, [1, 2]));

    Ok(())
}

pub fn test_mixed_stream_round_trip() -> Result<()> {
    let mut rng = rand::thread_rng();

    let mut records = vec![(
        String::new(),
        (0, None),
        vec![],
        vec![],
        vec![],
    )];
    records.extend((0..30).map(|_| gen_record(&mut rng)));

    // Small blocks, so that most records straddle a block boundary.
    let block_size = NonZeroUsize::new(7).ok_or_else(|| anyhow!("zero block size"))?;
    let mut stream =
        MemoryStream::with_options(MemoryStreamOptions::default().with_block_size(block_size));

    let mut w_lens = vec![];
    for (label, pair, tagged, bits, points) in records.iter() {
        let args = (label, pair, tagged, bits, points);
        let w_len = dispatch::write(&mut stream, &args)?;
        assert_eq!(*w_len, dispatch::buffer_size(&args));
        w_lens.push(*w_len);
    }
    let total: usize = w_lens.iter().sum();
    assert_eq!(stream.len(), total);
    debug!(
        "Wrote {} records in {total} bytes over {} blocks",
        records.len(),
        stream.block_count()
    );

    stream.set_position(0)?;
    for (record, w_len) in records.iter().zip_eq(w_lens) {
        let mut label = String::from("stale");
        let mut pair = (-1i32, None::<TimeseriesPoint>);
        let mut tagged: Vec<(u8, String)> = vec![(0, String::from("stale"))];
        let mut bits = vec![true];
        let mut points = vec![];
        let r_len = dispatch::read(
            &mut stream,
            &mut (&mut label, &mut pair, &mut tagged, &mut bits, &mut points),
        )?;
        assert_eq!(*r_len, w_len);
        assert_eq!(&(label, pair, tagged, bits, points), record);
    }
    assert_eq!(stream.position()?, total as u64);

    let mut extra = 0u8;
    assert!(dispatch::read(&mut stream, &mut (&mut extra,)).is_err());

    Ok(())
}
