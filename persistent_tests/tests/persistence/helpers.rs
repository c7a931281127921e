use persistent_types::{persistent_adapted, DateTime};
use rand::Rng;

#[derive(PartialEq, Clone, Default, Debug)]
pub struct TimeseriesPoint {
    pub at: DateTime,
    pub seq: u64,
    pub value: f64,
}
persistent_adapted!(TimeseriesPoint {
    at: DateTime,
    seq: u64,
    value: f64,
});

pub fn gen_points(rng: &mut impl Rng, count: usize) -> Vec<TimeseriesPoint> {
    let start = rng.gen_range(0..1_000_000i64);
    (0..count)
        .map(|i| TimeseriesPoint {
            at: DateTime::from_ticks(start + i as i64 * 10_000),
            seq: i as u64,
            value: rng.gen_range(-1.0e6..1.0e6),
        })
        .collect()
}

pub fn gen_label(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(0..40);
    (0..len).map(|_| rng.gen_range('a'..='z')).collect()
}

pub fn gen_bits(rng: &mut impl Rng) -> Vec<bool> {
    let len = rng.gen_range(0..30);
    (0..len).map(|_| rng.gen()).collect()
}
