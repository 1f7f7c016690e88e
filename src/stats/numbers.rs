use itertools::{Itertools, MinMaxResult};

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a percentage with two decimals; 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let sorted = values.into_iter().sorted_by(f64::total_cmp).collect_vec();
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        len if len % 2 == 0 => Some((sorted[mid - 1] + sorted[mid]) / 2.0),
        _ => Some(sorted[mid]),
    }
}

pub fn min_max<I, T>(values: I) -> (Option<T>, Option<T>)
where
    I: IntoIterator<Item = T>,
    T: PartialOrd + Copy,
{
    match values.into_iter().minmax() {
        MinMaxResult::NoElements => (None, None),
        MinMaxResult::OneElement(value) => (Some(value), Some(value)),
        MinMaxResult::MinMax(min, max) => (Some(min), Some(max)),
    }
}
