use crate::data::{SampleRecord, Status};
use num_traits::Float;
use std::fmt::Display;
use std::str::FromStr;

/// Values at or above 2^52 have no fractional digits left to round.
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Round `value` to a fixed number of decimal places.
///
/// Rounds the exact binary value to the nearest decimal, so `1.0005` (stored
/// just below the midpoint) becomes `1.0`. Non-finite values and magnitudes
/// too large to carry decimals come back unchanged.
pub fn round_to<T>(value: T, decimals: u32) -> T
where
    T: Float + Display + FromStr,
{
    let Some(magnitude) = value.abs().to_f64() else {
        return value;
    };
    let scaled = magnitude * 10_f64.powi(decimals as i32);
    if !scaled.is_finite() || scaled >= INTEGRAL_LIMIT {
        return value;
    }
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Share of `part` in `total`, as a percentage. Zero when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Running sums and counts of the two status groups of one gene.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupSums {
    pub normal_sum: f64,
    pub normal_count: usize,
    pub case_sum: f64,
    pub case_count: usize,
}

impl GroupSums {
    pub fn normal_mean(&self) -> Option<f64> {
        (self.normal_count > 0).then(|| self.normal_sum / self.normal_count as f64)
    }

    pub fn case_mean(&self) -> Option<f64> {
        (self.case_count > 0).then(|| self.case_sum / self.case_count as f64)
    }
}

/// Accumulate per-group sums over a gene's records in a single pass.
pub fn accumulate_group_sums<'a, I>(records: I) -> GroupSums
where
    I: IntoIterator<Item = SampleRecord<'a>>,
{
    let mut sums = GroupSums::default();
    for record in records {
        match record.status {
            Status::Normal => {
                sums.normal_sum += record.value;
                sums.normal_count += 1;
            }
            Status::Case => {
                sums.case_sum += record.value;
                sums.case_count += 1;
            }
        }
    }
    sums
}
