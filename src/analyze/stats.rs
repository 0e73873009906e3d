/// Numeric types that can be summarized.
pub trait Sample: Copy + PartialOrd {
    fn as_f64(self) -> f64;
}

impl Sample for u64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for i64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

/// Range and arithmetic mean of a non-empty set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<T> {
    pub min: T,
    pub max: T,
    pub mean: f64,
}

/// Summarize `values` in one pass. Returns `None` for an empty input.
pub fn summarize<T: Sample>(values: impl IntoIterator<Item = T>) -> Option<Summary<T>> {
    let mut iter = values.into_iter();
    let first = iter.next()?;

    let mut min = first;
    let mut max = first;
    let mut sum = first.as_f64();
    let mut count = 1usize;
    for v in iter {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
        sum += v.as_f64();
        count += 1;
    }

    Some(Summary {
        min,
        max,
        mean: sum / count as f64,
    })
}

/// Differences between adjacent sequence numbers, in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct GapStats {
    pub gaps: Vec<i64>,
    pub summary: Summary<i64>,
}

/// Successive differences `seq[i + 1] - seq[i]`.
///
/// Gaps are signed so that reordered or restarted sequences show up as
/// negative values. Returns `None` with fewer than two sequence numbers.
pub fn sequence_gaps(sequences: &[u64]) -> Option<GapStats> {
    let gaps: Vec<i64> = sequences
        .windows(2)
        .map(|w| w[1].wrapping_sub(w[0]) as i64)
        .collect();
    let summary = summarize(gaps.iter().copied())?;
    Some(GapStats { gaps, summary })
}

/// How many values out of a total were exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroCount {
    pub zeros: usize,
    pub total: usize,
}

impl ZeroCount {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.zeros as f64 / self.total as f64
    }
}

pub fn zero_count(values: impl IntoIterator<Item = i64>) -> ZeroCount {
    let mut count = ZeroCount { zeros: 0, total: 0 };
    for v in values {
        count.total += 1;
        if v == 0 {
            count.zeros += 1;
        }
    }
    count
}

/// Passing checks out of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRate {
    pub passed: usize,
    pub total: usize,
}

impl PassRate {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64 * 100.0
    }
}

pub fn pass_rate(results: impl IntoIterator<Item = bool>) -> PassRate {
    let mut rate = PassRate {
        passed: 0,
        total: 0,
    };
    for passed in results {
        rate.total += 1;
        if passed {
            rate.passed += 1;
        }
    }
    rate
}
