//! Pure functions for dividing `[0, max_number)` between workers
//!
//! Every strategy yields one assignment per worker, in ascending id order,
//! whose half-open intervals are pairwise disjoint and cover the range
//! exactly. A worker may own an empty interval when there are more workers
//! than numbers.

use crate::error::{ErrorCode, PrimesumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// How chunk boundaries are computed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionStrategy {
    /// `floor((i + 1) * max / n)` computed in `f64`; the last worker ends at `max`
    #[default]
    Float,
    /// `max / n` numbers per worker; the last worker also takes the remainder
    RemainderLast,
    /// `max / n` numbers per worker; the first `max % n` workers take one more
    Balanced,
}

impl PartitionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::RemainderLast => "remainder-last",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionStrategy {
    type Err = PrimesumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "remainder-last" | "remainder_last" => Ok(Self::RemainderLast),
            "balanced" => Ok(Self::Balanced),
            other => Err(PrimesumError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "unknown partition strategy '{}' (expected float, remainder-last or balanced)",
                    other
                ),
                None,
            )),
        }
    }
}

/// One worker's slice of the range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkAssignment {
    pub id: usize,
    pub low: u64,
    pub high: u64,
}

impl WorkAssignment {
    pub fn range(&self) -> Range<u64> {
        self.low..self.high
    }

    pub fn len(&self) -> u64 {
        self.high - self.low
    }

    pub fn is_empty(&self) -> bool {
        self.low == self.high
    }
}

/// Build the assignment table for `num_threads` workers over `[0, max_number)`
///
/// The table is allocated up front with a fallible reservation so that an
/// oversized request surfaces as a resource exhaustion error instead of an
/// abort.
///
/// # Examples
///
/// ```
/// use primesum::partition::{plan_assignments, PartitionStrategy};
///
/// let plan = plan_assignments(3, 10, PartitionStrategy::Float).unwrap();
/// let bounds: Vec<_> = plan.iter().map(|a| (a.low, a.high)).collect();
/// assert_eq!(bounds, vec![(0, 3), (3, 6), (6, 10)]);
/// ```
pub fn plan_assignments(
    num_threads: usize,
    max_number: u64,
    strategy: PartitionStrategy,
) -> Result<Vec<WorkAssignment>> {
    if num_threads == 0 {
        return Err(PrimesumError::invalid_argument_with_code(
            ErrorCode::ARG_NOT_POSITIVE,
            "at least one worker is required",
            Some("num_threads".to_string()),
        ));
    }

    let mut assignments = Vec::new();
    assignments.try_reserve_exact(num_threads)?;

    let mut low = 0;
    for id in 0..num_threads {
        let high = if id == num_threads - 1 {
            max_number
        } else {
            boundary(strategy, id, num_threads, max_number).clamp(low, max_number)
        };
        assignments.push(WorkAssignment { id, low, high });
        low = high;
    }

    Ok(assignments)
}

/// Upper bound of worker `id`, for every worker except the last
fn boundary(strategy: PartitionStrategy, id: usize, num_threads: usize, max_number: u64) -> u64 {
    // Both values fit in u64; usize is at most 64 bits on supported targets.
    let workers = num_threads as u64;
    let ordinal = id as u64 + 1;

    match strategy {
        PartitionStrategy::Float => {
            let chunk_size = max_number as f64 / num_threads as f64;
            // `as` truncates toward zero and saturates, which is the intended floor here
            (ordinal as f64 * chunk_size) as u64
        }
        PartitionStrategy::RemainderLast => ordinal * (max_number / workers),
        PartitionStrategy::Balanced => {
            let base = max_number / workers;
            let extra = max_number % workers;
            ordinal * base + ordinal.min(extra)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds(plan: &[WorkAssignment]) -> Vec<(u64, u64)> {
        plan.iter().map(|a| (a.low, a.high)).collect()
    }

    fn assert_exact_cover(plan: &[WorkAssignment], num_threads: usize, max_number: u64) {
        assert_eq!(plan.len(), num_threads);
        let mut expected_low = 0;
        for (i, a) in plan.iter().enumerate() {
            assert_eq!(a.id, i);
            assert_eq!(a.low, expected_low, "gap or overlap before worker {}", i);
            assert!(a.low <= a.high);
            expected_low = a.high;
        }
        assert_eq!(expected_low, max_number);
    }

    #[test]
    fn test_float_boundaries_truncate_scaled_ordinal() {
        let plan = plan_assignments(4, 20, PartitionStrategy::Float).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 5), (5, 10), (10, 15), (15, 20)]);

        // 10 / 3 = 3.33..; boundaries floor to 3 and 6
        let plan = plan_assignments(3, 10, PartitionStrategy::Float).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 3), (3, 6), (6, 10)]);

        // 7 / 4 = 1.75; boundaries floor to 1, 3, 5
        let plan = plan_assignments(4, 7, PartitionStrategy::Float).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 1), (1, 3), (3, 5), (5, 7)]);
    }

    #[test]
    fn test_remainder_last_gives_leftover_to_last_worker() {
        let plan = plan_assignments(3, 10, PartitionStrategy::RemainderLast).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 3), (3, 6), (6, 10)]);

        let plan = plan_assignments(4, 7, PartitionStrategy::RemainderLast).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 1), (1, 2), (2, 3), (3, 7)]);
    }

    #[test]
    fn test_balanced_spreads_remainder() {
        let plan = plan_assignments(4, 7, PartitionStrategy::Balanced).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 2), (2, 4), (4, 6), (6, 7)]);

        let plan = plan_assignments(3, 10, PartitionStrategy::Balanced).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn test_more_workers_than_numbers() {
        for strategy in [
            PartitionStrategy::Float,
            PartitionStrategy::RemainderLast,
            PartitionStrategy::Balanced,
        ] {
            let plan = plan_assignments(8, 3, strategy).unwrap();
            assert_exact_cover(&plan, 8, 3);
            assert!(plan.iter().any(|a| a.is_empty()));
            assert_eq!(plan.iter().map(|a| a.len()).sum::<u64>(), 3);
        }
    }

    #[test]
    fn test_single_worker_owns_everything() {
        let plan = plan_assignments(1, 1000, PartitionStrategy::Float).unwrap();
        assert_eq!(bounds(&plan), vec![(0, 1000)]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = plan_assignments(0, 10, PartitionStrategy::Float).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ARG_NOT_POSITIVE);
    }

    #[test]
    fn test_huge_range_stays_within_bounds() {
        let max = i64::MAX as u64;
        for strategy in [
            PartitionStrategy::Float,
            PartitionStrategy::RemainderLast,
            PartitionStrategy::Balanced,
        ] {
            let plan = plan_assignments(7, max, strategy).unwrap();
            assert_exact_cover(&plan, 7, max);
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("float".parse::<PartitionStrategy>().unwrap(), PartitionStrategy::Float);
        assert_eq!(
            "Remainder-Last".parse::<PartitionStrategy>().unwrap(),
            PartitionStrategy::RemainderLast
        );
        assert_eq!(
            " balanced ".parse::<PartitionStrategy>().unwrap(),
            PartitionStrategy::Balanced
        );
        let err = "sieve".parse::<PartitionStrategy>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }

    proptest! {
        #[test]
        fn test_every_strategy_covers_the_range(
            num_threads in 1usize..64,
            max_number in 1u64..100_000,
        ) {
            for strategy in [
                PartitionStrategy::Float,
                PartitionStrategy::RemainderLast,
                PartitionStrategy::Balanced,
            ] {
                let plan = plan_assignments(num_threads, max_number, strategy).unwrap();
                prop_assert_eq!(plan.len(), num_threads);
                prop_assert_eq!(plan[0].low, 0);
                prop_assert_eq!(plan[num_threads - 1].high, max_number);
                for pair in plan.windows(2) {
                    prop_assert_eq!(pair[0].high, pair[1].low);
                    prop_assert!(pair[0].id < pair[1].id);
                }
                prop_assert!(plan.iter().all(|a| a.low <= a.high));
            }
        }
    }
}
