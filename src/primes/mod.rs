//! Primality oracle and prime accumulation
//!
//! The oracle is a pure trial-division test. `PrimeTally` is the checked
//! sum/count accumulator every worker keeps on its own stack.

pub mod oracle;

pub use oracle::{is_prime, is_prime_u64};

use crate::error::{ErrorCode, PrimesumError, Result};
use serde::Serialize;

/// Running sum and count of primes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimeTally {
    pub sum: u64,
    pub count: u64,
}

impl PrimeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one prime to the tally, failing instead of wrapping
    pub fn record(&mut self, prime: u64) -> Result<()> {
        self.sum = self.sum.checked_add(prime).ok_or_else(|| {
            PrimesumError::overflow(
                ErrorCode::OVERFLOW_WORKER_SUM,
                format!("adding {} to sum {} exceeds u64", prime, self.sum),
                None,
            )
        })?;
        self.count = self.count.checked_add(1).ok_or_else(|| {
            PrimesumError::overflow(ErrorCode::OVERFLOW_COUNT, "prime count exceeds u64", None)
        })?;
        Ok(())
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &PrimeTally) -> Result<()> {
        self.sum = self.sum.checked_add(other.sum).ok_or_else(|| {
            PrimesumError::overflow(
                ErrorCode::OVERFLOW_GRAND_SUM,
                format!("grand sum {} + {} exceeds u64", self.sum, other.sum),
                None,
            )
        })?;
        self.count = self.count.checked_add(other.count).ok_or_else(|| {
            PrimesumError::overflow(ErrorCode::OVERFLOW_COUNT, "prime count exceeds u64", None)
        })?;
        Ok(())
    }
}

/// Single-threaded scan of `[0, max_number)`
///
/// This is the sequential reference the parallel coordinator must agree with.
///
/// # Examples
///
/// ```
/// use primesum::primes::sequential_tally;
///
/// let tally = sequential_tally(20).unwrap();
/// assert_eq!(tally.count, 8);
/// assert_eq!(tally.sum, 77);
/// ```
pub fn sequential_tally(max_number: u64) -> Result<PrimeTally> {
    let mut tally = PrimeTally::new();
    for n in 0..max_number {
        if is_prime_u64(n) {
            tally.record(n)?;
        }
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_tally_small_ranges() {
        assert_eq!(sequential_tally(0).unwrap(), PrimeTally::new());
        assert_eq!(sequential_tally(1).unwrap(), PrimeTally::new());
        assert_eq!(sequential_tally(2).unwrap(), PrimeTally::new());
        assert_eq!(sequential_tally(3).unwrap(), PrimeTally { sum: 2, count: 1 });
    }

    #[test]
    fn test_sequential_tally_known_totals() {
        assert_eq!(sequential_tally(100).unwrap(), PrimeTally { sum: 1060, count: 25 });
        assert_eq!(
            sequential_tally(1000).unwrap(),
            PrimeTally {
                sum: 76127,
                count: 168
            }
        );
    }

    #[test]
    fn test_record_overflow_fails_fast() {
        let mut tally = PrimeTally {
            sum: u64::MAX - 1,
            count: 1,
        };
        let err = tally.record(3).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OVERFLOW_WORKER_SUM);
        // tally is left untouched by the failed record
        assert_eq!(tally.sum, u64::MAX - 1);
    }

    #[test]
    fn test_merge_overflow_fails_fast() {
        let mut grand = PrimeTally {
            sum: u64::MAX,
            count: 1,
        };
        let err = grand
            .merge(&PrimeTally { sum: 2, count: 1 })
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OVERFLOW_GRAND_SUM);
    }

    #[test]
    fn test_merge_adds_both_fields() {
        let mut grand = PrimeTally { sum: 10, count: 4 };
        grand.merge(&PrimeTally { sum: 67, count: 4 }).unwrap();
        assert_eq!(grand, PrimeTally { sum: 77, count: 8 });
    }
}
