//! Reduction of worker reports into the run result

use super::worker::WorkerReport;
use crate::error::Result;
use crate::partition::PartitionStrategy;
use crate::primes::PrimeTally;
use serde::Serialize;
use std::time::Duration;

/// Outcome of a completed run
///
/// Only built once every worker has been joined; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub num_threads: usize,
    pub max_number: u64,
    pub strategy: PartitionStrategy,
    pub grand_sum: u64,
    pub grand_count: u64,
    pub workers: Vec<WorkerReport>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunResult {
    pub fn tally(&self) -> PrimeTally {
        PrimeTally {
            sum: self.grand_sum,
            count: self.grand_count,
        }
    }
}

/// Sum the per-worker tallies in worker-id order
///
/// Addition is checked; an overflowing grand sum is an error, not a wrap.
pub fn reduce_reports(reports: &[WorkerReport]) -> Result<PrimeTally> {
    let mut grand = PrimeTally::new();
    for report in reports {
        grand.merge(&report.tally())?;
    }
    Ok(grand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn report(id: usize, local_sum: u64, local_count: u64) -> WorkerReport {
        WorkerReport {
            id,
            low: 0,
            high: 0,
            local_sum,
            local_count,
        }
    }

    #[test]
    fn test_reduce_sums_all_workers() {
        let reports = vec![report(0, 17, 4), report(1, 0, 0), report(2, 60, 4)];
        let grand = reduce_reports(&reports).unwrap();
        assert_eq!(grand, PrimeTally { sum: 77, count: 8 });
    }

    #[test]
    fn test_reduce_empty() {
        assert_eq!(reduce_reports(&[]).unwrap(), PrimeTally::new());
    }

    #[test]
    fn test_reduce_overflow_is_an_error() {
        let reports = vec![report(0, u64::MAX, 1), report(1, 1, 1)];
        let err = reduce_reports(&reports).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OVERFLOW_GRAND_SUM);
    }
}
