//! Per-worker range scan

use super::cancellation::CancellationToken;
use crate::error::{ErrorCode, PrimesumError, Result};
use crate::partition::WorkAssignment;
use crate::primes::{is_prime_u64, PrimeTally};
use serde::Serialize;
use tracing::trace;

/// What a worker hands back through `join`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub id: usize,
    pub low: u64,
    pub high: u64,
    pub local_sum: u64,
    pub local_count: u64,
}

impl WorkerReport {
    pub fn tally(&self) -> PrimeTally {
        PrimeTally {
            sum: self.local_sum,
            count: self.local_count,
        }
    }
}

/// Scan `[low, high)` in ascending order and tally the primes
///
/// The tally lives on this worker's stack for the whole scan. Nothing else
/// can observe it until the report is returned.
pub fn scan_assignment(
    assignment: WorkAssignment,
    cancel: &CancellationToken,
) -> Result<WorkerReport> {
    scan_assignment_from(assignment, PrimeTally::new(), cancel)
}

/// Scan `[low, high)` continuing from an existing tally
pub fn scan_assignment_from(
    assignment: WorkAssignment,
    mut tally: PrimeTally,
    cancel: &CancellationToken,
) -> Result<WorkerReport> {
    for n in assignment.range() {
        if cancel.is_cancelled() {
            trace!(worker = assignment.id, at = n, "worker observed cancellation");
            return Err(PrimesumError::cancelled(
                ErrorCode::CANCELLED_GENERIC,
                format!("worker {} stopped at {}", assignment.id, n),
            ));
        }
        if is_prime_u64(n) {
            tally
                .record(n)
                .map_err(|e| e.with_worker(assignment.id))?;
        }
    }

    Ok(WorkerReport {
        id: assignment.id,
        low: assignment.low,
        high: assignment.high,
        local_sum: tally.sum,
        local_count: tally.count,
    })
}
