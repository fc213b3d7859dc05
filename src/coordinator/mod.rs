//! Partition-and-aggregate coordinator
//!
//! Validates the request, plans one [`WorkAssignment`] per worker, runs every
//! worker on its own scoped thread, joins all of them, and only then reduces
//! their reports into a [`RunResult`].
//!
//! Accumulators are never shared: each worker owns its tally and hands it
//! back by value through `join`. The join barrier is the only
//! synchronization point between the coordinator and the workers.

pub mod aggregation;
pub mod cancellation;
pub mod worker;

pub use aggregation::{reduce_reports, RunResult};
pub use cancellation::CancellationToken;
pub use worker::{scan_assignment, scan_assignment_from, WorkerReport};

use crate::error::{ErrorCode, PrimesumError, Result};
use crate::partition::{plan_assignments, PartitionStrategy, WorkAssignment};
use crate::report::{Reporter, SilentReporter};
use std::any::Any;
use std::io;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Default cap on the number of workers a single run may spawn
pub const DEFAULT_MAX_THREADS: usize = 4096;

/// Tunables for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub strategy: PartitionStrategy,
    pub max_threads: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            strategy: PartitionStrategy::default(),
            max_threads: DEFAULT_MAX_THREADS,
        }
    }
}

/// A validated `(num_threads, max_number)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    pub num_threads: usize,
    pub max_number: u64,
}

impl RunRequest {
    /// Check both values are positive and the worker count is within `max_threads`
    pub fn validate(num_threads: i64, max_number: i64, max_threads: usize) -> Result<Self> {
        let num_threads = positive("num_threads", num_threads)?;
        let max_number = positive("max_number", max_number)?;

        let num_threads = usize::try_from(num_threads).map_err(|_| {
            PrimesumError::invalid_argument_with_code(
                ErrorCode::ARG_OUT_OF_RANGE,
                format!("{} workers cannot be addressed on this platform", num_threads),
                Some("num_threads".to_string()),
            )
        })?;

        if num_threads > max_threads {
            return Err(PrimesumError::invalid_argument_with_code(
                ErrorCode::ARG_TOO_MANY_THREADS,
                format!(
                    "{} workers requested but the limit is {} (raise max_threads to allow more)",
                    num_threads, max_threads
                ),
                Some("num_threads".to_string()),
            ));
        }

        Ok(Self {
            num_threads,
            max_number,
        })
    }
}

fn positive(name: &str, value: i64) -> Result<u64> {
    if value < 1 {
        return Err(PrimesumError::invalid_argument_with_code(
            ErrorCode::ARG_NOT_POSITIVE,
            format!("must be a positive integer, got {}", value),
            Some(name.to_string()),
        ));
    }
    Ok(value.unsigned_abs())
}

/// The function each worker runs over its assignment
pub type ScanFn = fn(WorkAssignment, &CancellationToken) -> Result<WorkerReport>;

/// Runs worker pools over prime-counting requests
pub struct Coordinator {
    options: RunOptions,
    reporter: Box<dyn Reporter>,
    cancel: CancellationToken,
    scan: ScanFn,
    /// Refuse to spawn workers with this id or above
    #[cfg(test)]
    spawn_limit: Option<usize>,
}

impl Coordinator {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            reporter: Box::new(SilentReporter),
            cancel: CancellationToken::new(),
            scan: scan_assignment,
            #[cfg(test)]
            spawn_limit: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Count and sum the primes in `[0, max_number)` using `num_threads` workers
    pub fn run(&self, num_threads: i64, max_number: i64) -> Result<RunResult> {
        let request = RunRequest::validate(num_threads, max_number, self.options.max_threads)?;
        self.run_request(request)
    }

    pub fn run_request(&self, request: RunRequest) -> Result<RunResult> {
        let started = Instant::now();
        let assignments =
            plan_assignments(request.num_threads, request.max_number, self.options.strategy)?;
        debug!(
            workers = request.num_threads,
            max_number = request.max_number,
            strategy = %self.options.strategy,
            "Planned work assignments"
        );

        let reports = self.execute(&assignments)?;
        let grand = reduce_reports(&reports)?;

        let result = RunResult {
            num_threads: request.num_threads,
            max_number: request.max_number,
            strategy: self.options.strategy,
            grand_sum: grand.sum,
            grand_count: grand.count,
            workers: reports,
            elapsed: started.elapsed(),
        };
        info!(
            grand_sum = result.grand_sum,
            grand_count = result.grand_count,
            elapsed = ?result.elapsed,
            "Run complete"
        );
        self.reporter.run_finished(&result);

        Ok(result)
    }

    /// Spawn one scoped worker per assignment and join them all
    ///
    /// Every spawned worker is joined before this returns, whether or not an
    /// error occurred. Reports come back in worker-id order.
    fn execute(&self, assignments: &[WorkAssignment]) -> Result<Vec<WorkerReport>> {
        let mut reports = Vec::new();
        reports.try_reserve_exact(assignments.len())?;

        let reporter = self.reporter.as_ref();
        let cancel = &self.cancel;
        let scan = self.scan;

        let outcomes = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(assignments.len());
            let mut spawn_error = None;

            for &assignment in assignments {
                let spawned = match self.worker_builder(assignment.id) {
                    Ok(builder) => builder.spawn_scoped(scope, move || {
                        reporter.worker_started(&assignment);
                        let outcome = scan(assignment, cancel);
                        match &outcome {
                            Ok(report) => reporter.worker_finished(report),
                            Err(_) => cancel.cancel(),
                        }
                        outcome
                    }),
                    Err(e) => Err(e),
                };

                match spawned {
                    Ok(handle) => {
                        trace!(worker = assignment.id, "Spawned worker");
                        handles.push((assignment.id, handle));
                    }
                    Err(e) => {
                        cancel.cancel();
                        spawn_error = Some(
                            PrimesumError::resource_exhaustion(
                                ErrorCode::RESOURCE_SPAWN_FAILED,
                                format!("could not spawn worker {}", assignment.id),
                            )
                            .with_source(e),
                        );
                        break;
                    }
                }
            }

            let joined: Vec<_> = handles
                .into_iter()
                .map(|(id, handle)| {
                    let outcome = handle
                        .join()
                        .unwrap_or_else(|payload| Err(panic_to_error(id, payload)));
                    trace!(worker = id, ok = outcome.is_ok(), "Joined worker");
                    outcome
                })
                .collect();

            (joined, spawn_error)
        });

        let (joined, spawn_error) = outcomes;
        if let Some(err) = spawn_error {
            return Err(err);
        }

        let mut cancelled = None;
        for outcome in joined {
            match outcome {
                Ok(report) => reports.push(report),
                Err(err @ PrimesumError::Cancelled { .. }) => {
                    cancelled.get_or_insert(err);
                }
                // a worker's own failure outranks the cancellations it caused
                Err(err) => return Err(err),
            }
        }
        if let Some(err) = cancelled {
            return Err(err.with_signal(self.cancel.signal()));
        }

        Ok(reports)
    }

    fn worker_builder(&self, id: usize) -> io::Result<thread::Builder> {
        if self.spawn_refused(id) {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "thread limit reached",
            ));
        }
        Ok(thread::Builder::new().name(format!("primesum-worker-{}", id)))
    }

    #[cfg(not(test))]
    fn spawn_refused(&self, _id: usize) -> bool {
        false
    }

    #[cfg(test)]
    fn spawn_refused(&self, id: usize) -> bool {
        self.spawn_limit.is_some_and(|limit| id >= limit)
    }

    #[cfg(test)]
    fn with_scan(mut self, scan: ScanFn) -> Self {
        self.scan = scan;
        self
    }

    #[cfg(test)]
    fn with_spawn_limit(mut self, limit: usize) -> Self {
        self.spawn_limit = Some(limit);
        self
    }
}

fn panic_to_error(worker_id: usize, payload: Box<dyn Any + Send>) -> PrimesumError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    };
    PrimesumError::worker_panicked(worker_id, message)
}

/// Run with default options and no console output
///
/// # Examples
///
/// ```
/// let result = primesum::coordinator::run(4, 20).unwrap();
/// assert_eq!(result.grand_count, 8);
/// assert_eq!(result.grand_sum, 77);
/// ```
pub fn run(num_threads: i64, max_number: i64) -> Result<RunResult> {
    Coordinator::new(RunOptions::default()).run(num_threads, max_number)
}
