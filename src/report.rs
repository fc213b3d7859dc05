//! Console reporting for worker and run events
//!
//! Workers call the reporter from their own threads, so implementations are
//! `Sync`. Interleaving of lines from different workers is expected.

use crate::coordinator::{RunResult, WorkerReport};
use crate::partition::WorkAssignment;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use tracing::warn;

/// Output format for the run
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per worker start and finish, then the grand totals
    #[default]
    Text,
    /// A single JSON document after all workers have joined
    Json,
}

pub trait Reporter: Send + Sync {
    fn worker_started(&self, _assignment: &WorkAssignment) {}

    fn worker_finished(&self, _report: &WorkerReport) {}

    fn run_finished(&self, _result: &RunResult) {}
}

pub fn format_worker_started(assignment: &WorkAssignment) -> String {
    format!(
        "Thread # {} is finding primes from low = {} to high = {}",
        assignment.id, assignment.low, assignment.high
    )
}

pub fn format_worker_finished(report: &WorkerReport) -> String {
    format!(
        "Thread # {} Sum is {}, Count is {}",
        report.id, report.local_sum, report.local_count
    )
}

pub fn format_summary(result: &RunResult) -> String {
    format!(
        "\tGRAND SUM IS {}, COUNT IS {}",
        result.grand_sum, result.grand_count
    )
}

/// Build the stdout reporter for a format
pub fn stdout_reporter(format: OutputFormat, quiet: bool) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter { quiet }),
        OutputFormat::Json => Box::new(JsonReporter),
    }
}

fn emit(line: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line) {
        warn!("Failed to write to stdout: {}", e);
    }
}

/// Plain-text reporter writing to stdout
#[derive(Debug, Default)]
pub struct TextReporter {
    /// Suppress the per-worker lines
    pub quiet: bool,
}

impl Reporter for TextReporter {
    fn worker_started(&self, assignment: &WorkAssignment) {
        if !self.quiet {
            emit(&format_worker_started(assignment));
        }
    }

    fn worker_finished(&self, report: &WorkerReport) {
        if !self.quiet {
            emit(&format_worker_finished(report));
        }
    }

    fn run_finished(&self, result: &RunResult) {
        emit(&format!("\n{}", format_summary(result)));
    }
}

/// JSON reporter; stays silent until the run is complete
#[derive(Debug, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn run_finished(&self, result: &RunResult) {
        match serde_json::to_string_pretty(result) {
            Ok(json) => emit(&json),
            Err(e) => warn!("Failed to serialize run result: {}", e),
        }
    }
}

/// Reporter that discards every event
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Event captured by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Started(WorkAssignment),
    Finished(WorkerReport),
    RunFinished { grand_sum: u64, grand_count: u64 },
}

/// Reporter that keeps every event in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn push(&self, event: ReportEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl Reporter for RecordingReporter {
    fn worker_started(&self, assignment: &WorkAssignment) {
        self.push(ReportEvent::Started(*assignment));
    }

    fn worker_finished(&self, report: &WorkerReport) {
        self.push(ReportEvent::Finished(*report));
    }

    fn run_finished(&self, result: &RunResult) {
        self.push(ReportEvent::RunFinished {
            grand_sum: result.grand_sum,
            grand_count: result.grand_count,
        });
    }
}

impl<R: Reporter + ?Sized> Reporter for std::sync::Arc<R> {
    fn worker_started(&self, assignment: &WorkAssignment) {
        (**self).worker_started(assignment)
    }

    fn worker_finished(&self, report: &WorkerReport) {
        (**self).worker_finished(report)
    }

    fn run_finished(&self, result: &RunResult) {
        (**self).run_finished(result)
    }
}
