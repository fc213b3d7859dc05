//! # primesum
//!
//! Counts and sums the primes in `[0, max_number)` by splitting the range
//! between a fixed set of worker threads. Each worker tests its own numbers
//! by trial division; the coordinator joins every worker and reduces their
//! tallies into grand totals.
//!
//! ## Usage
//!
//! ```bash
//! primesum [--partition float|remainder-last|balanced] [--format text|json] <num_threads> <max_number>
//! ```
//!
//! ## Modules
//!
//! - `primes` - Trial-division primality oracle and checked prime tallies
//! - `partition` - Splitting the range into per-worker assignments
//! - `coordinator` - Scoped worker pool, join barrier and reduction
//! - `report` - Console output for worker and run events
//! - `config` - Layered TOML/environment configuration
//! - `error` - Unified error type with codes and exit codes
//! - `app` - Logging, signal handling and fatal error reporting
//! - `cli` - Command-line argument definitions
pub mod app;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod partition;
pub mod primes;
pub mod report;

pub use coordinator::{run, Coordinator, RunOptions, RunResult};
pub use error::{PrimesumError, Result};
