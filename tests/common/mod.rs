//! Common test utilities and helpers

use assert_cmd::Command;
use tempfile::TempDir;

const PRIMESUM_VARS: &[&str] = &[
    "PRIMESUM_CONFIG",
    "PRIMESUM_LOG_LEVEL",
    "PRIMESUM_MAX_THREADS",
    "PRIMESUM_PARTITION",
    "PRIMESUM_FORMAT",
    "PRIMESUM_QUIET",
    "RUST_LOG",
];

/// A `primesum` command running in an empty temporary directory with a
/// clean `PRIMESUM_*` environment
pub fn primesum_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("primesum").unwrap();
    cmd.current_dir(dir.path());
    for var in PRIMESUM_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Primes below `max` by brute force, for checking totals
#[allow(dead_code)]
pub fn reference_primes(max: u64) -> Vec<u64> {
    (2..max).filter(|&n| (2..n).all(|d| n % d != 0)).collect()
}
