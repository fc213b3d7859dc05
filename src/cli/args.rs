//! CLI argument structures
//!
//! `primesum <num_threads> <max_number>` plus flags that override the
//! configuration file and environment.

use crate::config::PrimesumConfig;
use crate::partition::PartitionStrategy;
use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Count and sum the primes below a bound using parallel trial division
#[derive(Parser, Debug)]
#[command(name = "primesum")]
#[command(about = "primesum - Count and sum the primes in [0, max_number) across worker threads", long_about = None)]
#[command(version)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Number of worker threads (positive integer)
    #[arg(value_name = "NUM_THREADS")]
    pub num_threads: i64,

    /// Exclusive upper bound of the scanned range (positive integer)
    #[arg(value_name = "MAX_NUMBER")]
    pub max_number: i64,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How to split the range between workers
    #[arg(long, value_enum)]
    pub partition: Option<PartitionStrategy>,

    /// Refuse runs requesting more workers than this
    #[arg(long, value_name = "N")]
    pub max_threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only print the grand totals
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line flags on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: PrimesumConfig) -> PrimesumConfig {
        if let Some(partition) = self.partition {
            config.partition = partition;
        }
        if let Some(max_threads) = self.max_threads {
            config.max_threads = max_threads;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.quiet {
            config.quiet = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_positionals() {
        let cli = Cli::try_parse_from(["primesum", "4", "20"]).unwrap();
        assert_eq!(cli.num_threads, 4);
        assert_eq!(cli.max_number, 20);
        assert_eq!(cli.verbose, 0);
        assert!(cli.partition.is_none());
    }

    #[test]
    fn test_negative_numbers_reach_validation() {
        let cli = Cli::try_parse_from(["primesum", "4", "-5"]).unwrap();
        assert_eq!(cli.max_number, -5);
    }

    #[test]
    fn test_rejects_non_numeric_and_wrong_count() {
        assert!(Cli::try_parse_from(["primesum", "four", "20"]).is_err());
        assert!(Cli::try_parse_from(["primesum", "4"]).is_err());
        assert!(Cli::try_parse_from(["primesum", "4", "20", "30"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "primesum",
            "--partition",
            "remainder-last",
            "--max-threads",
            "32",
            "--format",
            "json",
            "-q",
            "-vv",
            "8",
            "1000",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.apply_overrides(PrimesumConfig::default());
        assert_eq!(config.partition, PartitionStrategy::RemainderLast);
        assert_eq!(config.max_threads, 32);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.quiet);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["primesum", "2", "10"]).unwrap();
        let base = PrimesumConfig {
            max_threads: 3,
            partition: PartitionStrategy::Balanced,
            ..PrimesumConfig::default()
        };
        assert_eq!(cli.apply_overrides(base.clone()), base);
    }
}
