use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ForwardingPolicy;
use crate::output;

#[derive(Parser, Debug)]
#[command(name = "enumguard")]
#[command(
    about = "Checks that to_enum/enum_for calls forward every argument of the enclosing method",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check Ruby files for conversion calls that drop or alter arguments
    Check {
        /// File or directory to check
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Configuration file (defaults to the nearest .enumguard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (defaults to the config file's, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How to treat methods and calls that forward with `...`
        #[arg(long, value_enum)]
        policy: Option<Policy>,

        /// Number of parallel jobs (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "ENUMGUARD_JOBS")]
        jobs: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        /// -v: Show the first mismatching parameter of each offense, info logging
        /// -vv: Debug logging
        /// -vvv: Trace logging
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines and a summary
    Terminal,
    /// Machine-readable JSON
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => output::OutputFormat::Terminal,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Leave such calls unchecked
    Skip,
    /// Report such calls
    Flag,
    /// Treat such calls as conforming
    Accept,
}

impl From<Policy> for ForwardingPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Skip => ForwardingPolicy::Skip,
            Policy::Flag => ForwardingPolicy::Flag,
            Policy::Accept => ForwardingPolicy::Accept,
        }
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["enumguard", "check"]).unwrap();
        match cli.command {
            Commands::Check {
                path,
                format,
                policy,
                jobs,
                verbosity,
                ..
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(format, None);
                assert_eq!(policy, None);
                assert_eq!(jobs, 0);
                assert_eq!(verbosity, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "enumguard", "check", "lib", "--format", "json", "--policy", "flag", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Check {
                path,
                format,
                policy,
                verbosity,
                ..
            } => {
                assert_eq!(path, PathBuf::from("lib"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(policy.map(ForwardingPolicy::from), Some(ForwardingPolicy::Flag));
                assert_eq!(verbosity, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(Cli::try_parse_from(["enumguard", "check", "--policy", "maybe"]).is_err());
    }
}
