use anyhow::Result;
use enumguard::cli::{self, Cli, Commands};
use enumguard::commands::{self, CheckConfig};

const EXIT_OFFENSES: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    let cli = cli::parse_args();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

// Main orchestrator function
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            path,
            config,
            format,
            output,
            policy,
            jobs,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            cli::configure_thread_pool(jobs);

            let report = commands::check_project(CheckConfig {
                path,
                config,
                format,
                output,
                policy: policy.map(Into::into),
                verbosity,
                jobs,
            })?;

            Ok(if report.has_offenses() { EXIT_OFFENSES } else { 0 })
        }
        Commands::Init { force } => {
            cli::init_logging(0);
            commands::init_config(force)?;
            Ok(0)
        }
    }
}
