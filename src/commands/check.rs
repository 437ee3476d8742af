use crate::cli::{self, setup::get_worker_count};
use crate::config::{self, EnumguardConfig, ForwardingPolicy};
use crate::core::diagnostics::{CheckReport, FileReport, ParseFailure};
use crate::core::errors::{Error, Result};
use crate::io;
use crate::output::{self, OutputFormat};
use crate::rules::ToEnumArguments;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub struct CheckConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub policy: Option<ForwardingPolicy>,
    pub verbosity: u8,
    pub jobs: usize,
}

/// Check the project, write the report, and return it.
pub fn check_project(check_config: CheckConfig) -> anyhow::Result<CheckReport> {
    let settings = resolve_config(&check_config)?;
    let format = resolve_format(check_config.format, &settings)?;

    log::info!(
        "Checking {} with {} worker(s)",
        check_config.path.display(),
        get_worker_count(check_config.jobs)
    );

    let report = run_check(&check_config.path, &settings, check_config.policy)?;
    output::output_report(
        &report,
        format,
        check_config.verbosity,
        check_config.output.as_deref(),
    )?;
    Ok(report)
}

/// Check every Ruby file under `path`.
///
/// Files are independent, so they are checked in parallel. A file that
/// can't be read or parsed is recorded as a failure instead of aborting
/// the run.
pub fn run_check(
    path: &Path,
    settings: &EnumguardConfig,
    policy: Option<ForwardingPolicy>,
) -> Result<CheckReport> {
    if !path.exists() {
        return Err(Error::file_system(
            "Path does not exist",
            path,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    let rule = ToEnumArguments::new(&settings.rule)
        .with_forwarding_policy(policy.unwrap_or(settings.rule.forwarding_policy));
    let files = io::find_ruby_files(path, &settings.ignore_patterns())?;
    log::debug!("Found {} Ruby file(s)", files.len());

    let results: Vec<std::result::Result<FileReport, ParseFailure>> = files
        .par_iter()
        .map(|file| check_file(&rule, file))
        .collect();

    let mut report = CheckReport::new(path);
    for result in results {
        match result {
            Ok(file_report) => report.add_file(file_report),
            Err(failure) => report.add_parse_failure(failure),
        }
    }
    report.sort();
    Ok(report)
}

fn check_file(rule: &ToEnumArguments, path: &Path) -> std::result::Result<FileReport, ParseFailure> {
    log::debug!("Checking {}", path.display());

    io::read_file(path)
        .and_then(|source| rule.check_source(&source, path))
        .map_err(|e| {
            log::warn!("Skipping {}: {}", path.display(), e);
            ParseFailure {
                path: path.to_path_buf(),
                message: failure_message(e),
            }
        })
}

fn failure_message(error: Error) -> String {
    match error {
        Error::Parse { message, .. } => message,
        other => other.to_string(),
    }
}

fn resolve_config(check_config: &CheckConfig) -> Result<EnumguardConfig> {
    match &check_config.config {
        Some(path) => config::load_config_from(path),
        None => {
            let start = if check_config.path.is_file() {
                check_config
                    .path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            } else {
                check_config.path.clone()
            };
            let start = std::fs::canonicalize(&start).unwrap_or(start);
            Ok(config::discover_config(&start))
        }
    }
}

/// The command line wins over the config file; terminal is the default.
fn resolve_format(
    format: Option<cli::OutputFormat>,
    settings: &EnumguardConfig,
) -> Result<OutputFormat> {
    if let Some(format) = format {
        return Ok(format.into());
    }
    match settings.default_format() {
        None => Ok(OutputFormat::Terminal),
        Some(name) => OutputFormat::from_name(name)
            .ok_or_else(|| Error::configuration(format!("unknown output format `{}`", name))),
    }
}
