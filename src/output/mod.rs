pub mod json;
pub mod terminal;

use crate::core::diagnostics::CheckReport;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

pub use json::JsonWriter;
pub use terminal::TerminalWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "terminal" => Some(Self::Terminal),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CheckReport) -> Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    verbosity: u8,
    use_color: bool,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, verbosity, use_color)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

/// Write the report to `output_file`, or stdout when none is given.
pub fn output_report(
    report: &CheckReport,
    format: OutputFormat,
    verbosity: u8,
    output_file: Option<&Path>,
) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = fs::File::create(path)?;
            create_writer(format, file, verbosity, false).write_report(report)?;
        }
        None => {
            let stdout = std::io::stdout();
            let use_color = colored::control::SHOULD_COLORIZE.should_colorize();
            create_writer(format, stdout.lock(), verbosity, use_color).write_report(report)?;
        }
    }
    Ok(())
}
