use super::OutputWriter;
use crate::core::diagnostics::{CheckReport, Diagnostic};
use anyhow::Result;
use colored::*;
use std::io::Write;

/// `path:line:col: W: Rule: message` lines followed by a summary.
pub struct TerminalWriter<W: Write> {
    writer: W,
    verbosity: u8,
    use_color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, verbosity: u8, use_color: bool) -> Self {
        Self {
            writer,
            verbosity,
            use_color,
        }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        let location = format!(
            "{}:{}:{}",
            diagnostic.path.display(),
            diagnostic.line,
            diagnostic.column
        );
        let location = self.paint(&location, |s| s.cyan());
        let severity = self.paint("W", |s| s.yellow().bold());
        writeln!(
            self.writer,
            "{}: {}: {}: {}",
            location, severity, diagnostic.rule, diagnostic.message
        )?;

        if self.verbosity > 0 {
            if let Some(mismatch) = &diagnostic.mismatch {
                writeln!(self.writer, "    first mismatch: {}", mismatch.description)?;
            }
            if let Some(note) = &diagnostic.note {
                writeln!(self.writer, "    note: {}", note)?;
            }
        }
        Ok(())
    }

    fn write_summary(&mut self, report: &CheckReport) -> Result<()> {
        let summary = &report.summary;
        let offenses = match summary.offenses {
            0 => self.paint("no offenses", |s| s.green()),
            1 => self.paint("1 offense", |s| s.red()),
            n => self.paint(&format!("{} offenses", n), |s| s.red()),
        };
        writeln!(
            self.writer,
            "{} file(s) inspected, {} detected ({} call(s) checked, {} skipped)",
            summary.files_scanned, offenses, summary.calls_checked, summary.calls_skipped
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> Result<()> {
        for diagnostic in &report.diagnostics {
            self.write_diagnostic(diagnostic)?;
        }

        for failure in &report.parse_failures {
            let label = self.paint("E", |s| s.red().bold());
            writeln!(
                self.writer,
                "{}: {}: {}",
                failure.path.display(),
                label,
                failure.message
            )?;
        }

        if !report.diagnostics.is_empty() || !report.parse_failures.is_empty() {
            writeln!(self.writer)?;
        }
        self.write_summary(report)
    }
}
