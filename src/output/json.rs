use super::OutputWriter;
use crate::core::diagnostics::{CheckReport, CheckSummary, Diagnostic, ParseFailure, RULE_NAME};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    enumguard_version: &'static str,
    generated_at: DateTime<Utc>,
    rule: &'static str,
    root: &'a PathBuf,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    metadata: Metadata<'a>,
    diagnostics: &'a [Diagnostic],
    parse_failures: &'a [ParseFailure],
    summary: &'a CheckSummary,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> Result<()> {
        let json = JsonReport {
            metadata: Metadata {
                enumguard_version: env!("CARGO_PKG_VERSION"),
                generated_at: Utc::now(),
                rule: RULE_NAME,
                root: &report.root,
            },
            diagnostics: &report.diagnostics,
            parse_failures: &report.parse_failures,
            summary: &report.summary,
        };
        serde_json::to_writer_pretty(&mut self.writer, &json)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
