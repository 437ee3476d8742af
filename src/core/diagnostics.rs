use super::conformance::{Mismatch, MismatchReason};
use super::parameters::ParameterKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RULE_NAME: &str = "Lint/ToEnumArguments";
pub const MESSAGE: &str = "Ensure you correctly provided all the arguments.";

/// Detail attached to an offense when a specific parameter failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchDetail {
    pub parameter: String,
    pub kind: Option<ParameterKind>,
    pub reason: MismatchReason,
    pub description: String,
}

impl From<&Mismatch> for MismatchDetail {
    fn from(mismatch: &Mismatch) -> Self {
        Self {
            parameter: mismatch.parameter.clone(),
            kind: mismatch.kind,
            reason: mismatch.reason.clone(),
            description: mismatch.to_string(),
        }
    }
}

/// One offense, anchored at the conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub rule: String,
    pub message: String,
    /// Name of the enclosing method.
    pub method_name: String,
    /// Present when the call names the right method but drops or alters an
    /// argument; absent when it names the wrong method or `...` is flagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchDetail>,
    /// Extra context, such as the unsupported construct that was flagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A file that could not be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub files_scanned: usize,
    pub calls_checked: usize,
    pub calls_skipped: usize,
    pub offenses: usize,
}

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub calls_checked: usize,
    pub calls_skipped: usize,
}

impl FileReport {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            diagnostics: Vec::new(),
            calls_checked: 0,
            calls_skipped: 0,
        }
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub root: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub parse_failures: Vec<ParseFailure>,
    pub summary: CheckSummary,
}

impl CheckReport {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            diagnostics: Vec::new(),
            parse_failures: Vec::new(),
            summary: CheckSummary::default(),
        }
    }

    pub fn add_file(&mut self, report: FileReport) {
        self.summary.files_scanned += 1;
        self.summary.calls_checked += report.calls_checked;
        self.summary.calls_skipped += report.calls_skipped;
        self.summary.offenses += report.diagnostics.len();
        self.diagnostics.extend(report.diagnostics);
    }

    pub fn add_parse_failure(&mut self, failure: ParseFailure) {
        self.summary.files_scanned += 1;
        self.parse_failures.push(failure);
    }

    /// Orders diagnostics by location so parallel runs print identically.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| (&a.path, a.line, a.column).cmp(&(&b.path, b.line, b.column)));
        self.parse_failures.sort_by(|a, b| a.path.cmp(&b.path));
    }

    pub fn has_offenses(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
