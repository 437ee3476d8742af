//! `Lint/ToEnumArguments`: a `to_enum`/`enum_for` call must name the
//! enclosing method and re-pass all of its arguments.
//!
//! ```ruby
//! # bad
//! def each(x, y = 1)
//!   return to_enum(:each, x) unless block_given?
//! end
//!
//! # good
//! def each(x, y = 1)
//!   return to_enum(:each, x, y) unless block_given?
//! end
//! ```

use super::suppression::parse_suppression_comments;
use crate::analyzers::ruby::parser::{first_error_position, has_parse_errors, parse_source};
use crate::analyzers::ruby::{find_conversion_calls, ConversionSite, RubyAst};
use crate::config::{ForwardingPolicy, RuleConfig};
use crate::core::arguments::MethodReference;
use crate::core::conformance::{check_signature, Mismatch, UnsupportedConstruct, Verdict};
use crate::core::diagnostics::{Diagnostic, FileReport, MismatchDetail, MESSAGE, RULE_NAME};
use crate::core::errors::{Error, Result};
use std::path::Path;

/// What the rule makes of a single conversion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Not something the rule can judge: outside a method, or the target is
    /// computed by another method call.
    Ignored,
    Conforms,
    /// Uses `...` and the policy says to leave it alone.
    Skipped(UnsupportedConstruct),
    Offense {
        mismatch: Option<Mismatch>,
        note: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ToEnumArguments {
    enabled: bool,
    conversion_methods: Vec<String>,
    forwarding_policy: ForwardingPolicy,
}

impl Default for ToEnumArguments {
    fn default() -> Self {
        Self::new(&RuleConfig::default())
    }
}

impl ToEnumArguments {
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            enabled: config.enabled,
            conversion_methods: config.conversion_methods.clone(),
            forwarding_policy: config.forwarding_policy,
        }
    }

    pub fn with_forwarding_policy(mut self, policy: ForwardingPolicy) -> Self {
        self.forwarding_policy = policy;
        self
    }

    pub fn name(&self) -> &'static str {
        RULE_NAME
    }

    /// Parse and check one file's source.
    pub fn check_source(&self, source: &str, path: &Path) -> Result<FileReport> {
        let ast = parse_source(source, path)?;
        if has_parse_errors(&ast.tree) {
            let message = match first_error_position(ast.root()) {
                Some((line, column)) => format!("syntax error at {}:{}", line, column),
                None => "syntax error".to_string(),
            };
            return Err(Error::parse(path, message));
        }
        Ok(self.check_ast(&ast))
    }

    pub fn check_ast(&self, ast: &RubyAst) -> FileReport {
        let mut report = FileReport::new(&ast.path);
        if !self.enabled {
            return report;
        }

        let sites = find_conversion_calls(ast, &self.conversion_methods);
        if sites.is_empty() {
            return report;
        }
        let suppressions = parse_suppression_comments(ast, self.name());

        for site in &sites {
            match self.judge(site) {
                SiteOutcome::Ignored => {
                    log::trace!(
                        "{}:{}: {} call not checked",
                        ast.path.display(),
                        site.call.line,
                        site.call.method
                    );
                }
                SiteOutcome::Conforms => report.calls_checked += 1,
                SiteOutcome::Skipped(construct) => {
                    log::debug!(
                        "{}:{}: skipped, {}",
                        ast.path.display(),
                        site.call.line,
                        construct
                    );
                    report.calls_skipped += 1;
                }
                SiteOutcome::Offense { mismatch, note } => {
                    report.calls_checked += 1;
                    if suppressions.is_suppressed(site.call.line) {
                        log::debug!(
                            "{}:{}: offense suppressed by directive",
                            ast.path.display(),
                            site.call.line
                        );
                        continue;
                    }
                    report
                        .diagnostics
                        .push(self.diagnostic(&ast.path, site, mismatch.as_ref(), note));
                }
            }
        }

        report
    }

    pub fn judge(&self, site: &ConversionSite) -> SiteOutcome {
        let Some(definition) = &site.definition else {
            return SiteOutcome::Ignored;
        };

        match &site.call.target {
            MethodReference::Call(_) => SiteOutcome::Ignored,
            target if target.names(&definition.name) => {
                match check_signature(definition, &site.call.arguments) {
                    Verdict::Conforms => SiteOutcome::Conforms,
                    Verdict::DoesNotConform(mismatch) => SiteOutcome::Offense {
                        mismatch: Some(mismatch),
                        note: None,
                    },
                    Verdict::Unsupported { construct } => self.apply_policy(construct),
                }
            }
            target => SiteOutcome::Offense {
                mismatch: None,
                note: Some(format!(
                    "{} does not name the enclosing method `{}`",
                    describe_target(target),
                    definition.name
                )),
            },
        }
    }

    fn apply_policy(&self, construct: UnsupportedConstruct) -> SiteOutcome {
        match self.forwarding_policy {
            ForwardingPolicy::Skip => SiteOutcome::Skipped(construct),
            ForwardingPolicy::Accept => SiteOutcome::Conforms,
            ForwardingPolicy::Flag => SiteOutcome::Offense {
                mismatch: None,
                note: Some(format!("{} (forwarding_policy = flag)", construct)),
            },
        }
    }

    fn diagnostic(
        &self,
        path: &Path,
        site: &ConversionSite,
        mismatch: Option<&Mismatch>,
        note: Option<String>,
    ) -> Diagnostic {
        Diagnostic {
            path: path.to_path_buf(),
            line: site.call.line,
            column: site.call.column,
            end_line: site.call.end_line,
            end_column: site.call.end_column,
            rule: self.name().to_string(),
            message: MESSAGE.to_string(),
            method_name: site
                .definition
                .as_ref()
                .map(|def| def.name.clone())
                .unwrap_or_default(),
            mismatch: mismatch.map(MismatchDetail::from),
            note,
        }
    }
}

fn describe_target(target: &MethodReference) -> String {
    match target {
        MethodReference::Symbol(name) => format!("`:{}`", name),
        MethodReference::CurrentMethod => "`__method__`".to_string(),
        MethodReference::Call(name) | MethodReference::Other(name) => format!("`{}`", name),
    }
}
