//! Validation for configuration values that parse but make no sense.

use once_cell::sync::Lazy;
use regex::Regex;

use super::core::EnumguardConfig;
use crate::core::errors::{Error, Result};

static METHOD_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z_][A-Za-z0-9_]*[?!]?$").expect("method name pattern is valid")
});

/// Collect every problem, then report them together.
pub fn validate_config(config: &EnumguardConfig) -> Result<()> {
    let errors: Vec<String> = [
        validate_conversion_methods(&config.rule.conversion_methods),
        validate_ignore_patterns(&config.ignore_patterns()),
        validate_output_format(config.default_format()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::configuration(errors.join("; ")))
    }
}

fn validate_conversion_methods(methods: &[String]) -> Vec<String> {
    if methods.is_empty() {
        return vec!["rule.conversion_methods must not be empty".to_string()];
    }
    methods
        .iter()
        .filter(|m| !METHOD_NAME.is_match(m))
        .map(|m| format!("rule.conversion_methods: `{}` is not a method name", m))
        .collect()
}

fn validate_ignore_patterns(patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|p| {
            glob::Pattern::new(p)
                .err()
                .map(|e| format!("ignore.patterns: `{}`: {}", p, e))
        })
        .collect()
}

fn validate_output_format(format: Option<&str>) -> Vec<String> {
    match format {
        None | Some("terminal") | Some("json") => vec![],
        Some(other) => vec![format!(
            "output.default_format: `{}` (expected terminal or json)",
            other
        )],
    }
}
