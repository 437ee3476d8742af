use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analyzers::ruby::DEFAULT_CONVERSION_METHODS;

/// Root configuration structure for enumguard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EnumguardConfig {
    /// Rule behaviour
    #[serde(default)]
    pub rule: RuleConfig,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: Option<IgnoreConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl EnumguardConfig {
    pub fn ignore_patterns(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .map(|ignore| ignore.patterns.clone())
            .unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|output| output.default_format.as_deref())
    }
}

/// How calls that forward with `...` are treated.
///
/// The checker can't tell whether `...` re-passes the right arguments, so
/// the choice is left to configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardingPolicy {
    /// Leave the call unchecked and count it as skipped.
    #[default]
    Skip,
    /// Report the call.
    Flag,
    /// Count the call as conforming.
    Accept,
}

impl fmt::Display for ForwardingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Skip => "skip",
            Self::Flag => "flag",
            Self::Accept => "accept",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Method names that turn the current method into an enumerator
    #[serde(default = "default_conversion_methods")]
    pub conversion_methods: Vec<String>,

    #[serde(default)]
    pub forwarding_policy: ForwardingPolicy,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            conversion_methods: default_conversion_methods(),
            forwarding_policy: ForwardingPolicy::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

pub fn default_conversion_methods() -> Vec<String> {
    DEFAULT_CONVERSION_METHODS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IgnoreConfig {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
}
