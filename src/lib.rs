//! Checks that `to_enum`/`enum_for` calls inside Ruby methods re-pass every
//! argument of the enclosing method, in the same form and order.
//!
//! The decision logic lives in [`core`]: [`classify`] turns a method's
//! declared parameters into forwarding kinds and [`verify`] walks a call's
//! arguments against them. [`analyzers::ruby`] extracts both sides from
//! source with tree-sitter, and [`rules`] turns verdicts into diagnostics.

// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod output;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    check_signature, classify, evaluate, verify, CallArguments, CheckReport, Conformance,
    DeclaredParameter, Diagnostic, Error, Expression, KeywordPair, MethodDefinition,
    MethodReference, Mismatch, MismatchReason, Parameter, ParameterKind, Result,
    UnsupportedConstruct, Verdict,
};

pub use crate::config::{EnumguardConfig, ForwardingPolicy};
pub use crate::rules::ToEnumArguments;
