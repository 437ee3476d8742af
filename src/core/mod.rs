pub mod arguments;
pub mod conformance;
pub mod diagnostics;
pub mod errors;
pub mod parameters;

pub use arguments::{
    CallArguments, ConversionCall, Expression, ExpressionShape, KeywordArguments, KeywordPair,
    MethodReference,
};
pub use conformance::{
    check_signature, evaluate, verify, Conformance, Mismatch, MismatchReason,
    UnsupportedConstruct, Verdict,
};
pub use diagnostics::{
    CheckReport, CheckSummary, Diagnostic, FileReport, MismatchDetail, ParseFailure, MESSAGE,
    RULE_NAME,
};
pub use errors::{Error, Result};
pub use parameters::{classify, DeclaredParameter, MethodDefinition, Parameter, ParameterKind};
