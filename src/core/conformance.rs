//! Signature conformance: does a conversion call re-pass every parameter of
//! its enclosing method, in the same form and order?
//!
//! The check is syntactic. Positional parameters are matched one-to-one
//! against positional arguments in strict lockstep; keyword parameters are
//! looked up in the trailing keyword structure regardless of where they sit
//! in it.

use super::arguments::CallArguments;
use super::parameters::{classify, DeclaredParameter, MethodDefinition, Parameter, ParameterKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MismatchReason {
    /// No argument occupies the slot the parameter needs.
    MissingArgument,
    /// The positional slot holds something other than the parameter.
    PositionalMismatch { found: String },
    /// No `name: name` pair in the keyword arguments.
    KeywordNotForwarded,
    /// The keyword arguments never spread the keyword-rest parameter.
    KeywordSplatMissing,
    /// The parameter has a shape that can't be checked.
    UnrecognizedParameter,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument => write!(f, "no argument passed"),
            Self::PositionalMismatch { found } => write!(f, "`{}` passed instead", found),
            Self::KeywordNotForwarded => write!(f, "keyword not forwarded by name"),
            Self::KeywordSplatMissing => write!(f, "keyword rest not spread"),
            Self::UnrecognizedParameter => write!(f, "unrecognized parameter shape"),
        }
    }
}

/// The first parameter that is not forwarded faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Position of the parameter in the list that was checked.
    pub index: usize,
    /// Surface form of the parameter.
    pub parameter: String,
    /// `None` for parameters outside the six forwarding kinds.
    pub kind: Option<ParameterKind>,
    pub reason: MismatchReason,
}

impl Mismatch {
    fn for_parameter(index: usize, parameter: &Parameter, reason: MismatchReason) -> Self {
        Self {
            index,
            parameter: parameter.surface.clone(),
            kind: Some(parameter.kind),
            reason,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} parameter `{}`: {}", kind, self.parameter, self.reason),
            None => write!(f, "parameter `{}`: {}", self.parameter, self.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Conformance {
    Conforms,
    DoesNotConform(Mismatch),
}

impl Conformance {
    pub fn conforms(&self) -> bool {
        matches!(self, Self::Conforms)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::Conforms => None,
            Self::DoesNotConform(mismatch) => Some(mismatch),
        }
    }
}

/// Constructs that stand for "all remaining arguments" in one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedConstruct {
    /// The definition declares `...`.
    ForwardingParameter,
    /// The call passes `...`.
    ForwardingArgument,
}

impl fmt::Display for UnsupportedConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForwardingParameter => f.write_str("definition declares `...`"),
            Self::ForwardingArgument => f.write_str("call forwards `...`"),
        }
    }
}

/// Outcome of checking one call against its enclosing definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Conforms,
    DoesNotConform(Mismatch),
    Unsupported { construct: UnsupportedConstruct },
}

impl Verdict {
    pub fn conforms(&self) -> bool {
        matches!(self, Self::Conforms)
    }
}

impl From<Conformance> for Verdict {
    fn from(conformance: Conformance) -> Self {
        match conformance {
            Conformance::Conforms => Self::Conforms,
            Conformance::DoesNotConform(mismatch) => Self::DoesNotConform(mismatch),
        }
    }
}

/// Whether `call` forwards every parameter in `parameters`.
///
/// An empty parameter list always verifies, whatever the call passes.
pub fn verify(parameters: &[Parameter], call: &CallArguments) -> bool {
    evaluate(parameters, call).conforms()
}

/// Like [`verify`], but reports the first parameter that fails.
pub fn evaluate(parameters: &[Parameter], call: &CallArguments) -> Conformance {
    let mut cursor = 0;

    for (index, parameter) in parameters.iter().enumerate() {
        let outcome = if parameter.kind.is_keyword() {
            match parameter.kind {
                ParameterKind::RestKeyword => match_keyword_rest(call, &parameter.surface),
                _ => match_keyword(call, &parameter.name),
            }
        } else {
            // The default is irrelevant; an optional is forwarded by its bare name.
            let expected = match parameter.kind {
                ParameterKind::Optional => &parameter.name,
                _ => &parameter.surface,
            };
            let outcome = match_positional(call, cursor, expected);
            cursor += 1;
            outcome
        };

        if let Err(reason) = outcome {
            return Conformance::DoesNotConform(Mismatch::for_parameter(index, parameter, reason));
        }
    }

    Conformance::Conforms
}

/// Full check of a call against the definition it sits in.
///
/// `...` on either side is reported as [`Verdict::Unsupported`] rather than
/// judged; the caller decides what that means.
pub fn check_signature(definition: &MethodDefinition, call: &CallArguments) -> Verdict {
    if definition.forwards_all() {
        return Verdict::Unsupported {
            construct: UnsupportedConstruct::ForwardingParameter,
        };
    }
    if call.forwards_all {
        return Verdict::Unsupported {
            construct: UnsupportedConstruct::ForwardingArgument,
        };
    }

    if let Some((index, declared)) = definition
        .parameters
        .iter()
        .enumerate()
        .find(|(_, p)| {
            matches!(
                p,
                DeclaredParameter::Unrecognized { .. } | DeclaredParameter::NoKeywords
            )
        })
    {
        return Verdict::DoesNotConform(Mismatch {
            index,
            parameter: declared.surface(),
            kind: None,
            reason: MismatchReason::UnrecognizedParameter,
        });
    }

    evaluate(&classify(definition), call).into()
}

fn match_positional(call: &CallArguments, cursor: usize, expected: &str) -> Result<(), MismatchReason> {
    match call.positional_at(cursor) {
        None => Err(MismatchReason::MissingArgument),
        Some(argument) if argument.surface == expected => Ok(()),
        Some(argument) => Err(MismatchReason::PositionalMismatch {
            found: argument.surface.clone(),
        }),
    }
}

fn match_keyword(call: &CallArguments, name: &str) -> Result<(), MismatchReason> {
    match &call.keywords {
        None => Err(MismatchReason::MissingArgument),
        Some(keywords) if keywords.forwards_keyword(name) => Ok(()),
        Some(_) => Err(MismatchReason::KeywordNotForwarded),
    }
}

fn match_keyword_rest(call: &CallArguments, surface: &str) -> Result<(), MismatchReason> {
    match &call.keywords {
        None => Err(MismatchReason::MissingArgument),
        Some(keywords) if keywords.spreads_surface(surface) => Ok(()),
        Some(_) => Err(MismatchReason::KeywordSplatMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arguments::{Expression, KeywordPair};
    use pretty_assertions::assert_eq;

    fn required(name: &str) -> Parameter {
        Parameter::new(ParameterKind::Required, name)
    }

    fn optional(name: &str) -> Parameter {
        Parameter::new(ParameterKind::Optional, name)
    }

    fn positional(names: &[&str]) -> CallArguments {
        names.iter().fold(CallArguments::new(), |args, name| {
            args.positional(Expression::local(*name))
        })
    }

    #[test]
    fn test_empty_parameters_always_verify() {
        assert!(verify(&[], &CallArguments::new()));
        assert!(verify(&[], &positional(&["x", "y"])));
    }

    #[test]
    fn test_required_and_optional_forwarded_in_order() {
        let params = vec![required("x"), optional("y")];

        assert!(verify(&params, &positional(&["x", "y"])));
        assert!(!verify(&params, &positional(&["x"])));
        assert!(!verify(&params, &positional(&["y", "x"])));
    }

    #[test]
    fn test_dropped_optional_reports_missing_argument() {
        let params = vec![required("x"), optional("y")];

        let outcome = evaluate(&params, &positional(&["x"]));

        assert_eq!(
            outcome.mismatch(),
            Some(&Mismatch {
                index: 1,
                parameter: "y".to_string(),
                kind: Some(ParameterKind::Optional),
                reason: MismatchReason::MissingArgument,
            })
        );
    }

    #[test]
    fn test_cursor_advances_past_failed_match() {
        // `(y, x)` against `(x, y)` fails on the first slot and never realigns.
        let params = vec![required("x"), required("y")];

        let outcome = evaluate(&params, &positional(&["y", "x"]));

        assert_eq!(outcome.mismatch().map(|m| m.index), Some(0));
        assert_eq!(
            outcome.mismatch().map(|m| m.reason.clone()),
            Some(MismatchReason::PositionalMismatch {
                found: "y".to_string()
            })
        );
    }

    #[test]
    fn test_optional_must_be_forwarded_by_bare_name() {
        let params = vec![optional("y")];
        let call = CallArguments::new().positional(Expression::other("y = 1"));

        assert!(!verify(&params, &call));
    }

    #[test]
    fn test_required_keyword() {
        let params = vec![Parameter::new(ParameterKind::KeywordRequired, "required")];

        let forwarded =
            CallArguments::new().keyword(KeywordPair::new("required", Expression::local("required")));
        let renamed =
            CallArguments::new().keyword(KeywordPair::new("required", Expression::local("something")));
        let with_extra = CallArguments::new()
            .keyword(KeywordPair::new("required", Expression::local("required")))
            .keyword(KeywordPair::new("extra", Expression::other("1")));

        assert!(verify(&params, &forwarded));
        assert!(!verify(&params, &renamed));
        assert!(verify(&params, &with_extra));
        assert!(!verify(&params, &CallArguments::new()));
    }

    #[test]
    fn test_keyword_does_not_move_positional_cursor() {
        let params = vec![
            required("a"),
            Parameter::new(ParameterKind::KeywordOptional, "b"),
            required("c"),
        ];
        let call = positional(&["a", "c"]).keyword(KeywordPair::shorthand("b"));

        assert!(verify(&params, &call));
    }

    #[test]
    fn test_rest_positional_requires_splat_surface() {
        let params = vec![Parameter::new(ParameterKind::RestPositional, "rest")];

        let splat = CallArguments::new().positional(Expression::splat("*rest"));
        let expanded = positional(&["rest"]);

        assert!(verify(&params, &splat));
        assert!(!verify(&params, &expanded));
    }

    #[test]
    fn test_keyword_rest() {
        let params = vec![Parameter::new(ParameterKind::RestKeyword, "opts")];

        let spread = CallArguments::new().keyword_spread(Expression::keyword_splat("**opts"));
        let other_keywords = CallArguments::new().keyword(KeywordPair::shorthand("opts"));

        assert!(verify(&params, &spread));
        assert!(!verify(&params, &CallArguments::new()));
        assert_eq!(
            evaluate(&params, &other_keywords).mismatch().map(|m| m.reason.clone()),
            Some(MismatchReason::KeywordSplatMissing)
        );
    }

    #[test]
    fn test_mixed_keyword_order_is_irrelevant() {
        let params = vec![
            required("a"),
            Parameter::new(ParameterKind::KeywordRequired, "b"),
            Parameter::new(ParameterKind::RestKeyword, "rest"),
        ];

        let in_order = positional(&["a"])
            .keyword(KeywordPair::new("b", Expression::local("b")))
            .keyword_spread(Expression::keyword_splat("**rest"));
        let swapped = positional(&["a"])
            .keyword_spread(Expression::keyword_splat("**rest"))
            .keyword(KeywordPair::new("b", Expression::local("b")));

        assert!(verify(&params, &in_order));
        assert!(verify(&params, &swapped));
    }

    #[test]
    fn test_check_signature_reports_forwarding_shorthand() {
        let forwarding_def = MethodDefinition::new("each", vec![DeclaredParameter::ForwardAll]);
        assert_eq!(
            check_signature(&forwarding_def, &CallArguments::new().with_forward_all()),
            Verdict::Unsupported {
                construct: UnsupportedConstruct::ForwardingParameter
            }
        );

        let plain_def = MethodDefinition::new("each", vec![DeclaredParameter::required("x")]);
        assert_eq!(
            check_signature(&plain_def, &CallArguments::new().with_forward_all()),
            Verdict::Unsupported {
                construct: UnsupportedConstruct::ForwardingArgument
            }
        );
    }

    #[test]
    fn test_check_signature_rejects_unrecognized_parameters() {
        let def = MethodDefinition::new(
            "each",
            vec![
                DeclaredParameter::required("x"),
                DeclaredParameter::Unrecognized {
                    surface: "(a, b)".to_string(),
                },
            ],
        );

        let verdict = check_signature(&def, &positional(&["x", "(a, b)"]));

        match verdict {
            Verdict::DoesNotConform(mismatch) => {
                assert_eq!(mismatch.index, 1);
                assert_eq!(mismatch.kind, None);
                assert_eq!(mismatch.reason, MismatchReason::UnrecognizedParameter);
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_check_signature_rejects_no_keywords_marker() {
        let def = MethodDefinition::new(
            "each",
            vec![DeclaredParameter::required("x"), DeclaredParameter::NoKeywords],
        );

        match check_signature(&def, &positional(&["x"])) {
            Verdict::DoesNotConform(mismatch) => {
                assert_eq!(mismatch.index, 1);
                assert_eq!(mismatch.parameter, "**nil");
                assert_eq!(mismatch.reason, MismatchReason::UnrecognizedParameter);
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_check_signature_ignores_block_parameter() {
        let def = MethodDefinition::new(
            "each",
            vec![
                DeclaredParameter::required("x"),
                DeclaredParameter::block("block"),
            ],
        );

        assert!(check_signature(&def, &positional(&["x"])).conforms());
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = Mismatch {
            index: 0,
            parameter: "x".to_string(),
            kind: Some(ParameterKind::Required),
            reason: MismatchReason::PositionalMismatch {
                found: "y".to_string(),
            },
        };

        assert_eq!(mismatch.to_string(), "required parameter `x`: `y` passed instead");
    }
}
