//! Formal parameters of a method definition.
//!
//! The extractor hands over every parameter exactly as it was declared
//! ([`DeclaredParameter`]). [`classify`] narrows that down to the six kinds
//! that take part in argument forwarding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One formal parameter as it appears in the source definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredParameter {
    /// `x`
    Required { name: String },
    /// `x = default`
    Optional { name: String, default: String },
    /// `*rest`, or anonymous `*`
    Rest { name: String, surface: String },
    /// `key:`
    KeywordRequired { name: String },
    /// `key: default`
    KeywordOptional { name: String, default: String },
    /// `**opts`, or anonymous `**`
    KeywordRest { name: String, surface: String },
    /// `&blk`, or anonymous `&`
    Block { name: String },
    /// `**nil`
    NoKeywords,
    /// `...`
    ForwardAll,
    /// Anything the extractor has no shape for, such as `(a, b)`.
    Unrecognized { surface: String },
}

impl DeclaredParameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self::Required { name: name.into() }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::Optional {
            name: name.into(),
            default: default.into(),
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Rest {
            surface: format!("*{}", name),
            name,
        }
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::KeywordRequired { name: name.into() }
    }

    pub fn keyword_optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::KeywordOptional {
            name: name.into(),
            default: default.into(),
        }
    }

    pub fn keyword_rest(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::KeywordRest {
            surface: format!("**{}", name),
            name,
        }
    }

    pub fn block(name: impl Into<String>) -> Self {
        Self::Block { name: name.into() }
    }

    /// Source text of the parameter as a caller would forward it.
    pub fn surface(&self) -> String {
        match self {
            Self::Required { name } => name.clone(),
            Self::Optional { name, default } => format!("{} = {}", name, default),
            Self::Rest { surface, .. } | Self::KeywordRest { surface, .. } => surface.clone(),
            Self::KeywordRequired { name } => format!("{}:", name),
            Self::KeywordOptional { name, default } => format!("{}: {}", name, default),
            Self::Block { name } => format!("&{}", name),
            Self::NoKeywords => "**nil".to_string(),
            Self::ForwardAll => "...".to_string(),
            Self::Unrecognized { surface } => surface.clone(),
        }
    }
}

/// A `def` or `def self.` node reduced to what conformance checking needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    pub singleton: bool,
    pub parameters: Vec<DeclaredParameter>,
    pub line: usize,
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>, parameters: Vec<DeclaredParameter>) -> Self {
        Self {
            name: name.into(),
            singleton: false,
            parameters,
            line: 1,
        }
    }

    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn forwards_all(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| matches!(p, DeclaredParameter::ForwardAll))
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().filter_map(|p| match p {
            DeclaredParameter::Required { name }
            | DeclaredParameter::Optional { name, .. }
            | DeclaredParameter::Rest { name, .. }
            | DeclaredParameter::KeywordRequired { name }
            | DeclaredParameter::KeywordOptional { name, .. }
            | DeclaredParameter::KeywordRest { name, .. }
            | DeclaredParameter::Block { name } => Some(name.as_str()),
            DeclaredParameter::NoKeywords
            | DeclaredParameter::ForwardAll
            | DeclaredParameter::Unrecognized { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Required,
    Optional,
    RestPositional,
    KeywordRequired,
    KeywordOptional,
    RestKeyword,
}

impl ParameterKind {
    /// Kinds that consume one slot of the call's positional arguments.
    pub fn is_positional(self) -> bool {
        matches!(self, Self::Required | Self::Optional | Self::RestPositional)
    }

    pub fn is_keyword(self) -> bool {
        !self.is_positional()
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::RestPositional => "rest",
            Self::KeywordRequired => "keyword",
            Self::KeywordOptional => "optional keyword",
            Self::RestKeyword => "keyword rest",
        };
        f.write_str(label)
    }
}

/// A formal parameter that must be re-passed by a conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub kind: ParameterKind,
    pub name: String,
    /// How the parameter is spelled when forwarded: `x`, `*rest`, `**opts`.
    pub surface: String,
}

impl Parameter {
    pub fn new(kind: ParameterKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let surface = match kind {
            ParameterKind::RestPositional => format!("*{}", name),
            ParameterKind::RestKeyword => format!("**{}", name),
            _ => name.clone(),
        };
        Self {
            kind,
            name,
            surface,
        }
    }
}

/// Parameters that take part in forwarding, in declaration order.
///
/// Block parameters are dropped. `...`, `**nil` and unrecognized shapes
/// have no kind and are left out too; the conformance checker looks at
/// them on the definition directly.
pub fn classify(definition: &MethodDefinition) -> Vec<Parameter> {
    definition
        .parameters
        .iter()
        .filter_map(classify_one)
        .collect()
}

fn classify_one(declared: &DeclaredParameter) -> Option<Parameter> {
    let (kind, name, surface) = match declared {
        DeclaredParameter::Required { name } => (ParameterKind::Required, name, name.clone()),
        DeclaredParameter::Optional { name, .. } => (ParameterKind::Optional, name, name.clone()),
        DeclaredParameter::Rest { name, surface } => {
            (ParameterKind::RestPositional, name, surface.clone())
        }
        DeclaredParameter::KeywordRequired { name } => {
            (ParameterKind::KeywordRequired, name, name.clone())
        }
        DeclaredParameter::KeywordOptional { name, .. } => {
            (ParameterKind::KeywordOptional, name, name.clone())
        }
        DeclaredParameter::KeywordRest { name, surface } => {
            (ParameterKind::RestKeyword, name, surface.clone())
        }
        DeclaredParameter::Block { .. }
        | DeclaredParameter::NoKeywords
        | DeclaredParameter::ForwardAll
        | DeclaredParameter::Unrecognized { .. } => return None,
    };

    Some(Parameter {
        kind,
        name: name.clone(),
        surface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(params: &[Parameter]) -> Vec<ParameterKind> {
        params.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_classify_preserves_declaration_order() {
        let def = MethodDefinition::new(
            "each_pair",
            vec![
                DeclaredParameter::required("a"),
                DeclaredParameter::optional("b", "1"),
                DeclaredParameter::rest("rest"),
                DeclaredParameter::keyword("c"),
                DeclaredParameter::keyword_optional("d", "nil"),
                DeclaredParameter::keyword_rest("opts"),
            ],
        );

        let params = classify(&def);

        assert_eq!(
            kinds(&params),
            vec![
                ParameterKind::Required,
                ParameterKind::Optional,
                ParameterKind::RestPositional,
                ParameterKind::KeywordRequired,
                ParameterKind::KeywordOptional,
                ParameterKind::RestKeyword,
            ]
        );
        assert_eq!(params[2].surface, "*rest");
        assert_eq!(params[5].surface, "**opts");
        assert_eq!(params[1].surface, "b");
    }

    #[test]
    fn test_classify_drops_block_parameters() {
        let def = MethodDefinition::new(
            "each",
            vec![
                DeclaredParameter::required("x"),
                DeclaredParameter::block("blk"),
            ],
        );

        let params = classify(&def);

        assert_eq!(params, vec![Parameter::new(ParameterKind::Required, "x")]);
    }

    #[test]
    fn test_classify_leaves_out_no_keywords_marker() {
        let def = MethodDefinition::new(
            "each",
            vec![DeclaredParameter::required("x"), DeclaredParameter::NoKeywords],
        );

        assert_eq!(classify(&def).len(), 1);
    }

    #[test]
    fn test_classify_empty_definition() {
        let def = MethodDefinition::new("each", vec![]);
        assert!(classify(&def).is_empty());
    }

    #[test]
    fn test_anonymous_rest_keeps_bare_surface() {
        let def = MethodDefinition::new(
            "each",
            vec![DeclaredParameter::Rest {
                name: String::new(),
                surface: "*".to_string(),
            }],
        );

        let params = classify(&def);
        assert_eq!(params[0].surface, "*");
        assert!(params[0].name.is_empty());
    }

    #[test]
    fn test_forwards_all_detection() {
        let def = MethodDefinition::new("each", vec![DeclaredParameter::ForwardAll]);
        assert!(def.forwards_all());
        assert!(classify(&def).is_empty());
    }

    #[test]
    fn test_parameter_kind_positional_split() {
        assert!(ParameterKind::Optional.is_positional());
        assert!(ParameterKind::RestPositional.is_positional());
        assert!(ParameterKind::KeywordOptional.is_keyword());
        assert!(ParameterKind::RestKeyword.is_keyword());
    }
}
