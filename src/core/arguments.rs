//! Argument expressions supplied to a conversion call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ExpressionShape {
    /// A bare reference to a local variable.
    LocalVariable(String),
    /// `*expr`
    Splat,
    /// `**expr`
    KeywordSplat,
    Other,
}

/// An argument expression, compared by its source text rather than its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub surface: String,
    pub shape: ExpressionShape,
}

impl Expression {
    pub fn new(surface: impl Into<String>, shape: ExpressionShape) -> Self {
        Self {
            surface: surface.into(),
            shape,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            surface: name.clone(),
            shape: ExpressionShape::LocalVariable(name),
        }
    }

    pub fn splat(surface: impl Into<String>) -> Self {
        Self::new(surface, ExpressionShape::Splat)
    }

    pub fn keyword_splat(surface: impl Into<String>) -> Self {
        Self::new(surface, ExpressionShape::KeywordSplat)
    }

    pub fn other(surface: impl Into<String>) -> Self {
        Self::new(surface, ExpressionShape::Other)
    }

    pub fn is_local_variable(&self, name: &str) -> bool {
        matches!(&self.shape, ExpressionShape::LocalVariable(local) if local == name)
    }
}

/// One `key => value` entry of the trailing keyword structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPair {
    /// Symbol name of the key; `None` when the key is not a symbol.
    pub key: Option<String>,
    pub value: Expression,
}

impl KeywordPair {
    pub fn new(key: impl Into<String>, value: Expression) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    /// `name:` with the value omitted, which reads the local `name`.
    pub fn shorthand(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            value: Expression::local(key.clone()),
            key: Some(key),
        }
    }

    /// True for `name: name`.
    pub fn forwards(&self, name: &str) -> bool {
        self.key.as_deref() == Some(name) && self.value.is_local_variable(name)
    }
}

/// Trailing keyword arguments, with or without braces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordArguments {
    pub pairs: Vec<KeywordPair>,
    pub spreads: Vec<Expression>,
}

impl KeywordArguments {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.spreads.is_empty()
    }

    pub fn forwards_keyword(&self, name: &str) -> bool {
        self.pairs.iter().any(|pair| pair.forwards(name))
    }

    pub fn spreads_surface(&self, surface: &str) -> bool {
        self.spreads.iter().any(|spread| spread.surface == surface)
    }
}

/// Arguments after the method reference, split the way forwarding reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallArguments {
    pub positional: Vec<Expression>,
    pub keywords: Option<KeywordArguments>,
    /// The call passes `...`.
    pub forwards_all: bool,
}

impl CallArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional(mut self, expression: Expression) -> Self {
        self.positional.push(expression);
        self
    }

    pub fn keyword(mut self, pair: KeywordPair) -> Self {
        self.keywords.get_or_insert_with(Default::default).pairs.push(pair);
        self
    }

    pub fn keyword_spread(mut self, expression: Expression) -> Self {
        self.keywords
            .get_or_insert_with(Default::default)
            .spreads
            .push(expression);
        self
    }

    pub fn with_forward_all(mut self) -> Self {
        self.forwards_all = true;
        self
    }

    pub fn positional_at(&self, index: usize) -> Option<&Expression> {
        self.positional.get(index)
    }
}

/// What the first argument of a conversion call names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MethodReference {
    /// `:each`
    Symbol(String),
    /// `__method__`
    CurrentMethod,
    /// Any other method call; its result can't be known statically.
    Call(String),
    /// A literal, a local variable, or anything else.
    Other(String),
}

impl MethodReference {
    /// Whether this reference denotes the method named `name`.
    pub fn names(&self, name: &str) -> bool {
        match self {
            Self::Symbol(symbol) => symbol == name,
            Self::CurrentMethod => true,
            Self::Call(_) | Self::Other(_) => false,
        }
    }
}

/// A `to_enum`/`enum_for` call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionCall {
    /// `to_enum` or `enum_for`.
    pub method: String,
    pub target: MethodReference,
    pub arguments: CallArguments,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}
