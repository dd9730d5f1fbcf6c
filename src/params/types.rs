//! Parameter type definitions and the per-route registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::lexer::{TokenKind, TokenKinds};
use crate::params::parameter::Value;

/// Converts accumulated text into a value. `None` fails the match attempt.
pub type CastFn = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Errors raised while defining or resolving parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterTypeError {
    #[error("Unknown parameter type '{0}'")]
    Unknown(String),

    #[error("Parameter type '{0}' allows no token kinds")]
    NoAllowedKinds(String),

    #[error("Parameter type '{0}' cannot allow END")]
    AllowsEnd(String),

    #[error("Unknown cast '{cast}' for parameter type '{name}'")]
    UnknownCast { name: String, cast: String },
}

/// Which characters a parameter may contain and how its text becomes a value.
#[derive(Clone)]
pub struct ParameterType {
    name: String,
    allowed: TokenKinds,
    cast: CastFn,
}

impl ParameterType {
    pub fn new<F>(
        name: impl Into<String>,
        allowed: impl Into<TokenKinds>,
        cast: F,
    ) -> Result<Self, ParameterTypeError>
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let allowed = allowed.into();
        if allowed.is_empty() {
            return Err(ParameterTypeError::NoAllowedKinds(name));
        }
        if allowed.contains(TokenKind::End) {
            return Err(ParameterTypeError::AllowsEnd(name));
        }
        Ok(Self {
            name,
            allowed,
            cast: Arc::new(cast),
        })
    }

    /// Build a type whose cast is one of the named built-in casts:
    /// `string`, `int` or `integer`.
    pub fn with_named_cast(
        name: impl Into<String>,
        allowed: impl Into<TokenKinds>,
        cast: &str,
    ) -> Result<Self, ParameterTypeError> {
        let name = name.into();
        match cast {
            "string" => Self::new(name, allowed, cast_text),
            "int" | "integer" => Self::new(name, allowed, cast_integer),
            other => Err(ParameterTypeError::UnknownCast {
                name,
                cast: other.to_string(),
            }),
        }
    }

    /// Digits only, cast to a signed 64-bit integer.
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed: TokenKinds::from([TokenKind::Digit]),
            cast: Arc::new(cast_integer),
        }
    }

    /// Identifier-like text, kept as is.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allowed: string_kinds(),
            cast: Arc::new(cast_text),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allowed(&self) -> TokenKinds {
        self.allowed
    }

    pub fn allows(&self, kind: TokenKind) -> bool {
        self.allowed.contains(kind)
    }

    /// Cast accumulated text. Empty text never produces a value.
    pub fn cast(&self, text: &str) -> Option<Value> {
        if text.is_empty() {
            return None;
        }
        (self.cast)(text)
    }
}

impl fmt::Debug for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterType")
            .field("name", &self.name)
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

/// Kinds accepted by the built-in `string` type, also used for parameter names.
pub fn string_kinds() -> TokenKinds {
    TokenKinds::from([
        TokenKind::Digit,
        TokenKind::Alpha,
        TokenKind::Underscore,
        TokenKind::Hyphen,
        TokenKind::Period,
    ])
}

fn cast_integer(text: &str) -> Option<Value> {
    text.parse::<i64>().ok().map(Value::Integer)
}

fn cast_text(text: &str) -> Option<Value> {
    Some(Value::Text(text.to_string()))
}

/// Type name → definition. Starts with the built-ins.
#[derive(Debug, Clone)]
pub struct ParameterTypes {
    types: HashMap<String, ParameterType>,
}

impl ParameterTypes {
    pub fn builtin() -> Self {
        let mut types = HashMap::new();
        for ty in [
            ParameterType::integer("int"),
            ParameterType::integer("integer"),
            ParameterType::string("string"),
        ] {
            types.insert(ty.name.clone(), ty);
        }
        Self { types }
    }

    /// Register a definition, replacing any existing one with the same name.
    pub fn register(&mut self, ty: ParameterType) {
        self.types.insert(ty.name.clone(), ty);
    }

    pub fn resolve(&self, name: &str) -> Result<&ParameterType, ParameterTypeError> {
        self.types
            .get(name)
            .ok_or_else(|| ParameterTypeError::Unknown(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ParameterTypes {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Extend<ParameterType> for ParameterTypes {
    fn extend<I: IntoIterator<Item = ParameterType>>(&mut self, iter: I) {
        for ty in iter {
            self.register(ty);
        }
    }
}
