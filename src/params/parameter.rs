//! Extracted parameter values.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// A typed parameter value produced by a cast.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Integer(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One parameter extracted from a request path.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Parameter {
    pub name: String,
    /// Declared type name as written in the template.
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}

/// Two routers on one dispatch path declared the same parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate embedded parameters: '{0}'")]
pub struct DuplicateParameter(pub String);

/// Insertion-ordered parameter map keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|p| &p.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a parameter, refusing names already present.
    pub fn insert(&mut self, parameter: Parameter) -> Result<(), DuplicateParameter> {
        if self.contains(&parameter.name) {
            return Err(DuplicateParameter(parameter.name));
        }
        self.entries.push(parameter);
        Ok(())
    }

    /// Merge another map into this one. Nothing is merged if any name collides.
    pub fn merge(&mut self, other: &Parameters) -> Result<(), DuplicateParameter> {
        if let Some(dup) = other.iter().find(|p| self.contains(&p.name)) {
            return Err(DuplicateParameter(dup.name.clone()));
        }
        self.entries.extend(other.iter().cloned());
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Parameter> for Parameters {
    /// Later duplicates are dropped; use [`Parameters::insert`] to detect them.
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for parameter in iter {
            if !parameters.contains(&parameter.name) {
                parameters.entries.push(parameter);
            }
        }
        parameters
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for parameter in &self.entries {
            map.serialize_entry(&parameter.name, &parameter.value)?;
        }
        map.end()
    }
}
