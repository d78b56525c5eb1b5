//! Parameter binding and type validation
//!
//! Binding resolves the final name→value map for one render call from the
//! schema's optionality and default rules; validation then checks every bound
//! value's tag against its declared type. Both are pure over the schema and
//! the caller values, so a prompt file can be shared across concurrent
//! renders.

use std::collections::HashMap;
use std::fmt;

use crate::error::PromptError;
use crate::prompt::InputSchema;
use crate::value::Value;

/// Caller-supplied values for one render call.
pub type TemplateValues = HashMap<String, Value>;

/// The fixed vocabulary of types a parameter schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Bool,
    Datetime,
    Object,
}

impl ParamType {
    /// Parse a declared type name. The vocabulary is exact lowercase.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "bool" => Some(Self::Bool),
            "datetime" => Some(Self::Datetime),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::String(_)),
            Self::Number => matches!(value, Value::Integer(_) | Value::Float(_)),
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Datetime => matches!(value, Value::Datetime(_)),
            // objects were reduced to strings at binding time
            Self::Object => true,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl InputSchema {
    /// Resolve the binding set for one render call.
    ///
    /// Per declared parameter: the caller value wins, then the default, and a
    /// required parameter with neither fails. Optional parameters with
    /// neither stay unbound so template conditionals see them as absent.
    /// Values for `object`-typed parameters are reduced to their string
    /// rendering here; everything else passes through for validation.
    pub fn bind(&self, values: &TemplateValues) -> Result<HashMap<String, Value>, PromptError> {
        let mut bindings = HashMap::new();

        for (declared, raw_type) in &self.parameters {
            let key = declared.strip_suffix('?').unwrap_or(declared);
            let required = !declared.ends_with('?');
            let ty = self.declared_type(declared, raw_type)?;

            if let Some(value) = values.get(key) {
                let bound = if ty == ParamType::Object {
                    Value::String(value.to_string())
                } else {
                    value.clone()
                };
                bindings.insert(key.to_string(), bound);
            } else if let Some(default) = self.default.get(key) {
                bindings.insert(key.to_string(), default.clone());
            } else if required {
                return Err(PromptError::MissingParameter {
                    key: declared.clone(),
                });
            }
        }

        Ok(bindings)
    }

    /// Check every bound value's tag against its declared type. The first
    /// violation wins; iteration follows the schema's key order so failures
    /// are deterministic.
    pub fn validate(&self, bindings: &HashMap<String, Value>) -> Result<(), PromptError> {
        for (declared, raw_type) in &self.parameters {
            let key = declared.strip_suffix('?').unwrap_or(declared);
            let Some(value) = bindings.get(key) else {
                continue;
            };

            let ty = self.declared_type(declared, raw_type)?;
            if !ty.matches(value) {
                return Err(PromptError::TypeMismatch {
                    key: key.to_string(),
                    expected: ty,
                });
            }
        }

        Ok(())
    }

    // Construction already rejects unknown type names; schemas assembled by
    // hand get the same error here instead of a panic.
    fn declared_type(&self, declared: &str, raw_type: &str) -> Result<ParamType, PromptError> {
        ParamType::parse(raw_type).ok_or_else(|| PromptError::InvalidParameterType {
            key: declared.to_string(),
            declared: raw_type.to_string(),
        })
    }
}
