//! Prompt processing error types

use thiserror::Error;

use crate::binding::ParamType;

/// Errors raised by the prompt pipeline: construction, binding, validation,
/// and rendering. All are terminal for the operation that raised them.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to parse prompt file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("no user prompt template was provided in the prompt file")]
    MissingUserTemplate,

    #[error("the prompt file name, once cleaned, is empty")]
    EmptyName,

    #[error("invalid data type for parameter {key}: {declared}")]
    InvalidParameterType { key: String, declared: String },

    #[error("no value provided for parameter {key}")]
    MissingParameter { key: String },

    #[error("parameter {key} is not a {expected}")]
    TypeMismatch { key: String, expected: ParamType },

    #[error("failed to render prompt: {0}")]
    Render(#[from] handlebars::RenderError),
}
