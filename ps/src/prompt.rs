//! Prompt file model, construction, generation, and serialization
//!
//! A prompt file is a YAML document describing one prompt: instructions,
//! generation config, parameter schema, and few-shot examples. Construction
//! validates eagerly; a value that decodes but fails validation never
//! escapes. Once constructed a prompt file is read-only and may be shared
//! across concurrent renders.

use std::collections::BTreeMap;
use std::fmt;

use handlebars::Handlebars;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use crate::binding::{ParamType, TemplateValues};
use crate::error::PromptError;
use crate::name::clean_name;
use crate::value::Value;

/// Instruction appended to the system template for JSON output when neither
/// template already mentions it.
const JSON_SUFFIX: &str = "Please provide the response in JSON";

/// Expected response format declared by a prompt file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OutputFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(de::Error::custom(format!("invalid output format: {raw}"))),
        }
    }
}

/// A prompt definition. Unknown fields in the source document are ignored.
///
/// Construct through [`PromptFile::new`]; the raw fields stay public so a
/// file can also be assembled in code and serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFile {
    /// Canonical name, unique within a collection
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Free-text model hint, passed through unvalidated
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,

    #[serde(default)]
    pub config: PromptConfig,

    #[serde(default)]
    pub prompts: Prompts,

    /// Fixed illustrative exchanges, included verbatim and never templated
    #[serde(default, rename = "fewShots", skip_serializing_if = "Vec::is_empty")]
    pub few_shots: Vec<FewShotPair>,
}

/// Generation settings for a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, rename = "maxTokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Legacy top-level format field; reconciled with `output` at construction
    #[serde(default, rename = "outputFormat")]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub input: InputSchema,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Parameter schema: declared types keyed by name, where a trailing `?`
/// marks the parameter optional, plus defaults keyed by the bare name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default: BTreeMap<String, Value>,
}

/// Nested output declaration, the authoritative format location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// System and user instruction templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prompts {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system: String,

    #[serde(default)]
    pub user: String,
}

/// One few-shot example: a user message and the expected response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FewShotPair {
    pub user: String,
    pub response: String,
}

impl PromptFile {
    /// Decode and validate a prompt file.
    ///
    /// `fallback_name` seeds the name when the document declares none;
    /// callers typically pass a source-derived identifier such as a filename
    /// stem. Construction fully succeeds or returns no value.
    pub fn new(fallback_name: &str, data: &[u8]) -> Result<Self, PromptError> {
        let mut prompt_file: PromptFile = serde_yaml::from_slice(data)?;

        if prompt_file.prompts.user.is_empty() {
            return Err(PromptError::MissingUserTemplate);
        }

        if prompt_file.name.is_empty() {
            prompt_file.name = fallback_name.to_string();
        }

        prompt_file.name = clean_name(&prompt_file.name);
        if prompt_file.name.is_empty() {
            return Err(PromptError::EmptyName);
        }

        for (key, declared) in &prompt_file.config.input.parameters {
            if ParamType::parse(declared).is_none() {
                return Err(PromptError::InvalidParameterType {
                    key: key.clone(),
                    declared: declared.clone(),
                });
            }
        }

        // The format may be declared in the legacy top-level field or the
        // nested output config; exactly one authoritative value survives.
        if let Some(output) = prompt_file.config.output {
            if output.format != prompt_file.config.output_format {
                warn!(
                    name = %prompt_file.name,
                    legacy = %prompt_file.config.output_format,
                    nested = %output.format,
                    "conflicting output formats declared, nested value wins"
                );
            }
            prompt_file.config.output_format = output.format;
        } else {
            prompt_file.config.output = Some(OutputConfig {
                format: prompt_file.config.output_format,
            });
        }

        Ok(prompt_file)
    }

    /// Render the system instruction template.
    ///
    /// When the declared output format is JSON and neither raw template
    /// mentions "json" (case-insensitively), a fixed JSON instruction is
    /// appended to the system template first.
    pub fn system_prompt(&self, values: &TemplateValues) -> Result<String, PromptError> {
        let mut system = self.prompts.system.clone();

        if self.config.output_format == OutputFormat::Json
            && !system.to_lowercase().contains("json")
            && !self.prompts.user.to_lowercase().contains("json")
        {
            if system.is_empty() {
                system = JSON_SUFFIX.to_string();
            } else {
                system.push(' ');
                system.push_str(JSON_SUFFIX);
            }
        }

        self.render(&system, values)
    }

    /// Render the user instruction template.
    pub fn user_prompt(&self, values: &TemplateValues) -> Result<String, PromptError> {
        self.render(&self.prompts.user, values)
    }

    /// Bind, validate, and expand one template. Binding failures surface
    /// before validation; a fresh engine per render keeps concurrent renders
    /// from sharing template state.
    fn render(&self, template: &str, values: &TemplateValues) -> Result<String, PromptError> {
        let bindings = self.config.input.bind(values)?;
        self.config.input.validate(&bindings)?;

        debug!(name = %self.name, bound = bindings.len(), "rendering prompt template");

        let mut engine = Handlebars::new();
        engine.register_escape_fn(handlebars::no_escape);

        Ok(engine.render_template(template, &bindings)?)
    }

    /// Canonical YAML encoding. Optional fields with no value are omitted;
    /// decoding the result with [`PromptFile::new`] yields an equal file.
    pub fn serialize(&self) -> Result<String, PromptError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
