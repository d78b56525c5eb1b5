//! PromptStore - declarative prompt definitions
//!
//! Loads `.prompt` files (YAML documents describing an AI-assistant prompt:
//! instructions, parameter schema, defaults, few-shot examples, and
//! output-format expectations) and renders them by binding caller-supplied
//! values into the embedded templates.
//!
//! The pipeline is synchronous and stateless across calls: a constructed
//! [`PromptFile`] is read-only and may be shared across concurrent renders.
//!
//! # Example
//!
//! ```ignore
//! use promptstore::{Manager, TemplateValues, Value};
//!
//! let manager = Manager::from_dir("prompts")?;
//! let prompt = manager.get("basic").unwrap();
//!
//! let mut values = TemplateValues::new();
//! values.insert("country".to_string(), Value::from("Malta"));
//!
//! let system = prompt.system_prompt(&values)?;
//! let user = prompt.user_prompt(&values)?;
//! ```

pub mod binding;
pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod name;
pub mod prompt;
pub mod store;
pub mod value;

pub use binding::{ParamType, TemplateValues};
pub use error::PromptError;
pub use manager::Manager;
pub use prompt::{FewShotPair, OutputFormat, PromptFile};
pub use store::{FileStore, Loader, MemoryStore, StoreError};
pub use value::{Object, Stringable, Value};
