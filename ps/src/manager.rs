//! Prompt registry
//!
//! Maps canonical prompt names to loaded prompt files, rejecting collisions
//! at construction so lookups never race against partially loaded state.

use std::collections::HashMap;

use tracing::info;

use crate::prompt::PromptFile;
use crate::store::{FileStore, Loader, StoreError};

/// Default directory searched for prompt files.
pub const DEFAULT_PROMPT_DIR: &str = "prompts";

/// A name→prompt-file registry.
#[derive(Debug)]
pub struct Manager {
    prompt_files: HashMap<String, PromptFile>,
}

impl Manager {
    /// Load from the default `prompts/` directory.
    pub fn new() -> Result<Self, StoreError> {
        Self::from_dir(DEFAULT_PROMPT_DIR)
    }

    /// Load every prompt file under a directory.
    pub fn from_dir(path: impl AsRef<str>) -> Result<Self, StoreError> {
        Self::from_loader(&FileStore::from_path(path)?)
    }

    /// Build the registry from any loader. Two files whose names normalize
    /// to the same value are a collision.
    pub fn from_loader(loader: &dyn Loader) -> Result<Self, StoreError> {
        let mut prompt_files = HashMap::new();

        for prompt_file in loader.load()? {
            if prompt_files.contains_key(&prompt_file.name) {
                return Err(StoreError::Duplicate(prompt_file.name));
            }
            prompt_files.insert(prompt_file.name.clone(), prompt_file);
        }

        info!(count = prompt_files.len(), "loaded prompt files");
        Ok(Self { prompt_files })
    }

    pub fn get(&self, name: &str) -> Option<&PromptFile> {
        self.prompt_files.get(name)
    }

    /// Names of every loaded prompt file, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.prompt_files.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.prompt_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompt_files.is_empty()
    }
}
