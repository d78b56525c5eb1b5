//! Prompt file stores
//!
//! Loaders hand the registry a list of decoded prompt files. [`FileStore`]
//! walks a directory tree for `.prompt` files; [`MemoryStore`] serves raw
//! `(identifier, bytes)` pairs, for prompts embedded in a binary or built in
//! tests.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::PromptError;
use crate::prompt::PromptFile;

/// Extension identifying prompt definition files.
pub const PROMPT_FILE_EXTENSION: &str = "prompt";

/// Errors from loading or storing prompt files, and from registry-level name
/// collisions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the specified path is empty")]
    EmptyPath,

    #[error("the specified path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("the specified path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("duplicate prompt file name: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Source of prompt files for a [`Manager`](crate::manager::Manager).
pub trait Loader {
    fn load(&self) -> Result<Vec<PromptFile>, StoreError>;
}

/// Read and construct a single prompt file from disk. The lowercased file
/// stem is the fallback name.
pub fn read_prompt_file(path: impl AsRef<Path>) -> Result<PromptFile, StoreError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let fallback = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_lowercase();
    Ok(PromptFile::new(&fallback, &data)?)
}

/// Serialize a prompt file to disk in its canonical form.
pub fn write_prompt_file(prompt_file: &PromptFile, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let content = prompt_file.serialize()?;
    fs::write(path, content)?;
    Ok(())
}

/// Directory-backed prompt store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `path`. The path must name an existing
    /// directory.
    pub fn from_path(path: impl AsRef<str>) -> Result<Self, StoreError> {
        let trimmed = path.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let path = PathBuf::from(trimmed);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::PathNotFound(path));
            }
            Err(err) => return Err(err.into()),
        };

        if !metadata.is_dir() {
            return Err(StoreError::NotADirectory(path));
        }

        Ok(Self { path })
    }
}

impl Loader for FileStore {
    fn load(&self) -> Result<Vec<PromptFile>, StoreError> {
        let mut prompt_files = Vec::new();

        for entry in WalkDir::new(&self.path) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let is_prompt = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PROMPT_FILE_EXTENSION));
            if !is_prompt {
                continue;
            }

            debug!(path = %entry.path().display(), "loading prompt file");
            prompt_files.push(read_prompt_file(entry.path())?);
        }

        Ok(prompt_files)
    }
}

/// In-memory prompt store over raw `(identifier, bytes)` pairs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sources: Vec<(String, Vec<u8>)>,
}

impl MemoryStore {
    pub fn new(sources: Vec<(String, Vec<u8>)>) -> Self {
        Self { sources }
    }

    pub fn push(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.sources.push((name.into(), data.into()));
    }
}

impl Loader for MemoryStore {
    fn load(&self) -> Result<Vec<PromptFile>, StoreError> {
        self.sources
            .iter()
            .map(|(name, data)| Ok(PromptFile::new(name, data)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = "prompts:\n  user: hi\n";

    #[test]
    fn test_from_path_rejects_empty_path() {
        assert!(matches!(FileStore::from_path("   "), Err(StoreError::EmptyPath)));
    }

    #[test]
    fn test_from_path_rejects_missing_path() {
        let result = FileStore::from_path("does/not/exist");
        assert!(matches!(result, Err(StoreError::PathNotFound(_))));
    }

    #[test]
    fn test_from_path_rejects_plain_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = FileStore::from_path(file.to_str().unwrap());
        assert!(matches!(result, Err(StoreError::NotADirectory(_))));
    }

    #[test]
    fn test_load_walks_nested_directories_and_skips_foreign_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("first.prompt"), MINIMAL).unwrap();
        fs::write(temp.path().join("README.md"), "not a prompt").unwrap();

        let nested = temp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("Second.PROMPT"), MINIMAL).unwrap();

        let store = FileStore::from_path(temp.path().to_str().unwrap()).unwrap();
        let mut names: Vec<String> = store.load().unwrap().into_iter().map(|p| p.name).collect();
        names.sort();

        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_load_surfaces_invalid_prompt_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.prompt"), "prompts:\n  system: no user\n").unwrap();

        let store = FileStore::from_path(temp.path().to_str().unwrap()).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Prompt(_)));
    }

    #[test]
    fn test_read_prompt_file_uses_stem_as_fallback_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("My Greeting.prompt");
        fs::write(&path, MINIMAL).unwrap();

        let prompt_file = read_prompt_file(&path).unwrap();
        assert_eq!(prompt_file.name, "my-greeting");
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("saved.prompt");

        let original = PromptFile::new("saved", MINIMAL.as_bytes()).unwrap();
        write_prompt_file(&original, &path).unwrap();

        let reloaded = read_prompt_file(&path).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn test_memory_store_loads_pairs() {
        let mut store = MemoryStore::default();
        store.push("one", MINIMAL.as_bytes());
        store.push("two", MINIMAL.as_bytes());

        let prompt_files = store.load().unwrap();
        assert_eq!(prompt_files.len(), 2);
        assert_eq!(prompt_files[0].name, "one");
    }
}
