//! Configuration for promptstore

use std::path::PathBuf;

use eyre::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched for `.prompt` files
    #[serde(default = "default_prompt_dir")]
    pub prompt_dir: String,
}

fn default_prompt_dir() -> String {
    crate::manager::DEFAULT_PROMPT_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt_dir: default_prompt_dir(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            Some(PathBuf::from("promptstore.yml")),
            dirs::config_dir().map(|p| p.join("promptstore").join("config.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.prompt_dir, "prompts");
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "prompt_dir: custom/prompts").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.prompt_dir, "custom/prompts");
    }
}
