//! Repository configuration file support.
//!
//! Reads `repository.toml`:
//!
//! ```toml
//! [repository]
//! type = "local"
//! dataset = "data/dataset.json"   # optional, relative to this file
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{ErrorContext, RepositoryError};

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
    /// JSON dataset preloaded into the store.
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// A relative `dataset` path is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new("load_repository_config")
                .with_entity("config")
                .with_entity_id(path.display())
        };

        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                context(),
            )
        })?;

        let mut config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to parse config file: {}", e),
                context(),
            )
        })?;

        if let Some(base) = path.parent() {
            config.resolve_dataset_path(base);
        }
        Ok(config)
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("backend/repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }

    pub fn dataset_path(&self) -> Option<&Path> {
        self.repository.dataset.as_deref()
    }

    fn resolve_dataset_path(&mut self, base: &Path) {
        if let Some(dataset) = self.repository.dataset.as_mut() {
            if dataset.is_relative() {
                *dataset = base.join(&*dataset);
            }
        }
    }
}
