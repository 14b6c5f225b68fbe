//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration: environment
//! variables, a `repository.toml` file or explicit builder settings.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::dataset::parse_dataset_file;
use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};

/// Environment variable naming a JSON dataset to preload.
pub const DATASET_ENV_VAR: &str = "RELIABILITY_DATASET";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Unset or unrecognised values fall back to Local.
    pub fn from_env() -> Self {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to local repository", e);
                Self::Local
            }),
            Err(_) => Self::Local,
        }
    }
}

/// Dataset path from `RELIABILITY_DATASET`, ignoring blank values.
pub fn dataset_path_from_env() -> Option<PathBuf> {
    std::env::var(DATASET_ENV_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use reliability_tracker::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, Some(Path::new("dataset.json"))).await?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance, optionally preloaded from a dataset file.
    pub async fn create(
        repo_type: RepositoryType,
        dataset: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match (repo_type, dataset) {
            (RepositoryType::Local, None) => Ok(Self::create_local()),
            (RepositoryType::Local, Some(path)) => {
                let repo = Self::create_local_from_dataset(path).await?;
                Ok(repo as Arc<dyn FullRepository>)
            }
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a local repository preloaded from a JSON dataset file.
    ///
    /// The file is parsed on the blocking pool. An unreadable file is a
    /// configuration error; malformed JSON or out-of-range records are a
    /// validation error.
    pub async fn create_local_from_dataset(path: &Path) -> RepositoryResult<Arc<LocalRepository>> {
        let owned = path.to_path_buf();
        let context = || {
            ErrorContext::new("load_dataset")
                .with_entity("dataset")
                .with_entity_id(path.display())
        };

        let loaded = tokio::task::spawn_blocking(move || parse_dataset_file(&owned))
            .await
            .map_err(|e| RepositoryError::internal_with_context(e.to_string(), context()))?
            .map_err(|e| {
                let message = format!("{:#}", e);
                match e.root_cause().downcast_ref::<std::io::Error>() {
                    Some(io) => RepositoryError::configuration_with_context(
                        message,
                        context().with_details(format!("io_error_kind={:?}", io.kind())),
                    ),
                    None => RepositoryError::validation_with_context(message, context()),
                }
            })?;

        log::info!(
            "Loaded dataset {} (checksum {})",
            path.display(),
            loaded.checksum
        );
        Ok(Arc::new(LocalRepository::from_loaded(loaded)))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `RELIABILITY_DATASET`.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_env().build().await
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new()
            .from_config_file(config_path)?
            .build()
            .await
    }

    /// Create repository from the default configuration file location.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_default_config()?.build().await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .dataset("backend/data/dataset.json")
///     .build()
///     .await?;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    dataset: Option<PathBuf>,
}

impl RepositoryBuilder {
    /// Local repository, no dataset.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
            dataset: None,
        }
    }

    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    pub fn dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// A dataset already set on the builder is kept when
    /// `RELIABILITY_DATASET` is unset.
    pub fn from_env(mut self) -> Self {
        self.repo_type = RepositoryType::from_env();
        if let Some(path) = dataset_path_from_env() {
            self.dataset = Some(path);
        }
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> RepositoryResult<Self> {
        let config = RepositoryConfig::from_file(config_path)?;
        self.apply_config(&config)
    }

    /// Load configuration from the default location.
    pub fn from_default_config(self) -> RepositoryResult<Self> {
        let config = RepositoryConfig::from_default_location()?;
        self.apply_config(&config)
    }

    fn apply_config(mut self, config: &RepositoryConfig) -> RepositoryResult<Self> {
        self.repo_type = config.repository_type()?;
        if let Some(path) = config.dataset_path() {
            self.dataset = Some(path.to_path_buf());
        }
        Ok(self)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryFactory::create(self.repo_type, self.dataset.as_deref()).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str(" In-Memory ").unwrap(),
            RepositoryType::Local
        );
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.dataset_checksum().is_none());
    }

    #[tokio::test]
    async fn test_builder_local_repository() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .build()
            .await
            .unwrap();

        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_dataset_is_configuration_error() {
        let result = RepositoryBuilder::new()
            .dataset("/nonexistent/dataset.json")
            .build()
            .await;

        match result {
            Err(err @ RepositoryError::ConfigurationError { .. }) => {
                assert_eq!(err.context().operation.as_deref(), Some("load_dataset"));
                assert_eq!(err.context().details.as_deref(), Some("io_error_kind=NotFound"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_dataset_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(
            &path,
            r#"{ "airlines": [{ "iata": "DL", "name": "Delta", "otpPercent": 140.0 }] }"#,
        )
        .unwrap();

        match RepositoryFactory::create_local_from_dataset(&path).await {
            Err(err @ RepositoryError::ValidationError { .. }) => {
                assert!(!err.is_retryable());
                assert_eq!(err.context().entity.as_deref(), Some("dataset"));
                assert!(err.to_string().contains("otpPercent must be within [0, 100]"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a validation error"),
        }
    }
}
