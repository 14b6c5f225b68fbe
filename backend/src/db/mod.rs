//! Storage layer for the network, flight and incident data.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, so the HTTP layer and services never depend on a
//! concrete backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, dashboard services)       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │     (in-memory, optional JSON dataset)        │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use reliability_tracker::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let healthy = services::health_check(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod dataset;
pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{fetch_prediction_references, health_check, predict, PredictionReferences};

// ==================== Repository Pattern Exports ====================

pub use checksum::calculate_checksum;
pub use dataset::{parse_dataset_file, parse_dataset_json_str, Dataset, LoadedDataset};
pub use models::{
    FlightFilter, IncidentFilter, Page, RouteFilter, RouteSortKey, SortOrder, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
pub use repo_config::RepositoryConfig;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, FlightRepository, FullRepository, IncidentRepository, NetworkRepository,
    RepositoryError, RepositoryResult,
};
