//! Incident repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::IncidentFilter;
use crate::models::{Incident, IncidentId};

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Incidents matching `filter`, newest first, truncated to `filter.limit`.
    async fn list_incidents(&self, filter: &IncidentFilter) -> RepositoryResult<Vec<Incident>>;

    /// Number of incidents matching `filter`, ignoring its limit.
    async fn count_incidents(&self, filter: &IncidentFilter) -> RepositoryResult<usize>;

    /// Store an incident under a freshly assigned id.
    async fn store_incident(&self, incident: Incident) -> RepositoryResult<IncidentId>;
}
