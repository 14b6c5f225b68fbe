//! Airport disruption incidents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, IncidentId);

/// Disruption category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    #[serde(alias = "WEATHER")]
    Weather,
    #[serde(alias = "ATC")]
    Atc,
    #[serde(alias = "MECHANICAL")]
    Mechanical,
    #[serde(alias = "SECURITY")]
    Security,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Surrogate key, assigned by the store.
    #[serde(default)]
    pub id: IncidentId,
    pub airport_iata: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: IncidentType,
    /// Severity from 1 (minor) to 5 (ground stop)
    pub impact_level: u8,
    pub description: String,
    #[serde(default)]
    pub resolved: bool,
}

impl Default for IncidentId {
    fn default() -> Self {
        IncidentId(0)
    }
}
