use serde::{Deserialize, Serialize};

use crate::models::{Airport, Route};

// =========================================================
// Airline / airport / route listing types
// =========================================================

/// Airport row with the number of unresolved incidents it currently has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportListItem {
    #[serde(flatten)]
    pub airport: Airport,
    pub active_incidents: usize,
}

/// Route row with display names of both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteListItem {
    #[serde(flatten)]
    pub route: Route,
    pub origin_name: String,
    pub origin_city: String,
    pub dest_name: String,
    pub dest_city: String,
}

pub const LIST_AIRLINES: &str = "list_airlines";
pub const LIST_AIRPORTS: &str = "list_airports";
pub const LIST_ROUTES: &str = "list_routes";
