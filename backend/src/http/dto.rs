//! Query strings and small response bodies of the REST API.
//!
//! Resource payloads live in [`crate::routes`]; this module only holds what
//! is specific to the HTTP transport.

use serde::{Deserialize, Serialize};

use crate::db::{FlightFilter, Page, RouteFilter, RouteSortKey, SortOrder};
use crate::models::FlightStatus;
use crate::routes::reports::{ReportFormat, ReportKind};
use crate::routes::validation::{normalize_iata, ValidationError};

/// Plain `limit`/`offset` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Query parameters for the flight listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlightsQuery {
    /// One of scheduled, active, landed, delayed, cancelled
    #[serde(default)]
    pub status: Option<String>,
    /// Airline IATA code
    #[serde(default)]
    pub airline: Option<String>,
    /// Departure airport IATA code
    #[serde(default)]
    pub departure: Option<String>,
    /// Arrival airport IATA code
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl FlightsQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> Result<FlightFilter, ValidationError> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<FlightStatus>().map_err(|_| {
                ValidationError::UnsupportedValue {
                    field: "status",
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(FlightFilter {
            status,
            airline_iata: normalize_iata(self.airline.as_deref()),
            departure_iata: normalize_iata(self.departure.as_deref()),
            arrival_iata: normalize_iata(self.arrival.as_deref()),
            touches_airport: None,
        })
    }
}

/// Query parameters for the airline listing.
pub type AirlinesQuery = PageQuery;

/// Query parameters for the airport listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AirportsQuery {
    /// Case-insensitive match on code, name, city or country
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl AirportsQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Query parameters for the route listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoutesQuery {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    /// reliabilityIndex (default), avgDelayMinutes, otpPercent or weatherRisk
    #[serde(default)]
    pub sort_by: Option<String>,
    /// asc or desc (default)
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl RoutesQuery {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> Result<RouteFilter, ValidationError> {
        let sort_by = match self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<RouteSortKey>()
                .map_err(|_| ValidationError::UnsupportedValue {
                    field: "sortBy",
                    value: raw.to_string(),
                })?,
            None => RouteSortKey::default(),
        };
        let order = self
            .order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();

        Ok(RouteFilter {
            airline_iata: normalize_iata(self.airline.as_deref()),
            origin_iata: normalize_iata(self.origin.as_deref()),
            dest_iata: normalize_iata(self.destination.as_deref()),
            touches_airport: None,
            sort_by,
            order,
        })
    }
}

/// Query parameters for report generation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportsQuery {
    /// flight, airport, route or summary
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Flight id, airport IATA code or route id
    #[serde(default)]
    pub id: Option<String>,
    /// json (default) or csv
    #[serde(default)]
    pub format: Option<String>,
}

impl ReportsQuery {
    pub fn kind(&self) -> Result<ReportKind, ValidationError> {
        self.kind
            .as_deref()
            .ok_or(ValidationError::MissingField { field: "type" })?
            .parse()
    }

    pub fn format(&self) -> ReportFormat {
        self.format
            .as_deref()
            .map(ReportFormat::parse_lenient)
            .unwrap_or_default()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
    /// SHA-256 of the loaded dataset file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_checksum: Option<String>,
}
