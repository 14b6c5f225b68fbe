//! Query shapes shared by the repository traits: filters, sort keys and
//! pagination windows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Flight, FlightStatus, Incident, Route};

/// Default page size for listings.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Upper bound on a single page.
pub const MAX_PAGE_LIMIT: usize = 500;

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    /// Build a page, applying the default limit and the upper bound.
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// Unbounded window, for aggregates that scan every row.
    pub fn all() -> Self {
        Self {
            limit: usize::MAX,
            offset: 0,
        }
    }

    /// Slice an already ordered collection.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }

    /// Whether rows remain beyond this page given `returned` rows out of `total`.
    pub fn has_more(&self, returned: usize, total: usize) -> bool {
        self.offset + returned < total
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Equality filters over flights. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightFilter {
    pub status: Option<FlightStatus>,
    pub airline_iata: Option<String>,
    pub departure_iata: Option<String>,
    pub arrival_iata: Option<String>,
    /// Flights departing from or arriving at this airport.
    pub touches_airport: Option<String>,
}

impl FlightFilter {
    pub fn with_status(mut self, status: FlightStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn touching(mut self, iata: impl Into<String>) -> Self {
        self.touches_airport = Some(iata.into());
        self
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        self.status.is_none_or(|s| flight.status == s)
            && self
                .airline_iata
                .as_deref()
                .is_none_or(|a| flight.airline_iata == a)
            && self
                .departure_iata
                .as_deref()
                .is_none_or(|a| flight.departure_iata == a)
            && self
                .arrival_iata
                .as_deref()
                .is_none_or(|a| flight.arrival_iata == a)
            && self
                .touches_airport
                .as_deref()
                .is_none_or(|a| flight.touches_airport(a))
    }
}

/// Sortable route columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteSortKey {
    #[default]
    ReliabilityIndex,
    AvgDelayMinutes,
    OtpPercent,
    WeatherRisk,
}

impl RouteSortKey {
    pub fn value_of(&self, route: &Route) -> f64 {
        match self {
            Self::ReliabilityIndex => route.reliability_index,
            Self::AvgDelayMinutes => route.avg_delay_minutes,
            Self::OtpPercent => route.otp_percent,
            Self::WeatherRisk => route.weather_risk,
        }
    }
}

impl FromStr for RouteSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reliabilityIndex" => Ok(Self::ReliabilityIndex),
            "avgDelayMinutes" | "avgDelay" => Ok(Self::AvgDelayMinutes),
            "otpPercent" => Ok(Self::OtpPercent),
            "weatherRisk" => Ok(Self::WeatherRisk),
            other => Err(format!("Unsupported sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` sorts descending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFilter {
    pub airline_iata: Option<String>,
    pub origin_iata: Option<String>,
    pub dest_iata: Option<String>,
    /// Routes with this airport at either end.
    pub touches_airport: Option<String>,
    pub sort_by: RouteSortKey,
    pub order: SortOrder,
}

impl RouteFilter {
    pub fn matches(&self, route: &Route) -> bool {
        self.airline_iata
            .as_deref()
            .is_none_or(|a| route.airline_iata == a)
            && self
                .origin_iata
                .as_deref()
                .is_none_or(|a| route.origin_iata == a)
            && self.dest_iata.as_deref().is_none_or(|a| route.dest_iata == a)
            && self
                .touches_airport
                .as_deref()
                .is_none_or(|a| route.origin_iata == a || route.dest_iata == a)
    }

    /// Order two routes by the configured column; ties fall back to id.
    pub fn compare(&self, a: &Route, b: &Route) -> Ordering {
        let by_value = self
            .sort_by
            .value_of(a)
            .total_cmp(&self.sort_by.value_of(b));
        self.order.apply(by_value).then(a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentFilter {
    pub airport_iata: Option<String>,
    pub resolved: Option<bool>,
    pub limit: Option<usize>,
}

impl IncidentFilter {
    pub fn unresolved() -> Self {
        Self {
            resolved: Some(false),
            ..Default::default()
        }
    }

    pub fn at_airport(mut self, iata: impl Into<String>) -> Self {
        self.airport_iata = Some(iata.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, incident: &Incident) -> bool {
        self.airport_iata
            .as_deref()
            .is_none_or(|a| incident.airport_iata == a)
            && self.resolved.is_none_or(|r| incident.resolved == r)
    }
}
