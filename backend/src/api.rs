//! Public API surface for the reliability tracker.
//!
//! This file consolidates the types that cross the HTTP boundary. All of them
//! derive Serialize/Deserialize and use camelCase field names on the wire.

pub use crate::models::{
    Airline, Airport, Flight, FlightId, FlightStatus, Incident, IncidentId, IncidentType, Route,
    RouteId, RouteKey,
};
pub use crate::routes::analytics::{AnalyticsDashboard, DelayDistribution, PeakHourBucket};
pub use crate::routes::flights::{FlightDetail, FlightHistoryEntry, FlightListItem};
pub use crate::routes::network::{AirportListItem, RouteListItem};
pub use crate::routes::predict::PredictionRequest;
pub use crate::routes::reports::{
    AirportReport, FlightReport, Report, ReportFormat, ReportKind, RouteReport, SummaryOverview,
    SummaryReport,
};
pub use crate::routes::{Paginated, Pagination, ValidationError};
pub use crate::services::prediction::{
    FactorExplanation, Impact, PredictionInput, PredictionResult,
};
