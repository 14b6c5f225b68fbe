use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::ValidationError;
use crate::models::{Airline, Airport, Flight, Incident, Route};

// =========================================================
// Report types + route
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Flight,
    Airport,
    Route,
    Summary,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Airport => "airport",
            Self::Route => "route",
            Self::Summary => "summary",
        }
    }

    pub fn requires_id(&self) -> bool {
        !matches!(self, Self::Summary)
    }

    /// Attachment name used for CSV downloads.
    pub fn csv_filename(&self) -> String {
        format!("{}-report.csv", self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "flight" => Ok(Self::Flight),
            "airport" => Ok(Self::Airport),
            "route" => Ok(Self::Route),
            "summary" => Ok(Self::Summary),
            other => Err(ValidationError::UnsupportedValue {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

impl ReportFormat {
    /// `csv` selects CSV; anything else is JSON.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("csv") {
            Self::Csv
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub flight: Flight,
    pub airline: Option<Airline>,
    pub departure: Option<Airport>,
    pub arrival: Option<Airport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub airport: Airport,
    pub incidents: Vec<Incident>,
    pub routes: Vec<Route>,
    /// Flights departing from or arriving at the airport.
    pub recent_flight_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub route: Route,
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub recent_flights: Vec<Flight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOverview {
    pub total_flights: usize,
    pub active_flights: usize,
    pub delayed_flights: usize,
    /// Delayed share of all flights, e.g. "12.5%".
    pub delay_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub overview: SummaryOverview,
    pub top_airports: Vec<Airport>,
    pub airlines: Vec<Airline>,
    pub top_routes: Vec<Route>,
    pub active_incidents: Vec<Incident>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Flight(FlightReport),
    Airport(AirportReport),
    Route(RouteReport),
    Summary(SummaryReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Flight(_) => ReportKind::Flight,
            Self::Airport(_) => ReportKind::Airport,
            Self::Route(_) => ReportKind::Route,
            Self::Summary(_) => ReportKind::Summary,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Flight(r) => &r.title,
            Self::Airport(r) => &r.title,
            Self::Route(r) => &r.title,
            Self::Summary(r) => &r.title,
        }
    }

    pub fn to_csv(&self) -> Result<String, serde_json::Error> {
        Ok(to_csv(&serde_json::to_value(self)?))
    }
}

// =========================================================
// CSV flattening
// =========================================================

/// Render a JSON object as a two-line CSV document.
///
/// Nested objects are flattened with `_`-joined keys, arrays are embedded as
/// JSON text and every value is quoted.
pub fn to_csv(value: &Value) -> String {
    let mut columns = Vec::new();
    match value {
        Value::Object(map) => flatten_into(map, "", &mut columns),
        other => columns.push(("value".to_string(), scalar_text(other))),
    }

    let header = columns
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let row = columns
        .iter()
        .map(|(_, text)| format!("\"{}\"", text.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}\n{}", header, row)
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}_{}", prefix, key)
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &column, out),
            other => out.push((column, scalar_text(other))),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(_) => compact_numbers(value).to_string(),
        Value::Number(_) => compact_numbers(value).to_string(),
        other => other.to_string(),
    }
}

/// Integral floats are written without a fractional part.
fn compact_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(compact_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), compact_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

pub const GET_REPORT: &str = "get_report";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{airport, at};
    use serde_json::json;

    #[test]
    fn test_report_kind_parsing() {
        assert_eq!("summary".parse::<ReportKind>().unwrap(), ReportKind::Summary);
        assert!(ReportKind::Flight.requires_id());
        assert!(!ReportKind::Summary.requires_id());
        let err = "weekly".parse::<ReportKind>().unwrap_err();
        assert_eq!(err.field(), "type");
        assert_eq!(ReportKind::Route.csv_filename(), "route-report.csv");
    }

    #[test]
    fn test_format_is_lenient() {
        assert_eq!(ReportFormat::parse_lenient("CSV"), ReportFormat::Csv);
        assert_eq!(ReportFormat::parse_lenient("xml"), ReportFormat::Json);
        assert_eq!(ReportFormat::default(), ReportFormat::Json);
    }

    #[test]
    fn test_csv_flattens_nested_objects() {
        let value = json!({
            "title": "Route Report: ATL → JFK",
            "route": { "id": 1, "weatherRisk": 0.25 },
            "origin": null,
            "ok": true
        });
        assert_eq!(
            to_csv(&value),
            "title,route_id,route_weatherRisk,origin,ok\n\
             \"Route Report: ATL → JFK\",\"1\",\"0.25\",\"\",\"true\""
        );
    }

    #[test]
    fn test_csv_embeds_arrays_and_escapes_quotes() {
        let value = json!({
            "note": "say \"hi\"",
            "items": [{ "a": 1.0 }, 2.5]
        });
        assert_eq!(
            to_csv(&value),
            "note,items\n\"say \"\"hi\"\"\",\"[{\"\"a\"\":1},2.5]\""
        );
    }

    #[test]
    fn test_csv_writes_integral_floats_as_integers() {
        assert_eq!(to_csv(&json!({ "otp": 84.0 })), "otp\n\"84\"");
        assert_eq!(to_csv(&json!({ "otp": 84.5 })), "otp\n\"84.5\"");
    }

    #[test]
    fn test_summary_report_csv_columns_follow_field_order() {
        let report = Report::Summary(SummaryReport {
            title: "Aviation Reliability Summary Report".to_string(),
            generated_at: at(2026, 1, 8, 12, 0),
            overview: SummaryOverview {
                total_flights: 6,
                active_flights: 1,
                delayed_flights: 1,
                delay_rate: "16.7%".to_string(),
            },
            top_airports: vec![airport("ATL", "Hartsfield-Jackson", "Atlanta", 80.0, 12.0, 2500)],
            airlines: vec![],
            top_routes: vec![],
            active_incidents: vec![],
        });
        assert_eq!(report.kind(), ReportKind::Summary);
        assert_eq!(report.title(), "Aviation Reliability Summary Report");

        let csv = report.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title,generatedAt,overview_totalFlights,overview_activeFlights,\
             overview_delayedFlights,overview_delayRate,topAirports,airlines,topRoutes,activeIncidents"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Aviation Reliability Summary Report\",\"2026-01-08T12:00:00Z\",\"6\",\"1\",\"1\",\"16.7%\""));
        assert!(row.ends_with(",\"[]\",\"[]\",\"[]\""));
        assert!(lines.next().is_none());
    }
}
