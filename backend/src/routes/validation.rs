//! Request validation shared by the HTTP payloads.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// A request field failed validation. Always reported as 400.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a valid timestamp, got '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },

    #[error("{field} has unsupported value '{value}'")]
    UnsupportedValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidTimestamp { field, .. }
            | Self::NotPositive { field }
            | Self::UnsupportedValue { field, .. } => field,
        }
    }
}

/// Trim and uppercase an IATA code; empty or missing values are rejected.
pub fn require_iata(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    normalize_iata(value).ok_or(ValidationError::MissingField { field })
}

/// Trim and uppercase an optional IATA code, treating blank as absent.
pub fn normalize_iata(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_uppercase)
}

/// Parse a departure timestamp.
///
/// RFC 3339 keeps its offset. Timestamps without an offset, and bare dates,
/// are read as UTC.
pub fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    let trimmed = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts);
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }

    Err(ValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Reject zero, negative and non-finite values.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

/// Current time in UTC, used to stamp generated payloads.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
