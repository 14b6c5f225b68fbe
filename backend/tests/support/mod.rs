#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use reliability_tracker::db::{parse_dataset_json_str, LocalRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process-global environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// The sample dataset shipped with the crate.
pub fn sample_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/dataset.json")
}

/// A compact network used by the HTTP and repository tests.
///
/// Routes get ids 1 (ATL-JFK DL), 2 (JFK-LAX AA) and 3 (LAX-ATL DL).
pub const SMALL_NETWORK: &str = r#"{
  "airlines": [
    { "iata": "DL", "name": "Delta Air Lines", "otpPercent": 84.0 },
    { "iata": "AA", "name": "American Airlines", "otpPercent": 68.5 }
  ],
  "airports": [
    { "iata": "ATL", "name": "Hartsfield-Jackson", "city": "Atlanta", "country": "United States",
      "otpPercent": 80.0, "avgDelayMinutes": 12.0, "totalFlights": 2500 },
    { "iata": "JFK", "name": "John F. Kennedy", "city": "New York", "country": "United States",
      "otpPercent": 70.0, "avgDelayMinutes": 18.5, "totalFlights": 1800 },
    { "iata": "LAX", "name": "Los Angeles International", "city": "Los Angeles", "country": "United States",
      "otpPercent": 76.0, "avgDelayMinutes": 14.0, "totalFlights": 2100 }
  ],
  "routes": [
    { "originIata": "ATL", "destIata": "JFK", "airlineIata": "DL", "otpPercent": 81.0,
      "avgDelayMinutes": 11.0, "weatherRisk": 0.2, "reliabilityIndex": 86.0 },
    { "originIata": "JFK", "destIata": "LAX", "airlineIata": "AA", "otpPercent": 59.0,
      "avgDelayMinutes": 27.0, "weatherRisk": 0.4, "peakHourFactor": 1.3, "reliabilityIndex": 64.0 },
    { "originIata": "LAX", "destIata": "ATL", "airlineIata": "DL", "otpPercent": 73.0,
      "avgDelayMinutes": 16.0, "weatherRisk": 0.2, "reliabilityIndex": 78.0 }
  ],
  "flights": [
    { "id": "f1", "callsign": "DAL1", "airlineIata": "DL", "departureIata": "ATL", "arrivalIata": "JFK",
      "scheduledDeparture": "2026-01-05T08:00:00Z", "scheduledArrival": "2026-01-05T10:00:00Z",
      "delayMinutes": 5, "status": "landed", "reliabilityScore": 85.0 },
    { "id": "f2", "callsign": "DAL2", "airlineIata": "DL", "departureIata": "ATL", "arrivalIata": "JFK",
      "scheduledDeparture": "2026-01-06T08:00:00Z", "scheduledArrival": "2026-01-06T10:00:00Z",
      "delayMinutes": 40, "status": "delayed", "reliabilityScore": 72.0 },
    { "id": "f3", "callsign": "DAL3", "airlineIata": "DL", "departureIata": "ATL", "arrivalIata": "JFK",
      "scheduledDeparture": "2026-01-07T18:00:00Z", "scheduledArrival": "2026-01-07T20:00:00Z",
      "status": "scheduled", "reliabilityScore": 75.0 },
    { "id": "f4", "callsign": "AAL4", "airlineIata": "AA", "departureIata": "JFK", "arrivalIata": "LAX",
      "scheduledDeparture": "2026-01-06T17:30:00Z", "scheduledArrival": "2026-01-06T23:30:00Z",
      "delayMinutes": 20, "status": "active", "reliabilityScore": 62.0 },
    { "id": "f5", "callsign": "AAL5", "airlineIata": "AA", "departureIata": "JFK", "arrivalIata": "LAX",
      "scheduledDeparture": "2026-01-04T23:00:00Z", "scheduledArrival": "2026-01-05T05:00:00Z",
      "delayMinutes": 75, "status": "landed", "reliabilityScore": 58.0 },
    { "id": "f6", "callsign": "DAL6", "airlineIata": "DL", "departureIata": "LAX", "arrivalIata": "ATL",
      "scheduledDeparture": "2026-01-03T08:15:00Z", "scheduledArrival": "2026-01-03T15:00:00Z",
      "status": "cancelled", "reliabilityScore": 80.0 }
  ],
  "incidents": [
    { "airportIata": "JFK", "date": "2026-01-06T06:00:00Z", "type": "weather", "impactLevel": 3,
      "description": "Snow", "resolved": false },
    { "airportIata": "JFK", "date": "2026-01-02T06:00:00Z", "type": "atc", "impactLevel": 2,
      "description": "Flow control", "resolved": true },
    { "airportIata": "ATL", "date": "2026-01-04T12:00:00Z", "type": "security", "impactLevel": 2,
      "description": "Checkpoint closure", "resolved": false }
  ]
}"#;

pub fn small_network() -> LocalRepository {
    let loaded = parse_dataset_json_str(SMALL_NETWORK).expect("SMALL_NETWORK is valid");
    LocalRepository::from_loaded(loaded)
}
