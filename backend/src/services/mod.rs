//! Domain services: the scoring engine, the flight explainer and the
//! dashboard views built on top of the repository.
//!
//! `prediction` and `explanation` are pure; `flights`, `network`,
//! `analytics` and `reports` are generic over [`crate::db::FullRepository`].

pub mod analytics;
pub mod explanation;
pub mod flights;
pub mod formatting;
pub mod network;
pub mod prediction;
pub mod reports;

pub use explanation::{explain_flight, FlightSnapshot};
pub use prediction::{predict_delay, PredictionInput, PredictionResult, ReferenceData};
