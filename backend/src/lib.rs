//! # Reliability Tracker
//!
//! Delay-risk scoring and dashboard backend for an airline network.
//!
//! Given an origin, a destination and an airline (optionally a departure
//! time and a turnaround), the scoring engine estimates a reliability score,
//! an expected delay and a confidence value, and explains which factors drove
//! them. Around it the crate serves the read paths of a reliability
//! dashboard over airlines, airports, routes, flights and incidents.
//!
//! ## Features
//!
//! - **Scoring**: deterministic delay and reliability prediction with a factor breakdown
//! - **Explanations**: narrative summaries for recorded flights
//! - **Storage**: repository traits with an in-memory backend loaded from a JSON dataset
//! - **Dashboard**: paginated listings, analytics aggregates and JSON/CSV reports
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Consolidated wire types
//! - [`models`]: Airlines, airports, routes, flights and incidents
//! - [`db`]: Repository pattern, dataset loading and configuration
//! - [`services`]: Scoring engine, explainer and dashboard services
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Request/response payloads and validation
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(test)]
mod test_fixtures;
