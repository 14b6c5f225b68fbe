//! HTTP server module for the reliability tracker.
//!
//! This module provides an axum-based HTTP server that exposes the scoring
//! engine and the dashboard read paths as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query/body parsing and validation                      │
//! │  - JSON and CSV responses                                 │
//! │  - CORS, compression, error envelope                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/, db/services.rs)                │
//! │  - Prediction, explanations, listings, reports            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository (in-memory, JSON dataset)              │
//! └──────────────────────────────────────────────────────────┘
//! ```

#[cfg(feature = "http-server")]
pub mod config;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use config::ServerConfig;

#[cfg(feature = "http-server")]
pub use router::{create_router, create_router_with_config};

#[cfg(feature = "http-server")]
pub use state::AppState;
