//! Repository implementations module.
//!
//! - `local`: In-memory implementation for development, tests and dataset files
pub mod local;

pub use local::LocalRepository;
