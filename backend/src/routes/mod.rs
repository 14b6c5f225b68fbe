//! Request and response payloads of the REST API, grouped by resource.

pub mod analytics;
pub mod flights;
pub mod network;
pub mod pagination;
pub mod predict;
pub mod reports;
pub mod validation;

pub use pagination::{Paginated, Pagination};
pub use validation::ValidationError;
