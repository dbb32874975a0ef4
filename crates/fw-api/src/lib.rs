//! # fw-api
//!
//! HTTP boundary for FemWell RS.
//!
//! Handlers return the portal's uniform `{status, message, ...payload}`
//! envelope and delegate all business rules to fw-services.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
