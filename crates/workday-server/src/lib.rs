//! HTTP front end for `workday-engine`.
//!
//! One route, `GET /workdays?days=&hours=&date=`, answering
//! `{"date": "<UTC>"}` or `{"error": "<kind>", "message": "<text>"}`.

pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
pub use error::AppError;
pub use routes::router;
