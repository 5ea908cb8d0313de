//! External service interactions
//!
//! - `api` - HTTP façade for the analysis backend
//! - `request_runner` - background execution of façade calls
//! - `health` - periodic liveness probe
//! - `export` - writing the export artifact to disk

pub mod api;
pub mod export;
pub mod health;
pub mod request_runner;

#[cfg(test)]
pub mod stub;

pub use api::{http_connector, AnalysisBackend, ApiClient, ApiError, Connector, EXPORT_FILE_NAME};
pub use export::save_artifact;
pub use health::{HealthMonitor, HEALTH_CHECK_INTERVAL};
pub use request_runner::{Completion, Outcome, RequestRunner};
