// File: crates/chart-source/src/lib.rs
// Summary: Backend data source: explicit client configuration, filter
// parameters, typed endpoints and the latest-request-wins sequencer.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod sequence;

pub use client::{ApiClient, DatabaseStatus, ForecastModel, Paginated};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use params::FilterParams;
pub use sequence::{RequestSequencer, Ticket};
