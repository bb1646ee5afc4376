//! Infrastructure adapters for CampusTrace.
//!
//! HTTP implementations of the core ports plus the configuration loader.
//! Everything in this crate talks to the portal's REST API; the telemetry
//! logic itself lives in `campustrace-core`.

pub mod api;
pub mod config;

pub use api::auth::{AccessTokenProvider, SessionTokenProvider};
pub use api::client::PortalApiClient;
pub use api::config_store::HttpConfigStore;
pub use api::errors::ApiError;
pub use api::ingest::HttpEventSink;
pub use api::visits::HttpVisitStore;
