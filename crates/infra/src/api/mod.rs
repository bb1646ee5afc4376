//! Portal API adapters
//!
//! HTTP client, authentication, and the port implementations backed by the
//! portal's activity endpoints.

pub mod auth;
pub mod client;
pub mod config_store;
pub mod errors;
pub mod ingest;
pub mod visits;
