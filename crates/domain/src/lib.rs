//! # CampusTrace Domain
//!
//! Domain types and models for the portal telemetry subsystem.
//!
//! This crate contains:
//! - Telemetry data types (ActivityEvent, VisitRecord, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other CampusTrace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
