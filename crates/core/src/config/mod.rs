//! Per-user tracking configuration: gate checks and updates.

pub mod gate;
pub mod ports;
