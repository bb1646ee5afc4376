//! Activity tracking: tracker surface, visit recorder, delivery queue.

pub mod delivery;
pub mod ports;
pub mod service;
pub mod visit;
