//! Telemetry domain types

pub mod config_record;
pub mod event;
pub mod user;
pub mod visit;

pub use config_record::{ActivityConfigRecord, TrackingCategory};
pub use event::{ActionKind, ActivityEvent, EventMetadata};
pub use user::UserIdentity;
pub use visit::{ClientInfo, VisitRecord};
