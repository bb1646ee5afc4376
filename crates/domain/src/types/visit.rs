//! Visit records: how long one session dwells on one page path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Device/browser/referrer snapshot captured when a visit opens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// A continuous span during which a session is associated with one page
/// path, bounded by a start and (eventually) an end timestamp.
///
/// `end_time` is `None` and `duration_secs` is 0 while the visit is open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub session_id: String,
    pub page_path: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_secs: i64,
    pub client: ClientInfo,
}

impl VisitRecord {
    /// Open a new visit record starting now at the given path.
    pub fn open(
        student_id: Option<String>,
        session_id: impl Into<String>,
        page_path: impl Into<String>,
        start_time: DateTime<Utc>,
        client: ClientInfo,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            student_id,
            session_id: session_id.into(),
            page_path: page_path.into(),
            start_time,
            end_time: None,
            duration_secs: 0,
            client,
        }
    }

    /// Close the visit at `end_time`, computing the clamped duration.
    ///
    /// Duration is `max(0, end - start)` seconds; a closed record never
    /// carries a negative duration even under clock skew.
    pub fn close(&mut self, end_time: DateTime<Utc>) {
        self.end_time = Some(end_time);
        self.duration_secs = (end_time - self.start_time).num_seconds().max(0);
    }

    /// Whether this record is still open.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
