//! User identity supplied by the portal's auth/session collaborator.

use serde::{Deserialize, Serialize};

/// Identity attached to every event and visit record.
///
/// All fields are optional: anonymous sessions (e.g. the login page itself)
/// still produce telemetry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub student_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserIdentity {
    /// Identity for a known student.
    pub fn new(
        student_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            student_id: Some(student_id.into()),
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }

    /// Identity for an unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }
}
