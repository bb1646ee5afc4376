//! Activity event payloads sent to the ingestion endpoint.
//!
//! An [`ActivityEvent`] is built once per tracking call and never mutated
//! afterwards; optional fields are attached with the `with_*` builders
//! before the event is handed to the delivery queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::config_record::TrackingCategory;
use crate::types::user::UserIdentity;

/// The kind of user action an event records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PageView,
    ButtonClick,
    FormSubmission,
    FormInput,
    ApiCall,
    Login,
    Logout,
}

impl ActionKind {
    /// The configuration category that gates this action kind.
    pub fn category(self) -> TrackingCategory {
        match self {
            Self::PageView => TrackingCategory::PageViews,
            Self::ButtonClick => TrackingCategory::ButtonClicks,
            Self::FormSubmission => TrackingCategory::FormSubmissions,
            Self::FormInput => TrackingCategory::FormInputs,
            Self::ApiCall => TrackingCategory::ApiCalls,
            Self::Login | Self::Logout => TrackingCategory::LoginLogout,
        }
    }
}

/// User and session details stamped onto every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Seconds elapsed since the tracker was constructed.
    pub session_duration_secs: i64,
}

impl EventMetadata {
    /// Build metadata from a user identity plus the current session age.
    pub fn from_identity(identity: &UserIdentity, session_duration_secs: i64) -> Self {
        Self {
            student_id: identity.student_id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            session_duration_secs,
        }
    }
}

/// One telemetry event, correlated to its session by `session_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub action: ActionKind,
    pub page_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_method: Option<String>,
    pub metadata: EventMetadata,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    /// Create an event with the required fields; optional payload fields are
    /// attached with the `with_*` builders.
    pub fn new(
        action: ActionKind,
        page_path: impl Into<String>,
        session_id: impl Into<String>,
        metadata: EventMetadata,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            action,
            page_path: page_path.into(),
            element_id: None,
            form_id: None,
            input_name: None,
            input_value: None,
            form_data: None,
            api_endpoint: None,
            api_method: None,
            metadata,
            session_id: session_id.into(),
            timestamp,
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    pub fn with_form_id(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = Some(form_id.into());
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self.input_value = Some(value.into());
        self
    }

    pub fn with_form_data(mut self, form_data: serde_json::Value) -> Self {
        self.form_data = Some(form_data);
        self
    }

    pub fn with_api_call(mut self, endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self.api_method = Some(method.into());
        self
    }
}
