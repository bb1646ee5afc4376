//! Per-user tracking configuration matrix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories of trackable activity, one per configuration flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TrackingCategory {
    PageViews,
    ButtonClicks,
    FormSubmissions,
    ApiCalls,
    LoginLogout,
    FormInputs,
    VisitTime,
}

/// One user's tracking toggle matrix.
///
/// The record is replaced wholesale on every update (read-modify-write,
/// never patched), so readers can never observe a partially updated matrix.
/// The server creates a default-all-true record on first fetch if none
/// exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityConfigRecord {
    pub page_views: bool,
    pub button_clicks: bool,
    pub form_submissions: bool,
    pub api_calls: bool,
    pub login_logout: bool,
    pub form_inputs: bool,
    pub visit_time: bool,
    pub updated_at: DateTime<Utc>,
}

impl Default for ActivityConfigRecord {
    fn default() -> Self {
        Self {
            page_views: true,
            button_clicks: true,
            form_submissions: true,
            api_calls: true,
            login_logout: true,
            form_inputs: true,
            visit_time: true,
            updated_at: Utc::now(),
        }
    }
}

impl ActivityConfigRecord {
    /// Record with every category disabled.
    pub fn all_disabled() -> Self {
        Self {
            page_views: false,
            button_clicks: false,
            form_submissions: false,
            api_calls: false,
            login_logout: false,
            form_inputs: false,
            visit_time: false,
            updated_at: Utc::now(),
        }
    }

    /// Whether the given category is enabled in this matrix.
    pub fn is_enabled(&self, category: TrackingCategory) -> bool {
        match category {
            TrackingCategory::PageViews => self.page_views,
            TrackingCategory::ButtonClicks => self.button_clicks,
            TrackingCategory::FormSubmissions => self.form_submissions,
            TrackingCategory::ApiCalls => self.api_calls,
            TrackingCategory::LoginLogout => self.login_logout,
            TrackingCategory::FormInputs => self.form_inputs,
            TrackingCategory::VisitTime => self.visit_time,
        }
    }

    /// Return a copy of the matrix with one category flipped and the
    /// `updated_at` stamp refreshed.
    pub fn toggled(&self, category: TrackingCategory) -> Self {
        let mut next = self.clone();
        let flag = match category {
            TrackingCategory::PageViews => &mut next.page_views,
            TrackingCategory::ButtonClicks => &mut next.button_clicks,
            TrackingCategory::FormSubmissions => &mut next.form_submissions,
            TrackingCategory::ApiCalls => &mut next.api_calls,
            TrackingCategory::LoginLogout => &mut next.login_logout,
            TrackingCategory::FormInputs => &mut next.form_inputs,
            TrackingCategory::VisitTime => &mut next.visit_time,
        };
        *flag = !*flag;
        next.updated_at = Utc::now();
        next
    }
}
