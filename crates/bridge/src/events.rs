//! UI events forwarded by the host shell.

use serde::{Deserialize, Serialize};

/// DOM-level activity as the host UI reports it.
///
/// The host forwards these over an `mpsc` channel; the bridge translates
/// each into the matching tracker call. Fields mirror what the tracker
/// needs, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiEvent {
    #[serde(rename_all = "camelCase")]
    RouteChanged { path: String },
    #[serde(rename_all = "camelCase")]
    ButtonClicked { element_id: String, path: String },
    #[serde(rename_all = "camelCase")]
    FormSubmitted { form_id: String, path: String, form_data: Option<serde_json::Value> },
    #[serde(rename_all = "camelCase")]
    InputChanged { input_name: String, input_value: String, path: String },
    #[serde(rename_all = "camelCase")]
    LoggedIn { student_id: String },
    #[serde(rename_all = "camelCase")]
    LoggedOut { student_id: String },
}
