/*
[INPUT]:  Validated task fields from the list model
[OUTPUT]: JSON request bodies for task-store mutations
[POS]:    Type layer - outbound request schema
[UPDATE]: When mutation endpoints change their body format
*/

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body for POST /tasks/create.
///
/// Optional fields are omitted rather than sent as null so the store
/// keeps its column defaults.
#[derive(Debug, Clone, Serialize)]
pub struct NewTaskRequest {
    pub user_email: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}
