use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note ID.
    pub id: i32,
    /// Note text as it was submitted.
    pub text: String,
    /// Most recent summary of the note. Omitted until the note has been
    /// summarized at least once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Datetime the note was created in ISO format.
    pub created_at: DateTime<Utc>,
}

#[derive(Builder, Debug, Deserialize, Serialize, ToSchema)]
pub struct NewNoteRequest {
    /// Note text to add. Missing text is stored as an empty note.
    #[serde(default)]
    #[builder(into)]
    pub text: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Summary that was stored on the note.
    pub summary: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
