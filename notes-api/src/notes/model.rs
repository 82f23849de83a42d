use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    users::UserId,
    validation::{Validate, Violations},
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_by: UserId,
    pub shared_by: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNote {
    pub title: String,
    pub description: String,
}

/// Update replaces both fields, so it shares the create body.
pub type UpdateNote = CreateNote;

impl Validate for CreateNote {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .not_empty("title", &self.title)
            .not_empty("description", &self.description)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShareNote {
    pub email_id: String,
}

impl Validate for ShareNote {
    fn validate(&self) -> Result<()> {
        Violations::new()
            .not_empty("emailId", &self.email_id)
            .email("emailId", &self.email_id)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNotesResponse {
    pub success: bool,
    pub all_notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetNoteResponse {
    pub success: bool,
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub success: bool,
    pub message: String,
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
