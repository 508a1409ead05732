use serde::{Deserialize, Serialize};

use crate::models::Document;

/// Data transfer object for creating a new subject
///
/// Both fields are optional on the wire so a missing name can be answered
/// with a 400 instead of a deserialization rejection.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateSubjectDto {
    /// The name of the subject
    pub name: Option<String>,

    /// A free-form description
    pub description: Option<String>,
}

/// Data transfer object for adding a flashcard by hand
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateFlashcardDto {
    /// The question side
    pub question: Option<String>,

    /// The answer side
    pub answer: Option<String>,

    /// The document the card belongs to, if any
    pub document_id: Option<String>,
}

/// Query string accepted when listing a subject's flashcards
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
pub struct FlashcardQueryDto {
    /// Only return cards generated from this document
    pub document_id: Option<String>,
}

/// Response sent after a successful upload
#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub message: String,
    pub document: Document,
}

/// Response carrying only a human readable message
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Response sent after a document was turned into flashcards
#[derive(Serialize, Deserialize, Debug)]
pub struct ProcessResponse {
    pub message: String,

    /// How many flashcards were stored
    #[serde(rename = "flashcardCount")]
    pub flashcard_count: usize,
}

impl CreateSubjectDto {
    /// Returns the trimmed name, or `None` when it is missing or blank
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

impl CreateFlashcardDto {
    /// Returns the trimmed question and answer when both are present
    pub fn trimmed_sides(&self) -> Option<(&str, &str)> {
        let question = self.question.as_deref().map(str::trim).filter(|q| !q.is_empty())?;
        let answer = self.answer.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        Some((question, answer))
    }
}
