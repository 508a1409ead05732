use serde::{Deserialize, Serialize};

/// A question/answer study unit owned by one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Numeric string scoped to the owning subject, e.g. "701" for subject "7"
    id: String,

    question: String,

    answer: String,

    /// Source document, absent for manually entered cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document_id: Option<String>,
}

impl Flashcard {
    pub fn new(id: String, question: String, answer: String, document_id: Option<String>) -> Self {
        Self {
            id,
            question,
            answer,
            document_id,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_question(&self) -> String {
        self.question.clone()
    }

    pub fn get_answer(&self) -> String {
        self.answer.clone()
    }

    pub fn get_document_id(&self) -> Option<String> {
        self.document_id.clone()
    }

    /// Whether the card was generated from the given document
    pub fn is_from_document(&self, document_id: &str) -> bool {
        self.document_id.as_deref() == Some(document_id)
    }
}
