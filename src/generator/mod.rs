/// Flashcard generation
///
/// Turns the text of an uploaded document into question/answer pairs. The
/// API layer calls a [`FlashcardGenerator`] and hands the result to the
/// flashcard repository; the repositories never call it themselves.

mod gemini;

pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiGenerator};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One question/answer pair produced by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub question: String,
    pub answer: String,
}

/// Failure of a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Request to generation service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Could not parse generated flashcards: {0}")]
    Parse(String),
    #[error("Generation service returned no content")]
    EmptyResponse,
}

/// Produces flashcards from document text
///
/// Implementations return the whole list or an error; callers store
/// nothing until the list is complete.
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    async fn generate(&self, document_text: &str) -> Result<Vec<GeneratedCard>, GenerationError>;
}

/// Parses the `{"flashcards": [...]}` document a generator answers with
///
/// Entries without a question or an answer are dropped.
pub fn parse_generated_cards(text: &str) -> Result<Vec<GeneratedCard>, GenerationError> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default)]
        flashcards: Vec<Entry>,
    }

    #[derive(Deserialize)]
    struct Entry {
        question: Option<String>,
        answer: Option<String>,
    }

    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| GenerationError::Parse(e.to_string()))?;

    Ok(envelope
        .flashcards
        .into_iter()
        .filter_map(|entry| match (entry.question, entry.answer) {
            (Some(question), Some(answer)) => Some(GeneratedCard { question, answer }),
            _ => None,
        })
        .collect())
}
