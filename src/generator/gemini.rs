use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use super::{FlashcardGenerator, GeneratedCard, GenerationError, parse_generated_cards};

/// Default model used for generation
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default base URL of the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Generates flashcards with Google's Gemini `generateContent` endpoint
///
/// The request asks for a JSON answer constrained by a response schema of
/// `{flashcards: [{question, answer}]}`.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiGenerator {
    /// Creates a generator
    ///
    /// ### Arguments
    ///
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`]
    /// * `api_key` - Key sent in the `x-goog-api-key` header
    /// * `model` - Model name, e.g. [`DEFAULT_MODEL`]
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(document_text: &str) -> Value {
        let prompt = format!(
            "Generate flashcards from the following markdown document.\nDocument:\n{}\n",
            document_text
        );

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "flashcards": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "question": { "type": "STRING" },
                                    "answer": { "type": "STRING" }
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl FlashcardGenerator for GeminiGenerator {
    #[instrument(skip(self, document_text), fields(model = %self.model, chars = document_text.len()))]
    async fn generate(&self, document_text: &str) -> Result<Vec<GeneratedCard>, GenerationError> {
        debug!("Requesting flashcards");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(document_text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status: status.as_u16(), body });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let cards = parse_generated_cards(&text)?;
        info!("Generated {} flashcards", cards.len());
        Ok(cards)
    }
}
