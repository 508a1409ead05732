use reqwest::multipart::{Form, Part};
use reqwest::{header, Client};
use std::path::Path;
use thiserror::Error;

use studyaid::dto::{
    CreateFlashcardDto, CreateSubjectDto, MessageResponse, ProcessResponse, UploadResponse,
};
use studyaid::models::{Document, Flashcard, Subject, SubjectSummary};

/// Error type for CLI client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server returned an error status with a message body
    #[error("Server error ({}): {message}", .status.as_u16())]
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// A local file could not be read
    #[error("Could not read {path}: {source}")]
    File { path: String, source: std::io::Error },
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body.get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// Extracts the file name from a `Content-Disposition: attachment` header
pub fn attachment_filename(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// HTTP client wrapper for communicating with the studyaid server
pub struct StudyaidClient {
    /// The base URL of the API (e.g. "http://localhost:5000/api")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl StudyaidClient {
    /// Creates a new StudyaidClient
    ///
    /// ### Arguments
    ///
    /// * `server_url` - The root URL of the studyaid server, without `/api`
    pub fn new(server_url: String) -> Self {
        Self {
            base_url: format!("{}/api", server_url.trim_end_matches('/')),
            client: Client::new(),
        }
    }

    // ── Subject endpoints ────────────────────────────────────────────

    /// Lists all subjects
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, ClientError> {
        let url = format!("{}/subjects", self.base_url);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Lists all subjects with their flashcard counts
    pub async fn list_subject_summaries(&self) -> Result<Vec<SubjectSummary>, ClientError> {
        let url = format!("{}/subjects-summary", self.base_url);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Creates a new subject
    pub async fn create_subject(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Subject, ClientError> {
        let url = format!("{}/subjects", self.base_url);
        let dto = CreateSubjectDto { name: Some(name), description };
        let response = self.client.post(&url).json(&dto).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Lists the documents of a subject
    pub async fn list_subject_documents(&self, subject_id: &str) -> Result<Vec<Document>, ClientError> {
        let url = format!("{}/subjects/{}/documents", self.base_url, subject_id);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    // ── Flashcard endpoints ──────────────────────────────────────────

    /// Lists a subject's flashcards, optionally only those from one document
    pub async fn list_flashcards(
        &self,
        subject_id: &str,
        document_id: Option<&str>,
    ) -> Result<Vec<Flashcard>, ClientError> {
        let url = format!("{}/subjects/{}/flashcards", self.base_url, subject_id);
        let mut request = self.client.get(&url);
        if let Some(document_id) = document_id {
            request = request.query(&[("document_id", document_id)]);
        }
        let response = request.send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Adds a flashcard to a subject
    pub async fn create_flashcard(
        &self,
        subject_id: &str,
        question: String,
        answer: String,
        document_id: Option<String>,
    ) -> Result<Flashcard, ClientError> {
        let url = format!("{}/subjects/{}/flashcards", self.base_url, subject_id);
        let dto = CreateFlashcardDto {
            question: Some(question),
            answer: Some(answer),
            document_id,
        };
        let response = self.client.post(&url).json(&dto).send().await?.check().await?;
        Ok(response.json().await?)
    }

    // ── Document endpoints ───────────────────────────────────────────

    /// Lists all documents, soft-deleted ones included
    pub async fn list_documents(&self) -> Result<Vec<Document>, ClientError> {
        let url = format!("{}/documents", self.base_url);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Uploads a markdown file to a subject
    pub async fn upload_document(&self, subject_id: &str, path: &Path) -> Result<Document, ClientError> {
        let url = format!("{}/document", self.base_url);
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::File {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let form = Form::new()
            .text("subject_id", subject_id.to_string())
            .part("file", Part::bytes(bytes).file_name(filename));

        let response = self.client.post(&url).multipart(form).send().await?.check().await?;
        let upload: UploadResponse = response.json().await?;
        Ok(upload.document)
    }

    /// Soft-deletes a document
    pub async fn delete_document(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let url = format!("{}/documents/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Generates flashcards from a document
    pub async fn process_document(&self, id: &str) -> Result<ProcessResponse, ClientError> {
        let url = format!("{}/documents/{}/process", self.base_url, id);
        let response = self.client.post(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Downloads a document
    ///
    /// ### Returns
    ///
    /// The original file name, when the server sent one, and the file bytes
    pub async fn download_document(&self, id: &str) -> Result<(Option<String>, Vec<u8>), ClientError> {
        let url = format!("{}/documents/{}/download", self.base_url, id);
        let response = self.client.get(&url).send().await?.check().await?;
        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename);
        let bytes = response.bytes().await?;
        Ok((filename, bytes.to_vec()))
    }
}
