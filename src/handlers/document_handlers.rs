use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::dto::{MessageResponse, ProcessResponse, UploadResponse};
use crate::errors::ApiError;
use crate::models::Document;
use crate::repo::{self, NewFlashcard, RepoError};
use crate::store::StoreError;
use crate::AppState;

use super::subject_handlers::require_subject;

/// File extensions accepted for upload, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Reduces an uploaded file name to a safe, flat file name
///
/// Path separators become spaces, anything outside ASCII letters, digits,
/// `_`, `.` and `-` is dropped, runs of whitespace collapse into `_`, and
/// leading or trailing dots and underscores are stripped. The result may be
/// empty.
pub fn sanitize_filename(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    flattened
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Whether the file name carries one of the [`ALLOWED_EXTENSIONS`]
pub fn is_allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Looks up a document, answering 404 when it does not exist
fn require_document(state: &AppState, document_id: &str) -> Result<Document, ApiError> {
    repo::get_document(&state.store, document_id)
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))
}

/// Handler for uploading a markdown document
///
/// This function handles multipart POST requests to `/api/document` with a
/// `subject_id` text field and a `file` field.
///
/// ### Returns
///
/// `201 Created` with the stored document record
///
/// ### Errors
///
/// * `400` when a part is missing, the file name is empty or the extension
///   is not allowed
/// * `404` when the subject does not exist
/// * `413` when the body exceeds the upload limit
#[instrument(skip(state, multipart))]
pub async fn upload_document_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut subject_id: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("subject_id") => subject_id = Some(field.text().await?),
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((filename, bytes.to_vec()));
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let subject_id = subject_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Subject ID is required".to_string()))?;
    require_subject(&state, &subject_id)?;

    let (filename, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("No file part in the request".to_string()))?;
    if filename.trim().is_empty() {
        return Err(ApiError::BadRequest("No file selected".to_string()));
    }

    let filename = sanitize_filename(&filename);
    if !is_allowed_file(&filename) {
        return Err(ApiError::BadRequest(format!(
            "File type not allowed. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    info!("Uploading {} ({} bytes) to subject {}", filename, bytes.len(), subject_id);
    let document = repo::register_document(&state.store, filename, subject_id, |path| {
        std::fs::write(path, &bytes)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            document,
        }),
    ))
}

/// Handler for listing every document, soft-deleted ones included
///
/// This function handles GET requests to `/api/documents`.
#[instrument(skip(state))]
pub async fn list_documents_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Document>> {
    Json(repo::list_documents(&state.store))
}

/// Handler for downloading the bytes of a document
///
/// This function handles GET requests to `/api/documents/{id}/download`.
/// The file is sent as an attachment under its original name. A
/// soft-deleted document no longer has bytes and answers `404`.
#[instrument(skip(state), fields(document_id = %document_id))]
pub async fn download_document_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document = require_document(&state, &document_id)?;
    if document.is_deleted() {
        return Err(ApiError::NotFound("Document not found".to_string()));
    }

    let path = state.store.document_path(&document.get_stored_filename());
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            warn!("Bytes of document {} are missing at {}", document_id, path.display());
            ApiError::NotFound("Document file not found".to_string())
        } else {
            RepoError::from(StoreError::io(&path, e)).into()
        }
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        document.get_original_filename().replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// Handler for soft-deleting a document
///
/// This function handles DELETE requests to `/api/documents/{id}`. The
/// uploaded file is removed but the record and its flashcards are kept.
#[instrument(skip(state), fields(document_id = %document_id))]
pub async fn delete_document_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    repo::soft_delete_document(&state.store, &document_id)?;

    Ok(Json(MessageResponse {
        message: "Document deleted successfully".to_string(),
    }))
}

/// Handler for turning a document into flashcards
///
/// This function handles POST requests to `/api/documents/{id}/process`.
/// The document text is sent to the configured generator, the returned
/// cards are stored under the document's subject tagged with the document
/// id, and the document is marked as processed.
///
/// ### Errors
///
/// * `404` when the document does not exist
/// * `409` when the document was soft-deleted
/// * `503` when no generator is configured
/// * `502` when generation fails
#[instrument(skip(state), fields(document_id = %document_id))]
pub async fn process_document_handler(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let document = require_document(&state, &document_id)?;
    if document.is_deleted() {
        return Err(ApiError::Conflict("Document has been deleted".to_string()));
    }

    let generator = state.generator.as_ref().ok_or(ApiError::GeneratorUnavailable)?;

    let path = state.store.document_path(&document.get_stored_filename());
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| RepoError::from(StoreError::io(&path, e)))?;

    info!("Generating flashcards from {}", document.get_original_filename());
    let cards = generator
        .generate(&text)
        .await?
        .into_iter()
        .map(|card| NewFlashcard { question: card.question, answer: card.answer })
        .collect();

    let created = repo::create_flashcards(
        &state.store,
        &document.get_subject_id(),
        cards,
        Some(document_id.as_str()),
    )?;
    repo::mark_document_processed(&state.store, &document_id)?;

    let count = created.len();
    info!("Stored {} flashcards from document {}", count, document_id);

    Ok(Json(ProcessResponse {
        message: format!("Document processed successfully. Generated {} flashcards.", count),
        flashcard_count: count,
    }))
}
