use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::dto::CreateSubjectDto;
use crate::errors::ApiError;
use crate::models::{Document, Subject, SubjectSummary};
use crate::repo;
use crate::AppState;

/// Handler for listing all subjects
///
/// This function handles GET requests to `/api/subjects`.
#[instrument(skip(state))]
pub async fn list_subjects_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Subject>> {
    let subjects = repo::list_subjects(&state.store);
    debug!("Listing {} subjects", subjects.len());
    Json(subjects)
}

/// Handler for listing subjects with their flashcard counts
///
/// This function handles GET requests to `/api/subjects-summary`.
#[instrument(skip(state))]
pub async fn list_subject_summaries_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SubjectSummary>> {
    Json(repo::list_subjects_with_flashcard_counts(&state.store))
}

/// Handler for creating a new subject
///
/// This function handles POST requests to `/api/subjects`.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `payload` - The request payload containing the subject name and description
///
/// ### Returns
///
/// `201 Created` with the new subject, `400` for a blank name, or `409`
/// when a subject with the same name (ignoring case) exists
#[instrument(skip(state, payload))]
pub async fn create_subject_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    let name = payload
        .trimmed_name()
        .ok_or_else(|| ApiError::BadRequest("Subject name is required".to_string()))?
        .to_string();

    info!("Creating subject {:?}", name);
    let subject = repo::create_unique_subject(&state.store, name, payload.description)?;

    Ok((StatusCode::CREATED, Json(subject)))
}

/// Handler for listing the documents uploaded to a subject
///
/// This function handles GET requests to `/api/subjects/{id}/documents`.
/// Soft-deleted documents are included.
#[instrument(skip(state), fields(subject_id = %subject_id))]
pub async fn list_subject_documents_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    require_subject(&state, &subject_id)?;
    Ok(Json(repo::list_documents_for_subject(&state.store, &subject_id)))
}

/// Looks up a subject, answering 404 when it does not exist
pub(crate) fn require_subject(state: &AppState, subject_id: &str) -> Result<Subject, ApiError> {
    repo::get_subject(&state.store, subject_id)
        .ok_or_else(|| ApiError::NotFound("Subject not found".to_string()))
}
