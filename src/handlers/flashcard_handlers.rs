use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::dto::{CreateFlashcardDto, FlashcardQueryDto};
use crate::errors::ApiError;
use crate::models::Flashcard;
use crate::repo;
use crate::AppState;

use super::subject_handlers::require_subject;

/// Handler for listing a subject's flashcards
///
/// This function handles GET requests to `/api/subjects/{id}/flashcards`.
/// With `?document_id=` only the cards generated from that document are
/// returned. The order is shuffled on every call.
///
/// ### Returns
///
/// The flashcards as JSON, or `404` when the subject does not exist
#[instrument(skip(state, query), fields(subject_id = %subject_id))]
pub async fn list_flashcards_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
    Query(query): Query<FlashcardQueryDto>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    require_subject(&state, &subject_id)?;

    let mut flashcards = match query.document_id.as_deref() {
        Some(document_id) => repo::list_flashcards_for_document(&state.store, &subject_id, document_id),
        None => repo::list_flashcards_for_subject(&state.store, &subject_id),
    };
    debug!("Found {} flashcards", flashcards.len());

    flashcards.shuffle(&mut rand::rng());

    Ok(Json(flashcards))
}

/// Handler for adding a flashcard by hand
///
/// This function handles POST requests to `/api/subjects/{id}/flashcards`.
///
/// ### Arguments
///
/// * `state` - The shared application state
/// * `subject_id` - The owning subject, extracted from the URL path
/// * `payload` - The question, answer and optional source document
///
/// ### Returns
///
/// `201 Created` with the new flashcard
#[instrument(skip(state, payload), fields(subject_id = %subject_id))]
pub async fn create_flashcard_handler(
    State(state): State<Arc<AppState>>,
    Path(subject_id): Path<String>,
    Json(payload): Json<CreateFlashcardDto>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
    require_subject(&state, &subject_id)?;

    let (question, answer) = payload
        .trimmed_sides()
        .ok_or_else(|| ApiError::BadRequest("Question and answer are required".to_string()))?;

    let flashcard = repo::create_flashcard(
        &state.store,
        &subject_id,
        question.to_string(),
        answer.to_string(),
        payload.document_id.as_deref(),
    )?;

    info!("Created flashcard with id: {}", flashcard.get_id());
    Ok((StatusCode::CREATED, Json(flashcard)))
}
