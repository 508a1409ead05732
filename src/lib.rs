/// Studyaid: A Flashcard Study Aid Library
///
/// This library provides the core functionality for a study aid that keeps
/// subjects, uploaded markdown documents and flashcards in JSON files, and
/// serves them over a web API.
///
/// ### Modules
///
/// - `store`: JSON file persistence for the three collections
/// - `models`: Data structures representing subjects, documents and flashcards
/// - `repo`: Repository layer for reading and changing the collections
/// - `generator`: Flashcard generation from document text
/// - `handlers`, `dto`, `errors`: The web API
/// - `config`, `logging`: Server configuration and tracing setup
///
/// ### Web API
///
/// The library exposes a RESTful API under `/api` using Axum:
///
/// - `GET /subjects`, `POST /subjects`: List or create subjects
/// - `GET /subjects-summary`: Subjects with their flashcard counts
/// - `GET /subjects/{id}/flashcards`, `POST /subjects/{id}/flashcards`: List or add flashcards
/// - `GET /subjects/{id}/documents`: Documents uploaded to a subject
/// - `POST /document`: Upload a markdown document
/// - `GET /documents`: List all documents
/// - `GET /documents/{id}/download`: Download a document
/// - `DELETE /documents/{id}`: Soft-delete a document
/// - `POST /documents/{id}/process`: Generate flashcards from a document

/// Configuration module
pub mod config;

/// Request and response payloads
pub mod dto;

/// API error type
pub mod errors;

/// Flashcard generation module
pub mod generator;

/// Web API handlers
pub mod handlers;

/// Tracing setup
pub mod logging;

/// Data models module
pub mod models;

/// Repository module for data access
pub mod repo;

/// JSON file store module
pub mod store;

#[cfg(test)]
mod test_utils;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use generator::FlashcardGenerator;
use handlers::*;
use store::Store;

/// State shared by every handler
pub struct AppState {
    /// The JSON collections
    pub store: Store,
    /// Flashcard generator; processing answers 503 without one
    pub generator: Option<Arc<dyn FlashcardGenerator>>,
}

impl AppState {
    pub fn new(store: Store, generator: Option<Arc<dyn FlashcardGenerator>>) -> Self {
        Self { store, generator }
    }
}

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints.
///
/// ### Arguments
///
/// * `state` - The application state to be shared with all handlers
/// * `max_upload_bytes` - The largest request body accepted
///
/// ### Returns
///
/// An Axum Router configured with all routes under `/api`
pub fn create_app(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        // Routes for listing and creating subjects
        .route("/subjects", get(list_subjects_handler).post(create_subject_handler))
        .route("/subjects-summary", get(list_subject_summaries_handler))
        // Routes for a subject's flashcards and documents
        .route(
            "/subjects/{id}/flashcards",
            get(list_flashcards_handler).post(create_flashcard_handler),
        )
        .route("/subjects/{id}/documents", get(list_subject_documents_handler))
        // Route for uploading documents
        .route("/document", post(upload_document_handler))
        // Routes for managing documents
        .route("/documents", get(list_documents_handler))
        .route("/documents/{id}", delete(delete_document_handler))
        .route("/documents/{id}/download", get(download_document_handler))
        .route("/documents/{id}/process", post(process_document_handler));

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
