/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions,
/// and returning a properly formatted response.

mod subject_handlers;
mod flashcard_handlers;
mod document_handlers;

// Re-export all handlers
pub use subject_handlers::*;
pub use flashcard_handlers::*;
pub use document_handlers::*;
