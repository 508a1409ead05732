/// Data models module
///
/// This module defines the records kept in the JSON collections: subjects,
/// uploaded documents and flashcards.

mod subject;
pub use subject::{Subject, SubjectSummary};

mod document;
pub use document::{Document, file_extension, random_token};

mod flashcard;
pub use flashcard::Flashcard;
