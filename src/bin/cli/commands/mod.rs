pub mod document;
pub mod flashcard;
pub mod subject;
