use crate::models::Flashcard;
use crate::store::{Flashcards, Store};
use tracing::{debug, info, instrument};

use super::{RepoError, increment_id, max_numeric_id, numeric_id};

/// A question/answer pair waiting to be stored as a flashcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
}

/// Computes the id the next flashcard of a subject will get
///
/// One more than the largest purely numeric id among `existing`. When there
/// is none the sequence starts at `subject_id * 100 + 1`, so subject "7"
/// starts at "701". A non-numeric subject id starts at "1".
///
/// ### Arguments
///
/// * `subject_id` - The subject the card is added to
/// * `existing` - The subject's current flashcards
pub fn next_flashcard_id(subject_id: &str, existing: &[Flashcard]) -> String {
    if let Some(max) = max_numeric_id(existing.iter().map(|card| card.get_id())) {
        return increment_id(&max);
    }

    match numeric_id(subject_id) {
        Some(base) if base != "0" => format!("{}01", base),
        _ => "1".to_string(),
    }
}

/// Lists a subject's flashcards in stored order
///
/// An unknown subject has no flashcards.
pub fn list_flashcards_for_subject(store: &Store, subject_id: &str) -> Vec<Flashcard> {
    store
        .load::<Flashcards>()
        .remove(subject_id)
        .unwrap_or_default()
}

/// Lists the flashcards of a subject that were generated from one document
///
/// Soft-deleting the document does not affect the result.
pub fn list_flashcards_for_document(
    store: &Store,
    subject_id: &str,
    document_id: &str,
) -> Vec<Flashcard> {
    list_flashcards_for_subject(store, subject_id)
        .into_iter()
        .filter(|card| card.is_from_document(document_id))
        .collect()
}

/// Adds a flashcard to a subject
///
/// ### Arguments
///
/// * `store` - The store holding the flashcard collection
/// * `subject_id` - The owning subject
/// * `question` - The question side
/// * `answer` - The answer side
/// * `document_id` - The source document, `None` for a manual card
///
/// ### Returns
///
/// The newly created Flashcard with its assigned ID
///
/// ### Errors
///
/// Returns an error if the flashcard collection cannot be written.
#[instrument(skip(store, question, answer), fields(subject_id = %subject_id))]
pub fn create_flashcard(
    store: &Store,
    subject_id: &str,
    question: String,
    answer: String,
    document_id: Option<&str>,
) -> Result<Flashcard, RepoError> {
    let mut created = create_flashcards(
        store,
        subject_id,
        vec![NewFlashcard { question, answer }],
        document_id,
    )?;
    // Exactly one card went in
    Ok(created.remove(0))
}

/// Adds a batch of flashcards to a subject in a single write
///
/// Each card gets its id against the collection as it stands after the
/// previous card was appended, so ids within the batch increase by one.
/// Either the whole batch is stored or none of it is.
///
/// ### Errors
///
/// Returns an error if the flashcard collection cannot be written.
#[instrument(skip(store, cards), fields(subject_id = %subject_id, count = cards.len()))]
pub fn create_flashcards(
    store: &Store,
    subject_id: &str,
    cards: Vec<NewFlashcard>,
    document_id: Option<&str>,
) -> Result<Vec<Flashcard>, RepoError> {
    if cards.is_empty() {
        return Ok(Vec::new());
    }

    let created = store.update::<Flashcards, _, RepoError, _>(|all| {
        let subject_cards = all.entry(subject_id.to_string()).or_default();
        let mut created = Vec::with_capacity(cards.len());

        for NewFlashcard { question, answer } in cards {
            let id = next_flashcard_id(subject_id, subject_cards);
            debug!("Assigning flashcard id {}", id);
            let card = Flashcard::new(id, question, answer, document_id.map(str::to_string));
            subject_cards.push(card.clone());
            created.push(card);
        }

        Ok(created)
    })?;

    info!("Created {} flashcards for subject {}", created.len(), subject_id);
    Ok(created)
}
