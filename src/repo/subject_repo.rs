use crate::models::{Subject, SubjectSummary};
use crate::store::{Flashcards, Store, Subjects};
use tracing::{debug, info, instrument};

use super::{RepoError, increment_id, max_numeric_id};

/// Computes the id the next subject will get
///
/// One more than the largest purely numeric id, or `"1"` when there is none.
/// Non-numeric ids left by older data are ignored.
pub fn next_subject_id(existing: &[Subject]) -> String {
    max_numeric_id(existing.iter().map(|s| s.get_id()))
        .map_or_else(|| "1".to_string(), |max| increment_id(&max))
}

/// Lists all subjects in stored order
pub fn list_subjects(store: &Store) -> Vec<Subject> {
    store.load::<Subjects>()
}

/// Retrieves a subject by its ID
pub fn get_subject(store: &Store, subject_id: &str) -> Option<Subject> {
    list_subjects(store)
        .into_iter()
        .find(|s| s.get_id() == subject_id)
}

/// Whether a subject with this name exists, ignoring case
pub fn subject_name_exists(store: &Store, name: &str) -> bool {
    list_subjects(store).iter().any(|s| s.has_name(name))
}

/// Lists all subjects together with how many flashcards each one owns
///
/// Subjects without an entry in the flashcard collection count zero. The
/// flashcard collection is only read.
pub fn list_subjects_with_flashcard_counts(store: &Store) -> Vec<SubjectSummary> {
    let flashcards = store.load::<Flashcards>();
    list_subjects(store)
        .into_iter()
        .map(|subject| {
            let count = flashcards.get(&subject.get_id()).map_or(0, Vec::len);
            SubjectSummary::new(subject, count)
        })
        .collect()
}

/// Creates a new subject
///
/// ### Arguments
///
/// * `store` - The store holding the subject collection
/// * `name` - The subject name, stored verbatim
/// * `description` - Optional description, empty when `None`
///
/// ### Returns
///
/// The newly created Subject with its assigned ID
///
/// ### Errors
///
/// Returns an error if the subject collection cannot be written.
#[instrument(skip(store, description), fields(name = %name))]
pub fn create_subject(
    store: &Store,
    name: String,
    description: Option<String>,
) -> Result<Subject, RepoError> {
    let subject = store.update::<Subjects, _, RepoError, _>(|subjects| {
        let id = next_subject_id(subjects);
        debug!("Assigning subject id {}", id);
        let subject = Subject::new(id, name, description.unwrap_or_default());
        subjects.push(subject.clone());
        Ok(subject)
    })?;

    info!("Created subject with id: {}", subject.get_id());
    Ok(subject)
}

/// Creates a new subject unless one with the same name exists
///
/// The name check and the insert happen under the same lock, so two
/// concurrent requests for one name cannot both succeed.
///
/// ### Errors
///
/// Returns `RepoError::Conflict` if a subject with this name exists,
/// ignoring case, or an I/O error if the collection cannot be read or
/// written.
#[instrument(skip(store, description), fields(name = %name))]
pub fn create_unique_subject(
    store: &Store,
    name: String,
    description: Option<String>,
) -> Result<Subject, RepoError> {
    let subject = store.update::<Subjects, _, RepoError, _>(|subjects| {
        if subjects.iter().any(|s| s.has_name(&name)) {
            debug!("Subject {:?} already exists", name);
            return Err(RepoError::Conflict("Subject name already exists".to_string()));
        }
        let subject = Subject::new(next_subject_id(subjects), name, description.unwrap_or_default());
        subjects.push(subject.clone());
        Ok(subject)
    })?;

    info!("Created subject with id: {}", subject.get_id());
    Ok(subject)
}
