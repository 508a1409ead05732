/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for reading and changing subjects, documents and
/// flashcards on top of the JSON [`Store`](crate::store::Store).
///
/// Reads never fail: a missing or damaged collection reads as empty.
/// Mutations return a [`RepoError`] when the target record does not exist
/// or the file system refuses the change.
///
/// Input validation (required fields, subject existence) is the caller's
/// job. Uniqueness checks that must see the collection as it is written
/// live here, under the store's lock.

mod subject_repo;
mod document_repo;
mod flashcard_repo;

// Re-export all repository functions
pub use subject_repo::*;
pub use document_repo::*;
pub use flashcard_repo::*;

use crate::store::StoreError;
use thiserror::Error;

/// Failure of a repository mutation
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Io(#[from] StoreError),
}

/// Normalizes an id made only of ASCII digits
///
/// Returns the digits without leading zeros (`"0"` for all zeros). Ids with
/// any other character, including a sign or whitespace, are treated as
/// non-numeric and skipped by id generation. There is no upper bound on the
/// number of digits.
pub(crate) fn numeric_id(id: &str) -> Option<String> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = id.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
}

/// Returns the largest numeric id, normalized, or `None` if there is none
pub(crate) fn max_numeric_id<I>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    // Normalized decimals order by length first, then digit by digit
    ids.into_iter()
        .filter_map(|id| numeric_id(&id))
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
}

/// Adds one to a normalized decimal string
pub(crate) fn increment_id(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}
