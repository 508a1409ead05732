use crate::models::Document;
use crate::store::{DocumentIndex, Store, StoreError};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use super::RepoError;

/// Registers an uploaded document
///
/// Fresh identifiers are generated first, then `save_file` is called with
/// the path the bytes must be written to. Only after the bytes are in place
/// is the record appended to the document index.
///
/// ### Arguments
///
/// * `store` - The store holding the document index
/// * `filename` - The (already sanitized) name the file was uploaded under
/// * `subject_id` - The owning subject; its existence is checked by the caller
/// * `save_file` - Writes the uploaded bytes to the given path
///
/// ### Returns
///
/// The new, unprocessed Document record
///
/// ### Errors
///
/// Returns an error if writing the bytes or the index fails. A failed byte
/// write leaves the index untouched.
#[instrument(skip(store, save_file), fields(filename = %filename, subject_id = %subject_id))]
pub fn register_document<F>(
    store: &Store,
    filename: String,
    subject_id: String,
    save_file: F,
) -> Result<Document, RepoError>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let document = Document::new(filename, subject_id);
    let path = store.document_path(&document.get_stored_filename());

    let documents_dir = store.documents_dir();
    fs::create_dir_all(&documents_dir).map_err(|e| StoreError::io(&documents_dir, e))?;

    debug!("Saving uploaded bytes to {}", path.display());
    save_file(&path).map_err(|e| StoreError::io(&path, e))?;

    store.update::<DocumentIndex, _, RepoError, _>(|documents| {
        documents.push(document.clone());
        Ok(())
    })?;

    info!("Registered document with id: {}", document.get_id());
    Ok(document)
}

/// Lists every document, soft-deleted ones included
pub fn list_documents(store: &Store) -> Vec<Document> {
    store.load::<DocumentIndex>()
}

/// Lists the documents of one subject, soft-deleted ones included
pub fn list_documents_for_subject(store: &Store, subject_id: &str) -> Vec<Document> {
    list_documents(store)
        .into_iter()
        .filter(|d| d.get_subject_id() == subject_id)
        .collect()
}

/// Retrieves a document by its ID
pub fn get_document(store: &Store, document_id: &str) -> Option<Document> {
    list_documents(store)
        .into_iter()
        .find(|d| d.get_id() == document_id)
}

/// Soft-deletes a document
///
/// Removes the uploaded file, then flags the record as deleted. The record
/// stays in the index and flashcards generated from it are left alone.
///
/// A file that is already gone counts as removed. If removal fails for any
/// other reason the record is not flagged.
///
/// ### Errors
///
/// * `RepoError::NotFound` if no document has this ID
/// * `RepoError::Io` if the file cannot be removed or the index cannot be
///   written
#[instrument(skip(store), fields(document_id = %document_id))]
pub fn soft_delete_document(store: &Store, document_id: &str) -> Result<Document, RepoError> {
    store.update::<DocumentIndex, _, RepoError, _>(|documents| {
        let document = documents
            .iter_mut()
            .find(|d| d.get_id() == document_id)
            .ok_or_else(|| RepoError::NotFound(format!("Document {}", document_id)))?;

        let path = store.document_path(&document.get_stored_filename());
        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("File {} was already gone", path.display());
            }
            Err(e) => return Err(StoreError::io(&path, e).into()),
        }

        document.mark_deleted(Utc::now().naive_utc());
        Ok(document.clone())
    })
    .inspect(|_| info!("Soft-deleted document {}", document_id))
}

/// Marks a document as processed
///
/// Calling this again on a processed document refreshes `processed_at`.
///
/// ### Errors
///
/// * `RepoError::NotFound` if no document has this ID
/// * `RepoError::Io` if the index cannot be written
#[instrument(skip(store), fields(document_id = %document_id))]
pub fn mark_document_processed(store: &Store, document_id: &str) -> Result<Document, RepoError> {
    store.update::<DocumentIndex, _, RepoError, _>(|documents| {
        let document = documents
            .iter_mut()
            .find(|d| d.get_id() == document_id)
            .ok_or_else(|| RepoError::NotFound(format!("Document {}", document_id)))?;

        document.mark_processed(Utc::now().naive_utc());
        Ok(document.clone())
    })
}
