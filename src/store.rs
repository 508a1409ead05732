//! Persistent store
//!
//! Every collection the application keeps is a single JSON file under the
//! data directory. Mutations follow one pattern: read the whole file, change
//! it in memory, write the whole file back. A mutex per resource makes that
//! read-modify-write sequence single-writer inside the process.
//!
//! A missing or unparseable file is never an error on read: it yields the
//! resource's empty value, and the parse failure is logged. Records are
//! decoded one at a time, so a single record of the wrong shape is skipped
//! without hiding the rest of the collection.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Document, Flashcard, Subject};

/// Name of the folder (inside the data directory) holding uploaded files
pub const DOCUMENTS_FOLDER: &str = "documents";

/// Errors raised while persisting a resource
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize {resource}: {source}")]
    Serialize {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io { path: path.to_path_buf(), source }
    }
}

/// A named collection persisted as one JSON file
///
/// The empty default of a resource is `Value::default()`, so it follows from
/// the resource's identity alone and never from the contents of a file.
pub trait Resource {
    /// File name inside the data directory
    const FILE_NAME: &'static str;

    /// In-memory shape of the whole collection
    type Value: Serialize + Default;

    /// Builds the collection from parsed JSON
    ///
    /// Returns `None` when the document as a whole has the wrong shape.
    /// Individual records that do not decode are skipped.
    fn decode(raw: serde_json::Value) -> Option<Self::Value>;

    /// Lock guarding read-modify-write cycles on this resource
    fn lock(store: &Store) -> &Mutex<()>;
}

/// Decodes a JSON array record by record, skipping records that do not fit `T`
fn decode_records<T: DeserializeOwned>(resource: &str, raw: serde_json::Value) -> Option<Vec<T>> {
    let serde_json::Value::Array(items) = raw else {
        return None;
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            serde_json::from_value(item)
                .inspect_err(|e| warn!("Skipping unreadable record {} in {}: {}", index, resource, e))
                .ok()
        })
        .collect();
    Some(records)
}

/// Ordered sequence of subjects
pub struct Subjects;

/// Mapping from subject id to that subject's ordered flashcards
pub struct Flashcards;

/// Ordered sequence of uploaded documents
pub struct DocumentIndex;

impl Resource for Subjects {
    const FILE_NAME: &'static str = "subjects.json";
    type Value = Vec<Subject>;

    fn decode(raw: serde_json::Value) -> Option<Self::Value> {
        decode_records(Self::FILE_NAME, raw)
    }

    fn lock(store: &Store) -> &Mutex<()> {
        &store.subjects_lock
    }
}

impl Resource for Flashcards {
    const FILE_NAME: &'static str = "flashcards.json";
    type Value = BTreeMap<String, Vec<Flashcard>>;

    fn decode(raw: serde_json::Value) -> Option<Self::Value> {
        let serde_json::Value::Object(entries) = raw else {
            return None;
        };

        let map = entries
            .into_iter()
            .filter_map(|(subject_id, cards)| {
                let resource = format!("{} (subject {})", Self::FILE_NAME, subject_id);
                match decode_records::<Flashcard>(&resource, cards) {
                    Some(cards) => Some((subject_id, cards)),
                    None => {
                        warn!("Skipping {}: not a list of flashcards", resource);
                        None
                    }
                }
            })
            .collect();
        Some(map)
    }

    fn lock(store: &Store) -> &Mutex<()> {
        &store.flashcards_lock
    }
}

impl Resource for DocumentIndex {
    const FILE_NAME: &'static str = "document_index.json";
    type Value = Vec<Document>;

    fn decode(raw: serde_json::Value) -> Option<Self::Value> {
        decode_records(Self::FILE_NAME, raw)
    }

    fn lock(store: &Store) -> &Mutex<()> {
        &store.documents_lock
    }
}

/// Handle on the data directory
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    subjects_lock: Mutex<()>,
    flashcards_lock: Mutex<()>,
    documents_lock: Mutex<()>,
}

impl Store {
    /// Creates a store rooted at `data_dir` without touching the file system
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            subjects_lock: Mutex::new(()),
            flashcards_lock: Mutex::new(()),
            documents_lock: Mutex::new(()),
        }
    }

    /// Creates a store and makes sure the data directory, the documents
    /// folder and all three resource files exist
    ///
    /// ### Errors
    ///
    /// Returns an error if a directory cannot be created or a seed file
    /// cannot be written.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(data_dir);
        let documents_dir = store.documents_dir();
        fs::create_dir_all(&documents_dir).map_err(|e| StoreError::io(&documents_dir, e))?;
        store.ensure_exists::<Subjects>()?;
        store.ensure_exists::<Flashcards>()?;
        store.ensure_exists::<DocumentIndex>()?;
        Ok(store)
    }

    fn ensure_exists<R: Resource>(&self) -> Result<(), StoreError> {
        if !self.path_of::<R>().exists() {
            debug!("Seeding empty {}", R::FILE_NAME);
            self.save::<R>(&R::Value::default())?;
        }
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding uploaded document bytes
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_FOLDER)
    }

    /// Physical location of an uploaded document
    pub fn document_path(&self, stored_filename: &str) -> PathBuf {
        self.documents_dir().join(stored_filename)
    }

    /// Location of a resource's backing file
    pub fn path_of<R: Resource>(&self) -> PathBuf {
        self.data_dir.join(R::FILE_NAME)
    }

    /// Loads the whole resource
    ///
    /// A missing file yields the empty default. So does a file that cannot
    /// be read or parsed; that case is logged since it hides data.
    pub fn load<R: Resource>(&self) -> R::Value {
        self.try_load::<R>().unwrap_or_else(|e| {
            warn!("{}, treating it as empty", e);
            R::Value::default()
        })
    }

    /// Loads the whole resource, failing when the file exists but cannot be
    /// read
    ///
    /// A missing file yields the empty default. Unparseable content also
    /// yields the default, with a warning; records of the wrong shape are
    /// skipped.
    ///
    /// ### Errors
    ///
    /// Returns `StoreError::Io` for any read failure other than a missing
    /// file, including content that is not UTF-8.
    pub fn try_load<R: Resource>(&self) -> Result<R::Value, StoreError> {
        let path = self.path_of::<R>();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(R::Value::default()),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let raw: serde_json::Value = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Corrupt data in {}, treating it as empty: {}", path.display(), e);
                return Ok(R::Value::default());
            }
        };

        Ok(R::decode(raw).unwrap_or_else(|| {
            warn!("Unexpected layout in {}, treating it as empty", path.display());
            R::Value::default()
        }))
    }

    /// Replaces the resource's file with `value`
    ///
    /// The parent directory is created if needed. The JSON is written to a
    /// sibling temporary file which is then renamed over the target.
    ///
    /// ### Errors
    ///
    /// Returns an error if serialization fails or the file system refuses
    /// the write.
    pub fn save<R: Resource>(&self, value: &R::Value) -> Result<(), StoreError> {
        let path = self.path_of::<R>();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            resource: R::FILE_NAME,
            source,
        })?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    /// Runs `f` on the loaded resource and saves the result, holding the
    /// resource's lock for the whole cycle
    ///
    /// `f` may return an error to abort; nothing is written in that case.
    /// A file that exists but cannot be read also aborts, so its contents
    /// are never replaced.
    pub fn update<R, T, E, F>(&self, f: F) -> Result<T, E>
    where
        R: Resource,
        E: From<StoreError>,
        F: FnOnce(&mut R::Value) -> Result<T, E>,
    {
        let _guard = lock(R::lock(self));
        let mut value = self.try_load::<R>()?;
        let result = f(&mut value)?;
        self.save::<R>(&value)?;
        Ok(result)
    }
}

// The guarded state lives on disk, so a poisoned lock holds nothing broken.
fn lock(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
