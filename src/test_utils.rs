use crate::models::{Document, Flashcard, Subject};
use crate::store::Store;
use chrono::{DateTime, NaiveDateTime};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};
use tempfile::{TempDir, tempdir};

/// Sets up a store in a fresh temporary directory
///
/// The `TempDir` must be kept alive for as long as the store is used; the
/// directory is removed when it is dropped.
///
/// ### Returns
///
/// The temporary directory and an opened store rooted in it
pub fn setup_test_store() -> (TempDir, Store) {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = Store::open(dir.path().join("data")).expect("Failed to open store");
    (dir, store)
}

/// Generates strings with unicode, whitespace, quotes and control characters
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "\\PC*",
        "[ \\t\\n\"'\\\\]{0,8}",
        ".*",
    ]
}

/// Removes case-insensitive duplicates, keeping the first occurrence
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| seen.insert(n.to_lowercase()))
        .collect()
}

/// Generates an arbitrary naive timestamp between 2020-01-01 and 2030-01-01
/// with microsecond precision
pub fn arb_naive_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1_577_836_800i64..1_893_456_000i64, 0u32..1_000_000u32).prop_map(|(ts, micros)| {
        DateTime::from_timestamp(ts, micros * 1000)
            .unwrap()
            .naive_utc()
    })
}

/// Generates a subject with a numeric id
pub fn arb_subject() -> impl Strategy<Value = Subject> {
    ("[1-9][0-9]{0,3}", arb_messy_string(), arb_messy_string())
        .prop_map(|(id, name, description)| Subject::new(id, name, description))
}

/// Generates a flashcard, half of them tied to a document
pub fn arb_flashcard() -> impl Strategy<Value = Flashcard> {
    (
        "[0-9]{1,6}",
        arb_messy_string(),
        arb_messy_string(),
        prop::option::of("[0-9a-f]{32}"),
    )
        .prop_map(|(id, question, answer, document_id)| {
            Flashcard::new(id, question, answer, document_id)
        })
}

/// Generates a mapping of subject ids to flashcard sequences
pub fn arb_flashcard_map() -> impl Strategy<Value = BTreeMap<String, Vec<Flashcard>>> {
    prop::collection::btree_map(
        "[1-9][0-9]{0,2}",
        prop::collection::vec(arb_flashcard(), 0..8),
        0..6,
    )
}

/// Generates a document, possibly processed and/or deleted
pub fn arb_document() -> impl Strategy<Value = Document> {
    (
        arb_messy_string(),
        "[1-9][0-9]{0,2}",
        prop::option::of(arb_naive_datetime()),
        prop::option::of(arb_naive_datetime()),
    )
        .prop_map(|(filename, subject_id, processed_at, deleted_at)| {
            let mut doc = Document::new(filename, subject_id);
            if let Some(at) = processed_at {
                doc.mark_processed(at);
            }
            if let Some(at) = deleted_at {
                doc.mark_deleted(at);
            }
            doc
        })
}
