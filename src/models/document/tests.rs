use super::*;
use serde_json::json;

#[test]
fn test_new_sets_fields() {
    let doc = Document::new("notes.md".to_string(), "3".to_string());

    assert_eq!(doc.get_original_filename(), "notes.md");
    assert_eq!(doc.get_subject_id(), "3");
    assert!(!doc.is_processed());
    assert!(!doc.is_deleted());
    assert!(doc.get_processed_at().is_none());
    assert!(doc.get_deleted_at().is_none());
}

#[test]
fn test_new_generates_hex_tokens() {
    let doc = Document::new("notes.md".to_string(), "1".to_string());

    let id = doc.get_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let stored = doc.get_stored_filename();
    assert!(stored.ends_with(".md"));
    assert_eq!(stored.len(), 32 + ".md".len());
    assert_ne!(stored.trim_end_matches(".md"), id);
}

#[test]
fn test_file_extension() {
    assert_eq!(file_extension("chapter.markdown"), ".markdown");
    assert_eq!(file_extension("archive.tar.gz"), ".gz");
    assert_eq!(file_extension("README"), "");
    assert_eq!(file_extension(".hidden"), "");
}

#[test]
fn test_uploaded_at_is_recent() {
    let before = Utc::now().naive_utc();
    let doc = Document::new("a.md".to_string(), "1".to_string());
    let after = Utc::now().naive_utc();

    assert!(doc.get_uploaded_at() >= before);
    assert!(doc.get_uploaded_at() <= after);
}

#[test]
fn test_mark_processed_twice_moves_timestamp() {
    let mut doc = Document::new("a.md".to_string(), "1".to_string());
    let first = Utc::now().naive_utc();
    doc.mark_processed(first);
    let second = first + chrono::Duration::seconds(5);
    doc.mark_processed(second);

    assert!(doc.is_processed());
    assert_eq!(doc.get_processed_at(), Some(second));
}

#[test]
fn test_optional_fields_are_omitted_until_set() {
    let mut doc = Document::new("a.md".to_string(), "1".to_string());
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["processed"], json!(false));
    assert!(value.get("deleted").is_none());
    assert!(value.get("deleted_at").is_none());
    assert!(value.get("processed_at").is_none());

    doc.mark_deleted(Utc::now().naive_utc());
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["deleted"], json!(true));
    assert!(value["deleted_at"].is_string());
}

#[test]
fn test_reads_naive_iso_timestamps() {
    let raw = json!({
        "id": "0123456789abcdef0123456789abcdef",
        "original_filename": "bio.md",
        "stored_filename": "fedcba9876543210fedcba9876543210.md",
        "subject_id": "1",
        "uploaded_at": "2025-05-10T14:03:21.512345",
        "processed": true,
        "processed_at": "2025-05-10T14:05:00.000001"
    });

    let doc: Document = serde_json::from_value(raw).unwrap();
    assert!(doc.is_processed());
    assert!(!doc.is_deleted());
    assert_eq!(doc.get_uploaded_at().to_string(), "2025-05-10 14:03:21.512345");
}

#[test]
fn test_reads_timestamps_with_utc_offset() {
    let raw = json!({
        "id": "0123456789abcdef0123456789abcdef",
        "original_filename": "legacy.md",
        "stored_filename": "fedcba9876543210fedcba9876543210.md",
        "subject_id": "1",
        "uploaded_at": "2024-05-01T10:00:00+00:00",
        "processed": true,
        "processed_at": "2024-05-01T12:30:00+02:00",
        "deleted_at": null
    });

    let doc: Document = serde_json::from_value(raw).unwrap();
    assert_eq!(doc.get_uploaded_at().to_string(), "2024-05-01 10:00:00");
    assert_eq!(
        doc.get_processed_at().map(|t| t.to_string()),
        Some("2024-05-01 10:30:00".to_string())
    );
    assert!(doc.get_deleted_at().is_none());

    // Written back without the offset
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["uploaded_at"], json!("2024-05-01T10:00:00"));
}

#[test]
fn test_rejects_unparseable_timestamp() {
    let raw = json!({
        "id": "0123456789abcdef0123456789abcdef",
        "original_filename": "bad.md",
        "stored_filename": "fedcba9876543210fedcba9876543210.md",
        "subject_id": "1",
        "uploaded_at": "last tuesday"
    });

    assert!(serde_json::from_value::<Document>(raw).is_err());
}
