use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use uuid::Uuid;

/// An uploaded source file from which flashcards may be generated
///
/// Documents are never removed from the index. Deleting one removes the
/// uploaded bytes and flags the record, so flashcards that point at it keep
/// a valid provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// 32 lowercase hex characters
    id: String,

    /// File name as supplied at upload time
    original_filename: String,

    /// Random token plus the original extension; names the file on disk
    stored_filename: String,

    /// Owning subject
    subject_id: String,

    #[serde(deserialize_with = "lenient_datetime")]
    uploaded_at: NaiveDateTime,

    #[serde(default)]
    processed: bool,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_datetime"
    )]
    processed_at: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "is_false")]
    deleted: bool,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_datetime"
    )]
    deleted_at: Option<NaiveDateTime>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parses a timestamp written with or without a UTC offset
///
/// Offset timestamps are converted to UTC and stored naive.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_utc()))
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

fn lenient_optional_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
    }
}

/// Returns a fresh 128-bit random token as 32 hex characters
pub fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Returns the extension of `filename` including its leading dot, or an
/// empty string if there is none
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

impl Document {
    /// Creates an unprocessed document record with fresh identifiers
    ///
    /// ### Arguments
    ///
    /// * `original_filename` - The name the file was uploaded under
    /// * `subject_id` - The subject the document belongs to
    pub fn new(original_filename: String, subject_id: String) -> Self {
        let stored_filename = format!("{}{}", random_token(), file_extension(&original_filename));
        Self {
            id: random_token(),
            original_filename,
            stored_filename,
            subject_id,
            uploaded_at: Utc::now().naive_utc(),
            processed: false,
            processed_at: None,
            deleted: false,
            deleted_at: None,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_original_filename(&self) -> String {
        self.original_filename.clone()
    }

    pub fn get_stored_filename(&self) -> String {
        self.stored_filename.clone()
    }

    pub fn get_subject_id(&self) -> String {
        self.subject_id.clone()
    }

    pub fn get_uploaded_at(&self) -> NaiveDateTime {
        self.uploaded_at
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn get_processed_at(&self) -> Option<NaiveDateTime> {
        self.processed_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn get_deleted_at(&self) -> Option<NaiveDateTime> {
        self.deleted_at
    }

    /// Flags the document as processed at `at`; calling it again moves the
    /// timestamp
    pub fn mark_processed(&mut self, at: NaiveDateTime) {
        self.processed = true;
        self.processed_at = Some(at);
    }

    /// Flags the document as deleted at `at`
    pub fn mark_deleted(&mut self, at: NaiveDateTime) {
        self.deleted = true;
        self.deleted_at = Some(at);
    }
}

#[cfg(test)]
mod tests;
