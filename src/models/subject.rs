use serde::{Deserialize, Deserializer, Serialize};

/// A named study topic grouping flashcards and documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Decimal string, assigned as one more than the largest numeric id
    id: String,

    /// Display name, stored verbatim
    name: String,

    /// Free-form description, empty when none was given
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
}

/// Reads a string field that older files may have written as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Subject {
    /// Creates a subject with an already assigned id
    pub fn new(id: String, name: String, description: String) -> Self {
        Self { id, name, description }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_description(&self) -> String {
        self.description.clone()
    }

    /// Case-insensitive name comparison used for duplicate detection
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A subject together with the number of flashcards it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    #[serde(flatten)]
    subject: Subject,

    #[serde(rename = "cardCount")]
    card_count: usize,
}

impl SubjectSummary {
    pub fn new(subject: Subject, card_count: usize) -> Self {
        Self { subject, card_count }
    }

    pub fn get_subject(&self) -> &Subject {
        &self.subject
    }

    pub fn get_card_count(&self) -> usize {
        self.card_count
    }
}


#[cfg(test)]
mod prop_tests;
