use super::*;
use crate::test_utils::arb_messy_string;
use proptest::prelude::*;

proptest! {
    /// has_name ignores case in both directions
    #[test]
    fn prop_has_name_ignores_case(name in "[a-zA-Z ]{1,20}") {
        let subject = Subject::new("1".to_string(), name.clone(), String::new());
        prop_assert!(subject.has_name(&name.to_uppercase()));
        prop_assert!(subject.has_name(&name.to_lowercase()));
    }

    /// Serializing a summary keeps the subject fields at the top level
    #[test]
    fn prop_summary_flattens_subject(
        id in "[0-9]{1,5}",
        name in arb_messy_string(),
        description in arb_messy_string(),
        count in 0usize..10_000,
    ) {
        let subject = Subject::new(id.clone(), name.clone(), description.clone());
        let value = serde_json::to_value(SubjectSummary::new(subject, count)).unwrap();

        prop_assert_eq!(value["id"].as_str().unwrap(), id.as_str());
        prop_assert_eq!(value["name"].as_str().unwrap(), name.as_str());
        prop_assert_eq!(value["description"].as_str().unwrap(), description.as_str());
        prop_assert_eq!(value["cardCount"].as_u64().unwrap(), count as u64);
    }
}

#[test]
fn test_missing_description_defaults_to_empty() {
    let subject: Subject = serde_json::from_str(r#"{"id":"4","name":"Chemistry"}"#).unwrap();
    assert_eq!(subject.get_description(), "");
}
