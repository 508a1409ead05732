use super::*;
use crate::test_utils::arb_messy_string;
use proptest::prelude::*;

/// Generates an arbitrary Config
fn arb_config() -> impl Strategy<Value = Config> {
    (
        arb_messy_string(),
        arb_messy_string(),
        any::<u16>(),
        any::<u64>(),
        prop::option::of(arb_messy_string()),
        arb_messy_string(),
        any::<bool>(),
    )
        .prop_map(|(data_dir, host, port, max_upload_mb, gemini_api_key, gemini_model, log_to_file)| Config {
            data_dir: PathBuf::from(data_dir),
            host,
            port,
            max_upload_mb,
            gemini_api_key,
            gemini_model,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            log_to_file,
        })
}

/// Generates a ConfigUpdate where all fields are Some
fn arb_full_config_update() -> impl Strategy<Value = ConfigUpdate> {
    (
        arb_messy_string(),
        arb_messy_string(),
        any::<u16>(),
        any::<u64>(),
        arb_messy_string(),
        arb_messy_string(),
        any::<bool>(),
    )
        .prop_map(|(data_dir, host, port, max_upload_mb, key, model, log_to_file)| ConfigUpdate {
            data_dir: Some(PathBuf::from(data_dir)),
            host: Some(host),
            port: Some(port),
            max_upload_mb: Some(max_upload_mb),
            gemini_api_key: Some(key),
            gemini_model: Some(model),
            gemini_base_url: Some("http://update".to_string()),
            log_to_file: Some(log_to_file),
            server_url: None,
        })
}

proptest! {
    /// apply_update(default) leaves every field unchanged
    #[test]
    fn prop_identity(config in arb_config()) {
        let original = config.clone();
        let updated = config.apply_update(ConfigUpdate::default());

        prop_assert_eq!(updated.data_dir, original.data_dir);
        prop_assert_eq!(updated.host, original.host);
        prop_assert_eq!(updated.port, original.port);
        prop_assert_eq!(updated.max_upload_mb, original.max_upload_mb);
        prop_assert_eq!(updated.gemini_api_key, original.gemini_api_key);
        prop_assert_eq!(updated.gemini_model, original.gemini_model);
        prop_assert_eq!(updated.log_to_file, original.log_to_file);
    }

    /// A full update replaces every field
    #[test]
    fn prop_full_update_overrides(config in arb_config(), update in arb_full_config_update()) {
        let expected = update.clone();
        let updated = config.apply_update(update);

        prop_assert_eq!(Some(updated.data_dir), expected.data_dir);
        prop_assert_eq!(Some(updated.host), expected.host);
        prop_assert_eq!(Some(updated.port), expected.port);
        prop_assert_eq!(Some(updated.max_upload_mb), expected.max_upload_mb);
        prop_assert_eq!(updated.gemini_api_key, expected.gemini_api_key);
        prop_assert_eq!(Some(updated.gemini_model), expected.gemini_model);
        prop_assert_eq!(Some(updated.log_to_file), expected.log_to_file);
    }

    /// Applying the same update twice is the same as applying it once
    #[test]
    fn prop_idempotent(config in arb_config(), update in arb_full_config_update()) {
        let once = config.clone().apply_update(update.clone());
        let twice = config.apply_update(update.clone()).apply_update(update);

        prop_assert_eq!(once.data_dir, twice.data_dir);
        prop_assert_eq!(once.port, twice.port);
        prop_assert_eq!(once.gemini_model, twice.gemini_model);
    }

    /// The byte limit never overflows
    #[test]
    fn prop_max_upload_bytes_saturates(config in arb_config()) {
        let bytes = config.max_upload_bytes() as u128;
        let exact = config.max_upload_mb as u128 * 1024 * 1024;
        prop_assert!(bytes <= exact);
    }
}
