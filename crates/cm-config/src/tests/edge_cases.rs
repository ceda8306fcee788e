use crate::{Config, ConfigError};
use crate::tests::setup_config_dir;

use googletest::assert_that;
use googletest::prelude::eq;
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[backend\nbase_url = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(
        matches!(result, Err(ConfigError::Toml { .. })),
        eq(true)
    );
}

#[test]
#[serial]
fn given_partial_toml_when_load_then_missing_sections_use_defaults() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[retry]\nmax_attempts = 7",
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.retry.max_attempts, eq(7));
    assert_that!(config.backend.base_url.as_str(), eq(crate::DEFAULT_BASE_URL));
    assert_that!(
        config.retry.initial_delay_ms,
        eq(crate::retry_config::DEFAULT_INITIAL_DELAY_MS)
    );
}

#[test]
#[serial]
fn given_unknown_toml_keys_when_load_then_ignored() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[backend]\npublishable_key = \"pk-toml\"\nlegacy_flag = true",
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.backend.publishable_key.as_str(), eq("pk-toml"));
}
