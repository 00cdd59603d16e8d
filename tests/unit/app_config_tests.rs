/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use screenplay_parser::app_config::{Config, LogLevel, OutputFormat};
use screenplay_parser::errors::ConfigError;
use crate::common;

/// Test that a missing config file is created with the defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("screenplay.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, config);
    Ok(())
}

/// Test that an existing config file is read, with defaults for missing sections
#[test]
fn test_load_or_create_withPartialFile_shouldMergeDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "custom.json",
        r#"{"output": {"format": "text", "pretty": false}, "log_level": "debug"}"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.output.pretty);
    assert_eq!(config.output.concurrent_documents, 4);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.layout, Config::default().layout);
    Ok(())
}

/// Test that malformed JSON is reported rather than replaced
#[test]
fn test_load_or_create_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

/// Test that validation failures carry a typed error
#[test]
fn test_validate_withTooNarrowDialogue_shouldReturnConfigError() {
    let mut config = Config::default();
    config.layout.dialogue_width = 5;

    let error = config.validate().unwrap_err();
    match error.downcast_ref::<ConfigError>() {
        Some(ConfigError::InvalidLayout { field, value }) => {
            assert_eq!(field, "dialogue_width");
            assert_eq!(*value, 5);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that zero concurrency is rejected
#[test]
fn test_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    config.output.concurrent_documents = 0;

    let error = config.validate().unwrap_err();
    assert_eq!(
        error.downcast_ref::<ConfigError>(),
        Some(&ConfigError::InvalidOutput {
            field: "concurrent_documents".to_string(),
            value: 0,
        })
    );
    assert!(error.to_string().contains("output"));
}

/// Test output extensions
#[test]
fn test_output_format_extension_shouldMatchFormat() {
    assert_eq!(OutputFormat::Json.extension(), "json");
    assert_eq!(OutputFormat::Text.extension(), "txt");
}
