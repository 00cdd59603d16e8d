/*!
 * Integration tests for the application controller
 */

use anyhow::Result;
use screenplay_parser::app_config::{Config, OutputFormat};
use screenplay_parser::app_controller::{Controller, FileOutcome, FolderSummary, FOLDER_LOG_FILE};
use screenplay_parser::errors::InputError;
use screenplay_parser::file_utils::FileManager;
use screenplay_parser::ParseOptions;
use crate::common;

fn controller(format: OutputFormat) -> Result<Controller> {
    common::init_test_logging();
    let mut config = Config::default();
    config.output.format = format;
    Ok(Controller::with_config(config)?.with_options(ParseOptions {
        start_page: Some(2),
        ..Default::default()
    }))
}

/// Test that a single file run writes the JSON document next to the input
#[tokio::test]
async fn test_run_withTextInput_shouldWriteJsonDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "pilot.txt")?;

    let outcome = controller(OutputFormat::Json)?
        .run(input, temp_dir.path().to_path_buf(), false)
        .await?;

    let output = temp_dir.path().join("pilot.screenplay.json");
    assert_eq!(outcome, FileOutcome::Written(output.clone()));

    let value: serde_json::Value = serde_json::from_str(&FileManager::read_to_string(&output)?)?;
    assert_eq!(value["totalPages"], 3);
    assert_eq!(value["metadata"]["title"], "THE LONG GOODBYE");
    assert_eq!(value["scenes"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["characters"]["HANNAH"]["dialogueCount"], 1);
    Ok(())
}

/// Test that an existing output is only replaced with force
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "pilot.txt")?;
    let output = common::create_test_file(temp_dir.path(), "pilot.screenplay.txt", "old")?;
    let controller = controller(OutputFormat::Text)?;

    let skipped = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(skipped, FileOutcome::Skipped(output.clone()));
    assert_eq!(FileManager::read_to_string(&output)?, "old");

    let written = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert_eq!(written, FileOutcome::Written(output.clone()));
    let text = FileManager::read_to_string(&output)?;
    assert!(text.starts_with("TITLE: THE LONG GOODBYE"));
    Ok(())
}

/// Test that missing and empty inputs fail with input errors
#[tokio::test]
async fn test_run_withBadInputs_shouldReturnInputErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller(OutputFormat::Json)?;

    let missing = controller
        .run(temp_dir.path().join("missing.txt"), temp_dir.path().to_path_buf(), false)
        .await
        .unwrap_err();
    assert!(matches!(missing.downcast_ref::<InputError>(), Some(InputError::NotFound(_))));

    let empty = common::create_test_file(temp_dir.path(), "empty.txt", "  \n")?;
    let error = controller.run(empty, temp_dir.path().to_path_buf(), false).await.unwrap_err();
    assert!(matches!(error.downcast_ref::<InputError>(), Some(InputError::Empty(_))));

    let pages = common::create_test_file(temp_dir.path(), "pages.json", r#"[{"page": 0, "lines": []}]"#)?;
    let error = controller.run(pages, temp_dir.path().to_path_buf(), false).await.unwrap_err();
    assert!(error.chain().any(|cause| matches!(
        cause.downcast_ref::<InputError>(),
        Some(InputError::MalformedPages(_))
    )));
    Ok(())
}

/// Test folder mode counts and the summary log
#[tokio::test]
async fn test_run_folder_withMixedInputs_shouldSummarize() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_sample_script(dir, "one.txt")?;
    common::create_sample_script(dir, "two.txt")?;
    common::create_test_file(dir, "bad.json", "{ not pages")?;
    common::create_test_file(dir, "two.screenplay.json", "{}")?;

    let summary = controller(OutputFormat::Json)?.run_folder(dir.to_path_buf(), false).await?;
    assert_eq!(summary, FolderSummary { processed: 1, skipped: 1, errors: 1 });
    assert!(dir.join("one.screenplay.json").exists());

    let log = FileManager::read_to_string(dir.join(FOLDER_LOG_FILE))?;
    assert!(log.contains("1 processed, 1 skipped, 1 errors"));
    Ok(())
}

/// Test that folder mode never parses the active config file
#[tokio::test]
async fn test_run_folder_withConfigFileInFolder_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_sample_script(dir, "one.txt")?;
    let config_path = dir.join("screenplay.json");
    Config::load_or_create(&config_path)?;

    let summary = controller(OutputFormat::Json)?
        .with_config_path(&config_path)
        .run_folder(dir.to_path_buf(), false)
        .await?;
    assert_eq!(summary, FolderSummary { processed: 1, skipped: 0, errors: 0 });
    assert!(!dir.join("screenplay.screenplay.json").exists());
    Ok(())
}

/// Test that a folder without inputs is an error
#[tokio::test]
async fn test_run_folder_withNoInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.md", "nothing here")?;

    assert!(controller(OutputFormat::Json)?
        .run_folder(temp_dir.path().to_path_buf(), false)
        .await
        .is_err());
    Ok(())
}
