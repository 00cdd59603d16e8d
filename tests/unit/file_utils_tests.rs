/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use screenplay_parser::app_config::OutputFormat;
use screenplay_parser::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "script.txt", "INT. HOUSE - DAY")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that generate_output_path marks the output and picks the extension
#[test]
fn test_generate_output_path_withFormats_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/pilot.txt");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, OutputFormat::Json),
        Path::new("/tmp/output/pilot.screenplay.json")
    );
    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, OutputFormat::Text),
        Path::new("/tmp/output/pilot.screenplay.txt")
    );
}

/// Test that our own outputs are recognized
#[test]
fn test_is_generated_output_shouldMatchMarker() {
    assert!(FileManager::is_generated_output("pilot.screenplay.json"));
    assert!(FileManager::is_generated_output("dir/pilot.screenplay.txt"));
    assert!(!FileManager::is_generated_output("pilot.txt"));
    assert!(!FileManager::is_generated_output("screenplay.json"));
}

/// Test that folder discovery skips outputs and unrelated files
#[test]
fn test_find_screenplay_inputs_shouldSkipOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    fs::create_dir(dir.join("season1"))?;

    common::create_test_file(dir, "b.txt", "x")?;
    common::create_test_file(dir, "a.json", "[]")?;
    common::create_test_file(dir, "a.screenplay.json", "{}")?;
    common::create_test_file(dir, "notes.md", "x")?;
    common::create_test_file(&dir.join("season1"), "ep1.TXT", "x")?;

    let inputs = FileManager::find_screenplay_inputs(dir)?;
    let names: Vec<String> = inputs
        .iter()
        .map(|p| p.strip_prefix(dir).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.json", "b.txt", "season1/ep1.TXT"]);
    Ok(())
}

/// Test that file types come from the extension, then from the content
#[test]
fn test_detect_file_type_shouldUseExtensionThenContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    let text = common::create_test_file(dir, "script.txt", "INT. HOUSE - DAY")?;
    let json = common::create_test_file(dir, "pages.json", "[]")?;
    let sniffed_json = common::create_test_file(dir, "pages.dat", r#"[{"page": 1, "lines": []}]"#)?;
    let sniffed_text = common::create_test_file(dir, "layout.out", "page one\x0cpage two")?;
    let unknown = common::create_test_file(dir, "notes.md", "# notes")?;

    assert_eq!(FileManager::detect_file_type(&text)?, FileType::LayoutText);
    assert_eq!(FileManager::detect_file_type(&json)?, FileType::PageJson);
    assert_eq!(FileManager::detect_file_type(&sniffed_json)?, FileType::PageJson);
    assert_eq!(FileManager::detect_file_type(&sniffed_text)?, FileType::LayoutText);
    assert_eq!(FileManager::detect_file_type(&unknown)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(dir.join("missing.txt")).is_err());
    Ok(())
}

/// Test that log entries are appended with a timestamp
#[test]
fn test_append_to_log_file_shouldAppendLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs").join("run.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = FileManager::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}
