/*!
 * Common test utilities for the screenplay-parser test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Routes `log` output through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Left-pad `text` with `indent` spaces
pub fn pad(indent: usize, text: &str) -> String {
    format!("{}{}", " ".repeat(indent), text)
}

/// Title page followed by two pages of screenplay, form-feed separated
pub fn sample_script() -> String {
    let title_page = [
        String::new(),
        pad(24, "THE LONG GOODBYE"),
        String::new(),
        pad(28, "Written by Someone"),
    ];
    let page_one = [
        pad(0, "INT. KITCHEN - DAY"),
        String::new(),
        pad(0, "John opens the fridge."),
        String::new(),
        pad(38, "JOHN"),
        pad(25, "There's nothing left."),
        pad(60, "2."),
    ];
    let page_two = [
        pad(0, "EXT. STREET - NIGHT"),
        String::new(),
        pad(38, "HANNAH"),
        pad(30, "(quietly)"),
        pad(25, "Blue skies forever."),
        String::new(),
        pad(55, "CUT TO:"),
    ];

    [title_page.join("\n"), page_one.join("\n"), page_two.join("\n")].join("\n\x0c")
}

/// Writes `sample_script()` into `dir`
pub fn create_sample_script(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_script())
}
