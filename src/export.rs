/*!
 * Plain-text screenplay export.
 */

use crate::document::ScreenplayDocument;
use crate::formatter::collapse_blank_runs;

/// Blank lines between two scenes
const SCENE_SEPARATOR: &str = "\n\n\n";

/// Render a parsed document back to screenplay text
pub fn render_text(document: &ScreenplayDocument) -> String {
    let mut output = String::new();

    if let Some(title) = document.metadata.title.as_deref().filter(|t| !t.trim().is_empty()) {
        output.push_str("TITLE: ");
        output.push_str(title.trim());
        output.push_str(SCENE_SEPARATOR);
    }

    let scenes: Vec<&str> = document
        .scenes
        .iter()
        .map(|scene| scene.content.as_str())
        .filter(|content| !content.trim().is_empty())
        .collect();
    output.push_str(&scenes.join(SCENE_SEPARATOR));

    let normalized = output.replace("\r\n", "\n").replace('\r', "\n");
    let mut text = collapse_blank_runs(&normalized);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
