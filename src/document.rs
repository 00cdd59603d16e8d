/*!
 * Parsed screenplay document.
 *
 * The serialized shape is `{metadata, scenes, characters, totalPages}`:
 * - `metadata`: title, author and the kind of input that was parsed
 * - `scenes`: the assembled scenes in order
 * - `characters`: one profile per cleaned character name
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::assembler::Scene;
use crate::element::ElementKind;
use crate::patterns;

/// Lines of the title page searched for a title
const TITLE_SEARCH_LINES: usize = 10;

/// Kind of input a document was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    /// Layout-preserved text, pages split on form feeds
    #[default]
    Text,
    /// Pre-split page JSON
    Json,
}

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "uploadType")]
    pub upload_type: UploadType,
}

/// Per-character summary derived from the finished scene list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CharacterProfile {
    /// Number of scenes with a cue for this character
    pub appearances: usize,

    /// Scene identifiers ("scene_001") in document order
    pub scenes_present: Vec<String>,

    /// Dialogue elements spoken under this character's cues
    #[serde(rename = "dialogueCount")]
    pub dialogue_count: usize,

    pub notes: String,
}

/// The structured result of a parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayDocument {
    pub metadata: DocumentMetadata,
    pub scenes: Vec<Scene>,
    pub characters: BTreeMap<String, CharacterProfile>,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Element and entity counts consumed by quality scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DocumentStats {
    pub total_pages: usize,
    pub scenes: usize,
    pub characters: usize,
    pub dialogue_elements: usize,
    pub action_elements: usize,
    pub character_cues: usize,
    pub parentheticals: usize,
    pub transitions: usize,
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} scenes, {} characters, {} cues, {} dialogue, {} parentheticals, {} action, {} transitions",
            self.total_pages,
            self.scenes,
            self.characters,
            self.character_cues,
            self.dialogue_elements,
            self.parentheticals,
            self.action_elements,
            self.transitions
        )
    }
}

impl ScreenplayDocument {
    /// Build a document, deriving character profiles from `scenes`
    pub fn new(metadata: DocumentMetadata, scenes: Vec<Scene>, total_pages: usize) -> Self {
        let characters = build_character_profiles(&scenes);
        Self {
            metadata,
            scenes,
            characters,
            total_pages,
        }
    }

    pub fn stats(&self) -> DocumentStats {
        let count = |kind: ElementKind| self.scenes.iter().map(|s| s.count(kind)).sum();
        DocumentStats {
            total_pages: self.total_pages,
            scenes: self.scenes.len(),
            characters: self.characters.len(),
            dialogue_elements: count(ElementKind::Dialogue),
            action_elements: count(ElementKind::Action),
            character_cues: count(ElementKind::Character),
            parentheticals: count(ElementKind::Parenthetical),
            transitions: count(ElementKind::Transition),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize screenplay document")
    }
}

/// Scene identifier for a 0-based scene index
pub fn scene_id(index: usize) -> String {
    format!("scene_{:03}", index + 1)
}

/// Profiles for every cleaned cue name across `scenes`
pub fn build_character_profiles(scenes: &[Scene]) -> BTreeMap<String, CharacterProfile> {
    let mut profiles: BTreeMap<String, CharacterProfile> = BTreeMap::new();

    for (index, scene) in scenes.iter().enumerate() {
        for name in &scene.characters {
            let profile = profiles.entry(name.clone()).or_default();
            profile.appearances += 1;
            profile.scenes_present.push(scene_id(index));
        }

        let mut speaker: Option<String> = None;
        for element in &scene.elements {
            match element.kind {
                ElementKind::Character => speaker = patterns::clean_character_name(&element.text),
                ElementKind::Dialogue => {
                    if let Some(profile) = speaker.as_ref().and_then(|name| profiles.get_mut(name)) {
                        profile.dialogue_count += 1;
                    }
                }
                ElementKind::Parenthetical => {}
                _ => speaker = None,
            }
        }
    }

    for profile in profiles.values_mut() {
        profile.notes = format!(
            "Appears in {} scenes with {} lines of dialogue",
            profile.appearances, profile.dialogue_count
        );
    }

    profiles
}

/// Title-page guess: the first upper-case line of 6 to 59 characters among the
/// first ten non-empty lines that is not a heading, marker or transition
pub fn extract_title<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .take(TITLE_SEARCH_LINES)
        .find(|line| {
            let length = line.chars().count();
            (6..=59).contains(&length)
                && patterns::is_upper_case(line)
                && !patterns::is_scene_heading(line)
                && !patterns::is_pre_scene_element(line)
                && !patterns::is_transition(line)
        })
        .map(str::to_string)
}
