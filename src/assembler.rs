/*!
 * Scene assembly.
 *
 * `SceneAssembler` consumes the element stream in document order and cuts it into
 * scenes at every scene heading. Content before the first heading becomes a
 * heading-less leading scene. Every element lands in exactly one scene.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::element::{Element, ElementKind};
use crate::formatter::SceneFormatter;
use crate::patterns;

/// One scene of the reconstructed screenplay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Upper-case heading text, empty for content before the first heading
    pub heading: String,

    /// Canonically indented content, heading line included
    pub content: String,

    /// Cleaned names of every character with a cue in the scene
    pub characters: BTreeSet<String>,

    pub page_start: usize,

    /// Page of the last element in the scene
    pub page_end: usize,

    /// Elements in document order
    #[serde(skip)]
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn has_heading(&self) -> bool {
        !self.heading.is_empty()
    }

    /// Number of elements of a given kind
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }
}

/// A scene still receiving elements
#[derive(Debug)]
struct OpenScene {
    heading: String,
    formatter: SceneFormatter,
    characters: BTreeSet<String>,
    page_start: usize,
    page_end: usize,
    elements: Vec<Element>,
}

impl OpenScene {
    fn new(heading: String, page: usize, dialogue_width: usize) -> Self {
        Self {
            heading,
            formatter: SceneFormatter::new(dialogue_width),
            characters: BTreeSet::new(),
            page_start: page,
            page_end: page,
            elements: Vec::new(),
        }
    }

    fn close(self) -> Scene {
        Scene {
            heading: self.heading,
            content: self.formatter.finish(),
            characters: self.characters,
            page_start: self.page_start,
            page_end: self.page_end,
            elements: self.elements,
        }
    }
}

/// Groups classified elements into scenes and renders their content
#[derive(Debug)]
pub struct SceneAssembler {
    dialogue_width: usize,
    /// Lower-case names used by the action paragraph heuristic
    known_names: Vec<String>,
    scenes: Vec<Scene>,
    current: Option<OpenScene>,
}

impl SceneAssembler {
    /// New assembler; `seed_names` prime the paragraph heuristic before any cue is seen
    pub fn new<S: AsRef<str>>(dialogue_width: usize, seed_names: &[S]) -> Self {
        let mut known_names: Vec<String> = Vec::new();
        for name in seed_names {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !known_names.contains(&name) {
                known_names.push(name);
            }
        }

        Self {
            dialogue_width,
            known_names,
            scenes: Vec::new(),
            current: None,
        }
    }

    /// Scenes closed so far
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn push(&mut self, element: Element) {
        let width = self.dialogue_width;

        if element.kind == ElementKind::SceneHeading {
            if let Some(open) = self.current.take() {
                self.scenes.push(open.close());
            }
            self.current = Some(OpenScene::new(element.text.trim().to_uppercase(), element.page, width));
        }

        let open = self
            .current
            .get_or_insert_with(|| OpenScene::new(String::new(), element.page, width));

        if element.kind == ElementKind::Character {
            if let Some(name) = patterns::clean_character_name(&element.text) {
                let key = name.to_lowercase();
                if !self.known_names.contains(&key) {
                    self.known_names.push(key);
                }
                open.characters.insert(name);
            }
        }

        open.formatter.push(&element, &self.known_names);
        open.page_end = element.page;
        open.elements.push(element);
    }

    /// Close the open scene and hand back every scene in order
    pub fn finish(mut self) -> Vec<Scene> {
        if let Some(open) = self.current.take() {
            self.scenes.push(open.close());
        }
        self.scenes
    }
}
