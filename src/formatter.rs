/*!
 * Canonical rendering of classified elements.
 *
 * `SceneFormatter` appends elements one at a time, each at its canonical margin.
 * Blank lines come from three places:
 * - the element-transition spacing table (`needs_spacing`)
 * - shot markers ("ANGLE ON", "WORK DESK:") which stand in their own paragraph
 * - the action paragraph heuristic for two consecutive action lines
 *
 * Blank lines never stack, so two elements are separated by at most one of them.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::{Element, ElementKind};
use crate::patterns;

/// Camera and insert prefixes that put an action line in its own paragraph
const SHOT_PREFIXES: &[&str] = &[
    "END PHONE CAM POV",
    "PHONE CAM POV",
    "BACK TO SCENE",
    "ANGLE ON",
    "CLOSE ON",
    "TIGHT ON",
    "WIDE ON",
    "INSERT",
    "PRE-LAP",
    "PRELAP",
];

/// Longest all-caps line still treated as a set-piece marker ("WORK DESK:")
const MAX_MARKER_LENGTH: usize = 40;

/// Words that open a new action paragraph after a finished sentence
const PARAGRAPH_OPENERS: &[&str] = &["the ", "a ", "an "];

/// Time transitions that always open a new action paragraph
static TIME_TRANSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(moments later|later|meanwhile|suddenly|then|now|soon|eventually)\b")
        .expect("Invalid time transition regex")
});

/// Leading upper-case phrase naming a place or prop: "WORK DESK - ", "MIRROR:"
static LEADING_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Z' ]+[A-Z])(?::|\s+-|$)").expect("Invalid leading marker regex")
});

/// Whether the element-type transition `last -> current` takes a blank line
pub fn needs_spacing(last: ElementKind, current: ElementKind) -> bool {
    use ElementKind::*;

    match current {
        Character => matches!(last, Action | Dialogue | Parenthetical | Transition),
        Action => matches!(last, Dialogue | Character | Parenthetical | Transition),
        SceneHeading => true,
        Transition => matches!(last, Action | Dialogue | Character | Parenthetical),
        PreScene => matches!(last, Action | Dialogue | Character),
        Dialogue | Parenthetical => false,
    }
}

/// Shot or set-piece marker that stands in its own paragraph
pub fn is_shot_marker(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let upper = text.to_uppercase();
    if SHOT_PREFIXES.iter().any(|prefix| upper.starts_with(prefix)) {
        return true;
    }
    // A bare all-caps line ("BANG!") stays in the running action
    patterns::is_upper_case(text)
        && text.chars().count() <= MAX_MARKER_LENGTH
        && (text.ends_with(':') || text.ends_with('-'))
}

/// Named set-piece a line opens with, if any
fn scene_marker(text: &str) -> Option<String> {
    let upper = text.trim().to_uppercase();
    if let Some(prefix) = SHOT_PREFIXES.iter().find(|prefix| upper.starts_with(*prefix)) {
        return Some(prefix.to_string());
    }
    LEADING_MARKER
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|marker| marker.chars().count() >= 3)
}

/// Known name a line opens with, longest match first, compared lower-case
fn leading_name<'n>(text: &str, known_names: &'n [String]) -> Option<&'n str> {
    let lower = text.trim().to_lowercase();
    known_names
        .iter()
        .filter(|name| !name.is_empty())
        .filter(|name| {
            lower.starts_with(name.as_str())
                && !lower[name.len()..].chars().next().is_some_and(char::is_alphanumeric)
        })
        .max_by_key(|name| name.len())
        .map(String::as_str)
}

/// Whether `current` starts a new action paragraph after `last`.
///
/// `known_names` are lower-case.
pub fn is_new_action_paragraph(last: &str, current: &str, known_names: &[String]) -> bool {
    let last = last.trim();
    let current = current.trim();
    if current.is_empty() {
        return false;
    }

    // Change of focus from one named character to another
    if let (Some(before), Some(after)) = (leading_name(last, known_names), leading_name(current, known_names)) {
        if before != after {
            return true;
        }
    }

    if let (Some(before), Some(after)) = (scene_marker(last), scene_marker(current)) {
        if before != after {
            return true;
        }
    }

    if last.ends_with('.') && current.chars().next().is_some_and(char::is_uppercase) {
        let lower = current.to_lowercase();
        if PARAGRAPH_OPENERS.iter().any(|opener| lower.starts_with(opener))
            || leading_name(current, known_names).is_some()
        {
            return true;
        }
    }

    TIME_TRANSITION.is_match(current)
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Collapse runs of four or more newlines to three
pub fn collapse_blank_runs(text: &str) -> String {
    static EXCESS_NEWLINES: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\n{4,}").expect("Invalid newline regex"));
    EXCESS_NEWLINES.replace_all(text, "\n\n\n").into_owned()
}

/// Renders one scene's elements into canonically indented text
#[derive(Debug, Clone)]
pub struct SceneFormatter {
    dialogue_width: usize,
    lines: Vec<String>,
    last_kind: Option<ElementKind>,
    last_action: Option<String>,
}

impl SceneFormatter {
    pub fn new(dialogue_width: usize) -> Self {
        Self {
            dialogue_width,
            lines: Vec::new(),
            last_kind: None,
            last_action: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append an element; `known_names` (lower-case) feed the paragraph heuristic
    pub fn push(&mut self, element: &Element, known_names: &[String]) {
        let text = element.text.trim();
        if text.is_empty() {
            return;
        }

        let kind = element.kind;
        let shot = kind == ElementKind::Action && is_shot_marker(text);

        if let Some(last) = self.last_kind {
            if shot && last != ElementKind::SceneHeading {
                self.push_blank();
            }
            if needs_spacing(last, kind) {
                self.push_blank();
            }
            if kind == ElementKind::Action && last == ElementKind::Action && !shot {
                if let Some(previous) = self.last_action.as_deref() {
                    if is_new_action_paragraph(previous, text, known_names) {
                        self.push_blank();
                    }
                }
            }
        }

        let margin = " ".repeat(element.indent);
        match kind {
            ElementKind::SceneHeading => {
                self.lines.push(format!("{}{}", margin, text.to_uppercase()));
                self.push_blank();
            }
            ElementKind::PreScene => {
                self.lines.push(format!("{}{}", margin, text));
                self.push_blank();
            }
            ElementKind::Action => {
                self.lines.push(format!("{}{}", margin, text));
                self.last_action = Some(text.to_string());
                if shot {
                    self.push_blank();
                }
            }
            ElementKind::Character => {
                self.lines.push(format!("{}{}", margin, text.to_uppercase()));
            }
            ElementKind::Dialogue => {
                for line in wrap_words(text, self.dialogue_width) {
                    self.lines.push(format!("{}{}", margin, line));
                }
            }
            ElementKind::Parenthetical => {
                self.lines.push(format!("{}{}", margin, text));
            }
            ElementKind::Transition => {
                self.lines.push(format!("{}{}", margin, text.to_uppercase()));
                self.push_blank();
            }
        }

        self.last_kind = Some(kind);
    }

    fn push_blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// Rendered content without trailing blank lines
    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
        }
        collapse_blank_runs(&self.lines.join("\n"))
    }
}

/// Render a run of elements in one go
pub fn render_elements(elements: &[Element], dialogue_width: usize, known_names: &[String]) -> String {
    let mut formatter = SceneFormatter::new(dialogue_width);
    for element in elements {
        formatter.push(element, known_names);
    }
    formatter.finish()
}
