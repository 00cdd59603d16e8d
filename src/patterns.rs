/*!
 * Pattern library for screenplay elements.
 *
 * Stateless predicates over a trimmed line, some of them position-aware through an
 * indentation band:
 * - Scene headings, transitions and document-opening markers
 * - Character cues, with or without a continuation marker
 * - Helpers shared by the classifier and the assembler (name cleaning, case checks)
 *
 * Nothing here fails: unrecognized input yields `false`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scene-opening templates, matched against upper-case text
static SCENE_HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(INT\.|EXT\.|EST\.|INT/EXT\.|I/E\.)",
        r"^(INTERIOR|EXTERIOR)\b",
        r"- (DAY|NIGHT|DAWN|DUSK|MORNING|AFTERNOON|EVENING|LATER|CONTINUOUS)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid scene heading regex"))
    .collect()
});

/// Document-opening conventions that precede the first real scene
static PRE_SCENE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^OVER BLACK\b",
        r"^FADE IN\b",
        r"^BLACK SCREEN\b",
        r"^TITLE CARD\b",
        r"^SUPER\b",
        r"^SUPER TITLE\b",
        r"^PRELAP\b",
        r"^PRE-LAP\b",
        r"^INSERT\b",
        r"^TEASER\b",
        r"^COLD OPEN\b",
        r"^OPENING TITLE\b",
        r"^MAIN TITLE\b",
        r"^END TITLE\b",
        r"^CREDITS\b",
        r"^VOICE.?OVER\b",
        r"^V\.?O\.?(\s|:|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid pre-scene regex"))
    .collect()
});

/// Transition phrases, matched as prefixes of upper-case text
pub const TRANSITIONS: &[&str] = &[
    "FADE OUT",
    "FADE TO",
    "CUT TO:",
    "DISSOLVE TO:",
    "SMASH CUT TO:",
    "MATCH CUT:",
    "JUMP CUT:",
    "FADE TO BLACK",
    "FADE TO WHITE",
    "THE END",
    "BEGIN MONTAGE",
    "END MONTAGE",
    "START MONTAGE",
    "MONTAGE:",
    "SERIES OF SHOTS:",
    "SEQUENCE:",
];

/// Upper-case lines that are never character cues
static CHARACTER_EXCLUSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Furniture, props and places
        "WINDOW", "DOOR", "TABLE", "CHAIR", "BAR", "HALLWAY", "ROOM", "KITCHEN",
        "BATHROOM", "OFFICE", "CAR", "PHONE", "COMPUTER", "BUILDING", "HOUSE",
        "STREET", "PARK", "STORE", "RESTAURANT", "WORK DESK", "CLOTHING RACK",
        "WALL MIRROR", "DANCE FLOOR",
        // Camera directions
        "ANGLE ON", "CLOSE ON", "PHONE CAM POV", "END PHONE CAM POV", "WIDE SHOT",
        "CLOSE UP", "MEDIUM SHOT", "POV", "INSERT", "BACK TO SCENE",
        // Transitions and page furniture
        "FADE IN", "FADE OUT", "CUT TO", "DISSOLVE TO", "SMASH CUT", "THE END",
        "CONTINUED", "MORE", "BEAT", "FADE TO",
        // Title cards and graphics
        "SUPER TITLE", "TITLE CARD", "SUPER", "GRAPHICS", "TEXT ON SCREEN",
        "BEGIN MONTAGE", "END MONTAGE", "MONTAGE", "SEQUENCE",
        // Time references
        "LATER", "MOMENTS LATER", "CONTINUOUS", "SAME TIME", "MEANWHILE",
        "ELSEWHERE", "NEXT DAY", "THAT NIGHT",
        // Audio
        "PRE-LAP", "MUSIC", "SOUND", "VOICE OVER",
    ]
    .into_iter()
    .collect()
});

/// Name-shaped cue: leading capital, letters/spaces/hyphens/periods/apostrophes,
/// optional trailing extension such as "(V.O.)"
static NAME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Z\s\-\.']+(\s*\([A-Z\.\s']+\))?$").expect("Invalid name shape regex")
});

/// Loosely spelled continuation marker closing a cue: (CONT'D), (MORE), (CCOONNTT''DD)
const CONTINUATION_MARKER: &str = r"\((?i:CONT'?D|MORE|C{1,3}O{1,3}N{1,3}T{1,3}'*D{1,2})\)$";

/// Cue of any length ending in a continuation marker
static CONTINUATION_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[A-Z][A-Z\s\-\.#0-9]+\s*{}", CONTINUATION_MARKER))
        .expect("Invalid continuation cue regex")
});

/// Cue of at most three name words followed by an opening parenthesis
static SHORT_CUE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Z\-\.#0-9]*(\s+[A-Z][A-Z\-\.#0-9]*){0,2}\s*\(")
        .expect("Invalid cue prefix regex")
});

static CONTINUATION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(CONTINUATION_MARKER).expect("Invalid continuation suffix regex")
});

/// Parenthetical extension on a cue, e.g. " (V.O.)" or " (CONT'D)"
static NAME_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\([^)]*\)").expect("Invalid name extension regex")
});

/// Scene-element prefixes that end a dialogue block when they open a line
const SCENE_ELEMENT_PREFIXES: &[&str] = &["INT.", "EXT.", "INT/", "EXT/", "I/E."];

/// Inclusive range of leading-whitespace counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentBand {
    /// Smallest accepted indent
    pub min: usize,
    /// Largest accepted indent
    pub max: usize,
}

impl IndentBand {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Band where character cues sit in standard US screenplay margins
    pub const fn character() -> Self {
        Self::new(32, 48)
    }

    /// Band where dialogue sits in standard US screenplay margins
    pub const fn dialogue() -> Self {
        Self::new(18, 35)
    }

    pub fn contains(&self, indent: usize) -> bool {
        (self.min..=self.max).contains(&indent)
    }
}

/// True when the text has at least one letter and no lower-case letters
pub fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Scene heading: upper-case, 10 to 100 characters, matching a scene-opening template
pub fn is_scene_heading(text: &str) -> bool {
    let text = text.trim();
    let length = text.chars().count();
    if !is_upper_case(text) || !(10..=100).contains(&length) {
        return false;
    }
    SCENE_HEADING_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Transition: upper-case text opening with a known transition phrase
pub fn is_transition(text: &str) -> bool {
    let text = text.trim();
    is_upper_case(text) && TRANSITIONS.iter().any(|t| text.starts_with(t))
}

/// Pre-scene marker: upper-case document-opening convention such as "OVER BLACK"
pub fn is_pre_scene_element(text: &str) -> bool {
    let text = text.trim();
    is_upper_case(text) && PRE_SCENE_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Cue ending in a continuation marker, at any indentation
pub fn is_continuation_cue(text: &str) -> bool {
    CONTINUATION_CUE.is_match(text.trim())
}

/// Short name (up to three words) carrying a continuation marker
pub fn is_short_continuation_cue(text: &str) -> bool {
    let text = text.trim();
    SHORT_CUE_PREFIX.is_match(text) && CONTINUATION_SUFFIX.is_match(text)
}

/// Position-aware character cue check.
///
/// Upper-case, 2-30 characters once the extension is stripped, not an excluded
/// word, and either a continuation cue (any indent) or name-shaped inside `band`.
pub fn is_character_name(text: &str, indent: usize, band: IndentBand) -> bool {
    let text = text.trim();
    if !is_upper_case(text) {
        return false;
    }

    let name = strip_extension(text);
    let length = name.chars().count();
    if !(2..=30).contains(&length) || CHARACTER_EXCLUSIONS.contains(name.as_str()) {
        return false;
    }
    if is_scene_heading(text) || is_transition(text) {
        return false;
    }

    if is_continuation_cue(text) {
        return true;
    }

    band.contains(indent) && NAME_SHAPE.is_match(text)
}

/// Indent-free cue check used when scanning back through a page
pub fn looks_like_character_cue(text: &str) -> bool {
    let text = text.trim();
    if is_continuation_cue(text) {
        return true;
    }
    if !is_upper_case(text) || text.chars().count() > 30 {
        return false;
    }

    let name = strip_extension(text);
    if name.chars().count() <= 2 || name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    !CHARACTER_EXCLUSIONS.contains(name.as_str())
        && !is_scene_heading(text)
        && !is_transition(text)
        && NAME_SHAPE.is_match(text)
}

/// Line opening with a location marker (INT., EXT., I/E. ...)
pub fn is_scene_element(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    SCENE_ELEMENT_PREFIXES.iter().any(|p| upper.starts_with(p))
}

/// Parenthetical direction: text wrapped in parentheses
pub fn is_parenthetical(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('(') && text.ends_with(')')
}

/// Remove parenthetical extensions from a cue: "HANNAH (V.O.)" -> "HANNAH"
pub fn strip_extension(text: &str) -> String {
    NAME_EXTENSION.replace_all(text, "").trim().to_string()
}

/// Character key for a cue: extension stripped, 2 to 35 characters
pub fn clean_character_name(text: &str) -> Option<String> {
    let name = strip_extension(text.trim());
    let length = name.chars().count();
    if (2..=35).contains(&length) {
        Some(name)
    } else {
        None
    }
}
