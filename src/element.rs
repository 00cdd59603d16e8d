/*!
 * Screenplay elements and the input lines they are classified from.
 *
 * An `Element` is the classifier's output unit. Its `kind` is a closed enumeration
 * and its `indent` is the canonical margin for that kind, never the indentation the
 * source line happened to carry.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical margin for character cues
pub const CHARACTER_INDENT: usize = 38;
/// Canonical margin for dialogue
pub const DIALOGUE_INDENT: usize = 25;
/// Canonical margin for parentheticals
pub const PARENTHETICAL_INDENT: usize = 30;
/// Canonical margin for action
pub const ACTION_INDENT: usize = 12;
/// Canonical margin for scene headings
pub const SCENE_HEADING_INDENT: usize = 12;
/// Canonical margin for transitions
pub const TRANSITION_INDENT: usize = 55;
/// Canonical margin for pre-scene markers (rendered on the action margin)
pub const PRE_SCENE_INDENT: usize = 12;
/// Maximum dialogue line width before wrapping
pub const DIALOGUE_WIDTH: usize = 35;
/// Usable page width in columns
pub const PAGE_WIDTH: usize = 72;

/// Screenplay element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    SceneHeading,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    PreScene,
    Action,
}

impl ElementKind {
    /// Every element kind, in declaration order
    pub const ALL: [ElementKind; 7] = [
        Self::SceneHeading,
        Self::Character,
        Self::Dialogue,
        Self::Parenthetical,
        Self::Transition,
        Self::PreScene,
        Self::Action,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SceneHeading => "scene_heading",
            Self::Character => "character",
            Self::Dialogue => "dialogue",
            Self::Parenthetical => "parenthetical",
            Self::Transition => "transition",
            Self::PreScene => "pre_scene",
            Self::Action => "action",
        }
    }

    /// Default canonical margin for the kind
    pub fn canonical_indent(&self) -> usize {
        match self {
            Self::SceneHeading => SCENE_HEADING_INDENT,
            Self::Character => CHARACTER_INDENT,
            Self::Dialogue => DIALOGUE_INDENT,
            Self::Parenthetical => PARENTHETICAL_INDENT,
            Self::Transition => TRANSITION_INDENT,
            Self::PreScene => PRE_SCENE_INDENT,
            Self::Action => ACTION_INDENT,
        }
    }

    /// Whether the kind belongs to a speech run (cue, parenthetical or dialogue)
    pub fn is_speech(&self) -> bool {
        matches!(self, Self::Character | Self::Parenthetical | Self::Dialogue)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified screenplay element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element type
    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Trimmed, repaired text of the source line
    pub text: String,

    /// Canonical margin for `kind`
    pub indent: usize,

    /// 1-based page number the line came from
    pub page: usize,
}

impl Element {
    pub fn new(kind: ElementKind, text: impl Into<String>, indent: usize, page: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            indent,
            page,
        }
    }
}

/// One input line seen through its page: the repaired page lines form the
/// lookback/lookahead window, `position` indexes into it.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// Repaired line, leading whitespace preserved
    pub raw: &'a str,

    /// 0-based position within the page
    pub position: usize,

    /// 1-based page number
    pub page: usize,

    /// Every repaired line of the page
    pub window: &'a [String],
}

impl<'a> Line<'a> {
    /// Borrow the line at `position` of a repaired page, if there is one
    pub fn new(page: usize, position: usize, window: &'a [String]) -> Option<Self> {
        window.get(position).map(|raw| Self {
            raw: raw.as_str(),
            position,
            page,
            window,
        })
    }

    /// Text without surrounding whitespace
    pub fn text(&self) -> &'a str {
        self.raw.trim()
    }

    /// Count of leading whitespace characters
    pub fn indent(&self) -> usize {
        leading_indent(self.raw)
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// A neighbouring line of the same page, `offset` positions back
    pub fn back(&self, offset: usize) -> Option<&'a str> {
        self.position
            .checked_sub(offset)
            .and_then(|i| self.window.get(i))
            .map(String::as_str)
    }
}

/// Leading whitespace of a raw line, in characters
pub fn leading_indent(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}
