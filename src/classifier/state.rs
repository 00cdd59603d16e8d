/*!
 * Per-document classifier state and the decisions that mutate it.
 */

use crate::element::ElementKind;

/// Working memory threaded through every classification call of one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Kind of the previously emitted element
    pub last_element: Option<ElementKind>,

    /// Whether a character cue opened a speech run that is still going
    pub in_dialogue_block: bool,
}

impl ClassifierState {
    /// Fresh state for the start of a document
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decision: the emitted kind becomes `last_element` and the
    /// dialogue block opens, closes or stays as it was
    pub fn apply(&mut self, decision: Decision) {
        self.last_element = Some(decision.kind);
        match decision.block {
            BlockEffect::Open => self.in_dialogue_block = true,
            BlockEffect::Close => self.in_dialogue_block = false,
            BlockEffect::Keep => {}
        }
    }

    /// Whether the previous element was a cue, parenthetical or dialogue line
    pub fn follows_speech(&self) -> bool {
        self.last_element.is_some_and(|kind| kind.is_speech())
    }

    pub fn last_is(&self, kind: ElementKind) -> bool {
        self.last_element == Some(kind)
    }
}

/// Effect of a decision on the dialogue block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEffect {
    Open,
    Close,
    Keep,
}

/// Outcome of one rule: the element kind plus its effect on the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub kind: ElementKind,
    pub block: BlockEffect,
}

impl Decision {
    pub const fn open(kind: ElementKind) -> Self {
        Self { kind, block: BlockEffect::Open }
    }

    pub const fn close(kind: ElementKind) -> Self {
        Self { kind, block: BlockEffect::Close }
    }

    pub const fn keep(kind: ElementKind) -> Self {
        Self { kind, block: BlockEffect::Keep }
    }
}
