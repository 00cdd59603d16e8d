/*!
 * Dialogue confidence scoring.
 *
 * Each named signal carries a fixed weight; the score of a line is the sum of the
 * weights of the signals it shows. Three thresholds turn the score into a verdict,
 * the lower two only when the previous element supports it.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::ElementKind;

/// Score at which a line is dialogue on its own
pub const HIGH_CONFIDENCE: f32 = 0.85;
/// Score at which a line is dialogue when it follows a cue, parenthetical or dialogue
pub const CONTEXT_CONFIDENCE: f32 = 0.75;
/// Score at which a line is dialogue directly under a character cue
pub const CUE_CONFIDENCE: f32 = 0.60;

/// Textual evidence that a line is spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueSignal {
    FirstPerson,
    SecondPerson,
    Contraction,
    Question,
    Imperative,
    Filler,
    Exclamation,
    TrailingPunctuation,
    OpinionOpener,
}

/// Weight of every signal
pub const DIALOGUE_WEIGHTS: [(DialogueSignal, f32); 9] = [
    (DialogueSignal::FirstPerson, 0.89),
    (DialogueSignal::SecondPerson, 0.84),
    (DialogueSignal::Contraction, 0.86),
    (DialogueSignal::Question, 0.91),
    (DialogueSignal::Imperative, 0.81),
    (DialogueSignal::Filler, 0.83),
    (DialogueSignal::Exclamation, 0.85),
    (DialogueSignal::TrailingPunctuation, 0.76),
    (DialogueSignal::OpinionOpener, 0.87),
];

static FIRST_PERSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(I|me|my|mine|myself)\b").expect("Invalid first person regex")
});

static SECOND_PERSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(you|your|yours|yourself|yourselves)\b").expect("Invalid second person regex")
});

static CONTRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"(?:can|won|don|didn|wouldn|couldn|shouldn|isn|aren|wasn|weren|hasn|haven|hadn|doesn)['’]t",
        r"|(?:that|what|where|who|it|he|she|here|there|let)['’]s",
        r"|(?:we|they|you)['’]re",
        r"|I['’]m",
        r"|(?:I|you|we|they)['’](?:ll|d|ve)",
        r")\b",
    ))
    .expect("Invalid contraction regex")
});

static QUESTION_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(What|Where|When|Who|Why|How|Can|Could|Would|Should|Will|Do|Does|Did|Are|Is|Was|Were|Have|Has|Had|Am)\b")
        .expect("Invalid question regex")
});

static IMPERATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Come|Go|Look|Wait|Stop|Listen|Tell|Give|Take|Get|Put|Let|Bring|Hold|Shut|Move|Stay|Keep|Try|Help|Show|Make|Leave|Sit|Stand|Drop|Open|Close|Turn|Run|Walk|Call|Check|Find)\b")
        .expect("Invalid imperative regex")
});

static FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(yeah|yes|no|nope|yep|uh-huh|uh|um|ah|oh|hey|well|so|anyway|maybe|just|really|actually|basically|literally|honestly|seriously|definitely|absolutely|exactly|totally|right|sure|fine|okay|ok|alright)\b")
        .expect("Invalid filler regex")
});

static EXCLAMATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jesus|christ|god|damn|dammit|hell|shit|fuck|fucking|crap|wow|whoa|holy|geez|gosh|bastard)\b")
        .expect("Invalid exclamation regex")
});

static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\.\.|…|--|\s-\s").expect("Invalid ellipsis regex")
});

static OPINION_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^I (think|know|believe|feel|mean|guess|suppose|bet|wish|hope|want|need)\b")
        .expect("Invalid opinion regex")
});

impl DialogueSignal {
    /// Fixed weight from `DIALOGUE_WEIGHTS`
    pub fn weight(&self) -> f32 {
        DIALOGUE_WEIGHTS
            .iter()
            .find(|(signal, _)| signal == self)
            .map(|(_, weight)| *weight)
            .unwrap_or(0.0)
    }

    /// Whether a trimmed line shows this signal
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::FirstPerson => FIRST_PERSON.is_match(text),
            Self::SecondPerson => SECOND_PERSON.is_match(text),
            Self::Contraction => CONTRACTION.is_match(text),
            Self::Question => text.ends_with('?') || QUESTION_OPENER.is_match(text),
            Self::Imperative => IMPERATIVE.is_match(text),
            Self::Filler => FILLER.is_match(text),
            Self::Exclamation => EXCLAMATION.is_match(text),
            Self::TrailingPunctuation => TRAILING_PUNCTUATION.is_match(text),
            Self::OpinionOpener => OPINION_OPENER.is_match(text),
        }
    }
}

/// Signals found on a line and their summed weight
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueScore {
    pub score: f32,
    pub signals: Vec<DialogueSignal>,
}

impl DialogueScore {
    /// Verdict given the kind of the previous element
    pub fn is_dialogue(&self, last: Option<ElementKind>) -> bool {
        if self.score >= HIGH_CONFIDENCE {
            return true;
        }
        if self.score >= CONTEXT_CONFIDENCE && last.is_some_and(|kind| kind.is_speech()) {
            return true;
        }
        self.score >= CUE_CONFIDENCE && last == Some(ElementKind::Character)
    }
}

/// Sum the weights of every dialogue signal present in `text`
pub fn score_dialogue(text: &str) -> DialogueScore {
    let text = text.trim();
    if text.is_empty() {
        return DialogueScore { score: 0.0, signals: Vec::new() };
    }

    let signals: Vec<DialogueSignal> = DIALOGUE_WEIGHTS
        .iter()
        .map(|(signal, _)| *signal)
        .filter(|signal| signal.matches(text))
        .collect();
    let score = signals.iter().map(DialogueSignal::weight).sum();

    DialogueScore { score, signals }
}
