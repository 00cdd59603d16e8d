/*!
 * Action signals for the dialogue/action boundary.
 *
 * Two families live here:
 * - The strong action signal, in two tiers. Inside a dialogue block only the
 *   narrow tier applies (third-person movement, camera phrases, scene-description
 *   openers); outside it the broad tier adds interaction verbs, scene vocabulary,
 *   news-style narration, character descriptions, montage words and location prefixes.
 * - The action evidence table: weighted cues summed against `ACTION_THRESHOLD`,
 *   used once the dialogue score has failed to decide a line.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Evidence score at which a line is action
pub const ACTION_THRESHOLD: f32 = 0.85;

/// Which set of strong action signals applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    /// Inside a dialogue block: unambiguous breakers only
    Narrow,
    /// Outside a dialogue block: the full signal set
    Broad,
}

impl SignalTier {
    pub fn for_block(in_dialogue_block: bool) -> Self {
        if in_dialogue_block { Self::Narrow } else { Self::Broad }
    }
}

/// Words that look like a capitalized subject but never name who acts
const NON_SUBJECTS: &[&str] = &[
    "I", "You", "We", "It", "This", "That", "What", "Who", "There", "Here", "Nobody",
    "Everyone", "Everybody", "Someone", "Somebody", "Anyone", "Anybody", "No", "Yes",
    "Just", "Then", "Now", "Don't", "Please", "Never", "Always", "Maybe",
];

/// Subject (pronoun or one to three capitalized words), optional -ly adverb, motion verb
static SUBJECT_MOTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:^|[.!?;]\s+)(?P<subject>He|She|They|[A-Z][a-z]+(?:[ -][A-Z][a-z]+){0,2})\s+",
        r"(?:[a-z]+ly\s+)?",
        r"(?P<verb>walks|moves|enters|exits|runs|sits|stands|crosses|approaches|jumps|climbs|",
        r"drives|rides|swims|dances|jet skis|races|rushes|steps|turns|spins|leaves|falls|",
        r"wanders|strides|storms|sprints|heads)\b",
    ))
    .expect("Invalid subject motion regex")
});

/// Same subject shape with an object-handling or reaction verb
static SUBJECT_INTERACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?:^|[.!?;]\s+)(?P<subject>He|She|They|[A-Z][a-z]+(?:[ -][A-Z][a-z]+){0,2})\s+",
        r"(?:[a-z]+ly\s+)?",
        r"(?P<verb>picks up|puts down|grabs|throws|examines|studies|looks at|stares at|opens|",
        r"closes|points to|waves to|nods to|gestures|holds|hands|pulls|pushes|reaches|watches|",
        r"smiles|laughs|nods|shakes|types|scrolls|sips|drinks|glances)\b",
    ))
    .expect("Invalid subject interaction regex")
});

static CAMERA_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(angle on|close on|wide shot|push in on|we push in|zoom in|zoom out)\b")
        .expect("Invalid camera phrase regex")
});

static SCENE_DESCRIPTION_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:^(the view of|we see|we witness)\b)|\b(FADE IN|FADE OUT|CUT TO)\b")
        .expect("Invalid scene description regex")
});

static SCENE_VOCABULARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\b(tight shot|tight on|wide on|phone cam pov|over black|dissolve to|begin montage|end montage|surrounded by|the room|the window|the door)\b)|\bPOV\b")
        .expect("Invalid scene vocabulary regex")
});

static NEWS_NARRATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(protest|protests|protesters|storm the capitol|is attacked|laid to rest|on fire in|",
        r"is beaten|nuclear bomb|pandemic|massacre|hurricane|troops in|war in|school shooting|",
        r"economic collapse|rainforest|ice shelf|collapses into|consumes the screen|blinding white|",
        r"takes its last breath|shakes hands with)\b",
    ))
    .expect("Invalid news narration regex")
});

static CHARACTER_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(billionaire|millionaire|trust-funder|influencer|turned into)\b|\b(is|was) an? |\bbecame an? ")
        .expect("Invalid character description regex")
});

static MONTAGE_VOCABULARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(montage|sequence|series of)\b").expect("Invalid montage regex")
});

/// Upper-case location prefix followed by a colon or dash: "WORK DESK - ", "ROOFTOP:"
static LOCATION_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Z\s\-\.]{3,}(?::|--|\s-\s)").expect("Invalid location prefix regex")
});

/// Weighted cue in the action evidence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCue {
    SceneOpener,
    CameraTerm,
    ThirdPersonMotion,
    DescriptiveArticle,
    TemporalOpener,
    SoundEffect,
    Simultaneous,
    Atmosphere,
    PhysicalBusiness,
}

/// Weight of every action cue
pub const ACTION_WEIGHTS: [(ActionCue, f32); 9] = [
    (ActionCue::SceneOpener, 0.98),
    (ActionCue::CameraTerm, 0.95),
    (ActionCue::ThirdPersonMotion, 0.94),
    (ActionCue::PhysicalBusiness, 0.90),
    (ActionCue::DescriptiveArticle, 0.86),
    (ActionCue::TemporalOpener, 0.84),
    (ActionCue::SoundEffect, 0.81),
    (ActionCue::Simultaneous, 0.79),
    (ActionCue::Atmosphere, 0.77),
];

static SCENE_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(INT\.|EXT\.|INT |EXT |FADE IN:|FADE OUT:|FADE TO:|CUT TO:|DISSOLVE TO:|SMASH CUT:|MATCH CUT:|JUMP CUT:|CLOSE ON|ANGLE ON|INSERT|MONTAGE|FLASHBACK|FLASH FORWARD|INTERCUT|CONTINUOUS|LATER|MOMENTS LATER)")
        .expect("Invalid scene opener regex")
});

/// Camera vocabulary, upper-case only so ordinary speech ("focus", "view") does not trip it
static CAMERA_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(CAMERA|CRANE|PAN|ZOOM|TRACK|DOLLY|PULL BACK|PUSH IN|REVEAL|FOCUS|FRAME|SHOT|ANGLE|POV|VIEW|WIDER|CLOSER|TIGHT ON|MOVING|HANDHELD|STEADICAM|AERIAL|ESTABLISHING)\b|\bP\.O\.V\.")
        .expect("Invalid camera term regex")
});

static THIRD_PERSON_MOTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(He|She|It|They|His|Her|Its|Their|The\s+\w+|A\s+\w+|An\s+\w+)\s+(walks?|stands?|sits?|moves?|turns?|looks?|takes?|goes?|runs?|enters?|exits?|crosses?|approaches?|reaches?|grabs?|opens?|closes?|stares?|watches?|waits?|stops?|starts?|continues?|follows?|leads?|pushes?|pulls?)\b")
        .expect("Invalid third person regex")
});

static DESCRIPTIVE_ARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(The|A|An)\s+\w+\s+(is|are|stands|sits|lies|hangs|rests|covers|fills|enters|appears|emerges)\b")
        .expect("Invalid descriptive article regex")
});

static TEMPORAL_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Meanwhile|Suddenly|Now|Then|Later|Finally|Just then|At that moment|Behind|Above|Below|Inside|Outside|Across|Through|Beyond|Near|From|During|Before|After|As|While)\b")
        .expect("Invalid temporal opener regex")
});

static CAPS_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z]{2,}(?:\s+[A-Z]{2,})*\b").expect("Invalid caps run regex")
});

static SIMULTANEOUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?i:as|while|when|during)\s+(?:he|she|they|it|[A-Z][a-z]+)\s+\w+\b")
        .expect("Invalid simultaneous regex")
});

static ATMOSPHERE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(It's|It is|There's|There is|There are)\s+").expect("Invalid atmosphere regex")
});

/// Third-person physical business: "Hannah pulls out her phone", "he grabs the keys"
static PHYSICAL_BUSINESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?P<subject>[Hh]e|[Ss]he|[A-Z][a-z]+)\s+",
        r"(?P<verb>pulls out|puts down|picks up|turns around|walks to|moves to|slips out|steps out|",
        r"grabs|clutches|hands|rolls|dries|slips|steps|follows)\b",
    ))
    .expect("Invalid physical business regex")
});

static POSSESSED_PROP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+['’]s\s+(phone|hand|hands|eyes|face|laptop|wallet|jacket)\b")
        .expect("Invalid possessed prop regex")
});

static DEVICE_ACTIVITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(phone|wallet|device|laptop)\s+(buzzes|rings|lights up|displays|vibrates)\b")
        .expect("Invalid device activity regex")
});

static DEFINITIVE_ACTION: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(INT\.|EXT\.|FADE|CUT TO:|DISSOLVE)",
        r"(?i)^(He|She|It|They)\s+(walks?|runs?|moves?|enters?|exits?)\b",
        r"\b(CAMERA|ANGLE ON|CLOSE ON|WIDE SHOT)\b",
        r"(?i)^(Meanwhile|Suddenly|Later|Then)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid definitive action regex"))
    .collect()
});

/// True when the named subject of a match can act in narration
fn acting_subject(caps: &Captures<'_>) -> bool {
    caps.name("subject")
        .is_some_and(|subject| !NON_SUBJECTS.contains(&subject.as_str()))
}

fn has_subject_match(pattern: &Regex, text: &str) -> bool {
    pattern.captures_iter(text).any(|caps| acting_subject(&caps))
}

/// Third-person movement tied to a pronoun or named character
pub fn has_subject_motion(text: &str) -> bool {
    has_subject_match(&SUBJECT_MOTION, text)
}

/// Strong action signal for the given tier
pub fn has_strong_action_signal(text: &str, tier: SignalTier) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let narrow = has_subject_motion(text)
        || CAMERA_PHRASE.is_match(text)
        || SCENE_DESCRIPTION_OPENER.is_match(text);
    if narrow || tier == SignalTier::Narrow {
        return narrow;
    }

    has_subject_match(&SUBJECT_INTERACTION, text)
        || SCENE_VOCABULARY.is_match(text)
        || NEWS_NARRATION.is_match(text)
        || CHARACTER_DESCRIPTION.is_match(text)
        || MONTAGE_VOCABULARY.is_match(text)
        || LOCATION_PREFIX.is_match(text)
}

/// Physical business performed by someone other than the speaker
pub fn has_physical_business(text: &str) -> bool {
    has_subject_match(&PHYSICAL_BUSINESS, text)
        || POSSESSED_PROP.is_match(text)
        || DEVICE_ACTIVITY.is_match(text)
}

/// Patterns that rule a line out as dialogue no matter how it scores
pub fn has_definitive_action(text: &str) -> bool {
    let text = text.trim();
    DEFINITIVE_ACTION.iter().any(|p| p.is_match(text))
}

/// Run of capitals inside mixed-case text, not directly quoted: "the door SLAMS"
fn has_sound_effect(text: &str) -> bool {
    if !text.chars().any(char::is_lowercase) {
        return false;
    }
    CAPS_RUN.find_iter(text).any(|m| {
        !matches!(text[m.end()..].chars().next(), Some('\'') | Some('"') | Some('’'))
    })
}

impl ActionCue {
    /// Fixed weight from `ACTION_WEIGHTS`
    pub fn weight(&self) -> f32 {
        ACTION_WEIGHTS
            .iter()
            .find(|(cue, _)| cue == self)
            .map(|(_, weight)| *weight)
            .unwrap_or(0.0)
    }

    /// Whether a trimmed line shows this cue
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::SceneOpener => SCENE_OPENER.is_match(text),
            Self::CameraTerm => CAMERA_TERM.is_match(text),
            Self::ThirdPersonMotion => THIRD_PERSON_MOTION.is_match(text),
            Self::DescriptiveArticle => DESCRIPTIVE_ARTICLE.is_match(text),
            Self::TemporalOpener => TEMPORAL_OPENER.is_match(text),
            Self::SoundEffect => has_sound_effect(text),
            Self::Simultaneous => SIMULTANEOUS.is_match(text),
            Self::Atmosphere => ATMOSPHERE.is_match(text),
            Self::PhysicalBusiness => has_physical_business(text),
        }
    }
}

/// Summed weight of every action cue present in `text`
pub fn action_evidence(text: &str) -> f32 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    ACTION_WEIGHTS
        .iter()
        .filter(|(cue, _)| cue.matches(text))
        .map(|(_, weight)| weight)
        .sum()
}

/// True when the evidence score reaches `ACTION_THRESHOLD`
pub fn is_action_evidence(text: &str) -> bool {
    action_evidence(text) >= ACTION_THRESHOLD
}
