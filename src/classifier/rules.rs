/*!
 * The ordered rule table.
 *
 * Rules are evaluated top to bottom and the first one returning a decision wins.
 * The order is the tie-break between overlapping patterns: a name-shaped cue ending
 * in (CONT'D) is a cue before anything else, a mid-word reflow continuation is
 * dialogue before it can look like a marker, and so on down to the action default.
 */

use crate::app_config::ClassifierConfig;
use crate::element::{leading_indent, ElementKind, Line};
use crate::patterns;

use super::confidence::score_dialogue;
use super::signals::{
    has_definitive_action, has_physical_business, has_strong_action_signal, is_action_evidence,
    SignalTier,
};
use super::state::{ClassifierState, Decision};

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub line: Line<'a>,
    pub state: &'a ClassifierState,
    pub settings: &'a ClassifierConfig,
}

impl<'a> RuleContext<'a> {
    pub fn text(&self) -> &'a str {
        self.line.text()
    }

    pub fn indent(&self) -> usize {
        self.line.indent()
    }
}

/// A named predicate/outcome pair in the cascade
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&RuleContext<'_>) -> Option<Decision>,
}

/// Classification cascade, highest priority first
pub const RULES: &[Rule] = &[
    Rule { name: "continuation_cue", evaluate: continuation_cue },
    Rule { name: "hyphenated_continuation", evaluate: hyphenated_continuation },
    Rule { name: "pre_scene", evaluate: pre_scene },
    Rule { name: "scene_heading", evaluate: scene_heading },
    Rule { name: "transition", evaluate: transition },
    Rule { name: "character_name", evaluate: character_name },
    Rule { name: "parenthetical", evaluate: parenthetical },
    Rule { name: "dialogue_block", evaluate: dialogue_block },
    Rule { name: "default_action", evaluate: default_action },
];

fn continuation_cue(ctx: &RuleContext<'_>) -> Option<Decision> {
    patterns::is_short_continuation_cue(ctx.text()).then_some(Decision::open(ElementKind::Character))
}

/// Broad action test used on both sides of a reflowed line break
fn looks_like_action(text: &str) -> bool {
    has_strong_action_signal(text, SignalTier::Broad)
        || is_action_evidence(text)
        || has_physical_business(text)
}

/// Cue, then a dialogue line ending mid-word in a hyphen, then (after the break)
/// the rest of the sentence
fn hyphenated_continuation(ctx: &RuleContext<'_>) -> Option<Decision> {
    let text = ctx.text();
    let band = ctx.settings.character_band;
    if ctx.line.position < 2 {
        return None;
    }
    if patterns::is_character_name(text, ctx.indent(), band)
        || patterns::is_scene_heading(text)
        || patterns::is_transition(text)
        || looks_like_action(text)
    {
        return None;
    }

    let hyphen_line = ctx.line.back(2)?.trim();
    if !hyphen_line.ends_with('-') || hyphen_line.chars().count() <= 10 || looks_like_action(hyphen_line) {
        return None;
    }

    let cue = ctx.line.back(3)?;
    patterns::is_character_name(cue.trim(), leading_indent(cue), band)
        .then_some(Decision::open(ElementKind::Dialogue))
}

fn pre_scene(ctx: &RuleContext<'_>) -> Option<Decision> {
    patterns::is_pre_scene_element(ctx.text()).then_some(Decision::close(ElementKind::PreScene))
}

fn scene_heading(ctx: &RuleContext<'_>) -> Option<Decision> {
    patterns::is_scene_heading(ctx.text()).then_some(Decision::close(ElementKind::SceneHeading))
}

fn transition(ctx: &RuleContext<'_>) -> Option<Decision> {
    patterns::is_transition(ctx.text()).then_some(Decision::close(ElementKind::Transition))
}

fn character_name(ctx: &RuleContext<'_>) -> Option<Decision> {
    patterns::is_character_name(ctx.text(), ctx.indent(), ctx.settings.character_band)
        .then_some(Decision::open(ElementKind::Character))
}

fn parenthetical(ctx: &RuleContext<'_>) -> Option<Decision> {
    (ctx.state.in_dialogue_block && patterns::is_parenthetical(ctx.text()))
        .then_some(Decision::keep(ElementKind::Parenthetical))
}

/// Dialogue/action disambiguation inside an open speech run
fn dialogue_block(ctx: &RuleContext<'_>) -> Option<Decision> {
    let state = ctx.state;
    if !state.in_dialogue_block || !state.follows_speech() {
        return None;
    }

    let text = ctx.text();
    if has_strong_action_signal(text, SignalTier::Narrow) {
        return Some(Decision::close(ElementKind::Action));
    }

    let in_band = ctx.settings.dialogue_band.contains(ctx.indent());
    if in_band
        && !patterns::is_scene_element(text)
        && !has_definitive_action(text)
        && !has_physical_business(text)
        && score_dialogue(text).is_dialogue(state.last_element)
    {
        return Some(Decision::keep(ElementKind::Dialogue));
    }

    if is_action_evidence(text) || has_physical_business(text) {
        return Some(Decision::close(ElementKind::Action));
    }

    if in_band || in_continuation_block(&ctx.line, ctx.settings.continuation_lookback) {
        return Some(Decision::keep(ElementKind::Dialogue));
    }

    Some(Decision::close(ElementKind::Action))
}

fn default_action(ctx: &RuleContext<'_>) -> Option<Decision> {
    let text = ctx.text();
    let tier = SignalTier::for_block(ctx.state.in_dialogue_block);
    if has_strong_action_signal(text, tier) || patterns::is_scene_element(text) {
        Some(Decision::close(ElementKind::Action))
    } else {
        Some(Decision::keep(ElementKind::Action))
    }
}

/// Scan back up to `lookback` lines for a (CONT'D) cue with nothing but
/// dialogue-like lines between it and `line`
pub fn in_continuation_block(line: &Line<'_>, lookback: usize) -> bool {
    let start = line.position.saturating_sub(lookback);
    let end = line.position.min(line.window.len());

    for i in (start..end).rev() {
        let candidate = line.window[i].trim();
        if patterns::is_continuation_cue(candidate) {
            return line.window[i + 1..end].iter().all(|between| {
                let between = between.trim();
                !between.is_empty()
                    && !patterns::is_scene_heading(between)
                    && !patterns::looks_like_character_cue(between)
                    && !has_definitive_action(between)
            });
        }
        if patterns::looks_like_character_cue(candidate) || patterns::is_scene_heading(candidate) {
            return false;
        }
    }

    false
}
