/*!
 * Line classification.
 *
 * A `Classifier` turns one repaired line into an `Element`, using the line itself,
 * its neighbours on the same page and the per-document `ClassifierState`:
 * - `rules`: the ordered cascade, first match wins
 * - `confidence`: weighted dialogue signals and their thresholds
 * - `signals`: strong action signals and the weighted action evidence table
 * - `state`: the state threaded through a document and the decisions that update it
 */

pub mod confidence;
pub mod rules;
pub mod signals;
pub mod state;

use log::trace;

use crate::app_config::{ClassifierConfig, Config, LayoutConfig};
use crate::element::{Element, ElementKind, Line};

pub use confidence::{score_dialogue, DialogueScore, DialogueSignal};
pub use rules::{RuleContext, RULES};
pub use signals::SignalTier;
pub use state::{BlockEffect, ClassifierState, Decision};

/// Rule-driven line classifier
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    settings: ClassifierConfig,
    layout: LayoutConfig,
}

impl Classifier {
    pub fn new(settings: ClassifierConfig, layout: LayoutConfig) -> Self {
        Self { settings, layout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.classifier.clone(), config.layout.clone())
    }

    pub fn settings(&self) -> &ClassifierConfig {
        &self.settings
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Run the cascade without touching the state.
    ///
    /// Returns the decision together with the name of the rule that made it.
    pub fn decide(&self, state: &ClassifierState, line: &Line<'_>) -> (Decision, &'static str) {
        let ctx = RuleContext {
            line: *line,
            state,
            settings: &self.settings,
        };

        for rule in RULES {
            if let Some(decision) = (rule.evaluate)(&ctx) {
                return (decision, rule.name);
            }
        }

        (Decision::keep(ElementKind::Action), "default_action")
    }

    /// Classify a non-blank line and fold the decision into `state`
    pub fn classify(&self, state: &mut ClassifierState, line: &Line<'_>) -> Element {
        let (decision, rule) = self.decide(state, line);
        trace!(
            "p{} l{} {:<24} {:?} -> {}",
            line.page,
            line.position,
            rule,
            line.text(),
            decision.kind
        );

        state.apply(decision);
        Element::new(
            decision.kind,
            line.text(),
            self.layout.indent_for(decision.kind),
            line.page,
        )
    }
}
