/*!
 * Tests for line classification through the public API
 */

use screenplay_parser::app_config::{ClassifierConfig, Config, LayoutConfig};
use screenplay_parser::classifier::{Classifier, ClassifierState, RULES};
use screenplay_parser::element::{Element, ElementKind, Line};
use screenplay_parser::patterns::IndentBand;
use crate::common::pad;

fn classify_all(classifier: &Classifier, window: &[String]) -> Vec<Element> {
    let mut state = ClassifierState::new();
    (0..window.len())
        .filter_map(|i| Line::new(1, i, window))
        .filter(|line| !line.is_blank())
        .map(|line| classifier.classify(&mut state, &line))
        .collect()
}

/// Test that every rule in the cascade has a distinct name
#[test]
fn test_rules_shouldHaveUniqueNames() {
    let mut names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(RULES.first().map(|rule| rule.name), Some("continuation_cue"));
    assert_eq!(RULES.last().map(|rule| rule.name), Some("default_action"));
}

/// Test that a cue band taken from configuration moves the cue margin
#[test]
fn test_classify_withCustomCharacterBand_shouldFollowConfig() {
    let window = vec![pad(20, "HANNAH"), pad(10, "Over here.")];

    let default_kinds: Vec<ElementKind> = classify_all(&Classifier::default(), &window)
        .iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(default_kinds[0], ElementKind::Action);

    let settings = ClassifierConfig {
        character_band: IndentBand::new(16, 24),
        dialogue_band: IndentBand::new(8, 14),
        ..Default::default()
    };
    let classifier = Classifier::new(settings, LayoutConfig::default());
    let kinds: Vec<ElementKind> = classify_all(&classifier, &window).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ElementKind::Character, ElementKind::Dialogue]);
}

/// Test that output margins come from the layout configuration
#[test]
fn test_classify_withCustomLayout_shouldUseConfiguredIndent() {
    let mut config = Config::default();
    config.layout.character_indent = 40;
    let classifier = Classifier::from_config(&config);

    let elements = classify_all(&classifier, &[pad(38, "ROGER")]);
    assert_eq!(elements, vec![Element::new(ElementKind::Character, "ROGER", 40, 1)]);
}

/// Test a short exchange with an action line breaking the block
#[test]
fn test_classify_withExchange_shouldAlternateBlocks() {
    let window = vec![
        pad(0, "INT. BAR - NIGHT"),
        pad(38, "HANNAH"),
        pad(25, "I can't believe this is happening."),
        pad(25, "Dan Bilzerian jet skis across the water."),
        pad(38, "ROGER"),
        pad(25, "Believe it."),
    ];
    let kinds: Vec<ElementKind> = classify_all(&Classifier::default(), &window)
        .iter()
        .map(|e| e.kind)
        .collect();

    assert_eq!(kinds, vec![
        ElementKind::SceneHeading,
        ElementKind::Character,
        ElementKind::Dialogue,
        ElementKind::Action,
        ElementKind::Character,
        ElementKind::Dialogue,
    ]);
}

/// Test the element wire shape
#[test]
fn test_element_serialize_shouldUseTypeField() {
    let element = Element::new(ElementKind::SceneHeading, "INT. BAR - NIGHT", 12, 3);
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["type"], "scene_heading");
    assert_eq!(value["text"], "INT. BAR - NIGHT");
    assert_eq!(value["indent"], 12);
    assert_eq!(value["page"], 3);
}
