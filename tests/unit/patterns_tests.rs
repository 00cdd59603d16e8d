/*!
 * Tests for screenplay pattern predicates
 */

use screenplay_parser::patterns::{self, IndentBand};

/// Test that headings need both upper case and a scene-opening template
#[test]
fn test_is_scene_heading_withCommonHeadings_shouldDetect() {
    assert!(patterns::is_scene_heading("INT. KITCHEN - DAY"));
    assert!(patterns::is_scene_heading("  EXT. PARKING LOT - NIGHT  "));
    assert!(patterns::is_scene_heading("I/E. PICKUP TRUCK - CONTINUOUS"));
    assert!(!patterns::is_scene_heading("INT. Kitchen - day"));
    assert!(!patterns::is_scene_heading("John walks in."));
}

/// Test transitions against prefixes
#[test]
fn test_is_transition_withKnownPhrases_shouldDetect() {
    assert!(patterns::is_transition("CUT TO:"));
    assert!(patterns::is_transition("FADE OUT."));
    assert!(patterns::is_transition("SMASH CUT TO:"));
    assert!(!patterns::is_transition("Cut to the chase."));
    assert!(!patterns::is_transition("HANNAH"));
}

/// Test document-opening markers
#[test]
fn test_is_pre_scene_element_withOpeningMarkers_shouldDetect() {
    assert!(patterns::is_pre_scene_element("FADE IN:"));
    assert!(patterns::is_pre_scene_element("OVER BLACK"));
    assert!(patterns::is_pre_scene_element("SUPER: THREE YEARS EARLIER"));
    assert!(!patterns::is_pre_scene_element("Fade in slowly."));
}

/// Test continuation cues, including the stuttered spelling
#[test]
fn test_is_continuation_cue_withVariants_shouldDetect() {
    assert!(patterns::is_continuation_cue("HANNAH (CONT'D)"));
    assert!(patterns::is_continuation_cue("DE-FI DOM (CONTD)"));
    assert!(patterns::is_continuation_cue("ROGER (MORE)"));
    assert!(patterns::is_continuation_cue("HANNAH (CCOONNTT''DD)"));
    assert!(!patterns::is_continuation_cue("HANNAH (V.O.)"));
    assert!(!patterns::is_continuation_cue("Hannah (cont'd)"));
}

/// Test that character cues depend on the indentation band
#[test]
fn test_is_character_name_withBand_shouldRespectIndent() {
    let band = IndentBand::character();
    assert!(patterns::is_character_name("HANNAH", 38, band));
    assert!(patterns::is_character_name("ROGER (V.O.)", 40, band));
    assert!(!patterns::is_character_name("HANNAH", 12, band));
    assert!(!patterns::is_character_name("KITCHEN", 38, band));
    assert!(!patterns::is_character_name("Hannah", 38, band));

    // Continuation cues are accepted at any indent
    assert!(patterns::is_character_name("HANNAH (CONT'D)", 0, band));
}

/// Test cue cleaning used for character keys
#[test]
fn test_clean_character_name_withExtensions_shouldStrip() {
    assert_eq!(patterns::clean_character_name("ROGER (V.O.)"), Some("ROGER".to_string()));
    assert_eq!(patterns::clean_character_name("  HANNAH (CONT'D) "), Some("HANNAH".to_string()));
    assert_eq!(patterns::clean_character_name("X"), None);
    assert_eq!(patterns::clean_character_name(&"A".repeat(36)), None);
}

/// Test band boundaries
#[test]
fn test_indent_band_contains_shouldBeInclusive() {
    let band = IndentBand::dialogue();
    assert!(band.contains(18));
    assert!(band.contains(35));
    assert!(!band.contains(17));
    assert!(!band.contains(36));
}
