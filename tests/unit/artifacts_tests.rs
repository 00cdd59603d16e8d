/*!
 * Tests for extraction artifact repair through the public API
 */

use screenplay_parser::app_config::RepairConfig;
use screenplay_parser::artifacts::{self, ArtifactRepairer};

/// Test that the default dictionary repairs a stuttered cue with its marker
#[test]
fn test_clean_withStutteredCue_shouldRestoreNameAndMarker() {
    assert_eq!(artifacts::clean("HHAANNNNAAHH (CCOONNTT''DD)"), "HANNAH (CONT'D)");
}

/// Test that a configured dictionary replaces the default one
#[test]
fn test_from_config_withCustomNames_shouldOnlyKnowThoseNames() {
    let config = RepairConfig {
        known_names: vec!["MARGOT".to_string(), "  ".to_string()],
    };
    let repairer = ArtifactRepairer::from_config(&config);

    assert_eq!(repairer.template_count(), 1);
    assert_eq!(repairer.clean("MMAARRGGOOTT"), "MARGOT");
    assert_eq!(repairer.clean("PPAATTRRIICCKK"), "PPAATTRRIICCKK");
}

/// Test that the default repairer knows the default dictionary
#[test]
fn test_default_repairer_shouldCarryDefaultNames() {
    let repairer = ArtifactRepairer::default();
    assert_eq!(repairer.template_count(), RepairConfig::default().known_names.len());
}

/// Test page-number detection on realistic footer lines
#[test]
fn test_is_page_number_withFooters_shouldDetect() {
    assert!(artifacts::is_page_number("                                                            12."));
    assert!(artifacts::is_page_number("- 4 -"));
    assert!(!artifacts::is_page_number("12 ANGRY MEN"));
}
