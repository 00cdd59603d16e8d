/*!
 * End-to-end parsing tests: raw pages in, scenes and profiles out
 */

use screenplay_parser::document::UploadType;
use screenplay_parser::element::ElementKind;
use screenplay_parser::export;
use screenplay_parser::{Page, ParseOptions, ScreenplayParser};
use crate::common::{self, pad};

fn parse_sample(options: &ParseOptions) -> screenplay_parser::ScreenplayDocument {
    ScreenplayParser::default().parse_text(&common::sample_script(), options)
}

/// Test the full pipeline on a script with a title page
#[test]
fn test_parse_text_withTitlePage_shouldBuildScenesAndProfiles() {
    let doc = parse_sample(&ParseOptions {
        start_page: Some(2),
        ..Default::default()
    });

    assert_eq!(doc.total_pages, 3);
    assert_eq!(doc.metadata.title.as_deref(), Some("THE LONG GOODBYE"));
    assert_eq!(doc.metadata.upload_type, UploadType::Text);
    assert_eq!(doc.scenes.len(), 2);

    let kitchen = &doc.scenes[0];
    assert_eq!(kitchen.heading, "INT. KITCHEN - DAY");
    assert_eq!((kitchen.page_start, kitchen.page_end), (2, 2));
    assert!(kitchen.characters.contains("JOHN"));
    assert!(!kitchen.content.contains("2."));

    let street = &doc.scenes[1];
    let kinds: Vec<ElementKind> = street.elements.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![
        ElementKind::SceneHeading,
        ElementKind::Character,
        ElementKind::Parenthetical,
        ElementKind::Dialogue,
        ElementKind::Transition,
    ]);
    assert!(street.content.contains(&pad(30, "(quietly)")));
    assert!(street.content.contains(&pad(55, "CUT TO:")));

    assert_eq!(doc.characters["JOHN"].dialogue_count, 1);
    assert_eq!(doc.characters["HANNAH"].scenes_present, vec!["scene_002"]);
}

/// Test that without a start page the title page becomes a leading scene
#[test]
fn test_parse_text_withoutStartPage_shouldKeepFrontMatter() {
    let doc = parse_sample(&ParseOptions::default());

    assert_eq!(doc.scenes.len(), 3);
    assert!(!doc.scenes[0].has_heading());
    assert_eq!(doc.scenes[0].page_start, 1);
    assert!(doc.scenes[0].elements.iter().all(|e| e.kind == ElementKind::Action));
}

/// Test that page JSON and layout text give the same scenes
#[test]
fn test_parse_json_withSamePages_shouldMatchTextParse() {
    let options = ParseOptions {
        start_page: Some(2),
        ..Default::default()
    };
    let pages = Page::from_layout_text(&common::sample_script());
    let json = serde_json::to_string(&pages).unwrap();

    let parser = ScreenplayParser::default();
    let from_json = parser.parse_json(&json, &options).unwrap();
    let from_text = parser.parse_text(&common::sample_script(), &options);

    assert_eq!(from_json.metadata.upload_type, UploadType::Json);
    assert_eq!(from_json.scenes, from_text.scenes);
    assert_eq!(from_json.characters, from_text.characters);
}

/// Test that a stuttered cue is repaired before a dialogue block opens
#[test]
fn test_parse_pages_withExtractionArtifacts_shouldRepairCues() {
    let page = Page::new(1, [
        pad(0, "INT. BAR - NIGHT"),
        pad(38, "HHAANNNNAAHH"),
        pad(25, "Two more, please."),
        pad(38, "ROGER (CCOONNTT''DD)"),
        pad(25, "Make it three."),
    ]);
    let doc = ScreenplayParser::default().parse_pages(&[page], &ParseOptions::default());

    let scene = &doc.scenes[0];
    assert_eq!(scene.characters.iter().collect::<Vec<_>>(), vec!["HANNAH", "ROGER"]);
    assert!(scene.content.contains(&pad(38, "ROGER (CONT'D)")));
    assert_eq!(doc.characters["ROGER"].dialogue_count, 1);
}

/// Test the text export of a parsed script
#[test]
fn test_render_text_withSampleScript_shouldSeparateScenes() {
    let doc = parse_sample(&ParseOptions {
        start_page: Some(2),
        title: Some("The Long Goodbye".to_string()),
        ..Default::default()
    });
    let text = export::render_text(&doc);

    assert!(text.starts_with("TITLE: The Long Goodbye\n\n\n"));
    assert!(text.contains(&format!("{}\n\n\n{}", pad(25, "There's nothing left."), pad(12, "EXT. STREET - NIGHT"))));
    assert!(text.ends_with(&format!("{}\n", pad(55, "CUT TO:"))));
    assert!(!text.contains("\n\n\n\n"));
}

/// Test that an empty input gives an empty document
#[test]
fn test_parse_text_withEmptyInput_shouldHaveNoScenes() {
    let doc = ScreenplayParser::default().parse_text("", &ParseOptions::default());
    assert!(doc.scenes.is_empty());
    assert!(doc.characters.is_empty());
    assert_eq!(doc.metadata.title, None);
}
