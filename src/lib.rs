/*!
 * # screenplay-parser
 *
 * A Rust library that turns layout-preserved screenplay text into structured
 * scenes.
 *
 * ## Features
 *
 * - Repair of PDF extraction artifacts (doubled letters, page numbers)
 * - Line classification driven by indentation, patterns and prior context
 * - Dialogue-block tracking with confidence scoring for ambiguous lines
 * - Scene assembly with industry-style spacing and margins
 * - Character profiles and document statistics
 * - JSON and plain-text output, single files or whole folders
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `element`: Element kinds, classified elements and the line view
 * - `patterns`: Textual pattern predicates (headings, transitions, cues)
 * - `artifacts`: Extraction artifact repair
 * - `classifier`: Rule-based line classification:
 *   - `classifier::rules`: The ordered rule table
 *   - `classifier::signals`: Action-signal detection
 *   - `classifier::confidence`: Dialogue confidence scoring
 *   - `classifier::state`: Per-document classification state
 * - `formatter`: Spacing, wrapping and paragraph rules for scene text
 * - `assembler`: Scene assembly
 * - `document`: Parsed document, metadata and character profiles
 * - `parser`: The page-by-page parsing pipeline
 * - `export`: Plain-text rendering of a parsed document
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod artifacts;
pub mod assembler;
pub mod classifier;
pub mod document;
pub mod element;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod formatter;
pub mod parser;
pub mod patterns;

// Re-export main types for easier usage
pub use app_config::Config;
pub use assembler::{Scene, SceneAssembler};
pub use classifier::{Classifier, ClassifierState};
pub use document::{CharacterProfile, DocumentMetadata, ScreenplayDocument};
pub use element::{Element, ElementKind};
pub use errors::{AppError, ConfigError, InputError};
pub use parser::{Page, ParseOptions, ScreenplayParser};
