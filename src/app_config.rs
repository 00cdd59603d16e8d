use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::element::{self, ElementKind};
use crate::errors::ConfigError;
use crate::patterns::IndentBand;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Canonical output margins
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Classifier thresholds
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Artifact repair dictionary
    #[serde(default)]
    pub repair: RepairConfig,

    /// Output rendering
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Canonical indentation for each element kind, plus the dialogue wrap width
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    // @field: Character cue margin
    #[serde(default = "default_character_indent")]
    pub character_indent: usize,

    // @field: Dialogue margin
    #[serde(default = "default_dialogue_indent")]
    pub dialogue_indent: usize,

    // @field: Parenthetical margin
    #[serde(default = "default_parenthetical_indent")]
    pub parenthetical_indent: usize,

    // @field: Action margin
    #[serde(default = "default_action_indent")]
    pub action_indent: usize,

    // @field: Scene heading margin
    #[serde(default = "default_scene_heading_indent")]
    pub scene_heading_indent: usize,

    // @field: Transition margin
    #[serde(default = "default_transition_indent")]
    pub transition_indent: usize,

    // @field: Pre-scene marker margin
    #[serde(default = "default_pre_scene_indent")]
    pub pre_scene_indent: usize,

    // @field: Max dialogue characters per line
    #[serde(default = "default_dialogue_width")]
    pub dialogue_width: usize,
}

impl LayoutConfig {
    // @returns: Configured margin for an element kind
    pub fn indent_for(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::SceneHeading => self.scene_heading_indent,
            ElementKind::Character => self.character_indent,
            ElementKind::Dialogue => self.dialogue_indent,
            ElementKind::Parenthetical => self.parenthetical_indent,
            ElementKind::Transition => self.transition_indent,
            ElementKind::PreScene => self.pre_scene_indent,
            ElementKind::Action => self.action_indent,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            character_indent: default_character_indent(),
            dialogue_indent: default_dialogue_indent(),
            parenthetical_indent: default_parenthetical_indent(),
            action_indent: default_action_indent(),
            scene_heading_indent: default_scene_heading_indent(),
            transition_indent: default_transition_indent(),
            pre_scene_indent: default_pre_scene_indent(),
            dialogue_width: default_dialogue_width(),
        }
    }
}

/// Positional thresholds used while classifying
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    // @field: Indents accepted for a character cue
    #[serde(default = "IndentBand::character")]
    pub character_band: IndentBand,

    // @field: Indents accepted for dialogue continuation
    #[serde(default = "IndentBand::dialogue")]
    pub dialogue_band: IndentBand,

    // @field: Lines scanned back for a (CONT'D) cue
    #[serde(default = "default_continuation_lookback")]
    pub continuation_lookback: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            character_band: IndentBand::character(),
            dialogue_band: IndentBand::dialogue(),
            continuation_lookback: default_continuation_lookback(),
        }
    }
}

/// Known-name dictionary for letter-doubling repair and action paragraph breaks
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RepairConfig {
    #[serde(default = "default_known_names")]
    pub known_names: Vec<String>,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            known_names: default_known_names(),
        }
    }
}

/// Output serialization format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured document as JSON
    #[default]
    Json,
    /// Re-rendered screenplay text
    Text,
}

impl OutputFormat {
    // @returns: File extension for rendered output
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    // @field: Output format
    #[serde(default)]
    pub format: OutputFormat,

    // @field: Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,

    // @field: Documents parsed at once in folder mode
    #[serde(default = "default_concurrent_documents")]
    pub concurrent_documents: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
            concurrent_documents: default_concurrent_documents(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_character_indent() -> usize {
    element::CHARACTER_INDENT
}

fn default_dialogue_indent() -> usize {
    element::DIALOGUE_INDENT
}

fn default_parenthetical_indent() -> usize {
    element::PARENTHETICAL_INDENT
}

fn default_action_indent() -> usize {
    element::ACTION_INDENT
}

fn default_scene_heading_indent() -> usize {
    element::SCENE_HEADING_INDENT
}

fn default_transition_indent() -> usize {
    element::TRANSITION_INDENT
}

fn default_pre_scene_indent() -> usize {
    element::PRE_SCENE_INDENT
}

fn default_dialogue_width() -> usize {
    element::DIALOGUE_WIDTH
}

fn default_continuation_lookback() -> usize {
    5
}

fn default_concurrent_documents() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_known_names() -> Vec<String> {
    ["HANNAH", "DE-FI DOM", "PATRICK", "ROGER", "BOUNCER", "KEVIN", "BRIAN", "SAM"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load a configuration file, or write the defaults there when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;
            std::fs::write(path, config_json)
                .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let bands = [
            ("character_band", self.classifier.character_band),
            ("dialogue_band", self.classifier.dialogue_band),
        ];
        for (name, band) in bands {
            if band.min > band.max {
                return Err(ConfigError::InvalidBand {
                    name: name.to_string(),
                    min: band.min,
                    max: band.max,
                }
                .into());
            }
        }

        for kind in ElementKind::ALL {
            let indent = self.layout.indent_for(kind);
            if indent >= element::PAGE_WIDTH {
                return Err(ConfigError::InvalidLayout {
                    field: format!("{}_indent", kind),
                    value: indent,
                }
                .into());
            }
        }

        let width = self.layout.dialogue_width;
        if width < 10 || self.layout.dialogue_indent + width > element::PAGE_WIDTH {
            return Err(ConfigError::InvalidLayout {
                field: "dialogue_width".to_string(),
                value: width,
            }
            .into());
        }

        if self.output.concurrent_documents == 0 {
            return Err(ConfigError::InvalidOutput {
                field: "concurrent_documents".to_string(),
                value: 0,
            }
            .into());
        }

        if let Some(name) = self
            .repair
            .known_names
            .iter()
            .find(|name| !name.chars().any(char::is_alphanumeric))
        {
            return Err(ConfigError::InvalidKnownName(name.clone()).into());
        }

        Ok(())
    }
}
