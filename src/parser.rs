/*!
 * Parsing pipeline.
 *
 * Pages are processed strictly in order. Every raw line of a page is repaired
 * first; the repaired page is the window the classifier looks back into, so a
 * page-number line becomes blank but keeps its slot. Blank lines are skipped, the
 * rest are classified with one `ClassifierState` per document and handed to the
 * scene assembler.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::artifacts::ArtifactRepairer;
use crate::assembler::SceneAssembler;
use crate::classifier::{Classifier, ClassifierState};
use crate::document::{self, DocumentMetadata, ScreenplayDocument, UploadType};
use crate::element::Line;
use crate::errors::InputError;

/// Page separator emitted by layout-mode text extractors
pub const PAGE_BREAK: char = '\x0c';

/// One page of layout-preserved lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    #[serde(rename = "page")]
    pub number: usize,

    /// Raw lines, leading whitespace preserved
    pub lines: Vec<String>,
}

impl Page {
    pub fn new<S: Into<String>>(number: usize, lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            number,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split layout text into pages on form feeds; a trailing empty page is dropped
    pub fn from_layout_text(text: &str) -> Vec<Page> {
        let mut pages: Vec<Page> = text
            .split(PAGE_BREAK)
            .enumerate()
            .map(|(index, chunk)| Page::new(index + 1, chunk.lines()))
            .collect();

        if pages.len() > 1 && pages.last().is_some_and(Page::is_blank) {
            pages.pop();
        }
        pages
    }

    /// Parse `[{"page": N, "lines": [...]}, ...]`, ordered by page number
    pub fn from_json(json: &str) -> Result<Vec<Page>, InputError> {
        let mut pages: Vec<Page> =
            serde_json::from_str(json).map_err(|e| InputError::MalformedPages(e.to_string()))?;

        if let Some(page) = pages.iter().find(|page| page.number == 0) {
            return Err(InputError::MalformedPages(format!(
                "page numbers are 1-based, found page {} with {} lines",
                page.number,
                page.lines.len()
            )));
        }

        pages.sort_by_key(|page| page.number);
        if let Some(pair) = pages.windows(2).find(|pair| pair[0].number == pair[1].number) {
            return Err(InputError::MalformedPages(format!("page {} appears more than once", pair[0].number)));
        }
        Ok(pages)
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

/// Caller-supplied facts about the document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOptions {
    /// First page holding screenplay content; earlier pages are not classified
    pub start_page: Option<usize>,

    /// Explicit title, wins over the title-page guess
    pub title: Option<String>,

    pub author: Option<String>,

    pub upload_type: UploadType,
}

/// Repair, classify and assemble a whole document
#[derive(Debug, Clone)]
pub struct ScreenplayParser {
    classifier: Classifier,
    repairer: ArtifactRepairer,
    dialogue_width: usize,
    known_names: Vec<String>,
}

impl Default for ScreenplayParser {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ScreenplayParser {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: Classifier::from_config(config),
            repairer: ArtifactRepairer::from_config(&config.repair),
            dialogue_width: config.layout.dialogue_width,
            known_names: config.repair.known_names.clone(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Parse pages already split by the caller, in page number order
    pub fn parse_pages(&self, pages: &[Page], options: &ParseOptions) -> ScreenplayDocument {
        let start_page = options.start_page.unwrap_or(1);
        let mut state = ClassifierState::new();
        let mut assembler = SceneAssembler::new(self.dialogue_width, &self.known_names);

        let mut ordered: Vec<&Page> = pages.iter().collect();
        ordered.sort_by_key(|page| page.number);

        for page in ordered.iter().filter(|page| page.number >= start_page) {
            let window: Vec<String> = page.lines.iter().map(|line| self.repairer.clean(line)).collect();

            for line in (0..window.len()).filter_map(|i| Line::new(page.number, i, &window)) {
                if line.is_blank() {
                    continue;
                }
                assembler.push(self.classifier.classify(&mut state, &line));
            }
        }

        let title = options
            .title
            .clone()
            .or_else(|| ordered.first().and_then(|page| document::extract_title(&page.lines)));
        let metadata = DocumentMetadata {
            title,
            author: options.author.clone(),
            upload_type: options.upload_type,
        };

        let document = ScreenplayDocument::new(metadata, assembler.finish(), pages.len());
        debug!(
            "Parsed '{}': {}",
            document.metadata.title.as_deref().unwrap_or("untitled"),
            document.stats()
        );
        document
    }

    /// Parse layout-preserved text with form-feed page breaks
    pub fn parse_text(&self, text: &str, options: &ParseOptions) -> ScreenplayDocument {
        let options = ParseOptions {
            upload_type: UploadType::Text,
            ..options.clone()
        };
        self.parse_pages(&Page::from_layout_text(text), &options)
    }

    /// Parse page JSON
    pub fn parse_json(&self, json: &str, options: &ParseOptions) -> Result<ScreenplayDocument, InputError> {
        let pages = Page::from_json(json)?;
        let options = ParseOptions {
            upload_type: UploadType::Json,
            ..options.clone()
        };
        Ok(self.parse_pages(&pages, &options))
    }
}
