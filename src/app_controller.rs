use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, OutputFormat};
use crate::document::ScreenplayDocument;
use crate::errors::InputError;
use crate::export;
use crate::file_utils::{FileManager, FileType};
use crate::parser::{ParseOptions, ScreenplayParser};

// @module: Application controller for screenplay parsing

/// Log file written into a processed folder
pub const FOLDER_LOG_FILE: &str = "screenplay-parser.log";

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written to this path
    Written(PathBuf),
    /// Output already existed and was left alone
    Skipped(PathBuf),
}

/// Counts reported at the end of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl fmt::Display for FolderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Folder processing completed: {} processed, {} skipped, {} errors",
            self.processed, self.skipped, self.errors
        )
    }
}

/// Main application controller for screenplay parsing
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared parser, one classifier state per document
    parser: Arc<ScreenplayParser>,

    // @field: Document options applied to every input
    options: ParseOptions,

    // @field: Active config file, never treated as an input
    config_path: Option<PathBuf>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let parser = Arc::new(ScreenplayParser::new(&config));

        Ok(Self {
            config,
            parser,
            options: ParseOptions::default(),
            config_path: None,
        })
    }

    // @method: Set the document options used for every input
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    // @method: Record the config file so folder runs leave it alone
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    // @checks: Whether a discovered file is the active config
    fn is_config_file(&self, path: &Path) -> bool {
        let Some(config_path) = &self.config_path else {
            return false;
        };
        match (path.canonicalize(), config_path.canonicalize()) {
            (Ok(found), Ok(config)) => found == config,
            _ => false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read and parse one input file
    pub fn parse_file(parser: &ScreenplayParser, path: &Path, options: &ParseOptions) -> Result<ScreenplayDocument> {
        let file_type = FileManager::detect_file_type(path)?;
        let content = FileManager::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(InputError::Empty(path.display().to_string()).into());
        }

        match file_type {
            FileType::LayoutText => Ok(parser.parse_text(&content, options)),
            FileType::PageJson => parser
                .parse_json(&content, options)
                .with_context(|| format!("Failed to parse page data: {:?}", path)),
            FileType::Unknown => Err(InputError::Unsupported(path.display().to_string()).into()),
        }
    }

    /// Serialize a document in the configured output format
    pub fn render(&self, document: &ScreenplayDocument) -> Result<String> {
        match self.config.output.format {
            OutputFormat::Json => document.to_json(self.config.output.pretty),
            OutputFormat::Text => Ok(export::render_text(document)),
        }
    }

    /// Parse one input file and write its output into `output_dir`
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(InputError::NotFound(input_file.display().to_string()).into());
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(&input_file, &output_dir, self.config.output.format);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite): {}", output_path.display());
            return Ok(FileOutcome::Skipped(output_path));
        }

        let parser = Arc::clone(&self.parser);
        let options = self.options.clone();
        let path = input_file.clone();
        let document = tokio::task::spawn_blocking(move || Self::parse_file(&parser, &path, &options))
            .await
            .context("Parsing task failed")??;

        info!("{}: {}", input_file.display(), document.stats());
        let rendered = self.render(&document)?;
        FileManager::write_to_file(&output_path, &rendered)?;

        info!(
            "Success: {} ({} scenes, {} characters) in {}",
            output_path.display(),
            document.scenes.len(),
            document.characters.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(FileOutcome::Written(output_path))
    }

    // Format duration in a human-readable format (HH:MM:SS)
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, parsing every input under a directory.
    /// Inputs whose output already exists are skipped.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let inputs: Vec<PathBuf> = FileManager::find_screenplay_inputs(&input_dir)?
            .into_iter()
            .filter(|path| !self.is_config_file(path))
            .collect();
        if inputs.is_empty() {
            return Err(anyhow!("No screenplay files found in directory: {:?}", input_dir));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(inputs.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Parsing screenplays");

        let concurrency = self.config.output.concurrent_documents.max(1);
        let mut results = stream::iter(inputs.into_iter().enumerate())
            .map(|(index, input)| {
                let output_dir = input.parent().map(Path::to_path_buf).unwrap_or_else(|| input_dir.clone());
                let pb = folder_pb.clone();
                async move {
                    let result = self.run(input.clone(), output_dir, force_overwrite).await;
                    pb.inc(1);
                    (index, input, result)
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(index, _, _)| *index);

        let mut summary = FolderSummary::default();
        for (_, input, result) in results {
            match result {
                Ok(FileOutcome::Written(_)) => summary.processed += 1,
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", input.display(), e);
                    summary.errors += 1;
                }
            }
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();
        info!("{}", summary);

        let log_file_path = input_dir.join(FOLDER_LOG_FILE);
        let entry = format!("{} - Duration: {}", summary, Self::format_duration(duration));
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &entry) {
            warn!("Failed to write folder summary to log file: {}", e);
        } else {
            debug!("Folder summary written to {}", log_file_path.display());
        }

        Ok(summary)
    }
}
