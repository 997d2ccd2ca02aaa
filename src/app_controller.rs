use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{ArtifactOutcome, ArtifactWriter, FileManager};
use crate::language_utils::display_name;
use crate::providers::{HttpTransport, TranslationTransport};
use crate::resources::parse_resources;
use crate::translation::{RunSummary, TranslationEngine};

// @module: Application controller for resource translation

/// Main application controller for resource translation
///
/// Runs every target language of the configuration in order and writes one
/// artifact per language. A failed language never stops the others; the
/// final result names all of them.
pub struct Controller<T: TranslationTransport = HttpTransport> {
    // @field: App configuration
    config: Config,
    // @field: Transport used for every request
    transport: T,
    dry_run: bool,
    show_progress: bool,
}

impl Controller<HttpTransport> {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let transport = HttpTransport::from_config(&config.api)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: TranslationTransport> Controller<T> {
    /// Create a controller sending requests through `transport`
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            transport,
            dry_run: false,
            show_progress: false,
        }
    }

    /// Plan batches without sending requests or touching the output directory
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Show a progress bar per language
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress || self.dry_run {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Translate the source file into every target language
    ///
    /// Configuration errors are returned before any request is sent.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let plan = self.config.plan()?;
        self.config.log_language_plan(&plan);

        let source_file = &self.config.paths.source_file;
        info!("Reading source resources from {}", source_file.display());
        let xml = FileManager::read_to_string(source_file)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        let tree = parse_resources(&xml)?;

        let mut summary = RunSummary::new();
        if tree.is_empty() {
            warn!("{} has no resources, nothing to translate", source_file.display());
            return Ok(summary);
        }
        debug!("Parsed {} resources", tree.resource_count());

        let engine = TranslationEngine::new(&self.config.api, &plan.source_language, &self.transport)?;
        let writer = ArtifactWriter::new(&self.config.paths.output_dir, self.config.output.clone());

        for target in &plan.targets {
            info!("[{}] Generating {}", target.code, display_name(&target.code));

            let progress = self.progress_bar();
            let outcome = engine
                .translate_language(&tree, target, &progress, self.dry_run)
                .await?;
            progress.finish_and_clear();

            let mut report = outcome.report;
            report.artifact = if self.dry_run {
                ArtifactOutcome::Skipped
            } else {
                writer
                    .commit(&outcome.tree, target)
                    .map_err(|e| AppError::File(format!("{:#}", e)))?
            };
            summary.record(report);
        }

        summary.log();
        summary.finalize()
    }
}
