/*!
 * Per-language reports and the aggregate outcome of a run.
 */

use std::fmt;

use log::{error, info, warn};

use crate::errors::AppError;
use crate::file_utils::ArtifactOutcome;

/// What happened to one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    pub language: String,
    /// Whether the service was called for this language
    pub called_api: bool,
    pub batches: usize,
    pub failed_batches: usize,
    pub items: usize,
    pub failed_items: usize,
    pub artifact: ArtifactOutcome,
}

impl LanguageReport {
    pub fn new(language: impl Into<String>, called_api: bool) -> Self {
        Self {
            language: language.into(),
            called_api,
            batches: 0,
            failed_batches: 0,
            items: 0,
            failed_items: 0,
            artifact: ArtifactOutcome::NotWritten,
        }
    }

    /// A language succeeds when every batch was accepted and nothing fell back
    pub fn succeeded(&self) -> bool {
        self.failed_batches == 0 && self.failed_items == 0
    }
}

impl fmt::Display for LanguageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.called_api {
            return write!(f, "[{}] copied from source, {}", self.language, self.artifact);
        }
        write!(
            f,
            "[{}] {}/{} batches ok, {}/{} texts translated, {}",
            self.language,
            self.batches - self.failed_batches,
            self.batches,
            self.items - self.failed_items,
            self.items,
            self.artifact
        )
    }
}

/// Reports of every language of a run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<LanguageReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: LanguageReport) {
        self.reports.push(report);
    }

    pub fn report(&self, language: &str) -> Option<&LanguageReport> {
        self.reports.iter().find(|r| r.language == language)
    }

    /// Languages with at least one failed batch or item
    pub fn failed_languages(&self) -> Vec<String> {
        self.reports
            .iter()
            .filter(|r| !r.succeeded())
            .map(|r| r.language.clone())
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.reports.iter().all(LanguageReport::succeeded)
    }

    /// Log one line per language plus the overall result
    pub fn log(&self) {
        for report in &self.reports {
            if report.succeeded() {
                info!("{}", report);
            } else {
                warn!("{}", report);
            }
        }
        if self.is_success() {
            info!("Translation finished for {} languages", self.reports.len());
        } else {
            error!(
                "Translation failed for: {}",
                self.failed_languages().join(", ")
            );
        }
    }

    /// Turn the run into its final result: an error naming every failed language
    pub fn finalize(self) -> Result<Self, AppError> {
        let failed = self.failed_languages();
        if failed.is_empty() {
            Ok(self)
        } else {
            Err(AppError::TranslationFailed { languages: failed })
        }
    }
}
