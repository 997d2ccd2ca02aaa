/*!
 * Per-language translation run.
 *
 * Flattens the source tree, sends its batches one after the other, reconciles
 * every outcome and rebuilds the output tree. A failed batch never stops the
 * run; the remaining batches are still sent.
 */

use indicatif::ProgressBar;
use log::{debug, info};

use crate::app_config::{ApiConfig, TargetLanguage};
use crate::errors::ConfigError;
use crate::file_utils::ArtifactOutcome;
use crate::language_utils::display_name;
use crate::providers::{self, TranslationTransport};
use crate::resources::{OutputTree, ResourceTree};
use crate::translation::batch;
use crate::translation::builder;
use crate::translation::flatten::flatten;
use crate::translation::reconcile::Reconciler;
use crate::translation::request::RequestBuilder;
use crate::translation::summary::LanguageReport;

/// Output tree and report of one language
#[derive(Debug, Clone)]
pub struct LanguageOutcome {
    pub tree: OutputTree,
    pub report: LanguageReport,
}

/// Translates a resource tree into target languages over a transport
#[derive(Debug)]
pub struct TranslationEngine<'a, T: TranslationTransport + ?Sized> {
    transport: &'a T,
    requests: RequestBuilder,
    response_path: String,
    batch_size: usize,
}

impl<'a, T: TranslationTransport + ?Sized> TranslationEngine<'a, T> {
    pub fn new(api: &ApiConfig, source_language: &str, transport: &'a T) -> Result<Self, ConfigError> {
        if api.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        Ok(Self {
            transport,
            requests: RequestBuilder::new(api, source_language)?,
            response_path: api.response_path.trim().to_string(),
            batch_size: api.batch_size,
        })
    }

    /// Produce the output tree of one target language
    ///
    /// With `dry_run` set, batches are planned and counted but nothing is sent.
    pub async fn translate_language(
        &self,
        tree: &ResourceTree,
        target: &TargetLanguage,
        progress: &ProgressBar,
        dry_run: bool,
    ) -> Result<LanguageOutcome, ConfigError> {
        let language = target.code.as_str();
        let flat = flatten(tree, target);
        let mut report = LanguageReport::new(language, target.call_api);
        report.items = flat.items.len();

        if !target.call_api {
            info!("[{}] Target is the source language, copying resources", language);
        } else if flat.items.is_empty() {
            info!("[{}] Nothing to translate", language);
        }

        let batches = batch::plan(&flat.items, self.batch_size)?;
        report.batches = batches.len();
        if !batches.is_empty() {
            info!(
                "[{}] Translating {} texts into {} in {} batches",
                language,
                flat.items.len(),
                display_name(language),
                batches.len()
            );
        }

        let mut reconciler = Reconciler::new(language);
        if dry_run {
            for batch in &batches {
                debug!("[{}] Dry run, would send batch {} ({} texts)", language, batch.label(), batch.len());
            }
            report.artifact = ArtifactOutcome::Skipped;
        } else {
            progress.set_length(batches.len() as u64);
            progress.set_position(0);
            progress.set_message(language.to_string());

            for batch in &batches {
                let outcome = match self.requests.build(batch, language) {
                    Ok(request) => {
                        providers::translate(self.transport, &request, &self.response_path).await
                    }
                    Err(e) => Err(e),
                };
                reconciler.reconcile(batch, outcome);
                progress.inc(1);
            }
        }

        report.failed_batches = reconciler.failed_batches();
        let results = reconciler.into_results();
        let tree = if dry_run {
            OutputTree::new(language)
        } else {
            builder::build(language, flat.skeleton, &flat.items, &results)
        };
        report.failed_items = tree.failed_count();

        Ok(LanguageOutcome { tree, report })
    }
}
