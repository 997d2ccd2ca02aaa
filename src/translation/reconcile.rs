/*!
 * Reconciliation of batch outcomes into the per-language result map.
 *
 * A batch is accepted or rejected as a whole. Accepted texts are escaped
 * for the resource format on the way in; rejected items keep their escaped
 * source text and are marked failed. Nothing downstream escapes again.
 */

use std::collections::HashMap;

use log::{debug, error};

use crate::errors::ProviderError;
use crate::translation::batch::Batch;
use crate::translation::formatting::escape_android;

/// Final text of one work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Escaped text ready to be written
    pub text: String,
    pub succeeded: bool,
}

/// Collects batch outcomes for one language run
#[derive(Debug)]
pub struct Reconciler {
    language: String,
    results: HashMap<String, TranslationResult>,
    failed_batches: usize,
}

impl Reconciler {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            results: HashMap::new(),
            failed_batches: 0,
        }
    }

    /// Record the outcome of one batch
    ///
    /// Returns whether the batch was accepted. A response whose length does not
    /// match the batch is rejected even if the transport reported success.
    pub fn reconcile(
        &mut self,
        batch: &Batch<'_>,
        outcome: Result<Vec<String>, ProviderError>,
    ) -> bool {
        let outcome = outcome.and_then(|texts| {
            if texts.len() == batch.len() {
                Ok(texts)
            } else {
                Err(ProviderError::SizeMismatch {
                    expected: batch.len(),
                    actual: texts.len(),
                })
            }
        });

        match outcome {
            Ok(texts) => {
                for (item, text) in batch.items.iter().zip(texts) {
                    self.results.insert(
                        item.id.clone(),
                        TranslationResult {
                            text: escape_android(&text),
                            succeeded: true,
                        },
                    );
                }
                debug!("[{}] Batch {} accepted ({} texts)", self.language, batch.label(), batch.len());
                true
            }
            Err(e) => {
                error!(
                    "[{}] Batch {} failed, keeping source text for {} items: {}",
                    self.language,
                    batch.label(),
                    batch.len(),
                    e
                );
                for item in batch.items {
                    self.results.insert(
                        item.id.clone(),
                        TranslationResult {
                            text: escape_android(&item.source_text),
                            succeeded: false,
                        },
                    );
                }
                self.failed_batches += 1;
                false
            }
        }
    }

    /// Batches rejected so far
    pub fn failed_batches(&self) -> usize {
        self.failed_batches
    }

    pub fn into_results(self) -> HashMap<String, TranslationResult> {
        self.results
    }
}
