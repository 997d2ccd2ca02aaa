/*!
 * Batch planning.
 *
 * Work items are sent to the service in consecutive chunks of at most
 * `batch_size` texts. Batches keep the order of the work items and never
 * overlap.
 */

use crate::errors::ConfigError;
use crate::translation::flatten::WorkItem;

/// A chunk of work items sent in one request
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// Zero-based position of this batch
    pub index: usize,
    /// Number of batches in this language run
    pub total: usize,
    pub items: &'a [WorkItem],
}

impl<'a> Batch<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Source texts of this batch in order
    pub fn texts(&self) -> Vec<&'a str> {
        self.items.iter().map(|item| item.source_text.as_str()).collect()
    }

    /// `2/5` style label for log lines
    pub fn label(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }
}

/// Split work items into batches of at most `batch_size` items
pub fn plan(items: &[WorkItem], batch_size: usize) -> Result<Vec<Batch<'_>>, ConfigError> {
    if batch_size == 0 {
        return Err(ConfigError::InvalidBatchSize);
    }

    let total = items.len().div_ceil(batch_size);
    Ok(items
        .chunks(batch_size)
        .enumerate()
        .map(|(index, items)| Batch {
            index,
            total,
            items,
        })
        .collect())
}
