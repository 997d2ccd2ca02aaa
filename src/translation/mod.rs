/*!
 * Resource translation pipeline.
 *
 * One language run goes through these submodules in order:
 *
 * - `flatten`: source tree to work items plus an order-preserving skeleton
 * - `batch`: work items to fixed-size batches
 * - `request`: batch to service request
 * - `reconcile`: batch outcomes to the escaped result map
 * - `builder`: skeleton plus results to the output tree
 * - `summary`: per-language reports and the run outcome
 * - `core`: the engine tying the steps together
 * - `formatting`: Android string escaping
 */

// Re-export main types for easier usage
pub use self::batch::Batch;
pub use self::builder::FAILURE_ANNOTATION;
pub use self::core::{LanguageOutcome, TranslationEngine};
pub use self::flatten::{FlattenedTree, Skeleton, WorkItem, WorkItemKind, flatten};
pub use self::formatting::escape_android;
pub use self::reconcile::{Reconciler, TranslationResult};
pub use self::request::{RequestBuilder, TranslationRequest};
pub use self::summary::{LanguageReport, RunSummary};

// Submodules
pub mod batch;
pub mod builder;
pub mod core;
pub mod flatten;
pub mod formatting;
pub mod reconcile;
pub mod request;
pub mod summary;
