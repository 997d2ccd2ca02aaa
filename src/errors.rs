/*!
 * Error types for the stringsmith application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while validating configuration, before any network activity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Batch size is zero
    #[error("batch_size must be a positive integer")]
    InvalidBatchSize,

    /// A required setting is blank
    #[error("{0} must be set")]
    MissingValue(&'static str),

    /// No target languages were listed
    #[error("No target languages specified in target_languages")]
    NoTargetLanguages,

    /// The resolved source language is listed as a non-default target
    #[error(
        "Target language '{target}' equals the source language '{source_language}' but is not the default output language '{default_language}'"
    )]
    AmbiguousSourceTarget {
        /// The offending target code
        target: String,
        /// Resolved source language
        source_language: String,
        /// Configured default output language
        default_language: String,
    },

    /// `extra_body` is not a JSON object
    #[error("extra_body must be a JSON object: {0}")]
    InvalidExtraBody(String),

    /// HTTP method not understood
    #[error("Unsupported HTTP method: {0}")]
    InvalidHttpMethod(String),
}

/// Errors that can occur when talking to the translation service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error body from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The response path does not lead to an array
    #[error("Could not extract translations at '{path}': {reason}")]
    ExtractionFailed {
        /// Configured dot-separated path
        path: String,
        /// What went wrong while walking it
        reason: String,
    },

    /// The extracted array does not match the submitted batch
    #[error("Translated texts array size ({actual}) does not match expected input size ({expected})")]
    SizeMismatch {
        /// Number of texts submitted
        expected: usize,
        /// Number of texts returned
        actual: usize,
    },
}

/// Errors reading or writing resource files
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Malformed XML in a resource file
    #[error("XML error: {0}")]
    Xml(String),

    /// The document root is not `<resources>`
    #[error("Expected <resources> root element, found <{0}>")]
    UnexpectedRoot(String),
}

impl From<quick_xml::Error> for ResourceError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the translation service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error reading or writing a resource file
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// At least one batch failed somewhere in the run
    #[error(
        "One or more translations failed for: {}. Files with failures contain 'TODO: Translation failed' comments next to the affected resources.",
        .languages.join(", ")
    )]
    TranslationFailed {
        /// Languages with at least one failed item
        languages: Vec<String>,
    },
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
