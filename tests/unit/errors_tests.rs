/*!
 * Tests for error types and their messages
 */

use stringsmith::errors::{AppError, ConfigError, ProviderError, ResourceError};

#[test]
fn test_translationFailed_message_shouldListLanguagesAndMarker() {
    let err = AppError::TranslationFailed {
        languages: vec!["fr".to_string(), "de".to_string()],
    };
    let message = err.to_string();
    assert!(message.contains("fr, de"));
    assert!(message.contains("TODO: Translation failed"));
}

#[test]
fn test_configError_intoAppError_shouldKeepVariant() {
    let err: AppError = ConfigError::InvalidBatchSize.into();
    assert!(matches!(err, AppError::Config(ConfigError::InvalidBatchSize)));
    assert!(err.to_string().contains("batch_size"));
}

#[test]
fn test_providerError_sizeMismatch_shouldMentionBothSizes() {
    let message = ProviderError::SizeMismatch { expected: 3, actual: 2 }.to_string();
    assert!(message.contains("(2)"));
    assert!(message.contains("(3)"));
}

#[test]
fn test_ambiguousSourceTarget_message_shouldNameAllLanguages() {
    let message = ConfigError::AmbiguousSourceTarget {
        target: "de".to_string(),
        source_language: "de".to_string(),
        default_language: "en".to_string(),
    }
    .to_string();
    assert!(message.contains("'de'"));
    assert!(message.contains("'en'"));
}

#[test]
fn test_ioError_intoAppError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: AppError = io.into();
    assert!(matches!(err, AppError::File(_)));

    let err: AppError = ResourceError::UnexpectedRoot("manifest".to_string()).into();
    assert!(err.to_string().contains("<manifest>"));
}
