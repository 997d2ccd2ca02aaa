use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::language_utils::language_codes_match;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and resolving the language plan of a run.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Translation service request/response shape
    #[serde(default)]
    pub api: ApiConfig,

    /// Source, default and target languages
    #[serde(default)]
    pub languages: LanguageConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Output artifact formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// HTTP verb used for translation requests
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[default]
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "delete")]
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ConfigError::InvalidHttpMethod(s.to_string())),
        }
    }
}

/// Remote translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP verb; GET sends the payload as query parameters
    #[serde(default)]
    pub http_method: HttpMethod,

    /// Payload key holding the array of texts
    #[serde(default = "default_texts_key")]
    pub texts_key: String,

    /// Payload key holding the target language code
    #[serde(default = "default_target_language_key")]
    pub target_language_key: String,

    /// Payload key holding the source language code, omitted when unset
    #[serde(default = "default_source_language_key")]
    pub source_language_key: Option<String>,

    /// Dot-separated path to the translated texts array in the response
    #[serde(default = "default_response_path")]
    pub response_path: String,

    /// Static fields merged into every payload; `_headers` holds request headers
    #[serde(default = "default_extra_body")]
    pub extra_body: serde_json::Value,

    /// Connect timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Maximum number of texts per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http_method: HttpMethod::default(),
            texts_key: default_texts_key(),
            target_language_key: default_target_language_key(),
            source_language_key: default_source_language_key(),
            response_path: default_response_path(),
            extra_body: default_extra_body(),
            connect_timeout_ms: default_timeout_ms(),
            read_timeout_ms: default_timeout_ms(),
            batch_size: default_batch_size(),
        }
    }
}

/// Language settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LanguageConfig {
    /// Language of the source file; its artifact goes to `values/` without suffix
    #[serde(default = "default_app_language")]
    pub default_app_language: String,

    /// Source language sent to the service instead of `default_app_language`
    #[serde(default)]
    pub fixed_source_language: Option<String>,

    /// Languages to generate
    #[serde(default)]
    pub target_languages: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_app_language: default_app_language(),
            fixed_source_language: None,
            target_languages: vec!["fr".to_string(), "de".to_string()],
        }
    }
}

/// Input and output locations
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    /// Source `strings.xml`
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,

    /// Directory receiving the `values[-<code>]/strings.xml` artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_file: default_source_file(),
            output_dir: default_output_dir(),
        }
    }
}

/// Output artifact formatting
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Write an "Auto-generated" comment at the top of each artifact
    #[serde(default = "default_true")]
    pub header_comment: bool,

    /// Include the generation time in the header comment
    #[serde(default)]
    pub header_timestamp: bool,

    /// Indentation width in spaces
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header_comment: true,
            header_timestamp: false,
            indent: default_indent(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/translate".to_string()
}

fn default_texts_key() -> String {
    "q".to_string()
}

fn default_target_language_key() -> String {
    "target".to_string()
}

fn default_source_language_key() -> Option<String> {
    Some("source".to_string())
}

fn default_response_path() -> String {
    "translatedText".to_string()
}

fn default_extra_body() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_batch_size() -> usize {
    50
}

fn default_app_language() -> String {
    "en".to_string()
}

fn default_source_file() -> PathBuf {
    PathBuf::from("src/main/res/values/strings.xml")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/generated/res/stringsmith")
}

fn default_indent() -> usize {
    4
}

fn default_true() -> bool {
    true
}

/// One target language of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    /// Code as configured
    pub code: String,
    /// False when the target is the source language itself
    pub call_api: bool,
    /// True when the target is the default output language (no directory suffix)
    pub is_default: bool,
}

/// Languages of a run, resolved once before any request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePlan {
    /// Source language reported to the service
    pub source_language: String,
    /// Whether `source_language` came from `fixed_source_language`
    pub source_is_fixed: bool,
    /// Default output language
    pub default_language: String,
    pub targets: Vec<TargetLanguage>,
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Default output language, falling back to `en` when blank
    pub fn default_language(&self) -> String {
        let language = self.languages.default_app_language.trim();
        if language.is_empty() {
            default_app_language()
        } else {
            language.to_string()
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plan().map(|_| ())
    }

    /// Validate and resolve the language plan in one step
    pub fn plan(&self) -> Result<LanguagePlan, ConfigError> {
        if self.api.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("api.base_url"));
        }
        if self.api.texts_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("api.texts_key"));
        }
        if self.api.target_language_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("api.target_language_key"));
        }
        if self.api.response_path.trim().is_empty() {
            return Err(ConfigError::MissingValue("api.response_path"));
        }
        if !self.api.extra_body.is_object() {
            return Err(ConfigError::InvalidExtraBody(self.api.extra_body.to_string()));
        }

        self.resolve_languages()
    }

    /// Resolve the source language and classify every target
    ///
    /// A target equal to the source language is generated by copying the source
    /// tree. It must also be the default output language; otherwise the run is
    /// ambiguous and rejected.
    pub fn resolve_languages(&self) -> Result<LanguagePlan, ConfigError> {
        let default_language = self.default_language();

        let fixed = self
            .languages
            .fixed_source_language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let (source_language, source_is_fixed) = match fixed {
            Some(code) => (code.to_string(), true),
            None => (default_language.clone(), false),
        };

        let mut targets: Vec<TargetLanguage> = Vec::new();
        for code in &self.languages.target_languages {
            let code = code.trim();
            if code.is_empty() {
                warn!("Ignoring blank entry in target_languages");
                continue;
            }
            if targets.iter().any(|t| language_codes_match(&t.code, code)) {
                warn!("Target language '{}' is listed more than once, generating it once", code);
                continue;
            }

            let is_source = language_codes_match(code, &source_language);
            let is_default = language_codes_match(code, &default_language);
            if is_source && !is_default {
                return Err(ConfigError::AmbiguousSourceTarget {
                    target: code.to_string(),
                    source_language: source_language.clone(),
                    default_language: default_language.clone(),
                });
            }

            targets.push(TargetLanguage {
                code: code.to_string(),
                call_api: !is_source,
                is_default,
            });
        }

        if targets.is_empty() {
            return Err(ConfigError::NoTargetLanguages);
        }

        Ok(LanguagePlan {
            source_language,
            source_is_fixed,
            default_language,
            targets,
        })
    }

    /// Log what the run is going to do with the source language
    pub fn log_language_plan(&self, plan: &LanguagePlan) {
        if plan.source_is_fixed {
            info!(
                "Using fixed_source_language ('{}') as the source language for API calls.",
                plan.source_language
            );
        } else {
            info!(
                "No fixed_source_language set. Using default_app_language ('{}') as the source language for API calls.",
                plan.source_language
            );
        }
        if self.languages.default_app_language.trim().is_empty() {
            warn!("default_app_language is blank, defaulting to 'en' for folder naming.");
        }
        if self.api.source_language_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            warn!(
                "A source language ('{}') was determined, but source_language_key is not set; it will not be sent to the API.",
                plan.source_language
            );
        }
    }
}
