/*!
 * Request construction for the translation service.
 *
 * The configured `extra_body` is the base of every payload. It is parsed once
 * and never mutated: each batch starts from a fresh copy, gets the texts and
 * language keys added, and is then rendered as a JSON body or, for GET, as
 * query parameters.
 */

use log::warn;
use serde_json::{Map, Value};
use url::Url;

use crate::app_config::{ApiConfig, HttpMethod};
use crate::errors::{ConfigError, ProviderError};
use crate::translation::batch::Batch;

/// `extra_body` key holding request headers
pub const HEADERS_KEY: &str = "_headers";

/// A fully built service request
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub method: HttpMethod,
    /// Final URL, including the query string for GET
    pub url: String,
    /// Headers from `_headers`, in configuration order
    pub headers: Vec<(String, String)>,
    /// Payload as sent, without `_headers`
    pub payload: Map<String, Value>,
    /// JSON body; `None` for GET
    pub body: Option<String>,
    /// Number of texts in the payload
    pub text_count: usize,
}

impl TranslationRequest {
    /// Texts of the payload, as read back from the texts key
    pub fn texts(&self, texts_key: &str) -> Vec<String> {
        match self.payload.get(texts_key) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Builds one request per batch from the immutable base payload
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    base_url: String,
    texts_key: String,
    target_language_key: String,
    source_language_key: Option<String>,
    source_language: String,
    base: Map<String, Value>,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new(api: &ApiConfig, source_language: &str) -> Result<Self, ConfigError> {
        let mut base = match &api.extra_body {
            Value::Object(map) => map.clone(),
            other => return Err(ConfigError::InvalidExtraBody(other.to_string())),
        };

        let mut headers = Vec::new();
        match base.remove(HEADERS_KEY) {
            Some(Value::Object(entries)) => {
                for (name, value) in entries {
                    match value {
                        Value::String(value) => headers.push((name, value)),
                        other => warn!("Ignoring non-string header '{}': {}", name, other),
                    }
                }
            }
            Some(other) => warn!("Ignoring '{}', expected an object: {}", HEADERS_KEY, other),
            None => {}
        }

        let source_language_key = api
            .source_language_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        Ok(Self {
            method: api.http_method,
            base_url: api.base_url.trim().to_string(),
            texts_key: api.texts_key.clone(),
            target_language_key: api.target_language_key.clone(),
            source_language_key,
            source_language: source_language.to_string(),
            base,
            headers,
        })
    }

    /// Payload for one batch, built from a fresh copy of the base
    pub fn payload(&self, batch: &Batch<'_>, target_language: &str) -> Map<String, Value> {
        let mut payload = self.base.clone();
        let texts = batch
            .items
            .iter()
            .map(|item| Value::String(item.source_text.clone()))
            .collect();
        payload.insert(self.texts_key.clone(), Value::Array(texts));
        payload.insert(
            self.target_language_key.clone(),
            Value::String(target_language.to_string()),
        );
        if let Some(key) = &self.source_language_key {
            payload.insert(key.clone(), Value::String(self.source_language.clone()));
        }
        payload
    }

    pub fn build(
        &self,
        batch: &Batch<'_>,
        target_language: &str,
    ) -> Result<TranslationRequest, ProviderError> {
        let payload = self.payload(batch, target_language);

        let (url, body) = match self.method {
            HttpMethod::Get => (query_url(&self.base_url, &payload)?, None),
            _ => {
                let body = serde_json::to_string(&payload)
                    .map_err(|e| ProviderError::RequestFailed(format!("Failed to serialize payload: {}", e)))?;
                (self.base_url.clone(), Some(body))
            }
        };

        Ok(TranslationRequest {
            method: self.method,
            url,
            headers: self.headers.clone(),
            payload,
            body,
            text_count: batch.len(),
        })
    }
}

/// Append the payload to `base_url` as URL-encoded query parameters
///
/// Arrays repeat their key once per element. Strings are sent as they are,
/// every other value as compact JSON.
fn query_url(base_url: &str, payload: &Map<String, Value>) -> Result<String, ProviderError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid base_url '{}': {}", base_url, e)))?;

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in payload {
            match value {
                Value::Array(values) => {
                    for value in values {
                        query.append_pair(key, &query_value(value));
                    }
                }
                value => {
                    query.append_pair(key, &query_value(value));
                }
            }
        }
    }

    Ok(url.into())
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
