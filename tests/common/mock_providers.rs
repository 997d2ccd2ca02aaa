/*!
 * Mock transport implementations for testing
 *
 * `FnTransport` answers every request through a closure, which lets tests
 * decide per language or per payload what the service returns. No request
 * ever leaves the process.
 */

use async_trait::async_trait;
use serde_json::json;
use std::fmt::{self, Debug};
use std::sync::Mutex;

use stringsmith::errors::ProviderError;
use stringsmith::providers::{TransportResponse, TranslationTransport};
use stringsmith::translation::TranslationRequest;

type Handler = dyn Fn(&TranslationRequest) -> Result<TransportResponse, ProviderError> + Send + Sync;

/// Closure-driven transport that records every request
pub struct FnTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<TranslationRequest>>,
}

impl FnTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TranslationRequest) -> Result<TransportResponse, ProviderError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Debug for FnTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport")
            .field("requests", &self.requests.lock().unwrap().len())
            .finish()
    }
}

#[async_trait]
impl TranslationTransport for FnTransport {
    async fn send(&self, request: &TranslationRequest) -> Result<TransportResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

/// Upper-cases every text, under the default `translatedText` key
pub fn uppercase_response(request: &TranslationRequest) -> TransportResponse {
    let texts: Vec<String> = request.texts("q").iter().map(|t| t.to_uppercase()).collect();
    TransportResponse::new(200, json!({ "translatedText": texts }).to_string())
}

/// Target language of a request, read from the default `target` key
pub fn target_of(request: &TranslationRequest) -> String {
    request.payload["target"].as_str().unwrap_or_default().to_string()
}
