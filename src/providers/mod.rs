/*!
 * Transports for the remote translation service.
 *
 * Everything service specific lives in the request (built from configuration)
 * and in the response path; a transport only moves bytes:
 * - `http`: reqwest client with connect and read timeouts
 * - `mock`: scripted in-memory transport for tests
 * - `extract`: pulls the translated texts out of a response body
 */

use async_trait::async_trait;
use log::debug;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::translation::request::TranslationRequest;

pub use self::extract::extract_translations;
pub use self::http::HttpTransport;
pub use self::mock::{MockReply, MockTransport};

/// Status and body of a service response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Common trait for everything that can carry a translation request
///
/// Implementations must not retry or reorder requests; the caller sends
/// batches one at a time and treats every error as a failed batch.
#[async_trait]
pub trait TranslationTransport: Send + Sync + Debug {
    /// Send one request and return the raw response
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: &TranslationRequest) -> Result<TransportResponse, ProviderError>;
}

#[async_trait]
impl<T: TranslationTransport + ?Sized> TranslationTransport for &T {
    async fn send(&self, request: &TranslationRequest) -> Result<TransportResponse, ProviderError> {
        (**self).send(request).await
    }
}

/// Send a request and extract exactly `request.text_count` translated texts
pub async fn translate<T: TranslationTransport + ?Sized>(
    transport: &T,
    request: &TranslationRequest,
    response_path: &str,
) -> Result<Vec<String>, ProviderError> {
    debug!(
        "{} {} with {} texts",
        request.method, request.url, request.text_count
    );
    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(ProviderError::ApiError {
            status_code: response.status,
            message: response.body,
        });
    }
    extract_translations(&response.body, response_path, request.text_count)
}

pub mod extract;
pub mod http;
pub mod mock;
