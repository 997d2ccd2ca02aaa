/*!
 * HTTP transport backed by reqwest.
 */

use async_trait::async_trait;
use log::trace;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::time::Duration;

use crate::app_config::{ApiConfig, HttpMethod};
use crate::errors::ProviderError;
use crate::providers::{TransportResponse, TranslationTransport};
use crate::translation::request::TranslationRequest;

/// Sends translation requests over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given timeouts
    ///
    /// The read timeout bounds the whole exchange once the connection is up.
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, ProviderError> {
        Self::new(
            Duration::from_millis(api.connect_timeout_ms),
            Duration::from_millis(api.read_timeout_ms),
        )
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl TranslationTransport for HttpTransport {
    async fn send(&self, request: &TranslationRequest) -> Result<TransportResponse, ProviderError> {
        let mut builder = self
            .client
            .request(method_of(request.method), &request.url)
            .header(ACCEPT, "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            trace!("Request body: {}", body);
            builder = builder
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::ConnectionError(format!("Request to {} timed out: {}", request.url, e))
            } else if e.is_connect() {
                ProviderError::ConnectionError(format!("Failed to connect to {}: {}", request.url, e))
            } else {
                ProviderError::RequestFailed(format!("Failed to send request: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;
        trace!("Response {}: {}", status, body);

        Ok(TransportResponse { status, body })
    }
}
