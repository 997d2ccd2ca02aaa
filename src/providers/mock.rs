/*!
 * Mock transport for testing.
 *
 * Replies are scripted per call, falling back to a default reply once the
 * script runs out:
 * - `MockTransport::echo()` - Always succeeds, tagging each text with the target language
 * - `MockTransport::failing()` - Always answers with an HTTP 500
 * - `MockTransport::scripted(...)` - Plays the given replies in call order
 *
 * Every request is recorded so tests can inspect payloads and call counts.
 */

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{TransportResponse, TranslationTransport};
use crate::translation::request::TranslationRequest;

/// What the mock answers to one call
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Each text comes back as `[<target>] <text>`
    Echo,
    /// These texts, whatever was sent
    Texts(Vec<String>),
    /// Echo, but with the last text dropped
    DropLast,
    /// A non-2xx status with this body
    Status(u16, String),
    /// A 200 with this raw body
    Body(String),
    /// A transport-level error
    Error(ProviderError),
}

/// Scripted in-memory transport
#[derive(Debug)]
pub struct MockTransport {
    texts_key: String,
    target_language_key: String,
    response_path: String,
    script: Mutex<VecDeque<MockReply>>,
    default_reply: MockReply,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl MockTransport {
    /// Create a mock answering every call with `default_reply`
    ///
    /// Payload and response keys default to the `ApiConfig` defaults.
    pub fn new(default_reply: MockReply) -> Self {
        Self {
            texts_key: "q".to_string(),
            target_language_key: "target".to_string(),
            response_path: "translatedText".to_string(),
            script: Mutex::new(VecDeque::new()),
            default_reply,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock that always succeeds
    pub fn echo() -> Self {
        Self::new(MockReply::Echo)
    }

    /// Create a failing mock that always answers HTTP 500
    pub fn failing() -> Self {
        Self::new(MockReply::Status(500, "Simulated service failure".to_string()))
    }

    /// Play `replies` in order, then echo
    pub fn scripted(replies: impl IntoIterator<Item = MockReply>) -> Self {
        let mock = Self::echo();
        mock.lock_script().extend(replies);
        mock
    }

    /// Use different payload and response keys
    pub fn with_keys(
        mut self,
        texts_key: impl Into<String>,
        target_language_key: impl Into<String>,
        response_path: impl Into<String>,
    ) -> Self {
        self.texts_key = texts_key.into();
        self.target_language_key = target_language_key.into();
        self.response_path = response_path.into();
        self
    }

    /// Queue one more scripted reply
    pub fn then(self, reply: MockReply) -> Self {
        self.lock_script().push_back(reply);
        self
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copies of every request received, in call order
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Texts sent in every call, in call order
    pub fn sent_texts(&self) -> Vec<Vec<String>> {
        self.requests()
            .iter()
            .map(|request| request.texts(&self.texts_key))
            .collect()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<MockReply>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Wrap texts in an object following the dot-separated response path
    fn response_body(&self, texts: Vec<String>) -> String {
        let mut value = json!(texts);
        for segment in self.response_path.rsplit('.') {
            let mut map = Map::new();
            map.insert(segment.to_string(), value);
            value = Value::Object(map);
        }
        value.to_string()
    }

    fn echo_texts(&self, request: &TranslationRequest) -> Vec<String> {
        let target = request
            .payload
            .get(&self.target_language_key)
            .and_then(Value::as_str)
            .unwrap_or("??");
        request
            .texts(&self.texts_key)
            .into_iter()
            .map(|text| format!("[{}] {}", target, text))
            .collect()
    }
}

#[async_trait]
impl TranslationTransport for MockTransport {
    async fn send(&self, request: &TranslationRequest) -> Result<TransportResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let reply = self
            .lock_script()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Echo => Ok(TransportResponse::new(200, self.response_body(self.echo_texts(request)))),
            MockReply::Texts(texts) => Ok(TransportResponse::new(200, self.response_body(texts))),
            MockReply::DropLast => {
                let mut texts = self.echo_texts(request);
                texts.pop();
                Ok(TransportResponse::new(200, self.response_body(texts)))
            }
            MockReply::Status(status, body) => Ok(TransportResponse::new(status, body)),
            MockReply::Body(body) => Ok(TransportResponse::new(200, body)),
            MockReply::Error(error) => Err(error),
        }
    }
}
