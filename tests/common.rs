//! Shared test utilities for integration tests.
//!
//! Provides a mock chat endpoint backed by wiremock and helpers for writing
//! transcript fixtures.

use anyhow::Result;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route the widget posts chat messages to.
pub const CHAT_PATH: &str = "/api/chat";

/// Mock chat endpoint usable from blocking test code.
///
/// Owns the runtime the mock server was started on, so blocking clients can
/// call it from the test thread.
pub struct ChatEndpoint {
    server: MockServer,
    runtime: Runtime,
}

#[allow(dead_code)]
impl ChatEndpoint {
    /// Starts mock server with no mounted responses.
    ///
    /// # Errors
    ///
    /// Returns error if the runtime can not be created
    pub fn start() -> Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self { server, runtime })
    }

    /// Full URL of the chat route.
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), CHAT_PATH)
    }

    /// Expects exactly one POST carrying `{"message": message}` and answers
    /// it with given response.
    pub fn expect_message(&self, message: &str, response: ResponseTemplate) {
        let mock = Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(body_json(json!({ "message": message })))
            .respond_with(response)
            .expect(1);
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Expects one POST with message whose reply is delayed past `delay`.
    pub fn expect_stalled(&self, message: &str, delay: Duration) {
        self.expect_message(
            message,
            ResponseTemplate::new(200)
                .set_body_json(json!({ "reply": "too late" }))
                .set_delay(delay),
        );
    }

    /// Panics unless every mounted expectation was met.
    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}

/// JSON reply body with given text.
#[allow(dead_code)]
pub fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "reply": text }))
}

/// Writes JSON transcript fixture and returns its path.
///
/// # Errors
///
/// Returns error if the file can not be written
pub fn write_transcript(dir: &Path, json: &str) -> Result<PathBuf> {
    let path = dir.join("transcript.json");
    std::fs::write(&path, json)?;
    Ok(path)
}
