//! Request/response exchange with the remote chat service.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Delivers one user message and returns the service's reply text.
pub trait Transport {
    /// Sends message and waits for the reply.
    ///
    /// # Errors
    ///
    /// Returns error if the service can not be reached or answers with
    /// something other than a reply.
    fn send(&self, message: &str) -> Result<String>;
}

/// Blocking HTTP transport posting JSON to a single endpoint.
///
/// One request per message, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    /// Creates transport for endpoint URL with request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client can not be constructed.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, message: &str) -> Result<String> {
        debug!(url = %self.url, len = message.len(), "posting chat message");

        let body = ChatRequest {
            message: message.to_string(),
        };

        let reply: ChatReply = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .with_context(|| format!("Failed to reach chat endpoint: {}", self.url))?
            .error_for_status()
            .context("Chat endpoint returned error status")?
            .json()
            .context("Failed to decode chat reply")?;

        debug!(len = reply.reply.len(), "received chat reply");
        Ok(reply.reply)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, message: &str) -> Result<String> {
        (**self).send(message)
    }
}
