//! Mock backend for testing without a live LLM.
//!
//! [`MockBackend`] returns pre-configured replies in order, allowing
//! deterministic tests of the generator and the HTTP layer.
//!
//! # Example
//!
//! ```
//! use viral_story::backend::MockBackend;
//!
//! let mock = MockBackend::fixed(r#"{"title": "X", "scenes": []}"#);
//! assert_eq!(mock.calls(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::{Result, StoryError};
use crate::reasoning::Reasoning;

/// One canned reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A successful completion.
    Text { text: String, reasoning: Reasoning },
    /// A provider failure with the given status and body.
    Fail { status: u16, body: String },
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text {
            text: text.into(),
            reasoning: Reasoning::Absent,
        }
    }

    pub fn with_reasoning(text: impl Into<String>, reasoning: Reasoning) -> Self {
        MockReply::Text {
            text: text.into(),
            reasoning,
        }
    }

    pub fn fail(status: u16, body: impl Into<String>) -> Self {
        MockReply::Fail {
            status,
            body: body.into(),
        }
    }
}

/// A test backend that returns canned replies in order.
///
/// Cycles back to the beginning when all replies have been consumed.
#[derive(Debug)]
pub struct MockBackend {
    replies: Vec<MockReply>,
    index: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend with the given canned replies.
    ///
    /// Replies are returned in order. When exhausted, cycles from the beginning.
    /// An empty list behaves like a provider that always fails.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same text.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(vec![MockReply::text(text)])
    }

    /// Create a mock that always fails with the given status.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(vec![MockReply::fail(status, body)])
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    fn next_reply(&self) -> Option<MockReply> {
        let idx = self.index.fetch_add(1, Ordering::Relaxed);
        if self.replies.is_empty() {
            return None;
        }
        Some(self.replies[idx % self.replies.len()].clone())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &LlmRequest,
    ) -> Result<LlmResponse> {
        match self.next_reply() {
            Some(MockReply::Text { text, reasoning }) => Ok(LlmResponse {
                text,
                reasoning,
                metadata: None,
            }),
            Some(MockReply::Fail { status, body }) => Err(StoryError::HttpError { status, body }),
            None => Err(StoryError::Other("mock backend has no replies".into())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
