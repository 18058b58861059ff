//! Mock implementations for testing.
//!
//! [`MockChatModel`] plays back a scripted sequence of responses and
//! errors, one per call, so retry behavior and degradation paths can be
//! exercised without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ApiError, ApiErrorKind, EnrichError, Result};
use crate::traits::chat::ChatModel;

enum Scripted {
    Response(String),
    Error(ApiErrorKind),
}

/// Chat model that replays a scripted sequence of outcomes.
///
/// Each call consumes the next script entry; a call past the end of the
/// script returns a data-processing error, which surfaces as a loud test
/// failure rather than a silent success.
#[derive(Default)]
pub struct MockChatModel {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Response(text.into()));
        self
    }

    /// Queue a classified API failure.
    pub fn with_error(self, kind: ApiErrorKind) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Error(kind));
        self
    }

    /// How many completion calls were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Response(text)) => Ok(text),
            Some(Scripted::Error(kind)) => {
                Err(ApiError::new(kind, format!("scripted failure: {kind}")).into())
            }
            None => Err(EnrichError::DataProcessing(
                "mock chat model script exhausted".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_plays_back_in_order() {
        let model = MockChatModel::new()
            .with_error(ApiErrorKind::Timeout)
            .with_response("hello");

        assert!(model.complete("s", "u").await.is_err());
        assert_eq!(model.complete("s", "u").await.unwrap(), "hello");
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn exhausted_script_errors() {
        let model = MockChatModel::new();
        assert!(model.complete("s", "u").await.is_err());
    }
}
