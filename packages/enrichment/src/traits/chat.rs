//! Chat model trait for structured extraction.
//!
//! Implementations wrap a hosted chat-completions provider and return the
//! raw response text. Extraction semantics (prompting, retry, parsing)
//! live in the pipeline; the trait stays a thin transport seam.

use async_trait::async_trait;

use crate::error::Result;

/// A hosted chat model reachable over HTTP.
///
/// # Implementations
///
/// - [`crate::ai::OpenRouterChat`]: OpenRouter chat-completions endpoint
/// - [`crate::testing::MockChatModel`]: scripted responses for tests
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one system/user prompt pair, returning the raw response text.
    ///
    /// One call is one attempt; retry policy belongs to the caller.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
