//! Chat model implementations.

pub mod openrouter;

pub use openrouter::OpenRouterChat;
