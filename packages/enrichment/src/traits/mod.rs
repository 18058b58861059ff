//! Core trait abstractions.

pub mod chat;
pub mod searcher;

pub use chat::ChatModel;
pub use searcher::{MockSearcher, SearchHit, SearchOutcome, WebSearcher};
