//! Search client implementations.

pub mod brave;
pub mod queries;

pub use brave::BraveSearcher;
