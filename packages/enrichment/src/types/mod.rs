//! Data types for the enrichment pipeline.

pub mod config;
pub mod record;
pub mod report;
