//! Runtime layer for the call-log analytics pipeline.
//!
//! Sequences ingestion, aggregation and report output for a single run and
//! owns the in-memory store for its duration.

pub mod pipeline;

pub use analytics_core as core;
pub use analytics_data as data;
