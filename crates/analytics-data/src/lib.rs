//! Data layer for the call-log analytics pipeline.
//!
//! Responsible for reading the user and call-log CSV sources into the
//! in-memory [`store::IngestionStore`], aggregating per-user call statistics
//! and writing the two CSV reports.

pub mod analytics;
pub mod reader;
pub mod report;
pub mod store;

pub use analytics_core as core;
