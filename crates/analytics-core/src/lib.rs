//! Core types for the call-log analytics pipeline.
//!
//! Holds the domain models, the row validator applied during ingestion,
//! the shared error type and the command-line settings.

pub mod error;
pub mod models;
pub mod settings;
pub mod validation;
