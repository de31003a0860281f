//! Single-pass pipeline driver.
//!
//! Runs the stages strictly in order: load users, load call logs, compute
//! analytics, write the analytics report, write the ordered call-log report.
//! The first failure aborts the run. No retries, and a report written by an
//! earlier stage is left in place when a later stage fails.

use std::path::Path;
use std::time::Instant;

use analytics_core::error::Result;
use analytics_core::settings::PipelineConfig;
use analytics_data::analytics::AnalyticsEngine;
use analytics_data::reader::{load_call_logs, load_users, IngestStats};
use analytics_data::report::{write_ordered_call_logs, write_user_analytics};
use analytics_data::store::IngestionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ── Public types ──────────────────────────────────────────────────────────────

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// RFC 3339 timestamp taken when the run finished.
    pub generated_at: String,
    pub users: IngestStats,
    pub call_logs: IngestStats,
    /// Call logs whose user id matches no stored user.
    pub orphan_call_logs: u64,
    /// Calls covered by the analytics, orphans included.
    pub calls_analyzed: u64,
    /// Rows written to the analytics report.
    pub analytics_rows: usize,
    /// Rows written to the ordered call-log report.
    pub ordered_call_rows: usize,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    /// Pretty JSON rendering of the summary.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON rendering to `path`, replacing any existing file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline against the files named in `config`.
///
/// 1. Create an empty [`IngestionStore`].
/// 2. Load users.
/// 3. Load call logs.
/// 4. Compute analytics over every stored call log.
/// 5. Write the analytics report.
/// 6. Write the ordered call-log report.
/// 7. Drop the store.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary> {
    let started = Instant::now();

    // ── Step 1: Store ─────────────────────────────────────────────────────────
    let mut store = IngestionStore::new();

    // ── Steps 2-3: Ingest ─────────────────────────────────────────────────────
    let users = load_users(&config.users_path, &mut store)?;
    let call_logs = load_call_logs(&config.call_logs_path, &mut store)?;

    let orphan_call_logs = store.orphan_call_logs().count() as u64;
    if orphan_call_logs > 0 {
        info!(
            "{} call logs reference user ids with no stored user",
            orphan_call_logs
        );
    }

    // ── Step 4: Analytics ─────────────────────────────────────────────────────
    let analytics = AnalyticsEngine::compute_analytics(&store);
    let calls_analyzed = AnalyticsEngine::total_calls(&analytics);
    debug!(
        "Computed analytics for {} user ids over {} calls",
        analytics.len(),
        calls_analyzed
    );

    // ── Steps 5-6: Reports ────────────────────────────────────────────────────
    let analytics_rows = write_user_analytics(&analytics, &config.analytics_path)?;
    let ordered_call_rows = write_ordered_call_logs(&store, &config.ordered_calls_path)?;

    // ── Step 7: Release ───────────────────────────────────────────────────────
    debug!(
        "Releasing store with {} users and {} call logs",
        store.user_count(),
        store.call_log_count()
    );
    drop(store);

    Ok(RunSummary {
        generated_at: Utc::now().to_rfc3339(),
        users,
        call_logs,
        orphan_call_logs,
        calls_analyzed,
        analytics_rows,
        ordered_call_rows,
        elapsed_seconds: started.elapsed().as_secs_f64(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
