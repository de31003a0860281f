//! CSV source loading for users and call logs.
//!
//! Sources have no header row and are consumed positionally from line 1.
//! Each record is validated; rejected records are dropped and logged at
//! debug level, accepted ones go straight into the [`IngestionStore`].
//! Only an unreadable source (missing file, I/O failure, invalid UTF-8)
//! aborts the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use analytics_core::error::{AnalyticsError, Result, RowRejection};
use analytics_core::validation::{parse_call_row, parse_user_row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::store::IngestionStore;

// ── IngestStats ───────────────────────────────────────────────────────────────

/// Row counters for one source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub rows_read: u64,
    pub rows_accepted: u64,
    pub rows_dropped: u64,
}

impl IngestStats {
    fn record(&mut self, outcome: &std::result::Result<(), RowRejection>) {
        self.rows_read += 1;
        match outcome {
            Ok(()) => self.rows_accepted += 1,
            Err(_) => self.rows_dropped += 1,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `users.csv`-shaped data from `path` into `store`.
pub fn load_users(path: &Path, store: &mut IngestionStore) -> Result<IngestStats> {
    let file = open_source(path)?;
    let stats = ingest_users_from(file, store).map_err(|source| read_error(path, source))?;
    log_stats(path, "users", &stats);
    Ok(stats)
}

/// Load `callLogs.csv`-shaped data from `path` into `store`.
pub fn load_call_logs(path: &Path, store: &mut IngestionStore) -> Result<IngestStats> {
    let file = open_source(path)?;
    let stats =
        ingest_call_logs_from(file, store).map_err(|source| read_error(path, source))?;
    log_stats(path, "call logs", &stats);
    Ok(stats)
}

/// Ingest users from any reader. Used by [`load_users`] and by tests.
pub fn ingest_users_from<R: Read>(
    reader: R,
    store: &mut IngestionStore,
) -> std::result::Result<IngestStats, csv::Error> {
    ingest_records(source_reader(reader), "users", |fields| {
        store.insert_user(parse_user_row(fields)?);
        Ok(())
    })
}

/// Ingest call logs from any reader. Used by [`load_call_logs`] and by tests.
pub fn ingest_call_logs_from<R: Read>(
    reader: R,
    store: &mut IngestionStore,
) -> std::result::Result<IngestStats, csv::Error> {
    ingest_records(source_reader(reader), "call logs", |fields| {
        store.insert_call_log(parse_call_row(fields)?);
        Ok(())
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn source_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| read_error(path, csv::Error::from(e)))
}

fn read_error(path: &Path, source: csv::Error) -> AnalyticsError {
    AnalyticsError::SourceRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Feed every record to `accept`, counting outcomes. A rejected record is
/// dropped; a read error ends the load.
fn ingest_records<R, F>(
    mut reader: csv::Reader<R>,
    kind: &str,
    mut accept: F,
) -> std::result::Result<IngestStats, csv::Error>
where
    R: Read,
    F: FnMut(&[&str]) -> std::result::Result<(), RowRejection>,
{
    let mut stats = IngestStats::default();

    for record in reader.records() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        let outcome = accept(&fields);
        if let Err(reason) = &outcome {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            debug!("Dropped {} row at line {}: {}", kind, line, reason);
        }
        stats.record(&outcome);
    }

    Ok(stats)
}

fn log_stats(path: &Path, kind: &str, stats: &IngestStats) {
    info!(
        "Loaded {} from {}: {} read, {} accepted, {} dropped",
        kind,
        path.display(),
        stats.rows_read,
        stats.rows_accepted,
        stats.rows_dropped,
    );
    if stats.rows_read > 0 && stats.rows_accepted == 0 {
        warn!("Every {} row in {} was dropped", kind, path.display());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
