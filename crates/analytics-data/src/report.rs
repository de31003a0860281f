//! CSV report output.
//!
//! Both reports create or truncate their destination and always start with a
//! header row, even when no data rows follow. Records end with `\r\n`.
//! Numbers are written in their canonical decimal form; fields are quoted
//! only when they need to be.

use std::io::Write;
use std::path::Path;

use analytics_core::error::{AnalyticsError, Result};
use analytics_core::models::{CALL_LOG_HEADER, USER_ANALYTICS_HEADER};
use tracing::info;

use crate::analytics::AnalyticsMap;
use crate::store::IngestionStore;

// ── Public API ────────────────────────────────────────────────────────────────

/// Write `userId,avgDuration,numCalls` rows in the map's iteration order
/// (ascending user id). Returns the number of data rows written.
pub fn write_user_analytics(analytics: &AnalyticsMap, path: &Path) -> Result<usize> {
    let rows = create_report(path)
        .and_then(|file| write_user_analytics_to(analytics, file))
        .map_err(|source| write_error(path, source))?;
    info!("Wrote {} analytics rows to {}", rows, path.display());
    Ok(rows)
}

/// Write every stored call log ordered by `(userId, startTimeEpoch)`.
/// Returns the number of data rows written.
pub fn write_ordered_call_logs(store: &IngestionStore, path: &Path) -> Result<usize> {
    let rows = create_report(path)
        .and_then(|file| write_ordered_call_logs_to(store, file))
        .map_err(|source| write_error(path, source))?;
    info!("Wrote {} ordered call logs to {}", rows, path.display());
    Ok(rows)
}

/// Analytics report body for any writer.
pub fn write_user_analytics_to<W: Write>(
    analytics: &AnalyticsMap,
    writer: W,
) -> std::result::Result<usize, csv::Error> {
    let mut wtr = report_writer(writer);
    wtr.write_record(USER_ANALYTICS_HEADER)?;
    for stats in analytics.values() {
        wtr.serialize(stats)?;
    }
    wtr.flush()?;
    Ok(analytics.len())
}

/// Ordered call-log report body for any writer.
pub fn write_ordered_call_logs_to<W: Write>(
    store: &IngestionStore,
    writer: W,
) -> std::result::Result<usize, csv::Error> {
    let mut wtr = report_writer(writer);
    wtr.write_record(CALL_LOG_HEADER)?;
    let ordered = store.call_logs_ordered();
    for call in &ordered {
        wtr.serialize(call)?;
    }
    wtr.flush()?;
    Ok(ordered.len())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn report_writer<W: Write>(writer: W) -> csv::Writer<W> {
    // Headers are written by hand so empty reports still get one.
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer)
}

fn create_report(path: &Path) -> std::result::Result<std::fs::File, csv::Error> {
    Ok(std::fs::File::create(path)?)
}

fn write_error(path: &Path, source: csv::Error) -> AnalyticsError {
    AnalyticsError::ReportWrite {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
