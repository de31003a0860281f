//! Per-user call statistics over the stored call logs.
//!
//! Grouping uses the raw `user_id` on each call log, so orphan ids produce
//! entries too. Users without calls are absent from the result.

use std::collections::BTreeMap;

use analytics_core::models::{CallLog, UserAnalytics};

use crate::store::IngestionStore;

/// Analytics keyed by user id, iterated in ascending id order.
pub type AnalyticsMap = BTreeMap<i64, UserAnalytics>;

// ── DurationStats ─────────────────────────────────────────────────────────────

/// Running call count and total duration for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationStats {
    pub total_duration: i128,
    pub count: u64,
}

impl DurationStats {
    /// Add a single call's duration to the running totals.
    pub fn add_call(&mut self, call: &CallLog) {
        self.total_duration += call.duration();
        self.count += 1;
    }

    /// Arithmetic mean of the durations seen so far, `None` before any call.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.total_duration as f64 / self.count as f64)
    }
}

// ── AnalyticsEngine ───────────────────────────────────────────────────────────

/// Stateless helper that groups call logs by user.
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Compute average duration and call count for every user id that
    /// appears on at least one stored call log.
    pub fn compute_analytics(store: &IngestionStore) -> AnalyticsMap {
        Self::aggregate(store.all_call_logs())
    }

    /// Same as [`AnalyticsEngine::compute_analytics`] over an arbitrary slice.
    pub fn aggregate(calls: &[CallLog]) -> AnalyticsMap {
        let mut groups: BTreeMap<i64, DurationStats> = BTreeMap::new();
        for call in calls {
            groups.entry(call.user_id).or_default().add_call(call);
        }

        groups
            .into_iter()
            .filter_map(|(user_id, stats)| {
                Some((
                    user_id,
                    UserAnalytics {
                        user_id,
                        avg_duration: stats.mean()?,
                        num_calls: stats.count,
                    },
                ))
            })
            .collect()
    }

    /// Total number of calls across all entries.
    pub fn total_calls(analytics: &AnalyticsMap) -> u64 {
        analytics.values().map(|a| a.num_calls).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
