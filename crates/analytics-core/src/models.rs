use serde::{Deserialize, Serialize};

/// A stored user. `user_id` is the surrogate id assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// A validated user row awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
}

/// A stored call log.
///
/// Field order matches the ordered call-log report columns. `user_id` is a
/// plain reference: it is never checked against the stored users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    /// Surrogate id assigned by the store.
    pub call_id: i64,
    pub phone_number: String,
    pub start_time_epoch: i64,
    pub end_time_epoch: i64,
    pub call_direction: String,
    pub user_id: i64,
}

impl CallLog {
    /// Call length in seconds. Negative when the end precedes the start.
    /// Widened so extreme epochs cannot overflow.
    pub fn duration(&self) -> i128 {
        i128::from(self.end_time_epoch) - i128::from(self.start_time_epoch)
    }
}

/// A validated call-log row awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCallLog {
    /// The caller-supplied id column. Kept for diagnostics only; the store
    /// assigns its own id.
    pub source_call_id: String,
    pub phone_number: String,
    pub start_time_epoch: i64,
    pub end_time_epoch: i64,
    pub call_direction: String,
    pub user_id: i64,
}

/// Per-user call statistics derived from the stored call logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub user_id: i64,
    /// Mean of `end - start` over the user's calls.
    pub avg_duration: f64,
    pub num_calls: u64,
}

/// Column names of the analytics report, in output order.
pub const USER_ANALYTICS_HEADER: [&str; 3] = ["userId", "avgDuration", "numCalls"];

/// Column names of the ordered call-log report, in output order.
pub const CALL_LOG_HEADER: [&str; 6] = [
    "callId",
    "phoneNumber",
    "startTimeEpoch",
    "endTimeEpoch",
    "callDirection",
    "userId",
];
