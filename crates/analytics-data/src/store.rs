//! Append-only in-memory store for one pipeline run.
//!
//! Users and call logs receive surrogate ids starting at 1 on insert. Ids are
//! never reused and rows are never updated or removed. Call logs keep the
//! `user_id` they were given, whether or not such a user exists.

use analytics_core::models::{CallLog, NewCallLog, NewUser, User};

/// Owns every [`User`] and [`CallLog`] ingested during a run.
#[derive(Debug, Default)]
pub struct IngestionStore {
    users: Vec<User>,
    call_logs: Vec<CallLog>,
}

impl IngestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user and return its newly assigned id.
    ///
    /// Duplicate name pairs are allowed and get distinct ids.
    pub fn insert_user(&mut self, user: NewUser) -> i64 {
        let user_id = next_id(self.users.len());
        self.users.push(User {
            user_id,
            first_name: user.first_name,
            last_name: user.last_name,
        });
        user_id
    }

    /// Store a call log and return its newly assigned id. The draft's
    /// `source_call_id` is discarded.
    pub fn insert_call_log(&mut self, call: NewCallLog) -> i64 {
        let call_id = next_id(self.call_logs.len());
        self.call_logs.push(CallLog {
            call_id,
            phone_number: call.phone_number,
            start_time_epoch: call.start_time_epoch,
            end_time_epoch: call.end_time_epoch,
            call_direction: call.call_direction,
            user_id: call.user_id,
        });
        call_id
    }

    /// All users in insertion order.
    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    /// All call logs in insertion order.
    pub fn all_call_logs(&self) -> &[CallLog] {
        &self.call_logs
    }

    /// Call logs sorted by `(user_id, start_time_epoch)`. Equal keys keep
    /// insertion order.
    pub fn call_logs_ordered(&self) -> Vec<&CallLog> {
        let mut ordered: Vec<&CallLog> = self.call_logs.iter().collect();
        ordered.sort_by_key(|c| (c.user_id, c.start_time_epoch));
        ordered
    }

    /// Whether a stored user has this id.
    pub fn has_user(&self, user_id: i64) -> bool {
        // Ids are dense and start at 1.
        user_id >= 1 && (user_id as u64) <= self.users.len() as u64
    }

    /// Call logs whose `user_id` matches no stored user.
    pub fn orphan_call_logs(&self) -> impl Iterator<Item = &CallLog> {
        self.call_logs.iter().filter(|c| !self.has_user(c.user_id))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn call_log_count(&self) -> usize {
        self.call_logs.len()
    }
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str) -> NewUser {
        NewUser {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn call(source_id: &str, start: i64, end: i64, user_id: i64) -> NewCallLog {
        NewCallLog {
            source_call_id: source_id.to_string(),
            phone_number: "555".to_string(),
            start_time_epoch: start,
            end_time_epoch: end,
            call_direction: "in".to_string(),
            user_id,
        }
    }

    // ── insert_user ───────────────────────────────────────────────────────────

    #[test]
    fn test_insert_user_assigns_ids_in_input_order() {
        let mut store = IngestionStore::new();
        assert_eq!(store.insert_user(user("Ann", "Lee")), 1);
        assert_eq!(store.insert_user(user("Bo", "Ng")), 2);

        let users = store.all_users();
        assert_eq!(users[0].first_name, "Ann");
        assert_eq!(users[1].last_name, "Ng");
    }

    #[test]
    fn test_insert_user_duplicates_get_distinct_ids() {
        let mut store = IngestionStore::new();
        let a = store.insert_user(user("Ann", "Lee"));
        let b = store.insert_user(user("Ann", "Lee"));
        assert_ne!(a, b);
        assert_eq!(store.user_count(), 2);
    }

    // ── insert_call_log ───────────────────────────────────────────────────────

    #[test]
    fn test_insert_call_log_replaces_source_id() {
        let mut store = IngestionStore::new();
        let id = store.insert_call_log(call("900", 100, 140, 1));
        assert_eq!(id, 1);
        assert_eq!(store.all_call_logs()[0].call_id, 1);
    }

    #[test]
    fn test_insert_call_log_keeps_unknown_user_id() {
        let mut store = IngestionStore::new();
        store.insert_call_log(call("1", 0, 10, 99));
        assert_eq!(store.all_call_logs()[0].user_id, 99);
        assert_eq!(store.orphan_call_logs().count(), 1);
    }

    // ── call_logs_ordered ─────────────────────────────────────────────────────

    #[test]
    fn test_call_logs_ordered_by_user_then_start() {
        let mut store = IngestionStore::new();
        store.insert_call_log(call("a", 300, 310, 2));
        store.insert_call_log(call("b", 200, 260, 1));
        store.insert_call_log(call("c", 100, 140, 1));
        store.insert_call_log(call("d", 50, 60, 3));

        let keys: Vec<(i64, i64)> = store
            .call_logs_ordered()
            .iter()
            .map(|c| (c.user_id, c.start_time_epoch))
            .collect();
        assert_eq!(keys, vec![(1, 100), (1, 200), (2, 300), (3, 50)]);
    }

    #[test]
    fn test_call_logs_ordered_is_stable_for_equal_keys() {
        let mut store = IngestionStore::new();
        store.insert_call_log(call("x", 100, 110, 1));
        store.insert_call_log(call("y", 100, 120, 1));
        store.insert_call_log(call("z", 100, 130, 1));

        let ids: Vec<i64> = store.call_logs_ordered().iter().map(|c| c.call_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_call_logs_ordered_empty_store() {
        assert!(IngestionStore::new().call_logs_ordered().is_empty());
    }

    // ── has_user ──────────────────────────────────────────────────────────────

    #[test]
    fn test_has_user() {
        let mut store = IngestionStore::new();
        store.insert_user(user("Ann", "Lee"));
        assert!(store.has_user(1));
        assert!(!store.has_user(0));
        assert!(!store.has_user(2));
        assert!(!store.has_user(-1));
    }
}
