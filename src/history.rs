//! Append-only query history. The core only sees the sink trait; retention
//! and display belong to the caller.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub role: String,
    pub query: String,
    pub outcome: String,
    pub submitted_at: DateTime<Utc>,
}

pub trait QueryHistory: Send + Sync {
    fn record(&self, role: &str, query: &str, outcome: &str);
}

#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries oldest-first, in submission order.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl QueryHistory for InMemoryHistory {
    fn record(&self, role: &str, query: &str, outcome: &str) {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            role: role.to_string(),
            query: query.to_string(),
            outcome: outcome.to_string(),
            submitted_at: Utc::now(),
        };

        // A poisoned lock means a recording thread panicked; drop the entry
        // rather than fail the query.
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}
