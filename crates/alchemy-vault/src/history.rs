//! Practice history: one entry per saved drill result or somatic snapshot,
//! kept newest first and capped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub lab_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: String,
    /// Drill-specific body (feedback, snapshot, input text).
    #[serde(default)]
    pub payload: Value,
}

impl HistoryEntry {
    pub fn new(lab_id: &str, summary: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lab_id: lab_id.to_string(),
            created_at: Utc::now(),
            summary: summary.into(),
            payload,
        }
    }
}

/// Replace the entry with the same id in place, or put it at the front; then
/// drop the oldest entries past `limit`.
pub(crate) fn upsert(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, limit: usize) {
    match entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.insert(0, entry),
    }
    entries.truncate(limit);
}
