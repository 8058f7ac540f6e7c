//! Saved sentences with a frozen copy of the draft that produced them, plus the
//! JSON export/import format.
//!
//! Export shape: `{"schemaVersion": 1, "appName": ..., "favorites": [...]}`. Import also takes a
//! bare array. Entries that fail to parse are skipped, not fatal; only input
//! that is not JSON, or has no favorites list at all, is rejected.

use crate::error::VaultError;
use alchemy_core::Draft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

pub const FAVORITES_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub lab_id: String,
    pub sentence: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub snapshot: Draft,
}

impl Favorite {
    pub fn new(sentence: String, tags: Vec<String>, snapshot: Draft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lab_id: snapshot.lab_id.clone(),
            sentence,
            created_at: Utc::now(),
            tags,
            snapshot,
        }
    }

    /// Identity used to recognize the same favorite across devices; ids are not.
    fn same_as(&self, other: &Favorite) -> bool {
        self.lab_id == other.lab_id
            && self.sentence == other.sentence
            && self.created_at == other.created_at
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub added: usize,
    /// Duplicates and unparseable entries.
    pub skipped: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    schema_version: u32,
    app_name: &'a str,
    exported_at: DateTime<Utc>,
    favorites: &'a [Favorite],
}

pub(crate) fn export(app_name: &str, favorites: &[Favorite]) -> Result<String, VaultError> {
    let envelope = ExportEnvelope {
        schema_version: FAVORITES_SCHEMA_VERSION,
        app_name,
        exported_at: Utc::now(),
        favorites,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse `json` and merge new entries into `existing` (appended, input order kept).
pub(crate) fn merge_import(
    existing: &mut Vec<Favorite>,
    json: &str,
) -> Result<ImportReport, VaultError> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| VaultError::Import(e.to_string()))?;
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let version = map
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .unwrap_or(u64::from(FAVORITES_SCHEMA_VERSION));
            if version > u64::from(FAVORITES_SCHEMA_VERSION) {
                warn!(
                    target: "alchemy::vault",
                    version,
                    "importing favorites from a newer schema; unknown fields are ignored"
                );
            }
            match map.remove("favorites") {
                Some(Value::Array(items)) => items,
                _ => return Err(VaultError::Import("missing favorites list".to_string())),
            }
        }
        _ => return Err(VaultError::Import("expected an object or an array".to_string())),
    };

    let mut report = ImportReport::default();
    for item in items {
        let favorite: Favorite = match serde_json::from_value(item) {
            Ok(f) => f,
            Err(e) => {
                warn!(target: "alchemy::vault", error = %e, "skipping unreadable favorite");
                report.skipped += 1;
                continue;
            }
        };
        if existing.iter().any(|f| f.same_as(&favorite)) {
            report.skipped += 1;
            continue;
        }
        existing.push(favorite);
        report.added += 1;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn favorite(sentence: &str) -> Favorite {
        let snapshot = Draft {
            lab_id: "phrasing".to_string(),
            template_id: "professional".to_string(),
            warmth: 50,
            selected_by_slot: BTreeMap::new(),
            updated_at: Utc::now(),
            source_context: None,
        };
        Favorite::new(sentence.to_string(), vec!["request".to_string()], snapshot)
    }

    #[test]
    fn export_then_import_into_empty_list() {
        let favorites = vec![favorite("תעדכנו אותי."), favorite("נדבר על זה בשקט.")];
        let json = export("Chip Alchemy", &favorites).unwrap();
        assert!(json.contains("\"schemaVersion\": 1"));
        assert!(json.contains("\"appName\": \"Chip Alchemy\""));

        let mut target = Vec::new();
        let report = merge_import(&mut target, &json).unwrap();
        assert_eq!(report, ImportReport { added: 2, skipped: 0 });
        assert_eq!(target, favorites);
    }

    #[test]
    fn duplicates_are_skipped_even_with_new_ids() {
        let original = favorite("תעדכנו אותי.");
        let mut existing = vec![original.clone()];
        let mut copy = original.clone();
        copy.id = "another-id".to_string();
        let json = serde_json::to_string(&vec![copy]).unwrap();

        let report = merge_import(&mut existing, &json).unwrap();
        assert_eq!(report, ImportReport { added: 0, skipped: 1 });
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn bad_entries_are_counted_not_fatal() {
        let good = serde_json::to_value(favorite("אשמח שתעדכנו אותי.")).unwrap();
        let json = serde_json::json!({
            "schemaVersion": 2,
            "futureField": true,
            "favorites": [good, {"sentence": 7}],
        })
        .to_string();
        let mut existing = Vec::new();
        let report = merge_import(&mut existing, &json).unwrap();
        assert_eq!(report, ImportReport { added: 1, skipped: 1 });
    }

    #[test]
    fn malformed_json_is_rejected() {
        let mut existing = Vec::new();
        assert!(matches!(
            merge_import(&mut existing, "{not json"),
            Err(VaultError::Import(_))
        ));
        assert!(matches!(
            merge_import(&mut existing, r#"{"schemaVersion":1}"#),
            Err(VaultError::Import(_))
        ));
        assert!(matches!(merge_import(&mut existing, "42"), Err(VaultError::Import(_))));
    }
}
