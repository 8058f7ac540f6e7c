//! Studio: application state for one local user.
//!
//! Owns the lab catalog, the per-lab drafts, favorites and history, and a
//! [`KeyValuePort`]. Reads happen once at [`Studio::open`]; every mutation writes
//! the affected collection back. Unreadable stored data falls back to empty
//! defaults and failed writes are logged and ignored, so the in-memory state
//! is always authoritative for the running session.

use crate::error::VaultError;
use crate::favorites::{self, Favorite, ImportReport};
use crate::history::{self, HistoryEntry};
use crate::port::{KeyValuePort, SledPort};
use alchemy_core::{
    compose, create_default_alchemy_draft, randomize_alchemy_draft, reset_alchemy_draft,
    sanitize_draft, select_chip_in_draft, set_source_context_in_draft, set_template_in_draft,
    set_warmth_in_draft, AlchemyLab, Composition, Draft, LabCatalog, LabConfig, StudioConfig,
};
use alchemy_drills::{Feedback, RelationPrompt, SomaticSnapshot, Tier};
use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const DRAFTS_KEY: &str = "alchemy.drafts.v1";
pub const FAVORITES_KEY: &str = "alchemy.favorites.v1";
pub const HISTORY_KEY: &str = "alchemy.history.v1";

pub struct Studio<P: KeyValuePort> {
    catalog: LabCatalog,
    port: P,
    app_name: String,
    default_lab: Option<String>,
    history_limit: usize,
    drafts: BTreeMap<String, Draft>,
    favorites: Vec<Favorite>,
    history: Vec<HistoryEntry>,
}

impl Studio<SledPort> {
    /// Catalog and sled store as named by `config`.
    pub fn from_config(config: &StudioConfig) -> Result<Self, VaultError> {
        let catalog = config.catalog()?;
        let port = SledPort::open_path(&config.storage_path)?;
        Ok(Self::open(catalog, port, config))
    }
}

impl<P: KeyValuePort> Studio<P> {
    pub fn open(catalog: LabCatalog, port: P, config: &StudioConfig) -> Self {
        let stored: BTreeMap<String, Value> = load_or_default(&port, DRAFTS_KEY);
        let drafts = stored
            .into_iter()
            .filter_map(|(lab_id, raw)| match serde_json::from_value::<Draft>(raw) {
                Ok(draft) => Some((lab_id, draft)),
                Err(e) => {
                    warn!(target: "alchemy::vault", lab_id = %lab_id, error = %e, "dropping unreadable draft");
                    None
                }
            })
            .map(|(lab_id, draft)| {
                let draft = match catalog.alchemy_lab(&lab_id) {
                    Some(lab) => sanitize_draft(lab, &draft),
                    None => draft,
                };
                (lab_id, draft)
            })
            .collect();
        let favorites = load_entries(&port, FAVORITES_KEY);
        let mut history: Vec<HistoryEntry> = load_entries(&port, HISTORY_KEY);
        history.truncate(config.history_limit);

        let studio = Self {
            catalog,
            port,
            app_name: config.app_name.clone(),
            default_lab: config.default_lab.clone(),
            history_limit: config.history_limit,
            drafts,
            favorites,
            history,
        };
        info!(
            target: "alchemy::vault",
            labs = studio.catalog.labs().len(),
            drafts = studio.drafts.len(),
            favorites = studio.favorites.len(),
            history = studio.history.len(),
            "studio opened"
        );
        studio
    }

    pub fn catalog(&self) -> &LabCatalog {
        &self.catalog
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Configured starting lab when the catalog has it, else the first alchemy lab.
    pub fn default_lab(&self) -> Option<&str> {
        self.default_lab
            .as_deref()
            .filter(|id| self.catalog.lab(id).is_some())
            .or_else(|| self.catalog.alchemy_labs().next().map(|lab| lab.id.as_str()))
    }

    // ---- drafts ---------------------------------------------------------

    /// Stored draft for an alchemy lab, or its default. `None` for any other lab id.
    pub fn draft(&self, lab_id: &str) -> Option<Draft> {
        let lab = self.catalog.alchemy_lab(lab_id)?;
        Some(current_draft(lab, self.drafts.get(lab_id)))
    }

    pub fn select_chip(&mut self, lab_id: &str, slot_id: &str, chip_id: &str) -> Option<Draft> {
        self.update(lab_id, |_, draft| select_chip_in_draft(draft, slot_id, chip_id))
    }

    pub fn set_template(&mut self, lab_id: &str, template_id: &str) -> Option<Draft> {
        self.update(lab_id, |lab, draft| set_template_in_draft(lab, draft, template_id))
    }

    pub fn set_warmth(&mut self, lab_id: &str, warmth: u8) -> Option<Draft> {
        self.update(lab_id, |_, draft| set_warmth_in_draft(draft, warmth))
    }

    pub fn set_source_context(&mut self, lab_id: &str, context: Option<String>) -> Option<Draft> {
        self.update(lab_id, |_, draft| set_source_context_in_draft(draft, context))
    }

    pub fn reset(&mut self, lab_id: &str) -> Option<Draft> {
        self.update(lab_id, reset_alchemy_draft)
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, lab_id: &str, rng: &mut R) -> Option<Draft> {
        self.update(lab_id, |lab, draft| randomize_alchemy_draft(lab, draft, rng))
    }

    pub fn compose(&self, lab_id: &str) -> Option<Composition> {
        let lab = self.catalog.alchemy_lab(lab_id)?;
        let draft = current_draft(lab, self.drafts.get(lab_id));
        Some(compose(lab, &draft))
    }

    fn update<F>(&mut self, lab_id: &str, apply: F) -> Option<Draft>
    where
        F: FnOnce(&AlchemyLab, &Draft) -> Draft,
    {
        let lab = self.catalog.alchemy_lab(lab_id)?;
        // Unknown slot keys and chip ids never reach storage.
        let applied = apply(lab, &current_draft(lab, self.drafts.get(lab_id)));
        let next = sanitize_draft(lab, &applied);
        self.drafts.insert(lab_id.to_string(), next.clone());
        self.persist(DRAFTS_KEY, &self.drafts);
        Some(next)
    }

    // ---- favorites ------------------------------------------------------

    /// Freeze the lab's current sentence. `None` when nothing is selected yet.
    pub fn save_favorite(&mut self, lab_id: &str) -> Option<Favorite> {
        let lab = self.catalog.alchemy_lab(lab_id)?;
        let draft = current_draft(lab, self.drafts.get(lab_id));
        let composition = compose(lab, &draft);
        if composition.tokens.iter().all(|t| t.empty) {
            debug!(target: "alchemy::vault", lab_id, "nothing selected; favorite not saved");
            return None;
        }
        let favorite = Favorite::new(
            composition.sentence,
            composition.tags.into_iter().collect(),
            draft,
        );
        self.favorites.insert(0, favorite.clone());
        self.persist(FAVORITES_KEY, &self.favorites);
        Some(favorite)
    }

    pub fn delete_favorite(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);
        let removed = self.favorites.len() != before;
        if removed {
            self.persist(FAVORITES_KEY, &self.favorites);
        }
        removed
    }

    /// Newest first, optionally restricted to one lab.
    pub fn favorites(&self, lab_id: Option<&str>) -> Vec<&Favorite> {
        let mut out: Vec<&Favorite> = self
            .favorites
            .iter()
            .filter(|f| lab_id.map_or(true, |id| f.lab_id == id))
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Make the favorite's snapshot the lab's current draft again.
    pub fn load_favorite_into_draft(&mut self, id: &str) -> Option<Draft> {
        let favorite = self.favorites.iter().find(|f| f.id == id)?;
        let lab = self.catalog.alchemy_lab(&favorite.lab_id)?;
        let mut draft = sanitize_draft(lab, &favorite.snapshot);
        draft.updated_at = Utc::now();
        self.drafts.insert(lab.id.clone(), draft.clone());
        self.persist(DRAFTS_KEY, &self.drafts);
        Some(draft)
    }

    pub fn export_favorites(&self) -> Result<String, VaultError> {
        favorites::export(&self.app_name, &self.favorites)
    }

    pub fn import_favorites(&mut self, json: &str) -> Result<ImportReport, VaultError> {
        let report = favorites::merge_import(&mut self.favorites, json)?;
        if report.added > 0 {
            self.persist(FAVORITES_KEY, &self.favorites);
        }
        info!(
            target: "alchemy::vault",
            added = report.added,
            skipped = report.skipped,
            "favorites imported"
        );
        Ok(report)
    }

    // ---- history --------------------------------------------------------

    pub fn upsert_history(&mut self, entry: HistoryEntry) {
        history::upsert(&mut self.history, entry, self.history_limit);
        self.persist(HISTORY_KEY, &self.history);
    }

    pub fn delete_history(&mut self, id: &str) -> bool {
        let before = self.history.len();
        self.history.retain(|e| e.id != id);
        let removed = self.history.len() != before;
        if removed {
            self.persist(HISTORY_KEY, &self.history);
        }
        removed
    }

    /// Newest first, optionally restricted to one lab.
    pub fn history(&self, lab_id: Option<&str>) -> Vec<&HistoryEntry> {
        self.history
            .iter()
            .filter(|e| lab_id.map_or(true, |id| e.lab_id == id))
            .collect()
    }

    // ---- drills ---------------------------------------------------------

    /// Score a question against a questioner lab's client statement and log it.
    pub fn practice_question(
        &mut self,
        lab_id: &str,
        statement_id: &str,
        input: &str,
    ) -> Option<Feedback> {
        let statement = match self.catalog.lab(lab_id)? {
            LabConfig::Questioner(lab) => lab.client_statements.iter().find(|s| s.id == statement_id)?,
            _ => return None,
        };
        let feedback = alchemy_drills::score_question(input, &statement.text);
        let payload = json!({ "statementId": statement_id, "input": input, "feedback": feedback });
        self.record_feedback(lab_id, &feedback, payload);
        Some(feedback)
    }

    pub fn practice_reframe(
        &mut self,
        lab_id: &str,
        pattern_id: &str,
        input: &str,
    ) -> Option<Feedback> {
        let pattern = match self.catalog.lab(lab_id)? {
            LabConfig::Beyond(lab) => lab.patterns.iter().find(|p| p.id == pattern_id)?,
            _ => return None,
        };
        let feedback = alchemy_drills::score_reframe(input, &pattern.belief);
        let payload = json!({ "patternId": pattern_id, "input": input, "feedback": feedback });
        self.record_feedback(lab_id, &feedback, payload);
        Some(feedback)
    }

    pub fn practice_relation(
        &mut self,
        lab_id: &str,
        scenario_id: &str,
        input: &str,
    ) -> Option<Feedback> {
        let scenario = match self.catalog.lab(lab_id)? {
            LabConfig::Relations(lab) => lab.scenarios.iter().find(|s| s.id == scenario_id)?,
            _ => return None,
        };
        let prompt = RelationPrompt {
            first_party: scenario.first_party.clone(),
            second_party: scenario.second_party.clone(),
            situation: scenario.situation.clone(),
        };
        let feedback = alchemy_drills::score_relation_question(input, &prompt);
        let payload = json!({ "scenarioId": scenario_id, "input": input, "feedback": feedback });
        self.record_feedback(lab_id, &feedback, payload);
        Some(feedback)
    }

    pub fn practice_sequence<S: AsRef<str> + Serialize>(
        &mut self,
        lab_id: &str,
        sequence_id: &str,
        steps: &[S],
    ) -> Option<Feedback> {
        let sequence = match self.catalog.lab(lab_id)? {
            LabConfig::MindLiberating(lab) => lab.sequences.iter().find(|s| s.id == sequence_id)?,
            _ => return None,
        };
        let feedback = alchemy_drills::score_sequence(steps, &sequence.steps);
        let payload = json!({ "sequenceId": sequence_id, "steps": steps, "feedback": feedback });
        self.record_feedback(lab_id, &feedback, payload);
        Some(feedback)
    }

    /// Save a body-map snapshot (normalized) as a history entry.
    pub fn record_somatic(&mut self, lab_id: &str, snapshot: &SomaticSnapshot) -> HistoryEntry {
        let normalized = snapshot.normalized();
        let payload = json!({
            "snapshot": normalized,
            "totalLoad": normalized.total_load(),
            "peakZone": normalized.peak_zone(),
        });
        let entry = HistoryEntry::new(lab_id, normalized.summarize(), payload);
        self.upsert_history(entry.clone());
        entry
    }

    /// Blank answers are not worth keeping.
    fn record_feedback(&mut self, lab_id: &str, feedback: &Feedback, payload: Value) {
        if feedback.tier == Tier::None {
            return;
        }
        let summary = format!("{} ({})", feedback.headline(), feedback.score);
        self.upsert_history(HistoryEntry::new(lab_id, summary, payload));
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let written = serde_json::to_vec(value)
            .map_err(VaultError::from)
            .and_then(|bytes| self.port.put(key, &bytes));
        if let Err(e) = written {
            warn!(target: "alchemy::vault", key, error = %e, "write failed; keeping in-memory state");
        }
    }
}

fn current_draft(lab: &AlchemyLab, stored: Option<&Draft>) -> Draft {
    match stored {
        Some(draft) => sanitize_draft(lab, draft),
        None => create_default_alchemy_draft(lab),
    }
}

fn load_or_default<T: DeserializeOwned + Default>(port: &dyn KeyValuePort, key: &str) -> T {
    let bytes = match port.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(target: "alchemy::vault", key, error = %e, "read failed; starting empty");
            return T::default();
        }
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        warn!(target: "alchemy::vault", key, error = %e, "stored value unreadable; starting empty");
        T::default()
    })
}

/// A stored list, keeping the entries that still parse.
fn load_entries<T: DeserializeOwned>(port: &dyn KeyValuePort, key: &str) -> Vec<T> {
    let raw: Vec<Value> = load_or_default(port, key);
    raw.into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(target: "alchemy::vault", key, error = %e, "dropping unreadable entry");
                None
            }
        })
        .collect()
}
