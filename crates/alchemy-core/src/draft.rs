//! Draft Model: the per-lab working selection (template, chip per slot, warmth,
//! optional source context) plus every operation that produces a new draft.
//!
//! Nothing here mutates its input; each call clones, changes, stamps `updated_at`,
//! and returns the result.

use crate::registry::{get_bank_by_slot, get_template, AlchemyLab};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_WARMTH: u8 = 50;

/// Chance that randomize leaves an optional slot empty. Arbitrary; kept for parity.
pub const OPTIONAL_SKIP_PROBABILITY: f64 = 0.25;

const MAX_WARMTH: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub lab_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default = "default_warmth")]
    pub warmth: u8,
    /// slot id → chip id, or "" for no selection.
    #[serde(default)]
    pub selected_by_slot: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<String>,
}

fn default_warmth() -> u8 {
    DEFAULT_WARMTH
}

impl Draft {
    /// Selected chip id for a slot; `None` when the slot is absent or cleared.
    pub fn selection(&self, slot_id: &str) -> Option<&str> {
        self.selected_by_slot
            .get(slot_id)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    fn touched(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }
}

/// Initial draft: first chip for each required bank, "" for optional ones,
/// the lab's first template, and the lab's default warmth.
pub fn create_default_alchemy_draft(lab: &AlchemyLab) -> Draft {
    let selected_by_slot = lab
        .banks
        .iter()
        .map(|bank| (bank.slot_id.clone(), bank.default_selection()))
        .collect();
    Draft {
        lab_id: lab.id.clone(),
        template_id: get_template(lab, None).map(|t| t.id.clone()).unwrap_or_default(),
        warmth: lab.default_warmth(),
        selected_by_slot,
        updated_at: Utc::now(),
        source_context: None,
    }
}

/// Toggle: choosing the chip that is already selected clears the slot.
pub fn select_chip_in_draft(draft: &Draft, slot_id: &str, chip_id: &str) -> Draft {
    let mut next = draft.clone();
    let already = next.selection(slot_id) == Some(chip_id);
    let value = if already { String::new() } else { chip_id.to_string() };
    next.selected_by_slot.insert(slot_id.to_string(), value);
    next.touched()
}

pub fn set_warmth_in_draft(draft: &Draft, warmth: u8) -> Draft {
    let mut next = draft.clone();
    next.warmth = warmth.min(MAX_WARMTH);
    next.touched()
}

/// Blank context is stored as `None`.
pub fn set_source_context_in_draft(draft: &Draft, source_context: Option<String>) -> Draft {
    let mut next = draft.clone();
    next.source_context = source_context.filter(|s| !s.trim().is_empty());
    next.touched()
}

/// Switch the active template. Slots of the new template that have no entry yet
/// get their bank default; existing entries (shared slots) are kept as-is.
pub fn set_template_in_draft(lab: &AlchemyLab, draft: &Draft, template_id: &str) -> Draft {
    let mut next = draft.clone();
    let Some(template) = get_template(lab, Some(template_id)) else {
        return next;
    };
    next.template_id = template.id.clone();
    for slot_id in &template.slot_order {
        if next.selected_by_slot.contains_key(slot_id) {
            continue;
        }
        let default = get_bank_by_slot(lab, slot_id)
            .map(|bank| bank.default_selection())
            .unwrap_or_default();
        next.selected_by_slot.insert(slot_id.clone(), default);
    }
    debug!(
        target: "alchemy::draft",
        lab_id = %lab.id,
        template_id = %next.template_id,
        "template switched"
    );
    next.touched()
}

/// Fresh default selections; warmth and source context survive the reset.
pub fn reset_alchemy_draft(lab: &AlchemyLab, draft: &Draft) -> Draft {
    let mut next = create_default_alchemy_draft(lab);
    next.warmth = draft.warmth.min(MAX_WARMTH);
    next.source_context = draft.source_context.clone();
    debug!(target: "alchemy::draft", lab_id = %lab.id, "draft reset");
    next
}

/// Random chip per slot of the active template (optional slots are skipped with
/// `OPTIONAL_SKIP_PROBABILITY`) and a uniform warmth in 0..=100.
/// Slots outside the active template keep whatever they held.
pub fn randomize_alchemy_draft<R: Rng + ?Sized>(
    lab: &AlchemyLab,
    draft: &Draft,
    rng: &mut R,
) -> Draft {
    let mut next = draft.clone();
    next.lab_id = lab.id.clone();
    if let Some(template) = get_template(lab, Some(&draft.template_id)) {
        next.template_id = template.id.clone();
        for slot_id in &template.slot_order {
            let choice = match get_bank_by_slot(lab, slot_id) {
                Some(bank) if bank.optional && rng.gen_bool(OPTIONAL_SKIP_PROBABILITY) => {
                    String::new()
                }
                Some(bank) => bank
                    .chips
                    .choose(rng)
                    .map(|chip| chip.id.clone())
                    .unwrap_or_default(),
                None => String::new(),
            };
            next.selected_by_slot.insert(slot_id.clone(), choice);
        }
    }
    next.warmth = rng.gen_range(0..=MAX_WARMTH);
    debug!(
        target: "alchemy::draft",
        lab_id = %lab.id,
        warmth = next.warmth,
        "draft randomized"
    );
    next.touched()
}

/// Repair a draft read back from storage against the current lab:
/// keys without a bank are dropped, unknown chip ids are cleared, missing bank
/// keys get their default, the template id is resolved, warmth is clamped.
pub fn sanitize_draft(lab: &AlchemyLab, draft: &Draft) -> Draft {
    let mut next = draft.clone();
    next.lab_id = lab.id.clone();
    next.template_id = get_template(lab, Some(&draft.template_id))
        .map(|t| t.id.clone())
        .unwrap_or_default();
    next.warmth = draft.warmth.min(MAX_WARMTH);
    next.selected_by_slot = lab
        .banks
        .iter()
        .map(|bank| {
            let value = match draft.selected_by_slot.get(&bank.slot_id) {
                Some(chip_id) if chip_id.is_empty() || bank.chip(chip_id).is_some() => {
                    chip_id.clone()
                }
                Some(_) => String::new(),
                None => bank.default_selection(),
            };
            (bank.slot_id.clone(), value)
        })
        .collect();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Chip, ChipBank, Template};
    use crate::FormatterKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bank(slot: &str, optional: bool, chips: &[&str]) -> ChipBank {
        ChipBank {
            id: format!("{slot}_bank"),
            slot_id: slot.to_string(),
            label: slot.to_uppercase(),
            optional,
            chips: chips.iter().map(|c| Chip::new(c, c)).collect(),
        }
    }

    fn template(id: &str, slots: &[&str]) -> Template {
        Template {
            id: id.to_string(),
            label: String::new(),
            slot_order: slots.iter().map(|s| s.to_string()).collect(),
            required_slot_ids: vec![],
            formatter: FormatterKind::Generic,
        }
    }

    fn lab() -> AlchemyLab {
        AlchemyLab {
            id: "lab".to_string(),
            title: "Lab".to_string(),
            description: String::new(),
            templates: vec![
                template("t1", &["a", "b"]),
                template("t2", &["b", "c"]),
            ],
            banks: vec![
                bank("a", false, &["a1", "a2", "a3"]),
                bank("b", true, &["b1", "b2"]),
                bank("c", false, &["c1", "c2"]),
            ],
            default_warmth: Some(70),
            empty_state: "empty".to_string(),
        }
    }

    #[test]
    fn default_draft_uses_first_required_chip() {
        let d = create_default_alchemy_draft(&lab());
        assert_eq!(d.lab_id, "lab");
        assert_eq!(d.template_id, "t1");
        assert_eq!(d.warmth, 70);
        assert_eq!(d.selected_by_slot["a"], "a1");
        assert_eq!(d.selected_by_slot["b"], "");
        assert_eq!(d.selected_by_slot["c"], "c1");
        assert!(d.source_context.is_none());
    }

    #[test]
    fn default_warmth_is_fifty_when_unconfigured() {
        let mut lab = lab();
        lab.default_warmth = None;
        assert_eq!(create_default_alchemy_draft(&lab).warmth, 50);
    }

    #[test]
    fn selecting_same_chip_twice_clears_slot() {
        let d = create_default_alchemy_draft(&lab());
        let once = select_chip_in_draft(&d, "b", "b2");
        assert_eq!(once.selected_by_slot["b"], "b2");
        let twice = select_chip_in_draft(&once, "b", "b2");
        assert_eq!(twice.selected_by_slot["b"], "");
        // input untouched
        assert_eq!(once.selected_by_slot["b"], "b2");
    }

    #[test]
    fn selecting_a_different_chip_replaces() {
        let d = create_default_alchemy_draft(&lab());
        let next = select_chip_in_draft(&d, "a", "a3");
        assert_eq!(next.selected_by_slot["a"], "a3");
    }

    #[test]
    fn warmth_is_clamped() {
        let d = create_default_alchemy_draft(&lab());
        assert_eq!(set_warmth_in_draft(&d, 180).warmth, 100);
        assert_eq!(set_warmth_in_draft(&d, 12).warmth, 12);
    }

    #[test]
    fn template_switch_keeps_shared_slots_and_fills_new_ones() {
        let lab = lab();
        let mut d = create_default_alchemy_draft(&lab);
        d.selected_by_slot.remove("c");
        let d = select_chip_in_draft(&d, "b", "b2");
        let switched = set_template_in_draft(&lab, &d, "t2");
        assert_eq!(switched.template_id, "t2");
        assert_eq!(switched.selected_by_slot["b"], "b2");
        assert_eq!(switched.selected_by_slot["c"], "c1");
    }

    #[test]
    fn template_switch_to_unknown_id_uses_first_template() {
        let lab = lab();
        let d = create_default_alchemy_draft(&lab);
        let d = set_template_in_draft(&lab, &d, "t2");
        assert_eq!(set_template_in_draft(&lab, &d, "nope").template_id, "t1");
    }

    #[test]
    fn reset_keeps_warmth_and_context() {
        let lab = lab();
        let d = create_default_alchemy_draft(&lab);
        let d = set_warmth_in_draft(&d, 5);
        let d = set_source_context_in_draft(&d, Some("the meeting on Sunday".to_string()));
        let d = select_chip_in_draft(&d, "a", "a3");
        let reset = reset_alchemy_draft(&lab, &d);
        assert_eq!(reset.warmth, 5);
        assert_eq!(reset.source_context.as_deref(), Some("the meeting on Sunday"));
        assert_eq!(reset.selected_by_slot["a"], "a1");
    }

    #[test]
    fn blank_source_context_is_none() {
        let d = create_default_alchemy_draft(&lab());
        assert!(set_source_context_in_draft(&d, Some("   ".to_string()))
            .source_context
            .is_none());
    }

    #[test]
    fn randomize_is_deterministic_for_a_seed() {
        let lab = lab();
        let d = create_default_alchemy_draft(&lab);
        let a = randomize_alchemy_draft(&lab, &d, &mut ChaCha8Rng::seed_from_u64(7));
        let b = randomize_alchemy_draft(&lab, &d, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a.selected_by_slot, b.selected_by_slot);
        assert_eq!(a.warmth, b.warmth);
    }

    #[test]
    fn randomize_fills_required_slots_from_their_bank() {
        let lab = lab();
        let d = create_default_alchemy_draft(&lab);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let r = randomize_alchemy_draft(&lab, &d, &mut rng);
            let a = &r.selected_by_slot["a"];
            assert!(["a1", "a2", "a3"].contains(&a.as_str()));
            let b = &r.selected_by_slot["b"];
            assert!(b.is_empty() || ["b1", "b2"].contains(&b.as_str()));
            assert!(r.warmth <= 100);
        }
    }

    #[test]
    fn randomize_skips_optional_slots_sometimes() {
        let lab = lab();
        let d = create_default_alchemy_draft(&lab);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let empties = (0..400)
            .map(|_| randomize_alchemy_draft(&lab, &d, &mut rng))
            .filter(|r| r.selected_by_slot["b"].is_empty())
            .count();
        // ~25% expected
        assert!(empties > 50 && empties < 150, "empties = {empties}");
    }

    #[test]
    fn randomize_without_prior_selection() {
        let lab = lab();
        let d = Draft {
            lab_id: "lab".to_string(),
            template_id: String::new(),
            warmth: 0,
            selected_by_slot: BTreeMap::new(),
            updated_at: Utc::now(),
            source_context: None,
        };
        let r = randomize_alchemy_draft(&lab, &d, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(r.template_id, "t1");
        assert!(!r.selected_by_slot["a"].is_empty());
        assert!(r.selected_by_slot.contains_key("b"));
    }

    #[test]
    fn sanitize_repairs_stale_draft() {
        let lab = lab();
        let mut d = create_default_alchemy_draft(&lab);
        d.template_id = "gone".to_string();
        d.selected_by_slot.insert("ghost".to_string(), "x".to_string());
        d.selected_by_slot.insert("a".to_string(), "a9".to_string());
        d.selected_by_slot.remove("c");
        d.warmth = 200;
        let clean = sanitize_draft(&lab, &d);
        assert_eq!(clean.template_id, "t1");
        assert!(!clean.selected_by_slot.contains_key("ghost"));
        assert_eq!(clean.selected_by_slot["a"], "");
        assert_eq!(clean.selected_by_slot["c"], "c1");
        assert_eq!(clean.warmth, 100);
    }
}
