//! Composition Engine: draft → sentence, preview tokens, and aggregated tags.
//!
//! Each template names a `FormatterKind`; the formatter joins the non-empty slot
//! values in its own fixed shape, collapses whitespace, trims, and closes the
//! sentence with a period when it does not already end in sentence punctuation.

use crate::draft::Draft;
use crate::registry::{get_bank_by_slot, get_chip_by_id, get_template, AlchemyLab, Template};
use crate::tone::{chip_text_for_warmth, warmth_bucket, WarmthBucket};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Used when a lab has no empty-state text of its own.
pub const DEFAULT_EMPTY_STATE: &str = "בחרו צ'יפים כדי להרכיב משפט";

const SENTENCE_END: &[char] = &['.', '!', '?', '…'];
const SOFT_PUNCTUATION: &[char] = &['.', '!', '?', '…', ',', ':', ';'];

/// Sentence shapes. Any unregistered `formatterId` deserializes to `Generic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatterKind {
    /// opener, quantifier, context, request, closing
    Professional,
    /// feeling + context, need, request
    IStatement,
    /// acknowledge + reflect, validate + offer
    Empathy,
    /// observation, limit, consequence
    BoundaryFirm,
    /// care, observation + limit
    BoundarySoft,
    /// slot values in template order
    #[default]
    Generic,
}

impl FormatterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::IStatement => "i_statement",
            Self::Empathy => "empathy",
            Self::BoundaryFirm => "boundary_firm",
            Self::BoundarySoft => "boundary_soft",
            Self::Generic => "generic",
        }
    }

    /// Render template-scoped slot values. Returns "" when nothing is filled.
    pub fn format(&self, template: &Template, values: &BTreeMap<String, String>) -> String {
        let v = |slot: &str| values.get(slot).map(String::as_str).unwrap_or("");
        let sentence = match self {
            Self::Professional => Assembler::default()
                .push(" ", v("opener"))
                .push(" ", v("quantifier"))
                .push(" ", v("context"))
                .push(" ", v("request"))
                .push(" ", v("closing")),
            Self::IStatement => Assembler::default()
                .push(" ", v("feeling"))
                .push(" ", v("context"))
                .push(", ", v("need"))
                .push(". ", v("request")),
            Self::Empathy => Assembler::default()
                .push(" ", v("acknowledge"))
                .push(" ", v("reflect"))
                .push(". ", v("validate"))
                .push(" ", v("offer")),
            Self::BoundaryFirm => Assembler::default()
                .push(" ", v("observation"))
                .push(", ", v("limit"))
                .push(". ", v("consequence")),
            Self::BoundarySoft => Assembler::default()
                .push(" ", v("care"))
                .push(". ", v("observation"))
                .push(" ", v("limit")),
            Self::Generic => template
                .slot_order
                .iter()
                .fold(Assembler::default(), |acc, slot| acc.push(" ", v(slot))),
        };
        sentence.finish()
    }
}

impl From<String> for FormatterKind {
    fn from(id: String) -> Self {
        match id.trim() {
            "professional" => Self::Professional,
            "i_statement" | "i-statement" => Self::IStatement,
            "empathy" => Self::Empathy,
            "boundary_firm" | "boundary" => Self::BoundaryFirm,
            "boundary_soft" => Self::BoundarySoft,
            _ => Self::Generic,
        }
    }
}

impl From<FormatterKind> for String {
    fn from(kind: FormatterKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Joins values with connectives placed only between present parts.
#[derive(Default)]
struct Assembler {
    out: String,
}

impl Assembler {
    fn push(mut self, connective: &str, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        if !self.out.is_empty() {
            // a chip that already ends in punctuation swallows the connective's own mark
            if connective.starts_with(SOFT_PUNCTUATION) && self.out.ends_with(SOFT_PUNCTUATION) {
                self.out.push(' ');
            } else {
                self.out.push_str(connective);
            }
        }
        self.out.push_str(value);
        self
    }

    fn finish(self) -> String {
        let collapsed = self.out.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() || collapsed.ends_with(SENTENCE_END) {
            collapsed
        } else {
            format!("{collapsed}.")
        }
    }
}

/// Tone-resolved text for every bank's current selection ("" when unselected).
pub fn selected_values_for_lab(lab: &AlchemyLab, draft: &Draft) -> BTreeMap<String, String> {
    lab.banks
        .iter()
        .map(|bank| {
            let text = draft
                .selection(&bank.slot_id)
                .and_then(|chip_id| bank.chip(chip_id))
                .map(|chip| chip_text_for_warmth(chip, draft.warmth).to_string())
                .unwrap_or_default();
            (bank.slot_id.clone(), text)
        })
        .collect()
}

/// Rendered sentence; never empty. Falls back to the lab's empty-state text.
pub fn build_sentence(lab: &AlchemyLab, draft: &Draft) -> String {
    let sentence = get_template(lab, Some(&draft.template_id))
        .map(|template| {
            let values: BTreeMap<String, String> = selected_values_for_lab(lab, draft)
                .into_iter()
                .filter(|(slot, _)| template.slot_order.contains(slot))
                .collect();
            template.formatter.format(template, &values)
        })
        .unwrap_or_default();
    if sentence.is_empty() {
        empty_state(lab)
    } else {
        sentence
    }
}

fn empty_state(lab: &AlchemyLab) -> String {
    let text = lab.empty_state.trim();
    if text.is_empty() {
        DEFAULT_EMPTY_STATE.to_string()
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewToken {
    pub slot_id: String,
    pub label: String,
    pub value: String,
    pub empty: bool,
}

/// One token per slot of the active template, in template order.
pub fn preview_tokens(lab: &AlchemyLab, draft: &Draft) -> Vec<PreviewToken> {
    let Some(template) = get_template(lab, Some(&draft.template_id)) else {
        return Vec::new();
    };
    template
        .slot_order
        .iter()
        .map(|slot_id| {
            let label = get_bank_by_slot(lab, slot_id)
                .map(|bank| bank.label.clone())
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| slot_id.clone());
            let value = draft
                .selection(slot_id)
                .and_then(|chip_id| get_chip_by_id(lab, slot_id, chip_id))
                .map(|chip| chip_text_for_warmth(chip, draft.warmth).trim().to_string())
                .unwrap_or_default();
            PreviewToken {
                slot_id: slot_id.clone(),
                label,
                empty: value.is_empty(),
                value,
            }
        })
        .collect()
}

/// Union of the tags of every selected chip, de-duplicated.
pub fn selected_tags_for_draft(lab: &AlchemyLab, draft: &Draft) -> BTreeSet<String> {
    lab.banks
        .iter()
        .filter_map(|bank| draft.selection(&bank.slot_id).and_then(|id| bank.chip(id)))
        .flat_map(|chip| chip.tags.iter().cloned())
        .collect()
}

/// Everything a single render pass needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub sentence: String,
    pub tokens: Vec<PreviewToken>,
    pub tags: BTreeSet<String>,
    pub bucket: WarmthBucket,
}

pub fn compose(lab: &AlchemyLab, draft: &Draft) -> Composition {
    Composition {
        sentence: build_sentence(lab, draft),
        tokens: preview_tokens(lab, draft),
        tags: selected_tags_for_draft(lab, draft),
        bucket: warmth_bucket(draft.warmth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(formatter: FormatterKind, slots: &[&str]) -> Template {
        Template {
            id: "t".to_string(),
            label: String::new(),
            slot_order: slots.iter().map(|s| s.to_string()).collect(),
            required_slot_ids: vec![],
            formatter,
        }
    }

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn professional_joins_in_fixed_order() {
        let t = template(
            FormatterKind::Professional,
            &["opener", "quantifier", "context", "request", "closing"],
        );
        let out = FormatterKind::Professional.format(
            &t,
            &values(&[("request", "send it"), ("opener", "I ask that"), ("closing", "thanks")]),
        );
        assert_eq!(out, "I ask that send it thanks.");
    }

    #[test]
    fn i_statement_places_connectives_between_present_parts() {
        let t = template(FormatterKind::IStatement, &["feeling", "context", "need", "request"]);
        let all = values(&[
            ("feeling", "I feel tense"),
            ("context", "when plans change"),
            ("need", "because I need notice"),
            ("request", "Please tell me early"),
        ]);
        assert_eq!(
            FormatterKind::IStatement.format(&t, &all),
            "I feel tense when plans change, because I need notice. Please tell me early."
        );
        let need_only = values(&[("need", "I need notice")]);
        assert_eq!(FormatterKind::IStatement.format(&t, &need_only), "I need notice.");
    }

    #[test]
    fn trailing_chip_punctuation_absorbs_connective() {
        let t = template(FormatterKind::BoundaryFirm, &["observation", "limit", "consequence"]);
        let out = FormatterKind::BoundaryFirm.format(
            &t,
            &values(&[("observation", "When you shout,"), ("limit", "I stop the call")]),
        );
        assert_eq!(out, "When you shout, I stop the call.");
    }

    #[test]
    fn whitespace_collapses_and_existing_punctuation_is_kept() {
        let t = template(FormatterKind::Generic, &["a", "b"]);
        let out = FormatterKind::Generic.format(&t, &values(&[("a", "  are   you"), ("b", "ok? ")]));
        assert_eq!(out, "are you ok?");
    }

    #[test]
    fn nothing_filled_formats_to_empty() {
        let t = template(FormatterKind::Empathy, &["acknowledge"]);
        assert_eq!(FormatterKind::Empathy.format(&t, &BTreeMap::new()), "");
    }

    #[test]
    fn unknown_formatter_id_deserializes_to_generic() {
        let kind: FormatterKind = serde_json::from_str("\"mystery_shape\"").unwrap();
        assert_eq!(kind, FormatterKind::Generic);
        let kind: FormatterKind = serde_json::from_str("\"i_statement\"").unwrap();
        assert_eq!(kind, FormatterKind::IStatement);
        assert_eq!(serde_json::to_string(&FormatterKind::BoundarySoft).unwrap(), "\"boundary_soft\"");
    }
}
