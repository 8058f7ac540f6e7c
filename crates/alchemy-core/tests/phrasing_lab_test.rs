//! Integration test: the built-in "phrasing" lab end to end.
//!
//! Verifies that:
//! 1. The professional template renders the selected opener/context/request in order with a closing period.
//! 2. With every slot cleared, the lab's empty-state text is returned.
//! 3. Warmth buckets change the rendered variant, falling back to neutral where a variant is missing.
//! 4. Template switching keeps shared slots; tags aggregate across banks.

use alchemy_core::{
    build_sentence, compose, create_default_alchemy_draft, preview_tokens, select_chip_in_draft,
    selected_tags_for_draft, set_template_in_draft, set_warmth_in_draft, AlchemyLab, Draft,
    LabCatalog, WarmthBucket,
};

fn phrasing() -> AlchemyLab {
    LabCatalog::builtin()
        .alchemy_lab("phrasing")
        .cloned()
        .expect("phrasing lab is built in")
}

fn cleared(lab: &AlchemyLab) -> Draft {
    let mut draft = create_default_alchemy_draft(lab);
    for value in draft.selected_by_slot.values_mut() {
        value.clear();
    }
    draft
}

#[test]
fn professional_sentence_matches_worked_example() {
    let lab = phrasing();
    let draft = cleared(&lab);
    let draft = select_chip_in_draft(&draft, "opener", "opener_ask");
    let draft = select_chip_in_draft(&draft, "context", "ctx_again");
    let draft = select_chip_in_draft(&draft, "request", "req_update");
    let draft = set_warmth_in_draft(&draft, 50);

    assert_eq!(draft.template_id, "professional");
    assert_eq!(
        build_sentence(&lab, &draft),
        "אני מבקש ש... כשזה קורה שוב תעדכנו אותי."
    );
}

#[test]
fn default_draft_renders_required_slots_only() {
    let lab = phrasing();
    let draft = create_default_alchemy_draft(&lab);
    assert_eq!(build_sentence(&lab, &draft), "אני מבקש ש... תעדכנו אותי.");
}

#[test]
fn all_slots_empty_returns_empty_state() {
    let lab = phrasing();
    let draft = cleared(&lab);
    assert_eq!(build_sentence(&lab, &draft), lab.empty_state);
    assert!(!build_sentence(&lab, &draft).is_empty());
}

#[test]
fn unchoosing_a_required_slot_leaves_a_silent_gap() {
    let lab = phrasing();
    let draft = create_default_alchemy_draft(&lab);
    let draft = select_chip_in_draft(&draft, "opener", "opener_ask");
    assert_eq!(draft.selected_by_slot["opener"], "");
    assert_eq!(build_sentence(&lab, &draft), "תעדכנו אותי.");
}

#[test]
fn cold_warmth_falls_back_to_neutral_variant() {
    let lab = phrasing();
    // opener_wish has only neutral + warm text
    let draft = cleared(&lab);
    let draft = select_chip_in_draft(&draft, "opener", "opener_wish");
    let draft = set_warmth_in_draft(&draft, 10);
    assert_eq!(build_sentence(&lab, &draft), "הייתי רוצה ש...");

    let warm = set_warmth_in_draft(&draft, 90);
    assert_eq!(build_sentence(&lab, &warm), "הלוואי ש...");
}

#[test]
fn preview_tokens_follow_template_order() {
    let lab = phrasing();
    let draft = create_default_alchemy_draft(&lab);
    let tokens = preview_tokens(&lab, &draft);
    let slots: Vec<&str> = tokens.iter().map(|t| t.slot_id.as_str()).collect();
    assert_eq!(slots, vec!["opener", "quantifier", "context", "request", "closing"]);
    assert_eq!(tokens[0].label, "פתיחה");
    assert!(!tokens[0].empty);
    assert!(tokens[1].empty);
    assert_eq!(tokens[1].value, "");
}

#[test]
fn switching_to_i_statement_keeps_shared_request() {
    let lab = phrasing();
    let draft = create_default_alchemy_draft(&lab);
    let draft = select_chip_in_draft(&draft, "request", "req_talk");
    let draft = select_chip_in_draft(&draft, "context", "ctx_again");
    let switched = set_template_in_draft(&lab, &draft, "i_statement");
    assert_eq!(switched.selected_by_slot["request"], "req_talk");
    assert_eq!(switched.selected_by_slot["context"], "ctx_again");
    assert_eq!(
        build_sentence(&lab, &switched),
        "אני מרגיש תסכול כשזה קורה שוב, כי אני צריך בהירות. נדבר על זה בשקט."
    );
}

#[test]
fn tags_union_is_deduplicated() {
    let lab = phrasing();
    let draft = create_default_alchemy_draft(&lab);
    let tags = selected_tags_for_draft(&lab, &draft);
    // opener_ask and req_update both carry "request"
    assert_eq!(tags.iter().filter(|t| t.as_str() == "request").count(), 1);
    assert!(tags.contains("direct"));
    assert!(tags.contains("communication"));
    assert!(tags.contains("feeling"));
}

#[test]
fn compose_bundles_render_pass() {
    let lab = phrasing();
    let draft = set_warmth_in_draft(&create_default_alchemy_draft(&lab), 80);
    let composition = compose(&lab, &draft);
    assert_eq!(composition.bucket, WarmthBucket::Warm);
    assert_eq!(composition.sentence, "אשמח מאוד ש... אשמח שתעדכנו אותי.");
    assert_eq!(composition.tokens.len(), 5);
}
