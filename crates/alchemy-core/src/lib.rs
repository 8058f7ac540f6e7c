//! alchemy-core: chip-bank sentence composition.
//!
//! Static lab catalog (chips, banks, templates), warmth-driven tone resolution,
//! the per-lab `Draft` selection model, and the composition engine that renders
//! a draft into a sentence, preview tokens, and aggregated tags.
//!
//! Every engine function is total and side-effect free: inputs are borrowed and
//! mutation-producing calls return a fresh `Draft`.

mod builtin;
mod catalog;
pub mod compose;
mod config;
pub mod draft;
mod error;
pub mod registry;
pub mod tone;

pub use catalog::LabCatalog;
pub use compose::{
    build_sentence, compose, preview_tokens, selected_tags_for_draft, selected_values_for_lab,
    Composition, FormatterKind, PreviewToken, DEFAULT_EMPTY_STATE,
};
pub use config::StudioConfig;
pub use draft::{
    create_default_alchemy_draft, randomize_alchemy_draft, reset_alchemy_draft, sanitize_draft,
    select_chip_in_draft, set_source_context_in_draft, set_template_in_draft, set_warmth_in_draft,
    Draft, DEFAULT_WARMTH, OPTIONAL_SKIP_PROBABILITY,
};
pub use error::AlchemyError;
pub use registry::{
    get_bank_by_slot, get_chip_by_id, get_template, AlchemyLab, BeyondLab, Chip, ChipBank,
    ClientStatement, LabConfig, LimitingPattern, MindLiberatingLab, PatternSequence,
    QuestionerLab, RelationScenario, RelationsLab, Template, TextVariants,
};
pub use tone::{chip_text_for_warmth, warmth_bucket, WarmthBucket};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
