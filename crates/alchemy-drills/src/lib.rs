//! alchemy-drills: feedback for the training labs.
//!
//! Stateless regex heuristics that score free-text answers (questioner, beyond,
//! relations), the pattern-sequence trainer, and body-map somatic snapshots.
//! None of this depends on the composition engine.

pub mod beyond;
pub mod body_map;
pub mod questioner;
pub mod relations;
mod scoring;
pub mod sequence;
mod signals;

pub use beyond::score_reframe;
pub use body_map::{BodyMark, BodyZone, SomaticSnapshot};
pub use questioner::score_question;
pub use relations::{score_relation_question, RelationPrompt};
pub use scoring::{Feedback, Tier, ALMOST_THRESHOLD, GREAT_THRESHOLD};
pub use sequence::score_sequence;
