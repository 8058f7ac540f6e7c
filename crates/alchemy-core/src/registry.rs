//! Chip Bank Registry: lab configuration types and pure lookups.
//!
//! Lab configurations are built once at startup (see `LabCatalog`) and never mutated.
//! Lookups never fail loudly: an unknown id is simply `None`, which callers treat
//! as "no selection".
//!
//! | Kind | Variant | Carries |
//! |------|---------|---------|
//! | `alchemy` | `AlchemyLab` | templates + chip banks (sentence composition) |
//! | `questioner` | `QuestionerLab` | client statements to question |
//! | `beyond` | `BeyondLab` | limiting beliefs to loosen |
//! | `relations` | `RelationsLab` | two-party relationship scenarios |
//! | `mind-liberating` | `MindLiberatingLab` | ordered pattern sequences |

use crate::compose::FormatterKind;
use crate::draft::DEFAULT_WARMTH;
use serde::{Deserialize, Serialize};

fn default_level() -> u8 {
    50
}

/// Literal chip text per tone bucket. Any bucket may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextVariants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm: Option<String>,
}

/// A selectable unit of sentence text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub id: String,
    #[serde(default)]
    pub text_variants: TextVariants,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Carried attributes (0–100); rendering does not read them.
    #[serde(default = "default_level")]
    pub intensity: u8,
    #[serde(default = "default_level")]
    pub directness: u8,
    #[serde(default = "default_level")]
    pub softness: u8,
}

impl Chip {
    /// Chip with only a neutral variant; chain `cold`/`warm`/`tags` to fill in the rest.
    pub fn new(id: &str, neutral: &str) -> Self {
        Self {
            id: id.to_string(),
            text_variants: TextVariants {
                neutral: Some(neutral.to_string()),
                ..TextVariants::default()
            },
            tags: Vec::new(),
            intensity: default_level(),
            directness: default_level(),
            softness: default_level(),
        }
    }

    pub fn cold(mut self, text: &str) -> Self {
        self.text_variants.cold = Some(text.to_string());
        self
    }

    pub fn warm(mut self, text: &str) -> Self {
        self.text_variants.warm = Some(text.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn levels(mut self, intensity: u8, directness: u8, softness: u8) -> Self {
        self.intensity = intensity.min(100);
        self.directness = directness.min(100);
        self.softness = softness.min(100);
        self
    }
}

/// The chips available for one sentence slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipBank {
    pub id: String,
    pub slot_id: String,
    /// Human-readable slot label, shown on preview tokens.
    #[serde(default)]
    pub label: String,
    /// Optional slots may stay empty in a valid sentence.
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub chips: Vec<Chip>,
}

impl ChipBank {
    pub fn chip(&self, chip_id: &str) -> Option<&Chip> {
        self.chips.iter().find(|c| c.id == chip_id)
    }

    /// Default selection for this bank: first chip when required, empty when optional.
    pub fn default_selection(&self) -> String {
        if self.optional {
            return String::new();
        }
        self.chips.first().map(|c| c.id.clone()).unwrap_or_default()
    }
}

/// Ordered slot sequence plus the assembly rule that shapes the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub slot_order: Vec<String>,
    #[serde(default)]
    pub required_slot_ids: Vec<String>,
    #[serde(rename = "formatterId", default)]
    pub formatter: FormatterKind,
}

/// Sentence-composition lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlchemyLab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub banks: Vec<ChipBank>,
    #[serde(default)]
    pub default_warmth: Option<u8>,
    /// Shown instead of a sentence when no slot is filled.
    #[serde(default)]
    pub empty_state: String,
}

impl AlchemyLab {
    pub fn default_warmth(&self) -> u8 {
        self.default_warmth.unwrap_or(DEFAULT_WARMTH).min(100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStatement {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionerLab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client_statements: Vec<ClientStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitingPattern {
    pub id: String,
    pub belief: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeyondLab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub patterns: Vec<LimitingPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationScenario {
    pub id: String,
    pub first_party: String,
    pub second_party: String,
    pub situation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationsLab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scenarios: Vec<RelationScenario>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSequence {
    pub id: String,
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindLiberatingLab {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sequences: Vec<PatternSequence>,
}

/// One lab, tagged by `kind`. Each kind carries only its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LabConfig {
    Alchemy(AlchemyLab),
    Questioner(QuestionerLab),
    Beyond(BeyondLab),
    Relations(RelationsLab),
    MindLiberating(MindLiberatingLab),
}

impl LabConfig {
    pub fn id(&self) -> &str {
        match self {
            Self::Alchemy(l) => &l.id,
            Self::Questioner(l) => &l.id,
            Self::Beyond(l) => &l.id,
            Self::Relations(l) => &l.id,
            Self::MindLiberating(l) => &l.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Alchemy(l) => &l.title,
            Self::Questioner(l) => &l.title,
            Self::Beyond(l) => &l.title,
            Self::Relations(l) => &l.title,
            Self::MindLiberating(l) => &l.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Alchemy(l) => &l.description,
            Self::Questioner(l) => &l.description,
            Self::Beyond(l) => &l.description,
            Self::Relations(l) => &l.description,
            Self::MindLiberating(l) => &l.description,
        }
    }

    /// The serialized `kind` tag.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Alchemy(_) => "alchemy",
            Self::Questioner(_) => "questioner",
            Self::Beyond(_) => "beyond",
            Self::Relations(_) => "relations",
            Self::MindLiberating(_) => "mind-liberating",
        }
    }

    pub fn as_alchemy(&self) -> Option<&AlchemyLab> {
        match self {
            Self::Alchemy(l) => Some(l),
            _ => None,
        }
    }
}

/// Named template, or the lab's first template when the id is omitted or unknown.
/// `None` only when the lab has no templates at all.
pub fn get_template<'a>(lab: &'a AlchemyLab, template_id: Option<&str>) -> Option<&'a Template> {
    template_id
        .and_then(|id| lab.templates.iter().find(|t| t.id == id))
        .or_else(|| lab.templates.first())
}

pub fn get_bank_by_slot<'a>(lab: &'a AlchemyLab, slot_id: &str) -> Option<&'a ChipBank> {
    lab.banks.iter().find(|b| b.slot_id == slot_id)
}

/// Chip `chip_id` within the bank for `slot_id`. An empty chip id is never found.
pub fn get_chip_by_id<'a>(lab: &'a AlchemyLab, slot_id: &str, chip_id: &str) -> Option<&'a Chip> {
    if chip_id.is_empty() {
        return None;
    }
    get_bank_by_slot(lab, slot_id)?.chip(chip_id)
}
