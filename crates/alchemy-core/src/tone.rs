//! Tone resolution: the 0–100 warmth dial mapped to a discrete bucket, and the
//! chip text shown for that bucket.

use crate::registry::Chip;
use serde::{Deserialize, Serialize};

const COLD_MAX: u8 = 33;
const NEUTRAL_MAX: u8 = 66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmthBucket {
    Cold,
    Neutral,
    Warm,
}

impl WarmthBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Neutral => "neutral",
            Self::Warm => "warm",
        }
    }
}

/// `[0,33]` cold, `[34,66]` neutral, `[67,100]` warm. Anything above 100 is warm.
pub fn warmth_bucket(warmth: u8) -> WarmthBucket {
    match warmth {
        0..=COLD_MAX => WarmthBucket::Cold,
        34..=NEUTRAL_MAX => WarmthBucket::Neutral,
        _ => WarmthBucket::Warm,
    }
}

/// Chip text for the warmth's bucket. A missing (or blank) variant falls back
/// neutral → warm → cold → "" in that order.
pub fn chip_text_for_warmth(chip: &Chip, warmth: u8) -> &str {
    let variants = &chip.text_variants;
    let requested = match warmth_bucket(warmth) {
        WarmthBucket::Cold => variants.cold.as_deref(),
        WarmthBucket::Neutral => variants.neutral.as_deref(),
        WarmthBucket::Warm => variants.warm.as_deref(),
    };
    [
        requested,
        variants.neutral.as_deref(),
        variants.warm.as_deref(),
        variants.cold.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|text| !text.trim().is_empty())
    .unwrap_or("")
}
