//! Shared score shape: base + weighted signals, clamped to 0–100, tiered, with a
//! headline message ahead of the itemized ones.

use serde::{Deserialize, Serialize};

/// Tier thresholds. No derivation behind them; tune freely.
pub const GREAT_THRESHOLD: u8 = 75;
pub const ALMOST_THRESHOLD: u8 = 55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// No answer given yet.
    None,
    NeedsWork,
    Almost,
    Great,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        if score >= GREAT_THRESHOLD {
            Self::Great
        } else if score >= ALMOST_THRESHOLD {
            Self::Almost
        } else {
            Self::NeedsWork
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NeedsWork => "needs_work",
            Self::Almost => "almost",
            Self::Great => "great",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub score: u8,
    pub tier: Tier,
    /// Headline first, then one line per signal.
    pub messages: Vec<String>,
}

impl Feedback {
    /// Score 0, tier `None`, one instructive message.
    pub fn empty(prompt: &str) -> Self {
        Self {
            score: 0,
            tier: Tier::None,
            messages: vec![prompt.to_string()],
        }
    }

    pub fn headline(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or("")
    }
}

/// Per-scorer headline text for each tier.
pub(crate) struct Headlines {
    pub great: &'static str,
    pub almost: &'static str,
    pub needs_work: &'static str,
}

pub(crate) struct ScoreCard {
    score: i32,
    items: Vec<String>,
}

impl ScoreCard {
    pub fn new(base: i32) -> Self {
        Self {
            score: base,
            items: Vec::new(),
        }
    }

    /// Adds `points` and `praise` when the signal hit, otherwise records `tip`.
    pub fn reward(&mut self, hit: bool, points: i32, praise: &str, tip: &str) -> &mut Self {
        if hit {
            self.score += points;
            self.items.push(praise.to_string());
        } else if !tip.is_empty() {
            self.items.push(tip.to_string());
        }
        self
    }

    /// Subtracts `points` and records `warning` when the signal hit.
    pub fn penalize(&mut self, hit: bool, points: i32, warning: &str) -> &mut Self {
        if hit {
            self.score -= points;
            self.items.push(warning.to_string());
        }
        self
    }

    pub fn add(&mut self, points: i32, message: String) -> &mut Self {
        self.score += points;
        self.items.push(message);
        self
    }

    pub fn finish(self, headlines: &Headlines) -> Feedback {
        let score = self.score.clamp(0, 100) as u8;
        let tier = Tier::from_score(score);
        let headline = match tier {
            Tier::Great => headlines.great,
            Tier::Almost => headlines.almost,
            Tier::NeedsWork | Tier::None => headlines.needs_work,
        };
        let mut messages = Vec::with_capacity(self.items.len() + 1);
        messages.push(headline.to_string());
        messages.extend(self.items);
        Feedback {
            score,
            tier,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADLINES: Headlines = Headlines {
        great: "great",
        almost: "almost",
        needs_work: "keep going",
    };

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::from_score(100), Tier::Great);
        assert_eq!(Tier::from_score(75), Tier::Great);
        assert_eq!(Tier::from_score(74), Tier::Almost);
        assert_eq!(Tier::from_score(55), Tier::Almost);
        assert_eq!(Tier::from_score(54), Tier::NeedsWork);
        assert_eq!(Tier::from_score(0), Tier::NeedsWork);
    }

    #[test]
    fn score_is_clamped_and_headline_leads() {
        let mut card = ScoreCard::new(90);
        card.reward(true, 40, "signal", "tip");
        let feedback = card.finish(&HEADLINES);
        assert_eq!(feedback.score, 100);
        assert_eq!(feedback.messages, vec!["great", "signal"]);

        let mut card = ScoreCard::new(5);
        card.penalize(true, 30, "absolute");
        card.reward(false, 10, "praise", "try a question mark");
        let feedback = card.finish(&HEADLINES);
        assert_eq!(feedback.score, 0);
        assert_eq!(feedback.tier, Tier::NeedsWork);
        assert_eq!(feedback.headline(), "keep going");
        assert_eq!(feedback.messages.len(), 3);
    }

    #[test]
    fn empty_feedback_shape() {
        let feedback = Feedback::empty("write something");
        assert_eq!(feedback.score, 0);
        assert_eq!(feedback.tier, Tier::None);
        assert_eq!(feedback.messages, vec!["write something"]);
    }
}
