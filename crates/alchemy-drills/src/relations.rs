//! Relationship-question simulator: score a circular question about two parties.

use crate::scoring::{Feedback, Headlines, ScoreCard};
use crate::signals::{CIRCULAR, RELATION_LINK};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BASE: i32 = 10;
const QUESTION_MARK: i32 = 15;
const RELATION: i32 = 25;
const PARTY: i32 = 15;
const CIRCULAR_FORM: i32 = 20;

const HEADLINES: Headlines = Headlines {
    great: "שאלה מעגלית מצוינת: היא מאירה את הקשר ולא רק את האנשים.",
    almost: "כמעט: השאלה נוגעת בקשר, אפשר לכלול את שני הצדדים.",
    needs_work: "נסו לשאול על היחסים בין שני הצדדים, לא על כל אחד לחוד.",
};

const EMPTY_PROMPT: &str = "כתבו שאלה על הקשר בין שני האנשים בתרחיש.";

/// The two parties and situation the question is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationPrompt {
    pub first_party: String,
    pub second_party: String,
    pub situation: String,
}

fn mentions(input: &str, party: &str) -> bool {
    let party = party.trim().to_lowercase();
    !party.is_empty() && input.to_lowercase().contains(&party)
}

pub fn score_relation_question(input: &str, prompt: &RelationPrompt) -> Feedback {
    let input = input.trim();
    if input.is_empty() {
        return Feedback::empty(EMPTY_PROMPT);
    }

    let mut card = ScoreCard::new(BASE);
    card.reward(
        input.contains('?'),
        QUESTION_MARK,
        "זו שאלה.",
        "הוסיפו סימן שאלה.",
    )
    .reward(
        RELATION_LINK.is_match(input),
        RELATION,
        "השאלה עוסקת בקשר שבין הצדדים.",
        "שאלו על מה שקורה בין הצדדים (\"בין ... לבין\", \"איך זה משפיע על\").",
    )
    .reward(
        mentions(input, &prompt.first_party),
        PARTY,
        &format!("הזכרתם את {}.", prompt.first_party),
        &format!("שלבו את {} בשאלה.", prompt.first_party),
    )
    .reward(
        mentions(input, &prompt.second_party),
        PARTY,
        &format!("הזכרתם את {}.", prompt.second_party),
        &format!("שלבו את {} בשאלה.", prompt.second_party),
    )
    .reward(
        CIRCULAR.is_match(input),
        CIRCULAR_FORM,
        "ניסוח מעגלי: מבקש להסתכל מנקודת המבט של אחר.",
        "נסו ניסוח מעגלי: \"מה X היה אומר על...\".",
    );

    let feedback = card.finish(&HEADLINES);
    debug!(
        target: "alchemy::drills::relations",
        score = feedback.score,
        tier = feedback.tier.as_str(),
        "relation question scored"
    );
    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tier;

    fn prompt() -> RelationPrompt {
        RelationPrompt {
            first_party: "אמא".to_string(),
            second_party: "אחותך".to_string(),
            situation: "מאז החתונה הן כמעט לא מדברות".to_string(),
        }
    }

    #[test]
    fn circular_question_about_both_parties_is_great() {
        let feedback = score_relation_question(
            "מה אמא הייתה אומרת על מה שקורה בינה לבין אחותך?",
            &prompt(),
        );
        assert_eq!(feedback.score, 100);
        assert_eq!(feedback.tier, Tier::Great);
    }

    #[test]
    fn one_party_direct_question_is_almost() {
        let feedback = score_relation_question("איך זה משפיע על אמא?", &prompt());
        // 10 + 15 + 25 + 15
        assert_eq!(feedback.score, 65);
        assert_eq!(feedback.tier, Tier::Almost);
    }

    #[test]
    fn blank_is_tier_none() {
        assert_eq!(score_relation_question("\n", &prompt()).tier, Tier::None);
    }
}
