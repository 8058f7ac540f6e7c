//! Beyond drill: loosen a limiting belief. Rewards hedging, quantifier shifts
//! ("not always"), counter-examples, and staying close to the original wording;
//! penalizes absolutes that survive the rewrite.

use crate::scoring::{Feedback, Headlines, ScoreCard};
use crate::signals::{residual_absolutes, shared_words, COUNTER_EXAMPLE, HEDGE, QUANTIFIER_SHIFT};
use tracing::debug;

const BASE: i32 = 15;
const HEDGING: i32 = 20;
const SHIFT: i32 = 25;
const COUNTER: i32 = 15;
const PER_SHARED_WORD: i32 = 10;
const SHARED_WORD_CAP: i32 = 20;
const ABSOLUTE_PENALTY: i32 = 20;

const HEADLINES: Headlines = Headlines {
    great: "ריכוך מצוין: האמונה נשמעת עכשיו גמישה ומדויקת יותר.",
    almost: "כמעט: יש ריכוך, אפשר לשחרר עוד קצת.",
    needs_work: "האמונה עדיין נשמעת מוחלטת. נסו לרכך אותה.",
};

const EMPTY_PROMPT: &str = "נסחו מחדש את האמונה בצורה פחות מוחלטת.";

/// Score a rewrite of `limiting_belief`.
pub fn score_reframe(input: &str, limiting_belief: &str) -> Feedback {
    let input = input.trim();
    if input.is_empty() {
        return Feedback::empty(EMPTY_PROMPT);
    }

    let mut card = ScoreCard::new(BASE);
    card.reward(
        HEDGE.is_match(input),
        HEDGING,
        "יש מילות ריכוך (\"אולי\", \"לפעמים\").",
        "הוסיפו מילת ריכוך כמו \"אולי\" או \"לפעמים\".",
    )
    .reward(
        QUANTIFIER_SHIFT.is_match(input),
        SHIFT,
        "הכמת המוחלט הוחלף (\"לא תמיד\", \"חלק מ...\").",
        "החליפו את הכמת המוחלט (\"תמיד\", \"אף פעם\") בכמת חלקי.",
    )
    .reward(
        COUNTER_EXAMPLE.is_match(input),
        COUNTER,
        "הבאתם דוגמה נגדית.",
        "",
    )
    .penalize(
        residual_absolutes(input),
        ABSOLUTE_PENALTY,
        "עדיין נשארו מילים מוחלטות (\"תמיד\", \"כולם\", \"אף פעם\").",
    );

    let shared = shared_words(input, limiting_belief);
    if !shared.is_empty() {
        let points = (shared.len() as i32 * PER_SHARED_WORD).min(SHARED_WORD_CAP);
        card.add(points, "הניסוח נשאר צמוד לאמונה המקורית.".to_string());
    }

    let feedback = card.finish(&HEADLINES);
    debug!(
        target: "alchemy::drills::beyond",
        score = feedback.score,
        tier = feedback.tier.as_str(),
        "reframe scored"
    );
    feedback
}
