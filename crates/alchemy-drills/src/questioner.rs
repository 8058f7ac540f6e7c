//! Questioner drill: score a therapist question asked in response to a client statement.

use crate::scoring::{Feedback, Headlines, ScoreCard};
use crate::signals::{shared_words, OPEN_QUESTION, RELATION_LINK, WHY_QUESTION};
use tracing::debug;

const BASE: i32 = 10;
const QUESTION_MARK: i32 = 20;
const OPEN_OPENER: i32 = 15;
const RELATION: i32 = 25;
const PER_SHARED_WORD: i32 = 10;
const SHARED_WORD_CAP: i32 = 25;
const WHY_PENALTY: i32 = 10;

const HEADLINES: Headlines = Headlines {
    great: "שאלה מצוינת: פתוחה, מחברת ונשענת על דברי המטופל.",
    almost: "כמעט שם: השאלה טובה, אפשר לחדד אותה עוד.",
    needs_work: "כדאי לעבוד על השאלה: נסו לפתוח אותה ולחבר בין חלקי הסיפור.",
};

const EMPTY_PROMPT: &str = "כתבו שאלה שהייתם שואלים בתגובה לאמירה של המטופל.";

/// Score a question against the client statement it answers.
pub fn score_question(input: &str, client_statement: &str) -> Feedback {
    let input = input.trim();
    if input.is_empty() {
        return Feedback::empty(EMPTY_PROMPT);
    }

    let mut card = ScoreCard::new(BASE);
    card.reward(
        input.contains('?'),
        QUESTION_MARK,
        "יש סימן שאלה: זו אכן שאלה.",
        "הוסיפו סימן שאלה כדי שיהיה ברור שזו שאלה.",
    )
    .reward(
        OPEN_QUESTION.is_match(input),
        OPEN_OPENER,
        "השאלה נפתחת במילת שאלה פתוחה.",
        "נסו לפתוח ב\"מה\", \"איך\" או \"מתי\" כדי להזמין תשובה מפורטת.",
    )
    .reward(
        RELATION_LINK.is_match(input),
        RELATION,
        "השאלה מחברת בין חלקים או אנשים בסיפור.",
        "נסו לשאול על הקשר בין דברים (\"איך זה משפיע על...\", \"בינך לבין...\").",
    )
    .penalize(
        WHY_QUESTION.is_match(input),
        WHY_PENALTY,
        "שאלות \"למה\" עלולות להישמע מאשימות; נסו \"מה גרם ל...\".",
    );

    let shared = shared_words(input, client_statement);
    if shared.is_empty() {
        card.reward(false, 0, "", "השתמשו במילים של המטופל כדי להראות שהקשבתם.");
    } else {
        let points = (shared.len() as i32 * PER_SHARED_WORD).min(SHARED_WORD_CAP);
        card.add(points, format!("נשענתם על מילות המטופל: {}.", shared.join(", ")));
    }

    let feedback = card.finish(&HEADLINES);
    debug!(
        target: "alchemy::drills::questioner",
        score = feedback.score,
        tier = feedback.tier.as_str(),
        "question scored"
    );
    feedback
}
