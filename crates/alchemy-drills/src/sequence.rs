//! Pattern-sequence trainer: the user orders the steps of a pattern; score is the
//! share of steps in the right position.

use crate::scoring::{Feedback, Headlines, ScoreCard};
use tracing::debug;

const HEADLINES: Headlines = Headlines {
    great: "הרצף מדויק. הדפוס מופנם.",
    almost: "כמעט: רוב השלבים במקומם.",
    needs_work: "הסדר עדיין לא מדויק. עברו שוב על הדפוס.",
};

const EMPTY_PROMPT: &str = "סדרו את שלבי הדפוס לפי הסדר.";

fn normalize(step: &str) -> String {
    step.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Compare `steps` with `target` position by position.
pub fn score_sequence<S: AsRef<str>>(steps: &[S], target: &[String]) -> Feedback {
    let given: Vec<String> = steps
        .iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    if given.is_empty() || target.is_empty() {
        return Feedback::empty(EMPTY_PROMPT);
    }

    let mut card = ScoreCard::new(0);
    let mut matched = 0usize;
    for (idx, expected) in target.iter().enumerate() {
        match given.get(idx) {
            Some(step) if *step == normalize(expected) => matched += 1,
            Some(step) => {
                card.add(0, format!("שלב {}: \"{}\" במקום \"{}\".", idx + 1, step, expected));
            }
            None => {
                card.add(0, format!("שלב {} חסר: \"{}\".", idx + 1, expected));
            }
        }
    }
    if given.len() > target.len() {
        card.add(0, format!("יש {} שלבים מיותרים.", given.len() - target.len()));
    }
    let points = (matched * 100 / target.len()) as i32;
    card.add(points, format!("{matched} מתוך {} שלבים במקום הנכון.", target.len()));

    let feedback = card.finish(&HEADLINES);
    debug!(
        target: "alchemy::drills::sequence",
        matched,
        total = target.len(),
        score = feedback.score,
        "sequence scored"
    );
    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tier;

    fn target() -> Vec<String> {
        ["זיהוי המחשבה", "בדיקת ראיות", "חיפוש חריג", "ניסוח חלופה"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn exact_order_is_perfect() {
        let feedback = score_sequence(&target()[..], &target());
        assert_eq!(feedback.score, 100);
        assert_eq!(feedback.tier, Tier::Great);
        assert_eq!(feedback.messages.len(), 2);
    }

    #[test]
    fn swapped_steps_lose_points_with_itemized_feedback() {
        let steps = ["זיהוי  המחשבה", "חיפוש חריג", "בדיקת ראיות", "ניסוח חלופה"];
        let feedback = score_sequence(&steps, &target());
        assert_eq!(feedback.score, 50);
        assert_eq!(feedback.tier, Tier::NeedsWork);
        assert!(feedback.messages.iter().any(|m| m.starts_with("שלב 2")));
    }

    #[test]
    fn missing_steps_are_reported() {
        let steps = ["זיהוי המחשבה", "בדיקת ראיות", "חיפוש חריג"];
        let feedback = score_sequence(&steps, &target());
        assert_eq!(feedback.score, 75);
        assert!(feedback.messages.iter().any(|m| m.contains("חסר")));
    }

    #[test]
    fn no_steps_is_tier_none() {
        let steps: [&str; 1] = ["  "];
        assert_eq!(score_sequence(&steps, &target()).tier, Tier::None);
    }
}
