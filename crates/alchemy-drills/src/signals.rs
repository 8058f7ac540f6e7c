//! Linguistic signal patterns (Hebrew + English), compiled once.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid signal pattern {pattern}: {e}"))
}

pub(crate) static OPEN_QUESTION: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^\s*(ו?מה|ו?איך|באיזה|באיזו|מתי|מי|what|how|when|who|in what way)\b")
});

pub(crate) static WHY_QUESTION: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(^|\s)(ו?למה|מדוע|why)(\s|$|\?)"));

pub(crate) static RELATION_LINK: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)(בינך לבין|בינו לבין|בינה לבין|בין .+ לבין|ביחס ל|הקשר בין|משפיע על|משפיעה על|קשור ל|בהשוואה ל|between .+ and|relationship|affects?|connected to|compared to)",
    )
});

pub(crate) static HEDGE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(אולי|לפעמים|ייתכן|יכול להיות|לעתים|בינתיים|עדיין לא|עד עכשיו|maybe|perhaps|sometimes|might|not yet|so far)")
});

pub(crate) static QUANTIFIER_SHIFT: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(לא תמיד|לא כולם|לא כל|חלק מ|רוב ה|פעם אחת|לפחות|כמה פעמים|not always|not everyone|not all|some of|most of|at least once)")
});

pub(crate) static COUNTER_EXAMPLE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(היה פעם ש|היתה פעם ש|הייתה פעם ש|זוכר פעם|חוץ מ|למעט|דווקא|except|there was a time|one time when)")
});

pub(crate) static ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(תמיד|אף פעם|כולם|אף אחד|כל הזמן|לעולם|always|never|everyone|nobody|all the time)")
});

pub(crate) static CIRCULAR: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)(מה .+ היה אומר|מה .+ הייתה אומרת|מה .+ היו אומרים|איך .+ היה רואה|איך .+ הייתה רואה|מי .+ יותר|what would .+ say|how would .+ see|who .+ more)",
    )
});

static WORD: Lazy<Regex> = Lazy::new(|| compile(r"\w{3,}"));

/// Words (3+ chars) of `reference` that appear anywhere in `input`, in reference order.
pub(crate) fn shared_words(input: &str, reference: &str) -> Vec<String> {
    let haystack = input.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for m in WORD.find_iter(reference) {
        let word = m.as_str().to_lowercase();
        if haystack.contains(&word) && !found.contains(&word) {
            found.push(word);
        }
    }
    found
}

/// Absolute words left once quantifier-shift phrases ("not always") are removed.
pub(crate) fn residual_absolutes(input: &str) -> bool {
    let residual = QUANTIFIER_SHIFT.replace_all(input, " ");
    ABSOLUTE.is_match(&residual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_question_openers() {
        assert!(OPEN_QUESTION.is_match("איך זה משפיע עלייך?"));
        assert!(OPEN_QUESTION.is_match("  What happened next?"));
        assert!(!OPEN_QUESTION.is_match("האם זה קרה?"));
    }

    #[test]
    fn why_is_detected_as_a_word() {
        assert!(WHY_QUESTION.is_match("למה הוא עשה את זה?"));
        assert!(WHY_QUESTION.is_match("But why?"));
        assert!(!WHY_QUESTION.is_match("whyever not"));
    }

    #[test]
    fn quantifier_shift_masks_absolute() {
        assert!(!residual_absolutes("לא תמיד אני נכשל"));
        assert!(residual_absolutes("אני תמיד נכשל"));
        assert!(!residual_absolutes("not always, sometimes"));
    }

    #[test]
    fn shared_words_finds_reference_terms() {
        let words = shared_words("מה קורה בעבודה כשלא מקשיבים?", "אף אחד בעבודה לא מקשיב לי");
        assert_eq!(words, vec!["בעבודה".to_string(), "מקשיב".to_string()]);
    }
}
