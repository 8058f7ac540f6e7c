//! Built-in lab catalog (Hebrew chip text).

use crate::compose::FormatterKind;
use crate::registry::{
    AlchemyLab, BeyondLab, Chip, ChipBank, ClientStatement, LabConfig, LimitingPattern,
    MindLiberatingLab, PatternSequence, QuestionerLab, RelationScenario, RelationsLab, Template,
};

fn bank(slot_id: &str, label: &str, optional: bool, chips: Vec<Chip>) -> ChipBank {
    ChipBank {
        id: format!("{slot_id}_bank"),
        slot_id: slot_id.to_string(),
        label: label.to_string(),
        optional,
        chips,
    }
}

fn template(
    id: &str,
    label: &str,
    slot_order: &[&str],
    required: &[&str],
    formatter: FormatterKind,
) -> Template {
    Template {
        id: id.to_string(),
        label: label.to_string(),
        slot_order: slot_order.iter().map(|s| s.to_string()).collect(),
        required_slot_ids: required.iter().map(|s| s.to_string()).collect(),
        formatter,
    }
}

pub(crate) fn labs() -> Vec<LabConfig> {
    vec![
        LabConfig::Alchemy(phrasing()),
        LabConfig::Alchemy(empathy()),
        LabConfig::Alchemy(boundaries()),
        LabConfig::Questioner(questioner()),
        LabConfig::Beyond(beyond()),
        LabConfig::Relations(relations()),
        LabConfig::MindLiberating(mind_liberating()),
    ]
}

fn phrasing() -> AlchemyLab {
    AlchemyLab {
        id: "phrasing".to_string(),
        title: "ניסוח מקצועי".to_string(),
        description: "הרכבת בקשה ברורה ומכבדת מתוך בנק ניסוחים".to_string(),
        templates: vec![
            template(
                "professional",
                "ניסוח מקצועי",
                &["opener", "quantifier", "context", "request", "closing"],
                &["opener", "request"],
                FormatterKind::Professional,
            ),
            template(
                "i_statement",
                "משפט אני",
                &["feeling", "context", "need", "request"],
                &["feeling", "need", "request"],
                FormatterKind::IStatement,
            ),
        ],
        banks: vec![
            bank(
                "opener",
                "פתיחה",
                false,
                vec![
                    Chip::new("opener_ask", "אני מבקש ש...")
                        .cold("אני דורש ש...")
                        .warm("אשמח מאוד ש...")
                        .tags(&["request", "direct"])
                        .levels(50, 70, 40),
                    Chip::new("opener_share", "רציתי לשתף ש...")
                        .cold("שמתי לב ש...")
                        .warm("חשוב לי לשתף אותך ש...")
                        .tags(&["observation"])
                        .levels(30, 40, 70),
                    Chip::new("opener_wish", "הייתי רוצה ש...")
                        .warm("הלוואי ש...")
                        .tags(&["wish", "soft"])
                        .levels(20, 30, 80),
                ],
            ),
            bank(
                "quantifier",
                "תדירות",
                true,
                vec![
                    Chip::new("q_sometimes", "לפעמים")
                        .cold("מדי פעם")
                        .warm("לפעמים, ואני יודע שזה לא בכוונה,")
                        .tags(&["quantifier"]),
                    Chip::new("q_lately", "בתקופה האחרונה")
                        .cold("לאחרונה")
                        .tags(&["quantifier", "time"]),
                    Chip::new("q_once", "לפחות פעם אחת").tags(&["quantifier"]),
                ],
            ),
            bank(
                "context",
                "הקשר",
                true,
                vec![
                    Chip::new("ctx_again", "כשזה קורה שוב")
                        .cold("כשזה חוזר על עצמו")
                        .warm("כשזה קורה שוב, וזה קשה לי,")
                        .tags(&["pattern"]),
                    Chip::new("ctx_schedule", "כשיש שינוי בלוח הזמנים")
                        .cold("בכל שינוי בלו\"ז")
                        .tags(&["work", "time"]),
                    Chip::new("ctx_meeting", "לפני הפגישה הבאה")
                        .warm("לפני שניפגש שוב")
                        .tags(&["work"]),
                ],
            ),
            bank(
                "request",
                "בקשה",
                false,
                vec![
                    Chip::new("req_update", "תעדכנו אותי")
                        .cold("עדכנו אותי מיד")
                        .warm("אשמח שתעדכנו אותי")
                        .tags(&["request", "communication"])
                        .levels(50, 80, 40),
                    Chip::new("req_time", "ניתן לי עוד קצת זמן")
                        .warm("תאפשרו לי עוד קצת זמן, זה יעזור לי מאוד")
                        .tags(&["request", "time"]),
                    Chip::new("req_talk", "נדבר על זה בשקט")
                        .cold("נדון בזה")
                        .warm("נשב לדבר על זה בנחת")
                        .tags(&["request", "dialogue"]),
                ],
            ),
            bank(
                "closing",
                "סיום",
                true,
                vec![
                    Chip::new("close_thanks", "תודה")
                        .cold("בהתאם")
                        .warm("תודה רבה על ההבנה")
                        .tags(&["gratitude"]),
                    Chip::new("close_together", "כדי שנוכל להמשיך יחד")
                        .warm("כי חשוב לי שנמשיך יחד")
                        .tags(&["connection"]),
                ],
            ),
            bank(
                "feeling",
                "רגש",
                false,
                vec![
                    Chip::new("feel_frustrated", "אני מרגיש תסכול")
                        .cold("אני מתוסכל")
                        .warm("אני מרגיש קצת תסכול")
                        .tags(&["feeling", "frustration"]),
                    Chip::new("feel_worried", "אני מרגיש דאגה")
                        .warm("אני קצת דואג")
                        .tags(&["feeling", "worry"]),
                    Chip::new("feel_hurt", "אני מרגיש פגוע")
                        .cold("זה פוגע בי")
                        .tags(&["feeling", "hurt"]),
                ],
            ),
            bank(
                "need",
                "צורך",
                false,
                vec![
                    Chip::new("need_clarity", "כי אני צריך בהירות")
                        .warm("כי בהירות עוזרת לי להרגיש בטוח")
                        .tags(&["need", "clarity"]),
                    Chip::new("need_respect", "כי חשוב לי כבוד הדדי")
                        .cold("כי נדרש כבוד הדדי")
                        .tags(&["need", "respect"]),
                    Chip::new("need_rest", "כי אני זקוק למנוחה").tags(&["need", "rest"]),
                ],
            ),
        ],
        default_warmth: Some(50),
        empty_state: "בחרו צ'יפים כדי להרכיב בקשה מקצועית".to_string(),
    }
}

fn empathy() -> AlchemyLab {
    AlchemyLab {
        id: "empathy".to_string(),
        title: "מעבדת אמפתיה".to_string(),
        description: "שיקוף, תיקוף והצעת נוכחות".to_string(),
        templates: vec![template(
            "empathy",
            "תגובה אמפתית",
            &["acknowledge", "reflect", "validate", "offer"],
            &["acknowledge", "validate"],
            FormatterKind::Empathy,
        )],
        banks: vec![
            bank(
                "acknowledge",
                "הכרה",
                false,
                vec![
                    Chip::new("ack_hear", "אני שומע אותך")
                        .cold("הבנתי")
                        .warm("אני כאן ושומע אותך")
                        .tags(&["presence"]),
                    Chip::new("ack_see", "אני רואה כמה זה משמעותי לך")
                        .warm("אני רואה כמה זה נוגע בך")
                        .tags(&["presence", "meaning"]),
                ],
            ),
            bank(
                "reflect",
                "שיקוף",
                true,
                vec![
                    Chip::new("ref_tired", "נשמע שאתה עייף מכל זה")
                        .warm("נשמע שזה ממש התיש אותך")
                        .tags(&["reflection"]),
                    Chip::new("ref_alone", "נשמע שהרגשת לבד עם זה").tags(&["reflection", "loneliness"]),
                ],
            ),
            bank(
                "validate",
                "תיקוף",
                false,
                vec![
                    Chip::new("val_makes_sense", "זה הגיוני להרגיש ככה")
                        .cold("התגובה שלך מובנת")
                        .warm("כל כך הגיוני להרגיש ככה")
                        .tags(&["validation"]),
                    Chip::new("val_anyone", "כל אחד במקומך היה מתקשה").tags(&["validation", "normalizing"]),
                ],
            ),
            bank(
                "offer",
                "הצעה",
                true,
                vec![
                    Chip::new("offer_listen", "ואני כאן אם תרצה לדבר")
                        .warm("ואני כאן בשבילך, מתי שתרצה")
                        .tags(&["support"]),
                    Chip::new("offer_help", "ואשמח לעזור במה שאפשר").tags(&["support", "action"]),
                ],
            ),
        ],
        default_warmth: Some(70),
        empty_state: "בחרו צ'יפים כדי להרכיב תגובה אמפתית".to_string(),
    }
}

fn boundaries() -> AlchemyLab {
    AlchemyLab {
        id: "boundaries".to_string(),
        title: "הצבת גבולות".to_string(),
        description: "גבול ברור, בנוסח תקיף או רך".to_string(),
        templates: vec![
            template(
                "boundary_firm",
                "גבול תקיף",
                &["observation", "limit", "consequence"],
                &["limit"],
                FormatterKind::BoundaryFirm,
            ),
            template(
                "boundary_soft",
                "גבול רך",
                &["care", "observation", "limit"],
                &["limit"],
                FormatterKind::BoundarySoft,
            ),
        ],
        banks: vec![
            bank(
                "observation",
                "תצפית",
                true,
                vec![
                    Chip::new("obs_late_calls", "כשמתקשרים אליי אחרי עשר בלילה")
                        .tags(&["time", "observation"]),
                    Chip::new("obs_raised_voice", "כשהטון עולה")
                        .cold("כשצועקים עליי")
                        .tags(&["tone", "observation"]),
                ],
            ),
            bank(
                "limit",
                "גבול",
                false,
                vec![
                    Chip::new("limit_not_answer", "אני לא אענה")
                        .cold("לא אענה")
                        .warm("אני בוחר לא לענות באותו רגע")
                        .tags(&["limit"])
                        .levels(60, 80, 30),
                    Chip::new("limit_pause", "אני אעצור את השיחה")
                        .warm("אני אבקש שנעצור לרגע")
                        .tags(&["limit", "pause"]),
                ],
            ),
            bank(
                "consequence",
                "השלכה",
                true,
                vec![
                    Chip::new("cons_next_day", "נחזור לזה למחרת")
                        .warm("ונחזור לזה למחרת בראש שקט")
                        .tags(&["follow-up"]),
                    Chip::new("cons_leave", "אם זה ימשיך, אצא מהחדר")
                        .cold("אם זה ימשיך, אצא")
                        .tags(&["consequence"]),
                ],
            ),
            bank(
                "care",
                "אכפתיות",
                true,
                vec![
                    Chip::new("care_matters", "הקשר בינינו חשוב לי")
                        .warm("אני מאוד אוהב אותך")
                        .tags(&["care", "connection"]),
                    Chip::new("care_understand", "אני מבין שזה דחוף לך").tags(&["care"]),
                ],
            ),
        ],
        default_warmth: None,
        empty_state: "בחרו צ'יפים כדי לנסח גבול".to_string(),
    }
}

fn questioner() -> QuestionerLab {
    QuestionerLab {
        id: "questioner".to_string(),
        title: "השואל".to_string(),
        description: "תרגול שאלות פתוחות שמחברות בין חלקי הסיפור".to_string(),
        client_statements: vec![
            ClientStatement {
                id: "nobody_listens".to_string(),
                text: "אף אחד בעבודה לא מקשיב לי".to_string(),
            },
            ClientStatement {
                id: "always_give_in".to_string(),
                text: "אני תמיד זה שמוותר בבית".to_string(),
            },
            ClientStatement {
                id: "mother_calls".to_string(),
                text: "אמא שלי מתקשרת כל יום ואני לא מצליח להגיד לה לא".to_string(),
            },
        ],
    }
}

fn beyond() -> BeyondLab {
    BeyondLab {
        id: "beyond".to_string(),
        title: "מעבר לדפוס".to_string(),
        description: "ריכוך אמונות מגבילות והחלפת כמתים מוחלטים".to_string(),
        patterns: vec![
            LimitingPattern {
                id: "never_finish".to_string(),
                belief: "אני אף פעם לא מצליח לסיים דברים".to_string(),
            },
            LimitingPattern {
                id: "everyone_judges".to_string(),
                belief: "כולם שופטים אותי כל הזמן".to_string(),
            },
            LimitingPattern {
                id: "always_fail".to_string(),
                belief: "אני תמיד נכשל בראיונות".to_string(),
            },
        ],
    }
}

fn relations() -> RelationsLab {
    RelationsLab {
        id: "relations".to_string(),
        title: "סימולטור יחסים".to_string(),
        description: "שאלות מעגליות על הקשר בין שני אנשים".to_string(),
        scenarios: vec![
            RelationScenario {
                id: "mother_sister".to_string(),
                first_party: "אמא".to_string(),
                second_party: "אחותך".to_string(),
                situation: "מאז החתונה הן כמעט לא מדברות".to_string(),
            },
            RelationScenario {
                id: "manager_team".to_string(),
                first_party: "המנהל".to_string(),
                second_party: "הצוות".to_string(),
                situation: "אחרי השינוי הארגוני יש מתח בישיבות".to_string(),
            },
        ],
    }
}

fn mind_liberating() -> MindLiberatingLab {
    MindLiberatingLab {
        id: "mind-liberating".to_string(),
        title: "שחרור התודעה".to_string(),
        description: "אימון על רצף השלבים של דפוס שחרור".to_string(),
        sequences: vec![
            PatternSequence {
                id: "reframe_cycle".to_string(),
                title: "מעגל מסגור מחדש".to_string(),
                steps: vec![
                    "זיהוי המחשבה".to_string(),
                    "בדיקת ראיות".to_string(),
                    "חיפוש חריג".to_string(),
                    "ניסוח חלופה".to_string(),
                ],
            },
            PatternSequence {
                id: "body_first".to_string(),
                title: "קודם הגוף".to_string(),
                steps: vec![
                    "נשימה".to_string(),
                    "סריקת גוף".to_string(),
                    "שיום התחושה".to_string(),
                    "בחירת צעד".to_string(),
                ],
            },
        ],
    }
}
