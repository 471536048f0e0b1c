use super::*;

// ── savings intent ────────────────────────────────────────────

#[test]
fn test_savings_intent_keywords() {
    assert!(has_savings_intent("Where can I save money?"));
    assert!(has_savings_intent("Show me USELESS spending"));
    assert!(has_savings_intent("how do I cut down on food"));
    assert!(has_savings_intent("optimize my budget"));
    assert!(!has_savings_intent("What did I spend the most on?"));
    assert!(!has_savings_intent(""));
}

// ── rule precedence ───────────────────────────────────────────

#[test]
fn test_total_rule() {
    assert_eq!(match_rule("What is my total spending?"), Some(LocalRule::Total));
}

#[test]
fn test_total_beats_other_rules() {
    assert_eq!(
        match_rule("total on food in september"),
        Some(LocalRule::Total)
    );
}

#[test]
fn test_highest_and_lowest() {
    assert_eq!(match_rule("Show my highest transaction"), Some(LocalRule::Highest));
    assert_eq!(match_rule("largest payment?"), Some(LocalRule::Highest));
    assert_eq!(match_rule("smallest one"), Some(LocalRule::Lowest));
    assert_eq!(match_rule("what was the min"), Some(LocalRule::Lowest));
}

#[test]
fn test_category_rule() {
    assert_eq!(
        match_rule("How much on Food?"),
        Some(LocalRule::Category {
            category: "food".into()
        })
    );
    assert_eq!(
        match_rule("spending in category food & dining"),
        Some(LocalRule::Category {
            category: "food & dining".into()
        })
    );
}

#[test]
fn test_month_rule_with_year() {
    assert_eq!(
        match_rule("How much in September 2025?"),
        Some(LocalRule::Month {
            month: MonthFilter {
                month: 9,
                year: Some(2025)
            }
        })
    );
}

#[test]
fn test_month_rule_without_year() {
    assert_eq!(
        match_rule("spending in march"),
        Some(LocalRule::Month {
            month: MonthFilter {
                month: 3,
                year: None
            }
        })
    );
}

#[test]
fn test_category_in_month() {
    let rule = match_rule("How much did I spend on shopping in September 2025?").unwrap();
    assert_eq!(
        rule,
        LocalRule::CategoryInMonth {
            category: "shopping".into(),
            month: MonthFilter {
                month: 9,
                year: Some(2025)
            }
        }
    );
    assert_eq!(rule.name(), "category+month");
}

#[test]
fn test_no_rule_for_open_questions() {
    assert_eq!(match_rule("What did I spend the most on?"), None);
    assert_eq!(match_rule("Show my spending by category"), None);
    assert_eq!(match_rule("Which merchants cost me the most?"), None);
    assert_eq!(match_rule("How much did I spend this month?"), None);
}

#[test]
fn test_month_names_need_word_boundaries() {
    assert_eq!(match_rule("maybe i overspent"), None);
}

// ── MonthFilter ───────────────────────────────────────────────

#[test]
fn test_month_filter_matches() {
    let f = MonthFilter {
        month: 9,
        year: Some(2025),
    };
    assert!(f.matches("2025-09-14"));
    assert!(!f.matches("2024-09-14"));
    assert!(!f.matches("2025-10-01"));

    let any_year = MonthFilter {
        month: 9,
        year: None,
    };
    assert!(any_year.matches("2024-09-01"));
}

#[test]
fn test_month_filter_labels() {
    let f = MonthFilter {
        month: 1,
        year: None,
    };
    assert_eq!(f.label(), "January");
    let f = MonthFilter {
        month: 12,
        year: Some(2024),
    };
    assert_eq!(f.label(), "December 2024");
}
