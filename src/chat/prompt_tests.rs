use super::*;
use rust_decimal_macros::dec;

// ── clean_answer ──────────────────────────────────────────────

#[test]
fn test_clean_strips_bold_and_italic() {
    assert_eq!(
        clean_answer("You spent **Rs 500** on *food*"),
        "You spent Rs 500 on food"
    );
}

#[test]
fn test_clean_strips_list_prefixes() {
    let raw = "- Cut Swiggy\n* Cancel Netflix\n1. Walk more\n  2. Cook";
    assert_eq!(clean_answer(raw), "Cut Swiggy\nCancel Netflix\nWalk more\nCook");
}

#[test]
fn test_clean_collapses_blank_lines() {
    assert_eq!(clean_answer("One.\n\n\n\nTwo."), "One.\n\nTwo.");
}

#[test]
fn test_clean_spaces_after_sentences() {
    assert_eq!(clean_answer("Done.Next!Ok?Yes"), "Done. Next! Ok? Yes");
}

#[test]
fn test_clean_splits_decimals_too() {
    // Matches every punctuation mark followed by a non-space
    assert_eq!(clean_answer("Rs 12.50"), "Rs 12. 50");
}

#[test]
fn test_clean_trims() {
    assert_eq!(clean_answer("  \n hi \n"), "hi");
}

// ── truncate_context ──────────────────────────────────────────

#[test]
fn test_truncate_keeps_tail() {
    let (t, cut) = truncate_context("abcdef", 3);
    assert_eq!(t, "def");
    assert!(cut);
}

#[test]
fn test_truncate_noop_when_short() {
    let (t, cut) = truncate_context("abc", 3);
    assert_eq!(t, "abc");
    assert!(!cut);
}

#[test]
fn test_truncate_respects_char_boundaries() {
    let (t, cut) = truncate_context("₹₹₹₹", 2);
    assert_eq!(t, "₹₹");
    assert!(cut);
}

// ── prompts ───────────────────────────────────────────────────

#[test]
fn test_context_text_lines() {
    let txns = vec![Transaction {
        id: None,
        date: "2024-01-05".into(),
        time: None,
        description: "UPI - Swiggy".into(),
        original_description: String::new(),
        amount: dec!(-120),
        category: "Food & Dining".into(),
    }];
    assert_eq!(
        context_text(&txns),
        "On 2024-01-05 you spent ₹120.00 on Food & Dining: UPI - Swiggy"
    );
}

#[test]
fn test_ai_only_prompt_sections() {
    let p = ai_only_prompt("line1\nline2", true, "Top categories by spend: X", "Where can I save?");
    assert!(p.starts_with(SYSTEM_PROMPT));
    assert!(p.contains("Data (one line per transaction) [TRUNCATED]:"));
    assert!(p.contains("Helper summaries:\nTop categories by spend: X"));
    assert!(p.trim_end().ends_with("Question:\nWhere can I save?"));
}

#[test]
fn test_ai_only_prompt_without_helper() {
    let p = ai_only_prompt("line1", false, "", "hi");
    assert!(p.contains("Data (one line per transaction):"));
    assert!(!p.contains("Helper summaries"));
}

#[test]
fn test_hybrid_prompt() {
    let p = hybrid_prompt("ctx", "q?");
    assert!(p.contains("Here is the user's bank data (one per line):\n\nctx"));
    assert!(p.contains("Answer the following question based on this data:\nq?"));
}
