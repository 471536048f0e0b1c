use super::*;
use std::collections::HashMap;

fn config(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|k| env.get(k).cloned())
}

#[test]
fn test_defaults() {
    let c = config(&[]);
    assert!(c.gemini_api_key.is_none());
    assert_eq!(c.answer_mode, AnswerMode::AiOnly);
    assert_eq!(c.context_max_chars, DEFAULT_CONTEXT_MAX_CHARS);
    assert!(c.db_path.is_none());
}

#[test]
fn test_reads_values() {
    let c = config(&[
        ("GEMINI_API_KEY", "abc"),
        ("ANSWER_MODE", " Hybrid "),
        ("CSV_CONTEXT_MAX_CHARS", "5000"),
        ("RUPEELENS_DB", "/tmp/x.db"),
        ("RUPEELENS_LOG", "debug"),
    ]);
    assert_eq!(c.gemini_api_key.as_deref(), Some("abc"));
    assert_eq!(c.answer_mode, AnswerMode::Hybrid);
    assert_eq!(c.context_max_chars, 5000);
    assert_eq!(c.db_path, Some(PathBuf::from("/tmp/x.db")));
    assert_eq!(c.log_filter.as_deref(), Some("debug"));
}

#[test]
fn test_blank_key_is_missing() {
    let c = config(&[("GEMINI_API_KEY", "   ")]);
    assert!(c.gemini_api_key.is_none());
}

#[test]
fn test_bad_context_size_falls_back() {
    assert_eq!(
        config(&[("CSV_CONTEXT_MAX_CHARS", "lots")]).context_max_chars,
        DEFAULT_CONTEXT_MAX_CHARS
    );
    assert_eq!(
        config(&[("CSV_CONTEXT_MAX_CHARS", "0")]).context_max_chars,
        DEFAULT_CONTEXT_MAX_CHARS
    );
}

#[test]
fn test_answer_mode_parse() {
    assert_eq!(AnswerMode::parse("hybrid"), AnswerMode::Hybrid);
    assert_eq!(AnswerMode::parse("ai-only"), AnswerMode::AiOnly);
    assert_eq!(AnswerMode::parse("whatever"), AnswerMode::AiOnly);
    assert_eq!(AnswerMode::Hybrid.to_string(), "hybrid");
}
