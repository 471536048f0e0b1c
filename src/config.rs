use std::fmt;
use std::path::PathBuf;

pub(crate) const DEFAULT_CONTEXT_MAX_CHARS: usize = 120_000;

/// How chat questions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum AnswerMode {
    /// Every question goes to the model with the full statement context.
    #[default]
    AiOnly,
    /// Local calculations first, the model only for everything else.
    Hybrid,
}

impl AnswerMode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::AiOnly => "ai-only",
            Self::Hybrid => "hybrid",
        }
    }

    /// Unknown values fall back to `ai-only`.
    pub(crate) fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hybrid" => Self::Hybrid,
            _ => Self::AiOnly,
        }
    }
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Config {
    pub(crate) gemini_api_key: Option<String>,
    pub(crate) gemini_api_base: Option<String>,
    pub(crate) answer_mode: AnswerMode,
    pub(crate) context_max_chars: usize,
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) log_filter: Option<String>,
}

impl Config {
    /// Read settings from the environment after loading a `.env` file if present.
    pub(crate) fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let context_max_chars = non_empty("CSV_CONTEXT_MAX_CHARS")
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONTEXT_MAX_CHARS);

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_api_base: non_empty("GEMINI_API_BASE"),
            answer_mode: non_empty("ANSWER_MODE")
                .map(|v| AnswerMode::parse(&v))
                .unwrap_or_default(),
            context_max_chars,
            db_path: non_empty("RUPEELENS_DB").map(PathBuf::from),
            log_filter: non_empty("RUPEELENS_LOG"),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
