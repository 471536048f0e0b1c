mod intent;
mod llm;
mod prompt;
mod savings;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{AnswerMode, Config};
use crate::models::Transaction;
use intent::{has_savings_intent, match_rule, LocalRule};
use llm::{GeminiClient, LanguageModel};
use prompt::context_text;
use savings::local_savings_suggestions;

pub(crate) const GREETING: &str = "Hello! I'm your AI finance assistant. I can help you understand your \
spending patterns, find savings opportunities, and answer questions about your transactions. \
What would you like to know?";

pub(crate) const QUICK_QUESTIONS: [&str; 5] = [
    "Where can I save money?",
    "What did I spend the most on?",
    "Show my spending by category",
    "Which merchants cost me the most?",
    "How much did I spend this month?",
];

pub(crate) const INSIGHTS_QUERY: &str =
    "Give me 3 quick insights about my spending patterns and top saving opportunities";

pub(crate) const NO_KEY_MESSAGE: &str = "AI is not configured yet. Add GEMINI_API_KEY to your environment or .env file to enable AI answers.\n\
Meanwhile, try: 'What is my total spending?', 'How much on Food?', 'Show my highest transaction', or 'How much in September 2025?'.";

/// One chat answer with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChatReply {
    pub(crate) response: String,
    pub(crate) meta: Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub(crate) needs_key: bool,
}

impl ChatReply {
    pub(crate) fn new(response: String, meta: Value) -> Self {
        Self {
            response,
            meta,
            needs_key: false,
        }
    }

    pub(crate) fn is_error(&self) -> bool {
        self.meta.get("error").and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Answers questions about a statement using local rules and an optional model.
pub(crate) struct ChatEngine {
    mode: AnswerMode,
    model: Option<Box<dyn LanguageModel>>,
    context_max_chars: usize,
}

impl ChatEngine {
    pub(crate) fn new(
        mode: AnswerMode,
        model: Option<Box<dyn LanguageModel>>,
        context_max_chars: usize,
    ) -> Self {
        Self {
            mode,
            model,
            context_max_chars,
        }
    }

    /// Engine backed by Gemini when an API key is configured.
    pub(crate) fn from_config(config: &Config) -> Self {
        let model = config.gemini_api_key.as_ref().and_then(|key| {
            match GeminiClient::new(key.clone(), config.gemini_api_base.clone()) {
                Ok(client) => Some(Box::new(client) as Box<dyn LanguageModel>),
                Err(e) => {
                    tracing::error!(error = %e, "failed to build Gemini client");
                    None
                }
            }
        });
        Self::new(config.answer_mode, model, config.context_max_chars)
    }

    pub(crate) fn mode(&self) -> AnswerMode {
        self.mode
    }

    pub(crate) fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub(crate) fn answer(&self, query: &str, txns: &[Transaction]) -> ChatReply {
        tracing::info!(mode = %self.mode, chars = query.len(), "chat question");
        match self.mode {
            AnswerMode::AiOnly => self.answer_ai_only(query, txns),
            AnswerMode::Hybrid => self.answer_hybrid(query, txns),
        }
    }

    fn answer_ai_only(&self, query: &str, txns: &[Transaction]) -> ChatReply {
        let Some(model) = &self.model else {
            return self.no_key_reply();
        };

        let full_context = context_text(txns);
        let (context, truncated) = prompt::truncate_context(&full_context, self.context_max_chars);
        let savings = has_savings_intent(query);
        let helper = if savings {
            savings::summaries_for_llm(txns)
        } else {
            String::new()
        };
        let full_prompt = prompt::ai_only_prompt(context, truncated, &helper, query);

        match model.generate(&full_prompt) {
            Ok(generation) => ChatReply::new(
                prompt::clean_answer(&generation.text),
                json!({ "mode": "ai-only", "rule": "llm", "model": generation.model }),
            ),
            Err(e) if savings => {
                tracing::warn!(error = %e, "model failed, using local savings suggestions");
                ChatReply::new(
                    local_savings_suggestions(txns),
                    json!({ "mode": "ai-only", "rule": "llm", "error": true, "fallback": "local-savings" }),
                )
            }
            Err(e) => ChatReply::new(
                format!("LLM error: {e}."),
                json!({ "mode": "ai-only", "rule": "llm", "error": true }),
            ),
        }
    }

    fn answer_hybrid(&self, query: &str, txns: &[Transaction]) -> ChatReply {
        if let Some(rule) = match_rule(query) {
            if let Some(reply) = answer_locally(&rule, txns) {
                return reply;
            }
        }

        let Some(model) = &self.model else {
            return self.no_key_reply();
        };

        let full_context = context_text(txns);
        let (context, _) = prompt::truncate_context(&full_context, self.context_max_chars);
        match model.generate(&prompt::hybrid_prompt(context, query)) {
            Ok(generation) => ChatReply::new(
                generation.text.trim().to_string(),
                json!({ "mode": "hybrid", "rule": "llm", "model": generation.model }),
            ),
            Err(e) => ChatReply::new(
                format!("LLM error: {e}. Try asking for 'total' to use a local calculation."),
                json!({ "mode": "hybrid", "rule": "llm", "error": true }),
            ),
        }
    }

    fn no_key_reply(&self) -> ChatReply {
        ChatReply {
            response: NO_KEY_MESSAGE.into(),
            meta: json!({ "mode": self.mode.as_str(), "rule": "no-llm" }),
            needs_key: true,
        }
    }
}

/// Signed rupee amount, e.g. `₹1200.00` or `-₹45.50`.
pub(crate) fn fmt_inr(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{:.2}", amount.abs())
}

fn matches_category(category: &str, term: &str) -> bool {
    category.to_lowercase().contains(term)
}

/// Spending figure for a set of rows: the magnitude of their net amount.
fn spent<'a>(txns: impl Iterator<Item = &'a Transaction>) -> Decimal {
    txns.fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
        .abs()
}

/// Display name for a category term: the single category it matched, else the term.
fn category_label(txns: &[Transaction], term: &str) -> String {
    let mut names: Vec<&str> = txns
        .iter()
        .filter(|t| matches_category(&t.category, term))
        .map(|t| t.category.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();
    match names.as_slice() {
        [only] => (*only).to_string(),
        _ => term.to_string(),
    }
}

/// Answer a matched rule from the statement alone. `None` when the rule
/// cannot apply (e.g. highest of an empty statement).
fn answer_locally(rule: &LocalRule, txns: &[Transaction]) -> Option<ChatReply> {
    let (response, meta) = match rule {
        LocalRule::Total => (
            format!("Your total spending is {}.", fmt_inr(spent(txns.iter()))),
            json!({}),
        ),
        LocalRule::Highest | LocalRule::Lowest => {
            let highest = matches!(rule, LocalRule::Highest);
            // First occurrence wins on ties
            let mut pick: Option<&Transaction> = None;
            for t in txns {
                let better = pick.map_or(true, |p| {
                    if highest {
                        t.amount > p.amount
                    } else {
                        t.amount < p.amount
                    }
                });
                if better {
                    pick = Some(t);
                }
            }
            let t = pick?;
            let label = if highest { "Highest" } else { "Lowest" };
            (
                format!(
                    "{label} transaction is {} on {} for {}: {}",
                    fmt_inr(t.amount),
                    t.date,
                    t.category,
                    t.description
                ),
                json!({}),
            )
        }
        LocalRule::CategoryInMonth { category, month } => {
            let amount = spent(
                txns.iter()
                    .filter(|t| matches_category(&t.category, category) && month.matches(&t.date)),
            );
            let label = category_label(txns, category);
            (
                format!("You spent {} on {label} in {}.", fmt_inr(amount), month.label()),
                json!({ "category": label, "month": month.name(), "year": month.year }),
            )
        }
        LocalRule::Category { category } => {
            let amount = spent(txns.iter().filter(|t| matches_category(&t.category, category)));
            let label = category_label(txns, category);
            (
                format!("You spent {} on {label}.", fmt_inr(amount)),
                json!({ "category": label }),
            )
        }
        LocalRule::Month { month } => {
            let amount = spent(txns.iter().filter(|t| month.matches(&t.date)));
            (
                format!("You spent {} in {}.", fmt_inr(amount), month.label()),
                json!({ "month": month.name(), "year": month.year }),
            )
        }
    };

    let mut meta = meta;
    if let Value::Object(map) = &mut meta {
        map.insert("mode".into(), json!("hybrid"));
        map.insert("rule".into(), json!(rule.name()));
    }
    Some(ChatReply::new(response, meta))
}
