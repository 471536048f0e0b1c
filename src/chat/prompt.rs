use regex::Regex;
use std::sync::LazyLock;

use crate::models::Transaction;

pub(crate) const SYSTEM_PROMPT: &str = "You are a helpful, concise personal finance chat agent. \
Reply in 2-3 short, plain sentences, spaced like a real chat. Never use Markdown, never use bullet points, \
never use headings, never use lists, never use bold or italics. No long answers. \
IMPORTANT: All amounts are in Indian Rupees (INR) - always use Rs or ₹ symbol, never dollars ($).";

const STYLE_PROMPT: &str = "You are a personal finance chat agent. Always reply in 2-3 short, plain sentences, \
spaced like a real chat. Never use Markdown, never use bullet points, never use headings, never use lists, \
never use bold or italics. Do not summarize categories or give long explanations.

IMPORTANT: All amounts are in Indian Rupees (INR). Always mention amounts with \"Rs\" or \"₹\" symbol, never use dollars ($).

When asked about saving money or useless spending, do this:
For each suggestion, mention the merchant/item, the amount spent in Rs, and if it is above the category median, \
say how much percent higher (e.g., 'You spent Rs 350 on Starbucks, which is 40% higher than your Food median. \
You can cut this habit.').
Give a concrete, actionable suggestion for each, like 'You can save by switching to regular coffee.'
If there is nothing to cut, say 'Your spending looks reasonable.'";

/// One line per transaction, in statement order.
pub(crate) fn context_text(txns: &[Transaction]) -> String {
    txns.iter()
        .map(Transaction::to_context_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep the last `max_chars` characters. Returns the text and whether it was cut.
pub(crate) fn truncate_context(text: &str, max_chars: usize) -> (&str, bool) {
    let len = text.chars().count();
    if len <= max_chars {
        return (text, false);
    }
    let skip = len - max_chars;
    let start = text
        .char_indices()
        .nth(skip)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (&text[start..], true)
}

/// Full prompt for the model-only answer mode.
pub(crate) fn ai_only_prompt(context: &str, truncated: bool, helper: &str, question: &str) -> String {
    let marker = if truncated { " [TRUNCATED]" } else { "" };
    let helper_block = if helper.is_empty() {
        String::new()
    } else {
        format!("Helper summaries:\n{helper}")
    };
    format!(
        "{SYSTEM_PROMPT}\n\n{STYLE_PROMPT}\n\nData (one line per transaction){marker}:\n\n{context}\n\n{helper_block}\n\nQuestion:\n{question}\n"
    )
}

/// Plain prompt used after local rules in hybrid mode.
pub(crate) fn hybrid_prompt(context: &str, question: &str) -> String {
    format!(
        "You are an AI personal finance assistant.\nHere is the user's bank data (one per line):\n\n{context}\n\n\
         Answer the following question based on this data:\n{question}\n"
    )
}

macro_rules! static_regex {
    ($name:ident, $re:expr) => {
        #[allow(clippy::unwrap_used)]
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).unwrap());
    };
}

static_regex!(BOLD_RE, r"\*\*([^*]+)\*\*");
static_regex!(ITALIC_RE, r"\*([^*]+)\*");
static_regex!(BULLET_RE, r"(?m)^\s*[-*]\s+");
static_regex!(NUMBERED_RE, r"(?m)^\s*\d+\.\s+");
static_regex!(BLANK_LINES_RE, r"\n{3,}");
static_regex!(SENTENCE_GAP_RE, r"([.!?])([^ \n])");

/// Flatten model output into plain chat text.
pub(crate) fn clean_answer(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = BULLET_RE.replace_all(&text, "");
    let text = NUMBERED_RE.replace_all(&text, "");
    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");
    let text = SENTENCE_GAP_RE.replace_all(&text, "$1 $2");
    text.trim().to_string()
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
