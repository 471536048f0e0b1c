use regex::Regex;
use std::sync::LazyLock;

const SAVINGS_KEYWORDS: &[&str] = &[
    "save",
    "saving",
    "savings",
    "waste",
    "wasted",
    "useless",
    "cut down",
    "reduce",
    "optimize",
    "where can i save",
];

pub(crate) const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[allow(clippy::unwrap_used)]
static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:on|category)\s+([\w &-]+)").unwrap());

#[allow(clippy::unwrap_used)]
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\b")
        .unwrap()
});

#[allow(clippy::unwrap_used)]
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

pub(crate) fn has_savings_intent(query: &str) -> bool {
    let q = query.to_lowercase();
    SAVINGS_KEYWORDS.iter().any(|k| q.contains(k))
}

/// A calendar month, optionally pinned to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthFilter {
    /// 1 = January
    pub(crate) month: u32,
    pub(crate) year: Option<i32>,
}

impl MonthFilter {
    pub(crate) fn name(&self) -> String {
        let idx = self.month.saturating_sub(1) as usize;
        let lower = MONTHS.get(idx).copied().unwrap_or("");
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// "September" or "September 2025".
    pub(crate) fn label(&self) -> String {
        match self.year {
            Some(y) => format!("{} {y}", self.name()),
            None => self.name(),
        }
    }

    /// Whether a "YYYY-MM-DD" date falls in this month.
    pub(crate) fn matches(&self, date: &str) -> bool {
        let mut parts = date.split('-');
        let year: Option<i32> = parts.next().and_then(|y| y.parse().ok());
        let month: Option<u32> = parts.next().and_then(|m| m.parse().ok());
        month == Some(self.month) && self.year.map_or(true, |y| year == Some(y))
    }
}

/// Questions answerable locally without a model, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LocalRule {
    Total,
    Highest,
    Lowest,
    CategoryInMonth {
        category: String,
        month: MonthFilter,
    },
    Category {
        category: String,
    },
    Month {
        month: MonthFilter,
    },
}

impl LocalRule {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
            Self::CategoryInMonth { .. } => "category+month",
            Self::Category { .. } => "category",
            Self::Month { .. } => "month",
        }
    }
}

pub(crate) fn match_rule(query: &str) -> Option<LocalRule> {
    let q = query.to_lowercase();

    if q.contains("total") {
        return Some(LocalRule::Total);
    }
    if ["highest", "largest", "max"].iter().any(|k| q.contains(k)) {
        return Some(LocalRule::Highest);
    }
    if ["lowest", "smallest", "min"].iter().any(|k| q.contains(k)) {
        return Some(LocalRule::Lowest);
    }

    let category = extract_category(&q);
    let month = extract_month(&q);
    match (category, month) {
        (Some(category), Some(month)) => Some(LocalRule::CategoryInMonth { category, month }),
        (Some(category), None) => Some(LocalRule::Category { category }),
        (None, Some(month)) => Some(LocalRule::Month { month }),
        (None, None) => None,
    }
}

/// Text after "on"/"category", cut before any " in <month>" tail.
fn extract_category(q: &str) -> Option<String> {
    let caps = CATEGORY_RE.captures(q)?;
    let mut term = caps.get(1)?.as_str();
    if let Some(idx) = term.find(" in ") {
        term = &term[..idx];
    }
    if let Some(m) = MONTH_RE.find(term) {
        term = &term[..m.start()];
    }
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}

fn extract_month(q: &str) -> Option<MonthFilter> {
    let name = MONTH_RE.captures(q)?.get(1)?.as_str();
    let month = MONTHS.iter().position(|m| *m == name)? as u32 + 1;
    let year = YEAR_RE
        .captures(q)
        .and_then(|c| c.get(1))
        .and_then(|y| y.as_str().parse().ok());
    Some(MonthFilter { month, year })
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
