use std::collections::BTreeMap;

use crate::analytics::{stats, to_f64};
use crate::models::Transaction;

const MAX_SUGGESTIONS: usize = 6;
const TOP_CATEGORIES: usize = 3;
const TOP_DESCRIPTIONS: usize = 5;
const SUMMARY_ITEMS: usize = 5;
/// Average more than this far above the category median counts as a premium.
const PREMIUM_THRESHOLD: f64 = 0.2;
const HABIT_THRESHOLD: f64 = 1000.0;

/// Spending (absolute expense amounts) under one label.
#[derive(Debug, Default)]
struct SpendGroup {
    amounts: Vec<f64>,
    categories: BTreeMap<String, usize>,
}

impl SpendGroup {
    fn total(&self) -> f64 {
        stats::sum(&self.amounts)
    }

    /// Most frequent category; alphabetical on ties.
    fn category(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (cat, n) in &self.categories {
            if best.map_or(true, |(_, b)| *n > b) {
                best = Some((cat.as_str(), *n));
            }
        }
        best.map(|(c, _)| c)
    }

    fn is_subscription_like(&self) -> bool {
        self.amounts.len() >= 2 && self.amounts.windows(2).all(|w| w[0] == w[1])
    }
}

fn group_expenses<'a>(
    txns: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> BTreeMap<&'a str, SpendGroup> {
    let mut groups: BTreeMap<&str, SpendGroup> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.is_expense()) {
        let g = groups.entry(key(t)).or_default();
        g.amounts.push(to_f64(t.abs_amount()));
        *g.categories.entry(t.category.clone()).or_default() += 1;
    }
    groups
}

/// Groups sorted by total spend, largest first; ties keep label order.
fn ranked<'a>(groups: &'a BTreeMap<&'a str, SpendGroup>) -> Vec<(&'a str, &'a SpendGroup)> {
    let mut v: Vec<(&str, &SpendGroup)> = groups.iter().map(|(k, g)| (*k, g)).collect();
    v.sort_by(|a, b| b.1.total().total_cmp(&a.1.total()));
    v
}

fn rs_list(items: &[(&str, &SpendGroup)]) -> String {
    items
        .iter()
        .map(|(label, g)| format!("{label}: Rs {:.0}", g.total()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rule-based savings advice used when the model is unavailable.
pub(crate) fn local_savings_suggestions(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return "I need valid transaction data to suggest savings.".into();
    }

    let by_category = group_expenses(txns, |t| t.category.as_str());
    let by_description = group_expenses(txns, |t| t.description.as_str());
    let mut suggestions = Vec::new();

    let top_categories = ranked(&by_category);
    if !top_categories.is_empty() {
        let n = top_categories.len().min(TOP_CATEGORIES);
        suggestions.push(format!(
            "Your top spending categories are {}. Consider setting weekly limits for these.",
            rs_list(&top_categories[..n])
        ));
    }

    for (desc, group) in ranked(&by_description).into_iter().take(TOP_DESCRIPTIONS) {
        let total = group.total();
        let category = group.category().unwrap_or("Other");
        let median = by_category
            .get(category)
            .map(|c| stats::median(&c.amounts))
            .unwrap_or(0.0);
        let premium = if median > 0.0 {
            (stats::mean(&group.amounts) - median) / median
        } else {
            0.0
        };

        if premium > PREMIUM_THRESHOLD {
            suggestions.push(format!(
                "You spent Rs {total:.0} on {desc}, which is {:.0}% higher than your {category} median. \
                 You can save by switching to cheaper alternatives or reducing frequency.",
                premium * 100.0
            ));
        } else if total > HABIT_THRESHOLD {
            suggestions.push(format!(
                "You spent Rs {total:.0} on {desc} over {} visits. Consider reducing this habit to save money.",
                group.amounts.len()
            ));
        }
    }

    for (desc, group) in &by_description {
        if group.is_subscription_like() {
            suggestions.push(format!(
                "Subscription-like: {desc} appears {}× at Rs {:.0}. Check for plan downgrades or duplicate charges.",
                group.amounts.len(),
                group.amounts[0]
            ));
        }
    }

    if suggestions.is_empty() {
        return "I didn’t find clear savings patterns. Try asking about a specific category or merchant."
            .into();
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    format!(
        "Here are ways you can save based on your transactions:\n- {}",
        suggestions.join("\n- ")
    )
}

/// Short spending summaries appended to savings questions sent to the model.
pub(crate) fn summaries_for_llm(txns: &[Transaction]) -> String {
    let mut lines = Vec::new();

    let by_category = group_expenses(txns, |t| t.category.as_str());
    let cats = ranked(&by_category);
    if !cats.is_empty() {
        let n = cats.len().min(SUMMARY_ITEMS);
        lines.push(format!("Top categories by spend: {}", rs_list(&cats[..n])));
    }

    let by_description = group_expenses(txns, |t| t.description.as_str());
    let descs = ranked(&by_description);
    if !descs.is_empty() {
        let n = descs.len().min(SUMMARY_ITEMS);
        lines.push(format!("Top merchants/items: {}", rs_list(&descs[..n])));
    }

    lines.join("\n")
}

#[cfg(test)]
#[path = "savings_tests.rs"]
mod tests;
