use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::models::Transaction;

const TOP_CATEGORIES: usize = 10;
const TOP_MERCHANTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MonthTotal {
    pub(crate) month: String,
    pub(crate) total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MerchantTotal {
    pub(crate) merchant: String,
    pub(crate) total: f64,
}

/// Headline numbers and breakdowns for the dashboard.
///
/// Breakdown totals are signed sums, so spending shows as negative and
/// income-heavy groups sort first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardSummary {
    pub(crate) total_spending: f64,
    pub(crate) total_transactions: usize,
    pub(crate) total_categories: usize,
    pub(crate) avg_transaction: f64,
    pub(crate) categories: Vec<CategoryTotal>,
    pub(crate) monthly: Vec<MonthTotal>,
    pub(crate) top_merchants: Vec<MerchantTotal>,
}

impl DashboardSummary {
    pub(crate) fn build(txns: &[Transaction]) -> Self {
        let total = txns
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount));
        let avg = if txns.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(txns.len())
        };
        let distinct: HashSet<&str> = txns.iter().map(|t| t.category.as_str()).collect();

        let categories = ranked_sums(txns, |t| t.category.as_str())
            .into_iter()
            .take(TOP_CATEGORIES)
            .map(|(category, total)| CategoryTotal { category, total })
            .collect();

        let monthly = signed_sums(txns, |t| t.month())
            .into_iter()
            .map(|(month, total)| MonthTotal {
                month,
                total: to_f64(total),
            })
            .collect();

        let top_merchants = ranked_sums(txns, |t| t.description.as_str())
            .into_iter()
            .take(TOP_MERCHANTS)
            .map(|(merchant, total)| MerchantTotal { merchant, total })
            .collect();

        Self {
            total_spending: to_f64(total.abs()),
            total_transactions: txns.len(),
            total_categories: distinct.len(),
            avg_transaction: to_f64(avg.abs()),
            categories,
            monthly,
            top_merchants,
        }
    }
}

/// Signed sums keyed by `key`, in key order. Saturates instead of overflowing.
fn signed_sums<'a>(
    txns: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> BTreeMap<String, Decimal> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in txns {
        let sum = sums.entry(key(t).to_string()).or_default();
        *sum = sum.saturating_add(t.amount);
    }
    sums
}

/// Signed sums sorted descending; ties keep key order.
fn ranked_sums<'a>(
    txns: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, Decimal)> = signed_sums(txns, key).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(k, v)| (k, to_f64(v))).collect()
}

pub(crate) fn to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
