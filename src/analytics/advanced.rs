use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::dashboard::to_f64;
use super::stats;
use crate::models::Transaction;

const MAX_OUTLIERS: usize = 10;
const TOP_TRENDS: usize = 8;
const TOP_FREQUENT: usize = 8;
/// Business hours used when the statement has no times.
const FALLBACK_HOURS: std::ops::RangeInclusive<usize> = 9..=21;
/// Fields counted for completeness: date, description, original description, amount, category.
const QUALITY_FIELDS: usize = 5;

pub(crate) const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Statistics {
    pub(crate) mean: f64,
    pub(crate) median: f64,
    pub(crate) std: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) count: usize,
    pub(crate) q25: f64,
    pub(crate) q75: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Outlier {
    /// Signed, as on the statement.
    pub(crate) amount: f64,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CategoryTrend {
    pub(crate) category: String,
    pub(crate) avg: f64,
    pub(crate) median: f64,
    pub(crate) total: f64,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct FrequentMerchant {
    pub(crate) merchant: String,
    pub(crate) total: f64,
    pub(crate) avg: f64,
    pub(crate) count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DataQuality {
    pub(crate) total: usize,
    pub(crate) missing: usize,
    pub(crate) duplicates: usize,
    pub(crate) completeness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Insight {
    pub(crate) icon: String,
    pub(crate) title: String,
    pub(crate) text: String,
}

impl Insight {
    fn new(icon: &str, title: &str, text: String) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            text,
        }
    }
}

/// Statistical view of the current statement. Everything except `outliers`
/// works on absolute amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdvancedAnalytics {
    pub(crate) statistics: Statistics,
    pub(crate) outliers: Vec<Outlier>,
    pub(crate) category_trends: Vec<CategoryTrend>,
    pub(crate) weekday_spending: [f64; 7],
    pub(crate) hourly_spending: [f64; 24],
    pub(crate) frequent_merchants: Vec<FrequentMerchant>,
    pub(crate) data_quality: DataQuality,
    pub(crate) insights: Vec<Insight>,
}

impl AdvancedAnalytics {
    pub(crate) fn build(txns: &[Transaction]) -> Self {
        let amounts: Vec<f64> = txns.iter().map(|t| to_f64(t.abs_amount())).collect();
        let statistics = statistics(&amounts);
        let outliers = outliers(txns, &amounts, &statistics);
        let category_trends = category_trends(txns);
        let weekday_spending = weekday_spending(txns);
        let hourly_spending = hourly_spending(txns);
        let frequent_merchants = frequent_merchants(txns);
        let data_quality = data_quality(txns);

        let mut analytics = Self {
            statistics,
            outliers,
            category_trends,
            weekday_spending,
            hourly_spending,
            frequent_merchants,
            data_quality,
            insights: Vec::new(),
        };
        if !txns.is_empty() {
            analytics.insights = analytics.generate_insights();
        }
        analytics
    }

    fn generate_insights(&self) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(top) = self.category_trends.first() {
            insights.push(Insight::new(
                "📊",
                "Top Spending Category",
                format!(
                    "You spent the most on {} with ₹{:.2} across {} transactions.",
                    top.category, top.total, top.count
                ),
            ));
        }

        insights.push(Insight::new(
            "💰",
            "Largest Transaction",
            format!(
                "Your largest single transaction was ₹{:.2}. Review large purchases to identify savings opportunities.",
                self.statistics.max
            ),
        ));

        let (peak_idx, peak_total) = peak_weekday(&self.weekday_spending);
        insights.push(Insight::new(
            "📅",
            "Peak Spending Day",
            format!(
                "You spend the most on {} (₹{:.2}). Consider budgeting extra for this day.",
                WEEKDAYS[peak_idx], peak_total
            ),
        ));

        if let Some(m) = self.frequent_merchants.first() {
            insights.push(Insight::new(
                "🏪",
                "Most Frequent Merchant",
                format!(
                    "You transact most often with {} ({} times), spending ₹{:.2} in total.",
                    m.merchant, m.count, m.total
                ),
            ));
        }

        if self.statistics.mean > 0.0 {
            let cv = self.statistics.std / self.statistics.mean * 100.0;
            let consistency = if cv < 50.0 {
                "very consistent"
            } else if cv < 100.0 {
                "moderately consistent"
            } else {
                "highly variable"
            };
            let advice = if cv < 50.0 {
                "This is good!"
            } else {
                "Try to maintain consistent spending habits."
            };
            insights.push(Insight::new(
                "📈",
                "Spending Consistency",
                format!(
                    "Your spending is {consistency} with a coefficient of variation of {cv:.1}%. {advice}"
                ),
            ));
        }

        let q = &self.data_quality;
        if q.completeness >= 95.0 {
            insights.push(Insight::new(
                "✅",
                "Data Quality",
                format!(
                    "Your financial data is {:.1}% complete with only {} missing values. Excellent data quality!",
                    q.completeness, q.missing
                ),
            ));
        } else {
            insights.push(Insight::new(
                "⚠️",
                "Data Quality Warning",
                format!(
                    "Your data has {} missing values ({:.1}% complete). Consider data cleanup for better insights.",
                    q.missing, q.completeness
                ),
            ));
        }

        insights
    }
}

fn statistics(amounts: &[f64]) -> Statistics {
    Statistics {
        mean: stats::mean(amounts),
        median: stats::median(amounts),
        std: stats::std_dev(amounts),
        min: stats::min(amounts),
        max: stats::max(amounts),
        count: amounts.len(),
        q25: stats::quantile(amounts, 0.25),
        q75: stats::quantile(amounts, 0.75),
    }
}

/// Tukey fences on absolute amounts.
fn outliers(txns: &[Transaction], amounts: &[f64], s: &Statistics) -> Vec<Outlier> {
    let iqr = s.q75 - s.q25;
    let lower = s.q25 - 1.5 * iqr;
    let upper = s.q75 + 1.5 * iqr;
    txns.iter()
        .zip(amounts)
        .filter(|(_, a)| **a < lower || **a > upper)
        .take(MAX_OUTLIERS)
        .map(|(t, _)| Outlier {
            amount: to_f64(t.amount),
            description: t.description.clone(),
            category: t.category.clone(),
            date: t.date.clone(),
        })
        .collect()
}

/// Absolute amounts grouped by `key`, in key order.
fn grouped<'a>(
    txns: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> BTreeMap<&'a str, Vec<f64>> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for t in txns {
        groups
            .entry(key(t))
            .or_default()
            .push(to_f64(t.abs_amount()));
    }
    groups
}

fn category_trends(txns: &[Transaction]) -> Vec<CategoryTrend> {
    let mut trends: Vec<CategoryTrend> = grouped(txns, |t| t.category.as_str())
        .into_iter()
        .map(|(category, values)| CategoryTrend {
            category: category.to_string(),
            avg: stats::mean(&values),
            median: stats::median(&values),
            total: stats::sum(&values),
            count: values.len(),
        })
        .collect();
    trends.sort_by(|a, b| b.total.total_cmp(&a.total));
    trends.truncate(TOP_TRENDS);
    trends
}

fn frequent_merchants(txns: &[Transaction]) -> Vec<FrequentMerchant> {
    let mut merchants: Vec<FrequentMerchant> = grouped(txns, |t| t.description.as_str())
        .into_iter()
        .map(|(merchant, values)| FrequentMerchant {
            merchant: merchant.to_string(),
            total: stats::sum(&values),
            avg: stats::mean(&values),
            count: values.len(),
        })
        .collect();
    merchants.sort_by(|a, b| b.count.cmp(&a.count));
    merchants.truncate(TOP_FREQUENT);
    merchants
}

/// Monday = 0.
fn weekday_spending(txns: &[Transaction]) -> [f64; 7] {
    let mut days = [0.0; 7];
    for t in txns {
        if let Ok(d) = NaiveDate::parse_from_str(&t.date, "%Y-%m-%d") {
            days[d.weekday().num_days_from_monday() as usize] += to_f64(t.abs_amount());
        }
    }
    days
}

/// By hour of day. Without any times, total spend is spread evenly over
/// business hours instead.
fn hourly_spending(txns: &[Transaction]) -> [f64; 24] {
    let mut hours = [0.0; 24];
    let mut any_time = false;
    for t in txns {
        if let Some(h) = t.hour() {
            hours[h as usize] += to_f64(t.abs_amount());
            any_time = true;
        }
    }
    if !any_time && !txns.is_empty() {
        let total: f64 = txns.iter().map(|t| to_f64(t.abs_amount())).sum();
        let per_hour = total / FALLBACK_HOURS.clone().count() as f64;
        for h in FALLBACK_HOURS {
            hours[h] = per_hour;
        }
    }
    hours
}

fn data_quality(txns: &[Transaction]) -> DataQuality {
    let total = txns.len();
    let missing: usize = txns
        .iter()
        .map(|t| {
            [&t.date, &t.description, &t.original_description, &t.category]
                .iter()
                .filter(|f| f.trim().is_empty())
                .count()
        })
        .sum();

    let mut seen = HashSet::new();
    let duplicates = txns
        .iter()
        .filter(|t| {
            !seen.insert((
                t.date.as_str(),
                t.time.as_deref(),
                t.description.as_str(),
                t.original_description.as_str(),
                t.amount,
                t.category.as_str(),
            ))
        })
        .count();

    let completeness = if total == 0 {
        100.0
    } else {
        let cells = (total * QUALITY_FIELDS) as f64;
        ((cells - missing as f64) / cells * 100.0 * 100.0).round() / 100.0
    };

    DataQuality {
        total,
        missing,
        duplicates,
        completeness,
    }
}

/// Index and total of the highest weekday; earliest day on ties.
pub(crate) fn peak_weekday(days: &[f64; 7]) -> (usize, f64) {
    days.iter()
        .copied()
        .enumerate()
        .fold((0, days[0]), |best, (i, v)| if v > best.1 { (i, v) } else { best })
}

#[cfg(test)]
#[path = "advanced_tests.rs"]
mod tests;
