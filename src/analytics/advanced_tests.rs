#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn txn(date: &str, desc: &str, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id: None,
        date: date.into(),
        time: None,
        description: desc.into(),
        original_description: desc.into(),
        amount,
        category: category.into(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn sample() -> Vec<Transaction> {
    vec![
        // 2024-01-01 is a Monday
        txn("2024-01-01", "UPI - Swiggy", dec!(-100), "Food & Dining"),
        txn("2024-01-02", "UPI - Swiggy", dec!(-200), "Food & Dining"),
        txn("2024-01-03", "UPI - Uber", dec!(-300), "Transportation"),
        txn("2024-01-06", "Amazon", dec!(-400), "Shopping"),
        txn("2024-01-07", "Salary Credit", dec!(10000), "Income"),
    ]
}

// ── statistics & outliers ─────────────────────────────────────

#[test]
fn test_statistics_on_absolute_amounts() {
    let a = AdvancedAnalytics::build(&sample());
    let s = &a.statistics;
    assert_eq!(s.count, 5);
    assert!(close(s.mean, 2200.0));
    assert!(close(s.median, 300.0));
    assert!(close(s.min, 100.0));
    assert!(close(s.max, 10000.0));
    assert!(close(s.q25, 200.0));
    assert!(close(s.q75, 400.0));
}

#[test]
fn test_outliers_use_iqr_fences() {
    let a = AdvancedAnalytics::build(&sample());
    // IQR = 200, upper fence = 700
    assert_eq!(a.outliers.len(), 1);
    assert_eq!(a.outliers[0].description, "Salary Credit");
    assert_eq!(a.outliers[0].amount, 10000.0);
    assert_eq!(a.outliers[0].date, "2024-01-07");
}

#[test]
fn test_outliers_capped_and_in_statement_order() {
    let mut txns: Vec<Transaction> = (0..60)
        .map(|_| txn("2024-01-01", "Tea", dec!(-10), "Food & Dining"))
        .collect();
    for i in 0..12 {
        txns.push(txn("2024-01-02", &format!("Big {i}"), dec!(-5000), "Shopping"));
    }
    let a = AdvancedAnalytics::build(&txns);
    assert_eq!(a.outliers.len(), 10);
    assert_eq!(a.outliers[0].description, "Big 0");
    assert_eq!(a.outliers[9].description, "Big 9");
}

// ── groupings ─────────────────────────────────────────────────

#[test]
fn test_category_trends_by_total() {
    let a = AdvancedAnalytics::build(&sample());
    assert_eq!(a.category_trends[0].category, "Income");
    let food = a
        .category_trends
        .iter()
        .find(|c| c.category == "Food & Dining")
        .unwrap();
    assert_eq!(food.count, 2);
    assert!(close(food.avg, 150.0));
    assert!(close(food.median, 150.0));
    assert!(close(food.total, 300.0));
}

#[test]
fn test_frequent_merchants_by_count() {
    let a = AdvancedAnalytics::build(&sample());
    let top = &a.frequent_merchants[0];
    assert_eq!(top.merchant, "UPI - Swiggy");
    assert_eq!(top.count, 2);
    assert!(close(top.total, 300.0));
    assert!(close(top.avg, 150.0));
}

#[test]
fn test_weekday_spending_monday_first() {
    let a = AdvancedAnalytics::build(&sample());
    assert!(close(a.weekday_spending[0], 100.0));
    assert!(close(a.weekday_spending[1], 200.0));
    assert!(close(a.weekday_spending[2], 300.0));
    assert!(close(a.weekday_spending[5], 400.0));
    assert!(close(a.weekday_spending[6], 10000.0));
}

// ── hourly ────────────────────────────────────────────────────

#[test]
fn test_hourly_spread_without_times() {
    let a = AdvancedAnalytics::build(&sample());
    let per_hour = 11000.0 / 13.0;
    assert!(close(a.hourly_spending[8], 0.0));
    assert!(close(a.hourly_spending[9], per_hour));
    assert!(close(a.hourly_spending[21], per_hour));
    assert!(close(a.hourly_spending[22], 0.0));
}

#[test]
fn test_hourly_by_time_when_present() {
    let mut txns = sample();
    txns[0].time = Some("08:15".into());
    txns[3].time = Some("23:59".into());
    let a = AdvancedAnalytics::build(&txns);
    assert!(close(a.hourly_spending[8], 100.0));
    assert!(close(a.hourly_spending[23], 400.0));
    assert!(close(a.hourly_spending[12], 0.0));
}

// ── data quality ──────────────────────────────────────────────

#[test]
fn test_data_quality_counts() {
    let mut txns = sample();
    txns.push(txns[0].clone());
    txns.push(txn("2024-01-08", "", dec!(-5), "Other"));
    let a = AdvancedAnalytics::build(&txns);
    let q = &a.data_quality;
    assert_eq!(q.total, 7);
    assert_eq!(q.duplicates, 1);
    // empty description and empty original description
    assert_eq!(q.missing, 2);
    assert!(close(q.completeness, 94.29));
}

#[test]
fn test_data_quality_empty() {
    let a = AdvancedAnalytics::build(&[]);
    assert_eq!(a.data_quality.total, 0);
    assert!(close(a.data_quality.completeness, 100.0));
    assert!(a.insights.is_empty());
}

// ── insights ──────────────────────────────────────────────────

#[test]
fn test_insights_titles() {
    let a = AdvancedAnalytics::build(&sample());
    let titles: Vec<&str> = a.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Top Spending Category",
            "Largest Transaction",
            "Peak Spending Day",
            "Most Frequent Merchant",
            "Spending Consistency",
            "Data Quality",
        ]
    );
    assert!(a.insights[2].text.contains("Sunday"));
    assert!(a.insights[1].text.contains("₹10000.00"));
    assert!(a.insights[4].text.contains("highly variable"));
}

#[test]
fn test_consistent_spending_insight() {
    let txns: Vec<Transaction> = (0..5)
        .map(|_| txn("2024-01-01", "Tea", dec!(-10), "Food & Dining"))
        .collect();
    let a = AdvancedAnalytics::build(&txns);
    let c = a
        .insights
        .iter()
        .find(|i| i.title == "Spending Consistency")
        .unwrap();
    assert!(c.text.contains("very consistent"));
    assert!(c.text.ends_with("This is good!"));
}

#[test]
fn test_data_quality_warning_insight() {
    let txns = vec![txn("2024-01-01", "", dec!(-10), "")];
    let a = AdvancedAnalytics::build(&txns);
    let last = a.insights.last().unwrap();
    assert_eq!(last.title, "Data Quality Warning");
    assert_eq!(last.icon, "⚠️");
}

#[test]
fn test_peak_weekday_ties_pick_earliest() {
    assert_eq!(peak_weekday(&[0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0]), (1, 5.0));
    assert_eq!(peak_weekday(&[0.0; 7]), (0, 0.0));
}

#[test]
fn test_serializes_camel_case() {
    let json = serde_json::to_value(AdvancedAnalytics::build(&sample())).unwrap();
    assert_eq!(json["weekdaySpending"].as_array().unwrap().len(), 7);
    assert_eq!(json["hourlySpending"].as_array().unwrap().len(), 24);
    assert!(json.get("categoryTrends").is_some());
    assert!(json.get("frequentMerchants").is_some());
    assert!(json["dataQuality"].get("completeness").is_some());
}
