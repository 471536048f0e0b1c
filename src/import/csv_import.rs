use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::clean::clean_description;
use crate::categorize::Categorizer;
use crate::models::{Bank, Transaction};

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d %b %Y", "%d-%b-%Y", "%d %B %Y", "%d/%m/%y", "%d-%b-%y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

/// Column layout of one statement, resolved from its header row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CsvProfile {
    pub(crate) bank: Bank,
    pub(crate) date_column: usize,
    pub(crate) description_column: usize,
    pub(crate) debit_column: Option<usize>,
    pub(crate) credit_column: Option<usize>,
    /// Signed single-column amount, used only without debit/credit columns.
    pub(crate) amount_column: Option<usize>,
    pub(crate) date_format: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Date,
    Description,
    Debit,
    Credit,
}

impl CsvProfile {
    /// Map header names to roles using the bank's naming conventions.
    /// The first column claiming a role keeps it.
    pub(crate) fn for_bank(bank: Bank, headers: &[String]) -> Result<Self> {
        let mut date_column = None;
        let mut description_column = None;
        let mut debit_column = None;
        let mut credit_column = None;
        let mut amount_column = None;

        for (idx, header) in headers.iter().enumerate() {
            let lc = header.trim().to_lowercase();
            let slot = match role_for(bank, &lc) {
                Some(Role::Date) => &mut date_column,
                Some(Role::Description) => &mut description_column,
                Some(Role::Debit) => &mut debit_column,
                Some(Role::Credit) => &mut credit_column,
                None if lc.contains("amount") => &mut amount_column,
                None => continue,
            };
            slot.get_or_insert(idx);
        }

        let date_column = date_column
            .with_context(|| format!("No date column found for {} format", bank.display_name()))?;
        let description_column = description_column.with_context(|| {
            format!("No description column found for {} format", bank.display_name())
        })?;
        if debit_column.is_none() && credit_column.is_none() && amount_column.is_none() {
            anyhow::bail!(
                "No debit/credit or amount columns found for {} format",
                bank.display_name()
            );
        }

        Ok(Self {
            bank,
            date_column,
            description_column,
            debit_column,
            credit_column,
            amount_column,
            date_format: match bank {
                Bank::Sbi => "%d %b %Y",
                Bank::Kotak | Bank::Axis => "%d/%m/%Y",
            },
        })
    }
}

fn role_for(bank: Bank, lc: &str) -> Option<Role> {
    let any = |needles: &[&str]| needles.iter().any(|n| lc.contains(n));
    match bank {
        Bank::Sbi => {
            if any(&["txn date", "transaction date"]) {
                Some(Role::Date)
            } else if any(&["description", "particulars"]) {
                Some(Role::Description)
            } else if any(&["debit"]) {
                Some(Role::Debit)
            } else if any(&["credit"]) {
                Some(Role::Credit)
            } else {
                None
            }
        }
        Bank::Kotak => {
            if any(&["date"]) {
                Some(Role::Date)
            } else if any(&["particulars", "description", "narration"]) {
                Some(Role::Description)
            } else if any(&["debit", "withdrawal"]) {
                Some(Role::Debit)
            } else if any(&["credit", "deposit"]) {
                Some(Role::Credit)
            } else {
                None
            }
        }
        Bank::Axis => {
            if any(&["tran date", "transaction date", "date"]) {
                Some(Role::Date)
            } else if any(&["description", "particulars"]) {
                Some(Role::Description)
            } else if any(&["withdrawal", "debit"]) {
                Some(Role::Debit)
            } else if any(&["deposit", "credit"]) {
                Some(Role::Credit)
            } else {
                None
            }
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Split statement text into its header row and data rows.
    pub(crate) fn read(content: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let content = content.trim_start_matches('\u{feff}');
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            anyhow::bail!("CSV file is empty");
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Ok((headers, rows))
    }

    /// Parse rows into categorized, cleaned transactions.
    /// Rows whose date cannot be read are dropped, like blank separator lines.
    pub(crate) fn parse(
        rows: &[Vec<String>],
        profile: &CsvProfile,
        categorizer: &Categorizer,
    ) -> Vec<Transaction> {
        let mut transactions = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let date_str = cell(row, Some(profile.date_column));
            let Some((date, time)) = parse_date(date_str, profile.date_format) else {
                tracing::debug!(row = i + 1, value = date_str, "skipping row without a valid date");
                continue;
            };
            let amount = row_amount(row, profile);

            let raw = cell(row, Some(profile.description_column));
            transactions.push(Transaction {
                id: None,
                date: date.format("%Y-%m-%d").to_string(),
                time: time.map(|t| t.format("%H:%M").to_string()),
                description: clean_description(profile.bank, raw),
                original_description: raw.to_string(),
                amount,
                category: categorizer.categorize(raw).to_string(),
            });
        }

        transactions
    }
}

fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|c| row.get(c))
        .map(|s| s.trim())
        .unwrap_or("")
}

fn parse_date(s: &str, fmt: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Some((d, None));
    }
    for fallback in FALLBACK_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Some((d, None));
        }
    }
    for dt_fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, dt_fmt) {
            return Some((dt.date(), Some(dt.time())));
        }
    }
    None
}

/// Credit minus debit; a signed amount column is the fallback layout.
/// Cells that do not parse count as zero.
fn row_amount(row: &[String], profile: &CsvProfile) -> Decimal {
    let amount = |column| parse_decimal(cell(row, column)).unwrap_or(Decimal::ZERO);
    if profile.debit_column.is_some() || profile.credit_column.is_some() {
        return amount(profile.credit_column).abs() - amount(profile.debit_column).abs();
    }
    amount(profile.amount_column)
}

/// Largest magnitude accepted for one cell. Keeps statement-wide sums far from
/// `Decimal`'s range.
pub(crate) const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['₹', ',', '"', ' '], "")
        .replace("INR", "")
        .replace("Rs.", "")
        .replace("Rs", "")
        .replace('(', "-")
        .replace(')', "");
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value =
        Decimal::from_str(&cleaned).with_context(|| format!("Failed to parse '{s}' as decimal"))?;
    if value.abs() > Decimal::from(MAX_AMOUNT) {
        anyhow::bail!("Amount '{s}' is out of range");
    }
    Ok(value)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
