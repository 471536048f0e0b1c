use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::analytics::{AdvancedAnalytics, DashboardSummary};
use crate::categorize::Categorizer;
use crate::chat::{ChatEngine, ChatReply};
use crate::db::Database;
use crate::import::{CsvImporter, CsvProfile};
use crate::models::{Bank, Statement, Transaction};

pub(crate) const NO_DATA: &str = "No data found. Please upload a CSV first.";
pub(crate) const UPLOAD_FIRST: &str = "Please upload a CSV first.";

/// Sample Kotak statement bundled for trying the app without real data.
pub(crate) const DEMO_STATEMENT: &str = include_str!("../demos/kotak_sample.csv");
const DEMO_FILE_NAME: &str = "kotak_sample.csv";

/// Columns every imported statement is normalized to.
const NORMALIZED_COLUMNS: [&str; 6] = [
    "Date",
    "Time",
    "Description",
    "Original_Description",
    "Amount",
    "Category",
];

#[derive(Debug, thiserror::Error)]
pub(crate) enum UploadError {
    #[error("No file provided")]
    NoFile,
    #[error("Bank selection required")]
    NoBank,
    #[error("Error processing CSV: {0:#}")]
    Processing(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct UploadResponse {
    pub(crate) message: String,
    pub(crate) columns: Vec<String>,
    pub(crate) bank: String,
    pub(crate) transaction_count: usize,
}

/// Import a statement file as the current statement.
pub(crate) fn upload(
    db: &mut Database,
    path: Option<&Path>,
    bank: Option<Bank>,
) -> Result<UploadResponse, UploadError> {
    let path = path.ok_or(UploadError::NoFile)?;
    let bank = bank.ok_or(UploadError::NoBank)?;
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to read {}", path.display())))?;
    let content = String::from_utf8_lossy(&bytes);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    upload_content(db, &file_name, &content, bank)
}

/// Import statement text that is already in memory.
pub(crate) fn upload_content(
    db: &mut Database,
    file_name: &str,
    content: &str,
    bank: Bank,
) -> Result<UploadResponse, UploadError> {
    let (headers, rows) = CsvImporter::read(content)?;
    tracing::info!(bank = bank.as_str(), file_name, columns = ?headers, "processing statement");
    let profile = CsvProfile::for_bank(bank, &headers)?;
    let txns = CsvImporter::parse(&rows, &profile, &Categorizer::new());

    let statement = Statement::new(bank, file_name.to_string(), txns.len());
    db.replace_statement(&statement, &txns)?;

    let bank_upper = bank.as_str().to_uppercase();
    Ok(UploadResponse {
        message: format!(
            "CSV uploaded successfully! Processed {} {bank_upper} transactions",
            txns.len()
        ),
        columns: NORMALIZED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        bank: bank_upper,
        transaction_count: txns.len(),
    })
}

pub(crate) fn load_demo(db: &mut Database) -> Result<UploadResponse, UploadError> {
    upload_content(db, DEMO_FILE_NAME, DEMO_STATEMENT, Bank::Kotak)
}

/// Transactions of the current statement, or an error when nothing is loaded.
fn loaded_transactions(db: &Database) -> Result<Vec<Transaction>> {
    if db.current_statement()?.is_none() {
        anyhow::bail!(NO_DATA);
    }
    let txns = db.get_transactions()?;
    if txns.is_empty() {
        anyhow::bail!(NO_DATA);
    }
    Ok(txns)
}

pub(crate) fn dashboard(db: &Database) -> Result<DashboardSummary> {
    Ok(DashboardSummary::build(&loaded_transactions(db)?))
}

pub(crate) fn advanced_analytics(db: &Database) -> Result<AdvancedAnalytics> {
    Ok(AdvancedAnalytics::build(&loaded_transactions(db)?))
}

pub(crate) fn chat(db: &Database, engine: &ChatEngine, query: &str) -> Result<ChatReply> {
    if db.current_statement()?.is_none() {
        return Ok(ChatReply::new(UPLOAD_FIRST.into(), json!({ "rule": "no-data" })));
    }
    let txns = db.get_transactions()?;
    Ok(engine.answer(query, &txns))
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
