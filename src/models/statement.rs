use super::Bank;

/// Metadata of the statement currently loaded. Only one exists at a time.
#[derive(Debug, Clone)]
pub struct Statement {
    pub id: Option<i64>,
    pub bank: Bank,
    pub file_name: String,
    pub imported_at: String,
    pub transaction_count: usize,
}

impl Statement {
    pub fn new(bank: Bank, file_name: String, transaction_count: usize) -> Self {
        Self {
            id: None,
            bank,
            file_name,
            imported_at: chrono::Utc::now().to_rfc3339(),
            transaction_count,
        }
    }
}
