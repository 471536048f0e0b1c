pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS statements (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    bank              TEXT NOT NULL,
    file_name         TEXT NOT NULL DEFAULT '',
    imported_at       TEXT NOT NULL,
    transaction_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS transactions (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    statement_id          INTEGER NOT NULL REFERENCES statements(id) ON DELETE CASCADE,
    date                  TEXT NOT NULL,
    time                  TEXT,
    description           TEXT NOT NULL,
    original_description  TEXT NOT NULL DEFAULT '',
    amount                TEXT NOT NULL,
    category              TEXT NOT NULL DEFAULT 'Other'
);

CREATE INDEX IF NOT EXISTS idx_transactions_statement ON transactions(statement_id);
CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;
