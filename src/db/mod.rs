mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);
        if current > schema::CURRENT_VERSION {
            anyhow::bail!(
                "Database schema version {current} is newer than this build supports ({})",
                schema::CURRENT_VERSION
            );
        }

        Ok(())
    }

    // ── Statement ─────────────────────────────────────────────

    /// Swap the current statement and its transactions for new ones in one
    /// transaction. Returns the new statement id.
    pub(crate) fn replace_statement(
        &mut self,
        statement: &Statement,
        txns: &[Transaction],
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM statements", [])?;
        tx.execute(
            "INSERT INTO statements (bank, file_name, imported_at, transaction_count)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                statement.bank.as_str(),
                statement.file_name,
                statement.imported_at,
                txns.len() as i64,
            ],
        )?;
        let statement_id = tx.last_insert_rowid();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions (statement_id, date, time, description, original_description, amount, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for txn in txns {
                stmt.execute(params![
                    statement_id,
                    txn.date,
                    txn.time,
                    txn.description,
                    txn.original_description,
                    txn.amount.to_string(),
                    txn.category,
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(
            statement_id,
            bank = statement.bank.as_str(),
            count = txns.len(),
            "replaced current statement"
        );
        Ok(statement_id)
    }

    pub(crate) fn current_statement(&self) -> Result<Option<Statement>> {
        let result = self.conn.query_row(
            "SELECT id, bank, file_name, imported_at, transaction_count
             FROM statements ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                let bank: String = row.get(1)?;
                let count: i64 = row.get(4)?;
                Ok((
                    row.get::<_, i64>(0)?,
                    bank,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    count,
                ))
            },
        );
        match result {
            Ok((id, bank, file_name, imported_at, count)) => {
                let bank = Bank::parse(&bank)
                    .with_context(|| format!("Unknown bank '{bank}' in statements table"))?;
                Ok(Some(Statement {
                    id: Some(id),
                    bank,
                    file_name,
                    imported_at,
                    transaction_count: usize::try_from(count).unwrap_or(0),
                }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM statements", [])?;
        tx.commit()?;
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    /// Transactions of the current statement in statement order.
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, time, description, original_description, amount, category
             FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(5)?;
            Ok(Transaction {
                id: Some(row.get(0)?),
                date: row.get(1)?,
                time: row.get(2)?,
                description: row.get(3)?,
                original_description: row.get(4)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}
