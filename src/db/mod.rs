mod schema;

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::engine::MonthKey;
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
            // Fresh database - apply full schema
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

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Settings ──────────────────────────────────────────────

    /// The single global monthly income. Absent reads as zero.
    pub(crate) fn get_monthly_income(&self) -> Result<Decimal> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = 'monthly_income'",
            [],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(s) => Ok(Decimal::from_str(&s).unwrap_or_default()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Decimal::ZERO),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_monthly_income(&self, income: Decimal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES ('monthly_income', ?1)
             ON CONFLICT(key) DO UPDATE SET value = ?1",
            params![income.to_string()],
        )?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![cat.name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Deleting a category leaves its expenses and any allocation entry
    /// behind; both are keyed by name, not id.
    pub(crate) fn delete_category(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (category, amount, date_spent) VALUES (?1, ?2, ?3)",
            params![
                expense.category,
                expense.amount.to_string(),
                expense.date_spent.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, amount, date_spent FROM expenses
             ORDER BY date_spent DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            let date_str: String = row.get(3)?;
            let date_spent = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Expense {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                date_spent,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Goals ─────────────────────────────────────────────────

    pub(crate) fn insert_goal(&self, goal: &Goal) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO goals (target, start_date, end_date) VALUES (?1, ?2, ?3)",
            params![
                goal.target.to_string(),
                goal.start_date.format("%Y-%m-%d").to_string(),
                goal.end_date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, target, start_date, end_date FROM goals ORDER BY end_date, id")?;
        let rows = stmt.query_map([], |row| {
            let target_str: String = row.get(1)?;
            let parse_date = |idx: usize, s: String| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        idx,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })
            };
            let start_date = parse_date(2, row.get(2)?)?;
            let end_date = parse_date(3, row.get(3)?)?;
            Ok(Goal {
                id: Some(row.get(0)?),
                target: Decimal::from_str(&target_str).unwrap_or_default(),
                start_date,
                end_date,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn delete_goal(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Budget allocation ─────────────────────────────────────

    /// The persisted category-name -> amount map. Empty means no override
    /// has ever been saved and callers should fall back to the even split.
    pub(crate) fn load_allocation(&self) -> Result<BTreeMap<String, Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM allocations")?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let amount_str: String = row.get(1)?;
            Ok((name, Decimal::from_str(&amount_str).unwrap_or_default()))
        })?;
        Ok(rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()?)
    }

    /// Replace the whole persisted map. Last write wins.
    pub(crate) fn save_allocation(&mut self, allocation: &BTreeMap<String, Decimal>) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM allocations", [])?;
        for (category, amount) in allocation {
            tx.execute(
                "INSERT INTO allocations (category, amount) VALUES (?1, ?2)",
                params![category, amount.to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    /// Write expenses to a CSV file, optionally scoped to one month.
    /// Returns the number of rows written.
    pub(crate) fn export_expenses_csv(
        &self,
        path: &str,
        month: Option<MonthKey>,
    ) -> Result<usize> {
        let expenses = self.get_expenses()?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        writer.write_record(["date", "category", "amount"])?;

        let mut count = 0;
        for e in &expenses {
            if let Some(key) = month {
                if MonthKey::of(e.date_spent) != key {
                    continue;
                }
            }
            writer.write_record([
                e.date_spent.format("%Y-%m-%d").to_string(),
                e.category.clone(),
                e.amount.to_string(),
            ])?;
            count += 1;
        }
        writer.flush()?;
        Ok(count)
    }
}
