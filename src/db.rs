use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

/// Categories inserted into an empty database
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Housing",
    "Entertainment",
    "Healthcare",
    "Salary",
    "Other",
];

const CREATE_CATEGORIES_TABLE: &str = "CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)";

const CREATE_RECORDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    category_id INTEGER REFERENCES categories(id),
    remarks TEXT
)";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A record joined with the name of its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecordWithCategory {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: Option<i64>,
    /// Empty when the record has no category
    pub category: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: Option<i64>,
    pub remarks: Option<String>,
}

/// How an update names the category of a record
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRef {
    Id(i64),
    /// Looked up by name, created when missing
    Name(String),
}

/// Partial update of a record; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub category: Option<CategoryRef>,
    /// `Some(None)` clears the remark
    pub remarks: Option<Option<String>>,
}

/// Shareable SQLite handle for use across async handlers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database named by `config.database_url`.
    ///
    /// The file is created when missing, and tables plus default categories
    /// are provisioned if they don't exist yet.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", config.database_url))?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives only as long as its connection, so it
        // must stay pinned to a single one.
        let in_memory = config.database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", config.database_url))?;

        tracing::info!("Successfully opened database: {}", config.database_url);

        auto_provision(&pool).await?;

        Ok(Self { pool })
    }

    /// Insert a record and return its id
    pub async fn add_record(&self, record: NewRecord) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO records (date, amount, category_id, remarks) VALUES (?, ?, ?, ?)",
        )
        .bind(record.date)
        .bind(record.amount)
        .bind(record.category_id)
        .bind(&record.remarks)
        .execute(&self.pool)
        .await
        .context("Failed to insert record")?;

        let id = result.last_insert_rowid();
        tracing::debug!("Inserted record with id: {}", id);
        Ok(id)
    }

    /// All records in insertion order, with category names
    pub async fn list_records(&self) -> Result<Vec<RecordWithCategory>> {
        let records = sqlx::query_as::<_, RecordWithCategory>(
            "SELECT r.id, r.date, r.amount, r.category_id,
                    COALESCE(c.name, '') AS category, r.remarks
             FROM records r
             LEFT JOIN categories c ON c.id = r.category_id
             ORDER BY r.id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to query records")?;

        tracing::debug!("Read {} records", records.len());
        Ok(records)
    }

    /// Delete a record.
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - No record with this id
    pub async fn delete_record(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete record")?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial update to a record inside a single transaction.
    ///
    /// A category given by name is created when no category has that name.
    ///
    /// # Returns
    /// * `Ok(true)` - Record updated
    /// * `Ok(false)` - No record with this id
    pub async fn update_record(&self, id: i64, update: RecordUpdate) -> Result<bool> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // The first statement must write: a deferred transaction that reads
        // first cannot upgrade its lock while another writer holds one, and
        // SQLite fails that upgrade without waiting on busy_timeout.
        let touched = sqlx::query("UPDATE records SET id = id WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to lock record")?
            .rows_affected();
        if touched == 0 {
            return Ok(false);
        }

        if let Some(date) = update.date {
            sqlx::query("UPDATE records SET date = ? WHERE id = ?")
                .bind(date)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update date")?;
        }

        if let Some(amount) = update.amount {
            sqlx::query("UPDATE records SET amount = ? WHERE id = ?")
                .bind(amount)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update amount")?;
        }

        if let Some(category) = update.category {
            let category_id = match category {
                CategoryRef::Id(category_id) => category_id,
                CategoryRef::Name(name) => {
                    let found: Option<i64> =
                        sqlx::query_scalar("SELECT id FROM categories WHERE name = ?")
                            .bind(&name)
                            .fetch_optional(&mut *tx)
                            .await
                            .context("Failed to look up category")?;
                    match found {
                        Some(category_id) => category_id,
                        None => {
                            let created = sqlx::query("INSERT INTO categories (name) VALUES (?)")
                                .bind(&name)
                                .execute(&mut *tx)
                                .await
                                .context("Failed to create category")?
                                .last_insert_rowid();
                            tracing::info!("Created category '{}' with id: {}", name, created);
                            created
                        }
                    }
                }
            };

            sqlx::query("UPDATE records SET category_id = ? WHERE id = ?")
                .bind(category_id)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update category")?;
        }

        if let Some(remarks) = update.remarks {
            sqlx::query("UPDATE records SET remarks = ? WHERE id = ?")
                .bind(remarks)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update remarks")?;
        }

        tx.commit().await.context("Failed to commit record update")?;
        tracing::debug!("Updated record with id: {}", id);
        Ok(true)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to query categories")
    }

    pub async fn category_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up category")?;
        Ok(found.is_some())
    }

    #[cfg(test)]
    pub(crate) async fn close(&self) {
        self.pool.close().await;
    }

    /// Perform a health check by executing `SELECT 1`
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Health check query failed")?;
        Ok(())
    }
}

/// Create tables and seed default categories if they don't exist
async fn auto_provision(pool: &SqlitePool) -> Result<()> {
    for ddl in [CREATE_CATEGORIES_TABLE, CREATE_RECORDS_TABLE] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .context("Failed to create table")?;
    }

    let category_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await
        .context("Failed to count categories")?;

    if category_count == 0 {
        for name in DEFAULT_CATEGORIES {
            sqlx::query("INSERT OR IGNORE INTO categories (name) VALUES (?)")
                .bind(*name)
                .execute(pool)
                .await
                .context("Failed to insert default category")?;
        }
        tracing::info!("Inserted {} default categories", DEFAULT_CATEGORIES.len());
    }

    Ok(())
}
