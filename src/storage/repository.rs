use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::Customer;

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying customers.
///
/// Owns the process-wide connection pool: constructed at startup, dropped
/// at shutdown. Operations are single statements invoked sequentially by
/// one caller; there is no concurrency control beyond SQLite's own.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to call repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a new customer and return it with its assigned id.
    pub async fn insert_customer(&self, name: &str, balance: f64) -> Result<Customer> {
        let row = sqlx::query(
            r#"
            INSERT INTO customers (name, balance)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(balance)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert customer")?;

        Ok(Customer::new(row.get("id"), name, balance))
    }

    /// Get the first customer matching a name, in storage (rowid) order.
    /// Names are not unique; later rows with the same name are ignored.
    pub async fn find_first_by_name(&self, name: &str) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, balance
            FROM customers
            WHERE name = ?
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch customer by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_customer(&row))),
            None => Ok(None),
        }
    }

    /// Set the balance of a single row, addressed by id.
    pub async fn set_balance(&self, id: i64, balance: f64) -> Result<()> {
        sqlx::query("UPDATE customers SET balance = ? WHERE id = ?")
            .bind(balance)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update balance")?;
        Ok(())
    }

    /// Delete all rows matching a name. Returns the number of rows removed;
    /// zero is not an error.
    pub async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM customers WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .context("Failed to delete customer")?;
        Ok(result.rows_affected())
    }

    /// List all customers in storage order (insertion order in practice).
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, balance
            FROM customers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list customers")?;

        Ok(rows.iter().map(Self::row_to_customer).collect())
    }

    fn row_to_customer(row: &sqlx::sqlite::SqliteRow) -> Customer {
        Customer {
            id: row.get("id"),
            name: row.get::<Option<String>, _>("name").unwrap_or_default(),
            balance: row.get::<Option<f64>, _>("balance").unwrap_or_default(),
        }
    }
}
