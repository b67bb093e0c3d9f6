use crate::domain::{parse_amount, Customer};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, GUI, TUI, etc.).
///
/// Amount arguments arrive as raw text, the way a presentation layer hands
/// them over, and are validated here: empty fields and non-numeric amounts
/// fail before any row is touched.
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        repo.migrate().await?;
        Ok(Self::new(repo))
    }

    /// Add a new customer with an initial balance.
    /// The balance arrives as text and must parse as a number.
    pub async fn add_customer(&self, name: &str, balance: &str) -> Result<Customer, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        if balance.trim().is_empty() {
            return Err(AppError::MissingField("balance"));
        }

        let balance = parse_amount(balance)
            .map_err(|_| AppError::InvalidAmount(balance.trim().to_string()))?;

        Ok(self.repo.insert_customer(name, balance).await?)
    }

    /// Record a payment against a customer's balance and return the new
    /// balance. With duplicate names only the first row is touched.
    pub async fn record_payment(&self, name: &str, amount: &str) -> Result<f64, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        if amount.trim().is_empty() {
            return Err(AppError::MissingField("payment amount"));
        }

        let amount =
            parse_amount(amount).map_err(|_| AppError::InvalidAmount(amount.trim().to_string()))?;

        let customer = self
            .repo
            .find_first_by_name(name)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(name.to_string()))?;

        let new_balance = customer.balance - amount;
        self.repo.set_balance(customer.id, new_balance).await?;
        Ok(new_balance)
    }

    /// Look up the balance of the first customer matching a name.
    pub async fn search(&self, name: &str) -> Result<f64, AppError> {
        let customer = self
            .repo
            .find_first_by_name(name.trim())
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(name.trim().to_string()))?;
        Ok(customer.balance)
    }

    /// Delete all customers matching a name. Returns the number of rows
    /// removed; deleting a name with no rows is a no-op, not an error.
    pub async fn delete_customer(&self, name: &str) -> Result<u64, AppError> {
        Ok(self.repo.delete_by_name(name.trim()).await?)
    }

    /// List all customers in storage order.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.repo.list_customers().await?)
    }
}
