use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Please enter a value for {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors that should be shown as a status message rather
    /// than aborting the process: bad user input and lookup misses.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}
