use serde::{Deserialize, Serialize};

/// A customer row in the ledger.
///
/// The id is assigned by SQLite at insertion (AUTOINCREMENT) and is never
/// reused, even after the row is deleted. Names are not unique; balances
/// are signed and may go negative through payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub balance: f64,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }
}
