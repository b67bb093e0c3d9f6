use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::Customer;

/// Database snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub customers: Vec<Customer>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all customers to CSV format: one row per stored customer
    /// with columns id, name, balance. Returns the number of data rows.
    pub async fn export_customers_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let customers = self.service.list_customers().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "name", "balance"])?;

        let mut count = 0;
        for customer in &customers {
            csv_writer.write_record([
                customer.id.to_string(),
                customer.name.clone(),
                format!("{:.2}", customer.balance),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let customers = self.service.list_customers().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            customers,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
