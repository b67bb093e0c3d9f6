// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tallybook::application::LedgerService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: a couple of customers with round balances
pub async fn seed_customers(service: &LedgerService) -> Result<()> {
    service.add_customer("Alice", "100").await?;
    service.add_customer("Bob", "250.50").await?;
    Ok(())
}
