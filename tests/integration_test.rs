use anyhow::Result;
use tallybook::application::{AppError, LedgerService};

mod common;
use common::{seed_customers, test_service};

#[tokio::test]
async fn test_add_then_search() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Alice", "100").await?;

    let balance = service.search("Alice").await?;
    assert_eq!(balance, 100.0);

    Ok(())
}

#[tokio::test]
async fn test_add_assigns_fresh_ids() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let alice = service.add_customer("Alice", "100").await?;
    let bob = service.add_customer("Bob", "200").await?;

    assert!(bob.id > alice.id);

    // Deleted ids are never reused (AUTOINCREMENT)
    service.delete_customer("Bob").await?;
    let carol = service.add_customer("Carol", "300").await?;
    assert!(carol.id > bob.id);

    Ok(())
}

#[tokio::test]
async fn test_record_payment_reduces_balance() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Alice", "100").await?;

    let new_balance = service.record_payment("Alice", "30").await?;
    assert_eq!(new_balance, 70.0);

    // The stored value stays at 70 until another payment
    assert_eq!(service.search("Alice").await?, 70.0);

    let after_second = service.record_payment("Alice", "30").await?;
    assert_eq!(after_second, 40.0);

    Ok(())
}

#[tokio::test]
async fn test_payment_may_drive_balance_negative() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Alice", "20").await?;
    let new_balance = service.record_payment("Alice", "50").await?;
    assert_eq!(new_balance, -30.0);

    Ok(())
}

#[tokio::test]
async fn test_payment_for_unknown_name_leaves_table_unchanged() -> Result<()> {
    let (service, _temp) = test_service().await?;

    seed_customers(&service).await?;

    let err = service.record_payment("Mallory", "30").await.unwrap_err();
    assert!(matches!(err, AppError::CustomerNotFound(_)));

    let customers = service.list_customers().await?;
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].balance, 100.0);
    assert_eq!(customers[1].balance, 250.50);

    Ok(())
}

#[tokio::test]
async fn test_search_unknown_name_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.search("Nobody").await.unwrap_err();
    assert!(matches!(err, AppError::CustomerNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_add_with_non_numeric_balance_inserts_no_row() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.add_customer("Alice", "abc").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    assert!(service.list_customers().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_with_empty_fields_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.add_customer("   ", "100").await.unwrap_err();
    assert!(matches!(err, AppError::MissingField("name")));

    let err = service.add_customer("Alice", "  ").await.unwrap_err();
    assert!(matches!(err, AppError::MissingField("balance")));

    assert!(service.list_customers().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_payment_with_non_numeric_amount_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Alice", "100").await?;

    let err = service.record_payment("Alice", "lots").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    assert_eq!(service.search("Alice").await?, 100.0);

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_all_rows_for_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Alice", "100").await?;
    service.add_customer("Alice", "200").await?;
    service.add_customer("Bob", "50").await?;

    let removed = service.delete_customer("Alice").await?;
    assert_eq!(removed, 2);

    let customers = service.list_customers().await?;
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name, "Bob");

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_name_is_a_noop() -> Result<()> {
    let (service, _temp) = test_service().await?;

    seed_customers(&service).await?;

    let removed = service.delete_customer("Mallory").await?;
    assert_eq!(removed, 0);
    assert_eq!(service.list_customers().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_names_payment_touches_first_row_only() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = service.add_customer("Alice", "100").await?;
    let second = service.add_customer("Alice", "500").await?;

    let new_balance = service.record_payment("Alice", "30").await?;
    assert_eq!(new_balance, 70.0);

    let customers = service.list_customers().await?;
    let by_id = |id: i64| {
        customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.balance)
            .unwrap()
    };
    assert_eq!(by_id(first.id), 70.0);
    assert_eq!(by_id(second.id), 500.0);

    // Search also resolves to the first row
    assert_eq!(service.search("Alice").await?, 70.0);

    Ok(())
}

#[tokio::test]
async fn test_list_preserves_insertion_order() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_customer("Zoe", "1").await?;
    service.add_customer("Ann", "2").await?;
    service.add_customer("Mia", "3").await?;

    let names: Vec<String> = service
        .list_customers()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Zoe", "Ann", "Mia"]);

    Ok(())
}

#[tokio::test]
async fn test_init_is_idempotent() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let path = db_path.to_str().unwrap();

    let service = LedgerService::init(path).await?;
    service.add_customer("Alice", "100").await?;
    drop(service);

    // Re-initializing must not clobber existing rows
    let service = LedgerService::init(path).await?;
    assert_eq!(service.search("Alice").await?, 100.0);

    Ok(())
}
