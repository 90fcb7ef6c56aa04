use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, ErrorCode, Frequency, HistoryFilter, InstallmentPlanCmd,
    TransactionInput, TransactionKind,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn salary() -> TransactionInput {
    TransactionInput::new("income", "fixed", "Salary", 3000.0, "Salary", "2026-10-05")
}

fn sofa_plan() -> InstallmentPlanCmd {
    InstallmentPlanCmd::new(
        "Sofa",
        1200.0,
        "Housing",
        TransactionKind::Expense,
        date(2026, 9, 15),
        12,
    )
}

#[tokio::test]
async fn create_then_fetch() {
    let (engine, _db) = engine_with_db().await;

    let created = engine.create_transaction(&salary()).await.unwrap();
    assert_eq!(created.kind, TransactionKind::Income);
    assert_eq!(created.date, date(2026, 10, 5));

    let fetched = engine.transaction(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn invalid_input_is_not_stored() {
    let (engine, _db) = engine_with_db().await;

    let mut input = salary();
    input.amount = Some(0.0);
    let err = engine.create_transaction(&input).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidAmount));

    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_ordered_by_date() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_transaction(&TransactionInput::new(
            "expense", "fixed", "Rent", 900.0, "Housing", "2026-10-20",
        ))
        .await
        .unwrap();
    engine.create_transaction(&salary()).await.unwrap();

    let descriptions: Vec<String> = engine
        .list_transactions()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(descriptions, vec!["Salary", "Rent"]);
}

#[tokio::test]
async fn installment_plan_is_stored_as_one_batch() {
    let (engine, _db) = engine_with_db().await;

    let rows = engine.create_installment_plan(&sofa_plan()).await.unwrap();
    assert_eq!(rows.len(), 12);

    let stored = engine.list_transactions().await.unwrap();
    assert_eq!(stored.len(), 12);
    let series = stored[0].series_id;
    assert!(series.is_some());
    assert!(stored.iter().all(|t| t.series_id == series));
    assert!(stored.iter().all(|t| t.frequency == Frequency::Installment));
    assert_eq!(stored[0].description, "Sofa (1/12)");
    assert_eq!(stored[11].date, date(2027, 8, 15));
}

#[tokio::test]
async fn installment_plan_rejects_bad_count() {
    let (engine, _db) = engine_with_db().await;

    let mut cmd = sofa_plan();
    cmd.count = 0;
    let err = engine.create_installment_plan(&cmd).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidInstallmentCount));
    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn installment_plan_rejects_long_expanded_description() {
    let (engine, _db) = engine_with_db().await;

    let mut cmd = sofa_plan();
    cmd.purchase.description = "x".repeat(95);
    let err = engine.create_installment_plan(&cmd).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::DescriptionTooLong));
}

#[tokio::test]
async fn replace_overwrites_every_field() {
    let (engine, _db) = engine_with_db().await;

    let created = engine.create_transaction(&salary()).await.unwrap();
    let replacement =
        TransactionInput::new("expense", "variable", "Books", 45.5, "Education", "2026-10-07");
    let replaced = engine
        .replace_transaction(created.id, &replacement)
        .await
        .unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.kind, TransactionKind::Expense);
    assert_eq!(replaced.description, "Books");
    assert_eq!(engine.transaction(created.id).await.unwrap(), replaced);
}

#[tokio::test]
async fn replace_keeps_series_of_installment_row() {
    let (engine, _db) = engine_with_db().await;

    let rows = engine.create_installment_plan(&sofa_plan()).await.unwrap();
    let target = &rows[3];
    let input = TransactionInput::new(
        "expense",
        "installment",
        "Sofa (4/12)",
        1200.0,
        "Housing",
        "2026-12-20",
    )
    .installment(12, 4, 100.0);

    let replaced = engine.replace_transaction(target.id, &input).await.unwrap();
    assert_eq!(replaced.series_id, target.series_id);
    assert_eq!(replaced.date, date(2026, 12, 20));
}

#[tokio::test]
async fn replace_and_delete_missing_row() {
    let (engine, _db) = engine_with_db().await;

    let missing = Uuid::new_v4();
    assert!(matches!(
        engine.replace_transaction(missing, &salary()).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_transaction(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.transaction(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn deleting_one_installment_keeps_the_others() {
    let (engine, _db) = engine_with_db().await;

    let rows = engine.create_installment_plan(&sofa_plan()).await.unwrap();
    engine.delete_transaction(rows[4].id).await.unwrap();

    let stored = engine.list_transactions().await.unwrap();
    assert_eq!(stored.len(), 11);
    assert!(stored.iter().all(|t| t.id != rows[4].id));

    let history = engine
        .history(&HistoryFilter::default(), date(2028, 1, 1))
        .await
        .unwrap();
    assert!(history.iter().all(|t| t.description.ends_with(" of 11)")));
}

#[tokio::test]
async fn summary_uses_installment_shares() {
    let (engine, _db) = engine_with_db().await;

    engine.create_transaction(&salary()).await.unwrap();
    engine.create_installment_plan(&sofa_plan()).await.unwrap();

    let figures = engine.summary(date(2026, 10, 19)).await.unwrap();
    assert_eq!(figures.monthly_income, 3000.0);
    assert_eq!(figures.monthly_expenses, 100.0);
    // Two shares posted so far: September and October.
    assert_eq!(figures.total_balance, 2800.0);
    assert_eq!(figures.pending_installments.count, 10);
}

#[tokio::test]
async fn collapsed_shows_one_row_per_series() {
    let (engine, _db) = engine_with_db().await;

    engine.create_transaction(&salary()).await.unwrap();
    engine.create_installment_plan(&sofa_plan()).await.unwrap();

    let entries = engine.collapsed(date(2026, 10, 19)).await.unwrap();
    assert_eq!(entries.len(), 2);

    let sofa = entries
        .iter()
        .find(|e| e.transaction.is_installment())
        .unwrap();
    let progress = sofa.progress.unwrap();
    assert_eq!(progress.paid, 2);
    assert_eq!(progress.total, 12);
    assert_eq!(progress.installment_value, 100.0);
    assert_eq!(progress.total_value, 1200.0);

    let salary = entries
        .iter()
        .find(|e| !e.transaction.is_installment())
        .unwrap();
    assert!(salary.progress.is_none());
}

#[tokio::test]
async fn corrupt_stored_row_is_a_database_error() {
    let (engine, db) = engine_with_db().await;

    let created = engine.create_transaction(&salary()).await.unwrap();
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "UPDATE transactions SET kind = ? WHERE id = ?",
        vec!["gift".into(), created.id.to_string().into()],
    ))
    .await
    .unwrap();

    assert!(matches!(
        engine.list_transactions().await,
        Err(EngineError::Database(_))
    ));
}
