//! Adds an explicit series identifier to installment rows.
//!
//! Rows created before this migration keep a NULL `series_id` and are still
//! grouped by their description prefix.

use sea_orm_migration::prelude::*;

use crate::m20260301_000001_transactions::Transactions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum SeriesColumn {
    SeriesId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .add_column(ColumnDef::new(SeriesColumn::SeriesId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-series_id")
                    .table(Transactions::Table)
                    .col(SeriesColumn::SeriesId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-transactions-series_id")
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Transactions::Table)
                    .drop_column(SeriesColumn::SeriesId)
                    .to_owned(),
            )
            .await
    }
}
