use chrono::Utc;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ErrorCode, InstallmentPlanCmd, ResultEngine, Transaction, TransactionInput,
    installments, transactions, validation,
};

use super::{Engine, with_tx};

fn not_found(id: Uuid) -> EngineError {
    EngineError::KeyNotFound(format!("transaction {id}"))
}

impl Engine {
    /// All transactions, oldest first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    pub async fn transaction(&self, id: Uuid) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found(id))?;

        Transaction::try_from(model)
    }

    /// Validate and store a single transaction.
    pub async fn create_transaction(&self, input: &TransactionInput) -> ResultEngine<Transaction> {
        let tx = Transaction::new(validation::validate(input)?);

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::for_insert(&tx, Utc::now())
                .insert(&db_tx)
                .await?;
            tracing::debug!(id = %tx.id, kind = tx.kind.as_str(), "transaction created");
            Ok(tx)
        })
    }

    /// Expand a purchase into monthly installments and store all of them
    /// atomically.
    pub async fn create_installment_plan(
        &self,
        cmd: &InstallmentPlanCmd,
    ) -> ResultEngine<Vec<Transaction>> {
        let purchase = &cmd.purchase;
        if purchase.description.trim().is_empty() || purchase.category.trim().is_empty() {
            return Err(EngineError::invalid(
                ErrorCode::MissingFields,
                "description and category are required",
            ));
        }
        validation::check_amount(purchase.total_amount)?;
        let rows = installments::expand(purchase, cmd.count)?;
        for row in &rows {
            validation::check_description(&row.description)?;
        }

        with_tx!(self, |db_tx| {
            let created_at = Utc::now();
            for row in &rows {
                transactions::ActiveModel::for_insert(row, created_at)
                    .insert(&db_tx)
                    .await?;
            }
            tracing::debug!(
                count = rows.len(),
                series_id = ?rows.first().and_then(|r| r.series_id),
                "installment plan created"
            );
            Ok(rows)
        })
    }

    /// Replace every field of an existing transaction.
    ///
    /// Last write wins: there is no version check.
    pub async fn replace_transaction(
        &self,
        id: Uuid,
        input: &TransactionInput,
    ) -> ResultEngine<Transaction> {
        let draft = validation::validate(input)?;

        with_tx!(self, |db_tx| {
            let existing = transactions::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(id))?;

            let mut tx = draft.into_transaction(id);
            // A replace that does not name a series keeps the stored one.
            if tx.is_installment() && tx.series_id.is_none() {
                tx.series_id = existing.series_id.and_then(|s| Uuid::parse_str(&s).ok());
            }

            transactions::ActiveModel::from(&tx).update(&db_tx).await?;
            tracing::debug!(%id, "transaction replaced");
            Ok(tx)
        })
    }

    /// Delete one transaction. Other rows of its installment series stay.
    pub async fn delete_transaction(&self, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = transactions::Entity::delete_by_id(id.to_string())
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(not_found(id));
            }
            tracing::debug!(%id, "transaction deleted");
            Ok(())
        })
    }
}
