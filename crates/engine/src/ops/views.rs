use chrono::NaiveDate;

use crate::{
    Figures, HistoryFilter, ResultEngine, SeriesProgress, Transaction, aggregation, grouping,
};

use super::Engine;

/// A row of the collapsed list: one per installment series, with its progress.
#[derive(Clone, Debug, PartialEq)]
pub struct CollapsedEntry {
    pub transaction: Transaction,
    pub progress: Option<SeriesProgress>,
}

impl Engine {
    /// Dashboard figures as of `as_of`.
    pub async fn summary(&self, as_of: NaiveDate) -> ResultEngine<Figures> {
        let transactions = self.list_transactions().await?;
        tracing::trace!(rows = transactions.len(), %as_of, "computing summary");
        Ok(aggregation::aggregate(&transactions, as_of))
    }

    /// Filtered transactions with installment descriptions regrouped.
    ///
    /// Series sizes are counted on the filtered list.
    pub async fn history(
        &self,
        filter: &HistoryFilter,
        as_of: NaiveDate,
    ) -> ResultEngine<Vec<Transaction>> {
        let transactions = self.list_transactions().await?;
        Ok(grouping::regroup(&filter.apply(&transactions, as_of)))
    }

    /// Every non installment row plus the first row of each installment series.
    pub async fn collapsed(&self, as_of: NaiveDate) -> ResultEngine<Vec<CollapsedEntry>> {
        let transactions = self.list_transactions().await?;
        Ok(grouping::collapse(&transactions)
            .into_iter()
            .map(|transaction| {
                let progress = grouping::series_progress(&transactions, &transaction, as_of);
                CollapsedEntry {
                    transaction,
                    progress,
                }
            })
            .collect())
    }
}
