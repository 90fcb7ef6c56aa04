use api_types::{
    installment::InstallmentPlanNew,
    transaction::{TransactionInput, TransactionView},
};
use uuid::Uuid;

use crate::{Client, Result};

/// Local copy of the transaction list, kept in date order.
///
/// Batch writes reload everything from the server. Single writes patch the
/// local list with the row the server returned.
#[derive(Debug)]
pub struct TransactionCache {
    client: Client,
    transactions: Vec<TransactionView>,
    loading: bool,
}

impl TransactionCache {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            transactions: Vec::new(),
            loading: false,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn transactions(&self) -> &[TransactionView] {
        &self.transactions
    }

    /// True while a full reload is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the local list with the server's. On failure the previous
    /// list is kept.
    pub async fn reload(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.client.list_transactions().await;
        self.loading = false;

        self.transactions = result?;
        tracing::debug!(rows = self.transactions.len(), "transaction cache reloaded");
        Ok(())
    }

    pub async fn create(&mut self, input: &TransactionInput) -> Result<TransactionView> {
        let created = self.client.create_transaction(input).await?;
        self.insert_sorted(created.clone());
        Ok(created)
    }

    pub async fn create_installment_plan(
        &mut self,
        plan: &InstallmentPlanNew,
    ) -> Result<Vec<TransactionView>> {
        let rows = self.client.create_installment_plan(plan).await?;
        self.reload().await?;
        Ok(rows)
    }

    pub async fn replace(&mut self, id: Uuid, input: &TransactionInput) -> Result<TransactionView> {
        let replaced = self.client.replace_transaction(id, input).await?;
        self.transactions.retain(|t| t.id != id);
        self.insert_sorted(replaced.clone());
        Ok(replaced)
    }

    /// Delete one row. Rows of the same installment series stay cached.
    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        self.client.delete_transaction(id).await?;
        self.transactions.retain(|t| t.id != id);
        Ok(())
    }

    fn insert_sorted(&mut self, tx: TransactionView) {
        let at = self.transactions.partition_point(|t| t.date <= tx.date);
        self.transactions.insert(at, tx);
    }
}
