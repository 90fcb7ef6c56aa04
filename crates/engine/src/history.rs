//! History list filtering.

use chrono::NaiveDate;

use crate::{Frequency, Transaction, TransactionKind};

/// Filters for the history list.
///
/// `from` and `to` are both inclusive. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the description or the category.
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    pub frequency: Option<Frequency>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Whether `tx` belongs in the history as of `as_of`.
    ///
    /// Installments that are not due yet never show up.
    pub fn matches(&self, tx: &Transaction, as_of: NaiveDate) -> bool {
        if tx.is_installment() && tx.date > as_of {
            return false;
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !tx.description.to_lowercase().contains(&needle)
                && !tx.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        self.kind.is_none_or(|kind| tx.kind == kind)
            && self.frequency.is_none_or(|frequency| tx.frequency == frequency)
            && self
                .category
                .as_deref()
                .is_none_or(|category| tx.category == category)
            && self.from.is_none_or(|from| tx.date >= from)
            && self.to.is_none_or(|to| tx.date <= to)
    }

    pub fn apply(&self, transactions: &[Transaction], as_of: NaiveDate) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx, as_of))
            .cloned()
            .collect()
    }
}
