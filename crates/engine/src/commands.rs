//! Command structs for engine operations.
//!
//! [`TransactionInput`] mirrors what a client sends: every field optional and
//! enums/dates still as text, so that the engine can report precisely which
//! rule a request broke. [`InstallmentPlanCmd`] describes one purchase to be
//! split into monthly rows.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::TransactionKind;

/// Create or replace a single transaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionInput {
    pub kind: Option<String>,
    pub frequency: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub installment_count: Option<i64>,
    pub installment_index: Option<i64>,
    pub installment_amount: Option<f64>,
    pub series_id: Option<Uuid>,
}

impl TransactionInput {
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        frequency: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind.into()),
            frequency: Some(frequency.into()),
            description: Some(description.into()),
            amount: Some(amount),
            category: Some(category.into()),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn installment(mut self, count: i64, index: i64, amount: f64) -> Self {
        self.installment_count = Some(count);
        self.installment_index = Some(index);
        self.installment_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn series_id(mut self, series_id: Uuid) -> Self {
        self.series_id = Some(series_id);
        self
    }
}

/// The purchase an installment plan splits.
#[derive(Clone, Debug, PartialEq)]
pub struct Purchase {
    pub description: String,
    pub total_amount: f64,
    pub category: String,
    pub kind: TransactionKind,
    pub start_date: NaiveDate,
}

/// Split a purchase into `count` monthly installments.
#[derive(Clone, Debug, PartialEq)]
pub struct InstallmentPlanCmd {
    pub purchase: Purchase,
    pub count: i64,
}

impl InstallmentPlanCmd {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        total_amount: f64,
        category: impl Into<String>,
        kind: TransactionKind,
        start_date: NaiveDate,
        count: i64,
    ) -> Self {
        Self {
            purchase: Purchase {
                description: description.into(),
                total_amount,
                category: category.into(),
                kind,
                start_date,
            },
            count,
        }
    }
}
