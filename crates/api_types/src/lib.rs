use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Frequency {
        Fixed,
        Variable,
        Installment,
    }

    /// Request body for creating or replacing a transaction.
    ///
    /// Every field is optional and `kind`, `frequency` and `date` travel as
    /// plain strings: the server validates them and answers with a precise
    /// error code instead of a generic deserialization failure.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionInput {
        pub kind: Option<String>,
        pub frequency: Option<String>,
        pub description: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        /// `YYYY-MM-DD`, or an RFC3339 timestamp whose date is taken.
        pub date: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub installment_count: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub installment_index: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub installment_amount: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub series_id: Option<Uuid>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub frequency: Frequency,
        pub description: String,
        pub amount: f64,
        pub installment_amount: Option<f64>,
        pub category: String,
        pub date: NaiveDate,
        pub installment_count: Option<u32>,
        pub installment_index: Option<u32>,
        pub series_id: Option<Uuid>,
    }

    /// Query string of the history list. Unset fields match everything.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct HistoryQuery {
        pub search: Option<String>,
        pub kind: Option<TransactionKind>,
        pub frequency: Option<Frequency>,
        pub category: Option<String>,
        /// Inclusive lower bound.
        pub from: Option<NaiveDate>,
        /// Inclusive upper bound.
        pub to: Option<NaiveDate>,
        /// Defaults to today in the server timezone.
        pub as_of: Option<NaiveDate>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SeriesProgress {
        pub paid: usize,
        pub total: usize,
        pub installment_value: f64,
        pub total_value: f64,
    }

    /// One row of the collapsed list.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CollapsedView {
        pub transaction: TransactionView,
        /// Present for installment rows only.
        pub progress: Option<SeriesProgress>,
    }
}

pub mod installment {
    use super::*;
    use crate::transaction::TransactionKind;

    /// Request body for splitting a purchase into monthly installments.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct InstallmentPlanNew {
        pub description: String,
        pub total_amount: f64,
        pub category: String,
        pub kind: TransactionKind,
        pub count: i64,
        /// Date of the first installment. If absent, server uses today.
        pub start_date: Option<NaiveDate>,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SummaryQuery {
        /// Defaults to today in the server timezone.
        pub as_of: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PendingInstallments {
        pub count: usize,
        pub total: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct InstallmentBill {
        pub description: String,
        pub value: f64,
        pub index: u32,
        pub count: u32,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthInstallments {
        /// Largest bill first.
        pub bills: Vec<InstallmentBill>,
        pub total: f64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthTotal {
        pub year: i32,
        pub month: u32,
        pub total: f64,
    }

    /// Dashboard figures.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Summary {
        pub as_of: NaiveDate,
        pub total_balance: f64,
        pub monthly_income: f64,
        pub monthly_expenses: f64,
        pub category_totals: Vec<CategoryTotal>,
        pub pending_installments: PendingInstallments,
        pub month_installments: MonthInstallments,
        /// Oldest month first.
        pub monthly_expense_series: Vec<MonthTotal>,
    }
}

pub mod error {
    use super::*;

    /// Body of every non-2xx response.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ErrorBody {
        /// Machine readable code, e.g. `invalid_amount`.
        pub error: String,
        pub message: String,
    }
}
