//! Personal finance ledger engine.
//!
//! Storage of income and expense transactions on sea-orm, plus the pure
//! functions the dashboard and the history screens are built from:
//! installment expansion, aggregation and series regrouping.

pub use aggregation::{
    CategoryTotal, Figures, InstallmentBill, MonthInstallments, MonthTotal, PendingInstallments,
};
pub use commands::{InstallmentPlanCmd, Purchase, TransactionInput};
pub use error::{EngineError, ErrorCode};
pub use grouping::SeriesProgress;
pub use history::HistoryFilter;
pub use ops::{CollapsedEntry, Engine, EngineBuilder};
pub use transactions::{Frequency, InstallmentFields, Transaction, TransactionDraft, TransactionKind};

pub mod aggregation;
pub mod categories;
mod commands;
mod error;
pub mod grouping;
pub mod history;
pub mod installments;
mod ops;
mod transactions;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;
