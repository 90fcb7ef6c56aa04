//! Transaction primitives.
//!
//! A `Transaction` is a single dated income or expense. Installment purchases
//! are stored as one `Transaction` per month, each carrying its share of the
//! total and its position in the series.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ErrorCode, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::invalid(
                ErrorCode::InvalidKind,
                format!("kind must be 'income' or 'expense', got '{other}'"),
            )),
        }
    }
}

/// How often a transaction happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    Fixed,
    Variable,
    Installment,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
            Self::Installment => "installment",
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "fixed" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            "installment" => Ok(Self::Installment),
            other => Err(EngineError::invalid(
                ErrorCode::InvalidFrequency,
                format!("frequency must be 'fixed', 'variable' or 'installment', got '{other}'"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub description: String,
    /// Total value. For an installment row this is the whole purchase.
    pub amount: f64,
    /// Per-period share, installment rows only.
    pub installment_amount: Option<f64>,
    pub category: String,
    pub date: NaiveDate,
    pub installment_count: Option<u32>,
    /// 1-based position inside the series.
    pub installment_index: Option<u32>,
    /// Shared by every row created from the same installment plan.
    pub series_id: Option<Uuid>,
}

impl Transaction {
    /// Builds a stored record from validated fields and a fresh id.
    pub fn new(draft: TransactionDraft) -> Self {
        draft.into_transaction(Uuid::new_v4())
    }

    pub fn is_installment(&self) -> bool {
        self.frequency == Frequency::Installment
    }
}

/// Installment details of a validated draft.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstallmentFields {
    pub count: u32,
    pub index: u32,
    pub amount: f64,
    pub series_id: Option<Uuid>,
}

/// A transaction that passed validation but has no identity yet.
///
/// `installment` is `Some` iff `frequency` is [`Frequency::Installment`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub installment: Option<InstallmentFields>,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: Uuid) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            frequency: self.frequency,
            description: self.description,
            amount: self.amount,
            installment_amount: self.installment.map(|i| i.amount),
            category: self.category,
            date: self.date,
            installment_count: self.installment.map(|i| i.count),
            installment_index: self.installment.map(|i| i.index),
            series_id: self.installment.and_then(|i| i.series_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub frequency: String,
    pub description: String,
    pub amount: f64,
    pub installment_amount: Option<f64>,
    pub category: String,
    pub date: Date,
    pub installment_count: Option<i32>,
    pub installment_index: Option<i32>,
    pub created_at: DateTimeUtc,
    pub series_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Active model for a brand new row.
    pub(crate) fn for_insert(tx: &Transaction, created_at: DateTime<Utc>) -> Self {
        let mut model = Self::from(tx);
        model.created_at = ActiveValue::Set(created_at);
        model
    }
}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            frequency: ActiveValue::Set(tx.frequency.as_str().to_string()),
            description: ActiveValue::Set(tx.description.clone()),
            amount: ActiveValue::Set(tx.amount),
            installment_amount: ActiveValue::Set(tx.installment_amount),
            category: ActiveValue::Set(tx.category.clone()),
            date: ActiveValue::Set(tx.date),
            installment_count: ActiveValue::Set(tx.installment_count.map(to_column_int)),
            installment_index: ActiveValue::Set(tx.installment_index.map(to_column_int)),
            created_at: ActiveValue::NotSet,
            series_id: ActiveValue::Set(tx.series_id.map(|id| id.to_string())),
        }
    }
}

/// Validation keeps counts and indexes within `i32`; the clamp never fires
/// for rows that went through it.
fn to_column_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let corrupted = |what: &str| {
            EngineError::Database(DbErr::Type(format!(
                "transaction {}: invalid stored {what}",
                model.id
            )))
        };

        let id = Uuid::parse_str(&model.id).map_err(|_| corrupted("id"))?;
        let kind = TransactionKind::try_from(model.kind.as_str()).map_err(|_| corrupted("kind"))?;
        let frequency =
            Frequency::try_from(model.frequency.as_str()).map_err(|_| corrupted("frequency"))?;

        // Partial installment data is kept as-is; aggregation falls back on
        // whatever is present.
        Ok(Self {
            id,
            kind,
            frequency,
            description: model.description,
            amount: model.amount,
            installment_amount: model.installment_amount,
            category: model.category,
            date: model.date,
            installment_count: model.installment_count.and_then(|v| u32::try_from(v).ok()),
            installment_index: model.installment_index.and_then(|v| u32::try_from(v).ok()),
            series_id: model.series_id.and_then(|s| Uuid::parse_str(&s).ok()),
        })
    }
}
