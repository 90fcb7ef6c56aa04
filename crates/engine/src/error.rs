//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown when a transaction or an installment plan fails
//!   validation. It carries an [`ErrorCode`] the API reports to clients.
//! - [`KeyNotFound`] thrown when a transaction does not exist.
//! - [`Database`] for any storage failure.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Machine readable reason of an [`EngineError::InvalidInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    MissingFields,
    InvalidKind,
    InvalidFrequency,
    InvalidAmount,
    DescriptionTooLong,
    InvalidDate,
    MissingInstallmentFields,
    InvalidInstallmentValues,
    InvalidInstallmentIndex,
    InvalidInstallmentCount,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidKind => "invalid_kind",
            Self::InvalidFrequency => "invalid_frequency",
            Self::InvalidAmount => "invalid_amount",
            Self::DescriptionTooLong => "description_too_long",
            Self::InvalidDate => "invalid_date",
            Self::MissingInstallmentFields => "missing_installment_fields",
            Self::InvalidInstallmentValues => "invalid_installment_values",
            Self::InvalidInstallmentIndex => "invalid_installment_index",
            Self::InvalidInstallmentCount => "invalid_installment_count",
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{1}")]
    InvalidInput(ErrorCode, String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn invalid(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidInput(code, message.into())
    }

    /// Returns the validation code, if this is a validation failure.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::InvalidInput(code, _) => Some(*code),
            _ => None,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a, x), Self::InvalidInput(b, y)) => a == b && x == y,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
