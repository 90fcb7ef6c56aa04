//! Store boundary validation.
//!
//! Rules are checked in a fixed order and the first failure wins, so a
//! request missing several things always reports the same code.

use chrono::{DateTime, NaiveDate};

use crate::{
    EngineError, ErrorCode, Frequency, ResultEngine, TransactionInput, TransactionKind,
    transactions::{InstallmentFields, TransactionDraft},
};

pub const MAX_AMOUNT: f64 = 999_999_999.99;
pub const MAX_DESCRIPTION_LEN: usize = 100;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn check_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
        return Err(EngineError::invalid(
            ErrorCode::InvalidAmount,
            format!("amount must be a positive number not greater than {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_description(description: &str) -> ResultEngine<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(EngineError::invalid(
            ErrorCode::DescriptionTooLong,
            format!("description must be at most {MAX_DESCRIPTION_LEN} characters"),
        ));
    }
    Ok(())
}

/// Parses `YYYY-MM-DD`, or takes the date part of an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            EngineError::invalid(
                ErrorCode::InvalidDate,
                format!("date '{value}' is not a valid date (YYYY-MM-DD)"),
            )
        })
}

/// Positive and small enough for the integer columns of the store.
fn positive_count(value: i64) -> Option<u32> {
    i32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

/// Validates a raw input into a draft ready to be stored.
pub fn validate(input: &TransactionInput) -> ResultEngine<TransactionDraft> {
    let kind = present(&input.kind);
    let frequency = present(&input.frequency);
    let description = present(&input.description);
    let category = present(&input.category);
    let date = present(&input.date);

    let missing: Vec<&str> = [
        ("kind", kind.is_none()),
        ("frequency", frequency.is_none()),
        ("description", description.is_none()),
        ("amount", input.amount.is_none()),
        ("category", category.is_none()),
        ("date", date.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect();

    let (Some(kind), Some(frequency), Some(description), Some(amount), Some(category), Some(date)) =
        (kind, frequency, description, input.amount, category, date)
    else {
        return Err(EngineError::invalid(
            ErrorCode::MissingFields,
            format!("missing required fields: {}", missing.join(", ")),
        ));
    };

    let kind = TransactionKind::try_from(kind)?;
    let frequency = Frequency::try_from(frequency)?;
    check_amount(amount)?;
    check_description(description)?;
    let date = parse_date(date)?;

    let installment = if frequency == Frequency::Installment {
        Some(validate_installment(input)?)
    } else {
        None
    };

    Ok(TransactionDraft {
        kind,
        frequency,
        description: description.to_string(),
        amount,
        category: category.to_string(),
        date,
        installment,
    })
}

fn validate_installment(input: &TransactionInput) -> ResultEngine<InstallmentFields> {
    let (Some(count), Some(index), Some(share)) = (
        input.installment_count,
        input.installment_index,
        input.installment_amount,
    ) else {
        return Err(EngineError::invalid(
            ErrorCode::MissingInstallmentFields,
            "installment transactions require installment_count, installment_index and \
             installment_amount",
        ));
    };

    let (Some(count), Some(index)) = (positive_count(count), positive_count(index)) else {
        return Err(EngineError::invalid(
            ErrorCode::InvalidInstallmentValues,
            "installment_count, installment_index and installment_amount must be positive",
        ));
    };
    if !share.is_finite() || share <= 0.0 {
        return Err(EngineError::invalid(
            ErrorCode::InvalidInstallmentValues,
            "installment_count, installment_index and installment_amount must be positive",
        ));
    }

    if index > count {
        return Err(EngineError::invalid(
            ErrorCode::InvalidInstallmentIndex,
            format!("installment_index {index} exceeds installment_count {count}"),
        ));
    }

    Ok(InstallmentFields {
        count,
        index,
        amount: share,
        series_id: input.series_id,
    })
}
