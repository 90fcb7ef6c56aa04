//! Installment plan expansion.
//!
//! One purchase paid in `n` installments becomes `n` independent rows, one per
//! calendar month starting at the purchase date.

use chrono::Months;
use uuid::Uuid;

use crate::{EngineError, ErrorCode, Frequency, Purchase, ResultEngine, Transaction};

/// Longest plan accepted: a hundred years of monthly installments.
pub const MAX_INSTALLMENTS: u32 = 1200;

/// Splits `purchase` into `count` monthly installment records.
///
/// Record `i` (0-based) is dated `start_date + i` months, with the day of the
/// month clamped to the last day of shorter months. Every record keeps the
/// purchase total in `amount` and carries `total / count` as its share.
pub fn expand(purchase: &Purchase, count: i64) -> ResultEngine<Vec<Transaction>> {
    let count = u32::try_from(count)
        .ok()
        .filter(|c| (1..=MAX_INSTALLMENTS).contains(c))
        .ok_or_else(|| {
            EngineError::invalid(
                ErrorCode::InvalidInstallmentCount,
                format!("installment count must be between 1 and {MAX_INSTALLMENTS}, got {count}"),
            )
        })?;
    if !purchase.total_amount.is_finite() || purchase.total_amount <= 0.0 {
        return Err(EngineError::invalid(
            ErrorCode::InvalidAmount,
            "total amount must be a positive number",
        ));
    }

    let share = purchase.total_amount / f64::from(count);
    let series_id = Uuid::new_v4();

    (0..count)
        .map(|i| {
            let date = purchase
                .start_date
                .checked_add_months(Months::new(i))
                .ok_or_else(|| {
                    EngineError::invalid(
                        ErrorCode::InvalidDate,
                        format!("installment {} falls outside the supported date range", i + 1),
                    )
                })?;

            Ok(Transaction {
                id: Uuid::new_v4(),
                kind: purchase.kind,
                frequency: Frequency::Installment,
                description: format!("{} ({}/{})", purchase.description, i + 1, count),
                amount: purchase.total_amount,
                installment_amount: Some(share),
                category: purchase.category.clone(),
                date,
                installment_count: Some(count),
                installment_index: Some(i + 1),
                series_id: Some(series_id),
            })
        })
        .collect()
}
