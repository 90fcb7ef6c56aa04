//! Dashboard figures.
//!
//! Every figure is a reduction over the full transaction list. Installment
//! rows count with their per-period share, never with the purchase total:
//! see [`contribution_value`].

use chrono::{Datelike, Months, NaiveDate};

use crate::{Transaction, TransactionKind, categories::EXPENSE_CATEGORIES};

/// Number of months in the dashboard expense series.
pub const SERIES_MONTHS: u32 = 6;

/// What a transaction adds to any period sum.
///
/// Installment rows use `installment_amount`; when it is missing the value
/// falls back to `amount / installment_count`, and to `amount` when the count
/// is unknown too.
pub fn contribution_value(tx: &Transaction) -> f64 {
    if !tx.is_installment() {
        return tx.amount;
    }
    match (tx.installment_amount, tx.installment_count) {
        (Some(share), _) => share,
        (None, Some(count)) if count > 0 => tx.amount / f64::from(count),
        _ => tx.amount,
    }
}

fn signed_value(tx: &Transaction) -> f64 {
    match tx.kind {
        TransactionKind::Income => contribution_value(tx),
        TransactionKind::Expense => -contribution_value(tx),
    }
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Balance of everything posted up to and including `as_of`.
pub fn total_balance(transactions: &[Transaction], as_of: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.date <= as_of)
        .map(signed_value)
        .sum()
}

fn monthly_total(
    transactions: &[Transaction],
    kind: TransactionKind,
    year: i32,
    month: u32,
) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind && in_month(tx.date, year, month))
        .map(contribution_value)
        .sum()
}

pub fn monthly_income(transactions: &[Transaction], year: i32, month: u32) -> f64 {
    monthly_total(transactions, TransactionKind::Income, year, month)
}

pub fn monthly_expenses(transactions: &[Transaction], year: i32, month: u32) -> f64 {
    monthly_total(transactions, TransactionKind::Expense, year, month)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Expenses of the month per category, one entry for each of
/// [`EXPENSE_CATEGORIES`] in that order.
pub fn category_totals(transactions: &[Transaction], year: i32, month: u32) -> Vec<CategoryTotal> {
    EXPENSE_CATEGORIES
        .iter()
        .map(|category| CategoryTotal {
            category: (*category).to_string(),
            total: transactions
                .iter()
                .filter(|tx| {
                    tx.kind == TransactionKind::Expense
                        && tx.category == *category
                        && in_month(tx.date, year, month)
                })
                .map(contribution_value)
                .sum(),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingInstallments {
    pub count: usize,
    pub total: f64,
}

/// Installments dated strictly after `as_of`.
pub fn pending_installments(transactions: &[Transaction], as_of: NaiveDate) -> PendingInstallments {
    transactions
        .iter()
        .filter(|tx| tx.is_installment() && tx.date > as_of)
        .fold(PendingInstallments::default(), |acc, tx| PendingInstallments {
            count: acc.count + 1,
            total: acc.total + contribution_value(tx),
        })
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstallmentBill {
    pub description: String,
    pub value: f64,
    pub index: u32,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthInstallments {
    pub bills: Vec<InstallmentBill>,
    pub total: f64,
}

/// The installment bills falling in a month, largest first.
pub fn month_installments(transactions: &[Transaction], year: i32, month: u32) -> MonthInstallments {
    let mut bills: Vec<InstallmentBill> = transactions
        .iter()
        .filter(|tx| tx.is_installment() && in_month(tx.date, year, month))
        .map(|tx| InstallmentBill {
            description: tx.description.clone(),
            value: contribution_value(tx),
            index: tx.installment_index.unwrap_or(1),
            count: tx.installment_count.unwrap_or(1),
        })
        .collect();
    bills.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total = bills.iter().map(|bill| bill.value).sum();
    MonthInstallments { bills, total }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Expense totals of the `months` calendar months ending with `as_of`'s
/// month, oldest first.
pub fn monthly_expense_series(
    transactions: &[Transaction],
    as_of: NaiveDate,
    months: u32,
) -> Vec<MonthTotal> {
    let first_of_month = as_of.with_day(1).unwrap_or(as_of);
    (0..months)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|start| MonthTotal {
            year: start.year(),
            month: start.month(),
            total: monthly_expenses(transactions, start.year(), start.month()),
        })
        .collect()
}

/// Everything the dashboard shows for `as_of`.
#[derive(Clone, Debug, PartialEq)]
pub struct Figures {
    pub as_of: NaiveDate,
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub category_totals: Vec<CategoryTotal>,
    pub pending_installments: PendingInstallments,
    pub month_installments: MonthInstallments,
    pub monthly_expense_series: Vec<MonthTotal>,
}

pub fn aggregate(transactions: &[Transaction], as_of: NaiveDate) -> Figures {
    let (year, month) = (as_of.year(), as_of.month());
    Figures {
        as_of,
        total_balance: total_balance(transactions, as_of),
        monthly_income: monthly_income(transactions, year, month),
        monthly_expenses: monthly_expenses(transactions, year, month),
        category_totals: category_totals(transactions, year, month),
        pending_installments: pending_installments(transactions, as_of),
        month_installments: month_installments(transactions, year, month),
        monthly_expense_series: monthly_expense_series(transactions, as_of, SERIES_MONTHS),
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{Frequency, Purchase, installments::expand};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(kind: TransactionKind, amount: f64, category: &str, on: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind,
            frequency: Frequency::Variable,
            description: format!("{category} {amount}"),
            amount,
            installment_amount: None,
            category: category.to_string(),
            date: on,
            installment_count: None,
            installment_index: None,
            series_id: None,
        }
    }

    fn laptop_plan(start: NaiveDate) -> Vec<Transaction> {
        let purchase = Purchase {
            description: "Laptop".to_string(),
            total_amount: 4800.0,
            category: "Education".to_string(),
            kind: TransactionKind::Expense,
            start_date: start,
        };
        expand(&purchase, 12).unwrap()
    }

    #[test]
    fn salary_counts_in_its_month_only() {
        let as_of = date(2026, 10, 19);
        let txs = vec![tx(TransactionKind::Income, 5000.0, "Salary", date(2026, 10, 5))];

        assert_eq!(monthly_income(&txs, 2026, 10), 5000.0);
        assert_eq!(monthly_income(&txs, 2026, 9), 0.0);
        assert_eq!(monthly_income(&txs, 2025, 10), 0.0);
        assert_eq!(monthly_expenses(&txs, 2026, 10), 0.0);
        assert_eq!(total_balance(&txs, as_of), 5000.0);
    }

    #[test]
    fn balance_ignores_future_rows_and_keeps_same_day() {
        let as_of = date(2026, 10, 19);
        let txs = vec![
            tx(TransactionKind::Income, 1000.0, "Salary", date(2026, 10, 1)),
            tx(TransactionKind::Expense, 200.0, "Food", as_of),
            tx(TransactionKind::Expense, 999.0, "Food", date(2026, 10, 20)),
        ];
        assert_eq!(total_balance(&txs, as_of), 800.0);
    }

    #[test]
    fn installments_count_with_their_share() {
        let txs = laptop_plan(date(2026, 10, 10));

        for month_offset in 0..12 {
            let day = date(2026, 10, 1)
                .checked_add_months(Months::new(month_offset))
                .unwrap();
            let totals = category_totals(&txs, day.year(), day.month());
            let education = totals.iter().find(|c| c.category == "Education").unwrap();
            assert_eq!(education.total, 400.0);
        }
        assert_eq!(category_totals(&txs, 2027, 10)[4].total, 0.0);

        // Only the first installment has posted.
        assert_eq!(total_balance(&txs, date(2026, 10, 19)), -400.0);
    }

    #[test]
    fn category_totals_list_every_category() {
        let txs = vec![
            tx(TransactionKind::Expense, 30.0, "Food", date(2026, 10, 2)),
            tx(TransactionKind::Expense, 20.0, "Food", date(2026, 10, 3)),
            tx(TransactionKind::Expense, 70.0, "Gifts", date(2026, 10, 3)),
            tx(TransactionKind::Income, 90.0, "Food", date(2026, 10, 3)),
        ];
        let totals = category_totals(&txs, 2026, 10);

        let names: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, EXPENSE_CATEGORIES.to_vec());
        assert_eq!(totals[0].total, 50.0);
        assert!(totals[1..].iter().all(|c| c.total == 0.0));
    }

    #[test]
    fn contribution_fallback_chain() {
        let mut row = tx(TransactionKind::Expense, 1200.0, "Other", date(2026, 1, 1));
        assert_eq!(contribution_value(&row), 1200.0);

        row.frequency = Frequency::Installment;
        row.installment_count = Some(12);
        assert_eq!(contribution_value(&row), 100.0);

        row.installment_amount = Some(90.0);
        assert_eq!(contribution_value(&row), 90.0);

        row.installment_amount = None;
        row.installment_count = None;
        assert_eq!(contribution_value(&row), 1200.0);

        // Only installment rows use the share.
        let mut fixed = tx(TransactionKind::Expense, 50.0, "Housing", date(2026, 1, 1));
        fixed.installment_amount = Some(5.0);
        assert_eq!(contribution_value(&fixed), 50.0);
    }

    #[test]
    fn pending_installments_are_strictly_future() {
        let txs = laptop_plan(date(2026, 10, 19));
        let pending = pending_installments(&txs, date(2026, 10, 19));
        assert_eq!(pending.count, 11);
        assert_eq!(pending.total, 4400.0);
    }

    #[test]
    fn month_installments_sorted_by_value() {
        let mut txs = laptop_plan(date(2026, 10, 1));
        let phone = Purchase {
            description: "Phone".to_string(),
            total_amount: 600.0,
            category: "Other".to_string(),
            kind: TransactionKind::Expense,
            start_date: date(2026, 9, 1),
        };
        txs.extend(expand(&phone, 3).unwrap());

        let month = month_installments(&txs, 2026, 10);
        assert_eq!(month.bills.len(), 2);
        assert_eq!(month.bills[0].description, "Laptop (1/12)");
        assert_eq!((month.bills[1].index, month.bills[1].count), (2, 3));
        assert_eq!(month.total, 600.0);
    }

    #[test]
    fn expense_series_covers_six_months_oldest_first() {
        let txs = vec![
            tx(TransactionKind::Expense, 10.0, "Food", date(2026, 5, 31)),
            tx(TransactionKind::Expense, 20.0, "Food", date(2026, 10, 1)),
            tx(TransactionKind::Expense, 40.0, "Food", date(2026, 4, 30)),
        ];
        let series = monthly_expense_series(&txs, date(2026, 10, 31), SERIES_MONTHS);

        let months: Vec<(i32, u32)> = series.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months, vec![(2026, 5), (2026, 6), (2026, 7), (2026, 8), (2026, 9), (2026, 10)]);
        assert_eq!(series[0].total, 10.0);
        assert_eq!(series[5].total, 20.0);
    }

    #[test]
    fn series_crosses_year_boundary() {
        let series = monthly_expense_series(&[], date(2027, 2, 14), 3);
        let months: Vec<(i32, u32)> = series.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months, vec![(2026, 12), (2027, 1), (2027, 2)]);
    }

    #[test]
    fn aggregate_bundles_the_current_month() {
        let as_of = date(2026, 10, 19);
        let mut txs = laptop_plan(date(2026, 10, 10));
        txs.push(tx(TransactionKind::Income, 5000.0, "Salary", date(2026, 10, 5)));

        let figures = aggregate(&txs, as_of);
        assert_eq!(figures.total_balance, 4600.0);
        assert_eq!(figures.monthly_income, 5000.0);
        assert_eq!(figures.monthly_expenses, 400.0);
        assert_eq!(figures.pending_installments.count, 11);
        assert_eq!(figures.month_installments.total, 400.0);
        assert_eq!(figures.monthly_expense_series.len(), 6);
    }
}
