//! Installment series grouping for display.
//!
//! Rows of one plan are independent records. They are grouped by their
//! `series_id` when they have one; older rows without it are grouped by the
//! description text preceding the first `" ("`, e.g. `"TV"` for `"TV (2/10)"`.

use std::{
    collections::{HashMap, HashSet},
    sync::OnceLock,
};

use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

use crate::{Transaction, aggregation::contribution_value};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SeriesKey<'a> {
    Series(Uuid),
    Description(&'a str),
}

/// Description without its `" (i/n)"` suffix.
pub fn base_description(description: &str) -> &str {
    description
        .split_once(" (")
        .map_or(description, |(base, _)| base)
}

fn installment_suffix() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\d+)/\d+\)").ok()).as_ref()
}

/// The `i` of an `(i/n)` suffix, 1 when there is none.
pub fn paid_from_description(description: &str) -> u32 {
    installment_suffix()
        .and_then(|re| re.captures(description))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

fn series_key(tx: &Transaction) -> Option<SeriesKey<'_>> {
    if !tx.is_installment() {
        return None;
    }
    Some(match tx.series_id {
        Some(id) => SeriesKey::Series(id),
        None => SeriesKey::Description(base_description(&tx.description)),
    })
}

/// Copies of `transactions` where installment descriptions read
/// `"{base} (Installment {paid} of {total})"`.
///
/// `total` is the number of rows of the series present in `transactions`, so
/// deleting a row shrinks it. `paid` comes from the stored `(i/n)` suffix,
/// not from `installment_index`.
pub fn regroup(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sizes: HashMap<SeriesKey<'_>, usize> = HashMap::new();
    for key in transactions.iter().filter_map(series_key) {
        *sizes.entry(key).or_default() += 1;
    }

    transactions
        .iter()
        .map(|tx| {
            let mut decorated = tx.clone();
            if let Some(key) = series_key(tx) {
                let total = sizes.get(&key).copied().unwrap_or(1);
                decorated.description = format!(
                    "{} (Installment {} of {})",
                    base_description(&tx.description),
                    paid_from_description(&tx.description),
                    total
                );
            }
            decorated
        })
        .collect()
}

/// One row per installment series (the first seen), every other row as is.
pub fn collapse(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|tx| series_key(tx).is_none_or(|key| seen.insert(key)))
        .cloned()
        .collect()
}

/// Progress of the series a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesProgress {
    /// Rows of the series dated on or before `as_of`.
    pub paid: usize,
    pub total: usize,
    pub installment_value: f64,
    pub total_value: f64,
}

/// Progress card data for `record`, `None` unless it is an installment.
pub fn series_progress(
    transactions: &[Transaction],
    record: &Transaction,
    as_of: NaiveDate,
) -> Option<SeriesProgress> {
    let key = series_key(record)?;
    let siblings: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| series_key(tx).as_ref() == Some(&key))
        .collect();

    let total = siblings.len();
    let paid = siblings.iter().filter(|tx| tx.date <= as_of).count();
    let installment_value = match record.installment_amount {
        Some(share) => share,
        None if total > 0 => record.amount / total as f64,
        None => contribution_value(record),
    };

    Some(SeriesProgress {
        paid,
        total,
        installment_value,
        total_value: record.amount,
    })
}
