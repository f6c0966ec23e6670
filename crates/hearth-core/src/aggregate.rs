//! Reducers over ordered transaction sequences
//!
//! - `aggregate_transactions` - income/expense totals and balance
//! - `group_by_month` - calendar month buckets in first-seen order
//! - `days_between` / `is_overdue` - date helpers used by loans and jars

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::{month_label, Locale};
use crate::models::{Transaction, TransactionKind};

/// Anything with an amount and a transaction kind
pub trait LedgerEntry {
    fn amount(&self) -> f64;
    fn kind(&self) -> TransactionKind;
}

/// Anything that happened on a calendar day
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl LedgerEntry for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }

    fn kind(&self) -> TransactionKind {
        self.kind
    }
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn kind(&self) -> TransactionKind {
        (**self).kind()
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

/// Totals over a run of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub balance: f64,
    /// Every record seen, including savings and loan movements
    pub count: usize,
}

/// Sum income and expense amounts; other kinds only count towards `count`
pub fn aggregate_transactions<T: LedgerEntry>(records: &[T]) -> TransactionStats {
    let mut stats = TransactionStats::default();

    for record in records {
        match record.kind() {
            TransactionKind::Income => stats.total_income += record.amount(),
            TransactionKind::Expense => stats.total_expenses += record.amount(),
            _ => {}
        }
    }

    stats.balance = stats.total_income - stats.total_expenses;
    stats.count = records.len();
    stats
}

/// Sum the amounts of one kind
pub fn total_of_kind<T: LedgerEntry>(records: &[T], kind: TransactionKind) -> f64 {
    records
        .iter()
        .filter(|r| r.kind() == kind)
        .map(|r| r.amount())
        .sum()
}

/// Calendar month identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Long label, e.g. "março de 2026"
    pub fn label(&self, locale: Locale) -> String {
        month_label(self.year, self.month, locale)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Records that fall in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket<T> {
    pub key: MonthKey,
    pub records: Vec<T>,
}

/// Group records by calendar month.
///
/// Buckets appear in the order their month is first seen, and records keep
/// their input order inside each bucket. Input does not need to be sorted.
pub fn group_by_month<T, I>(records: I) -> Vec<MonthBucket<T>>
where
    T: Dated,
    I: IntoIterator<Item = T>,
{
    let mut buckets: Vec<MonthBucket<T>> = Vec::new();
    let mut index: HashMap<MonthKey, usize> = HashMap::new();

    for record in records {
        let key = MonthKey::of(record.date());
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(MonthBucket {
                key,
                records: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].records.push(record);
    }

    buckets
}

/// Whole days between two dates, regardless of order
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// A due date has passed once `today` is strictly after it
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    today > due
}
