//! Transaction export
//!
//! Writes a household's transactions as CSV with the columns
//! `date,description,kind,category,amount,status,member`.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Household, KindFilter, Transaction};

/// Options for transaction export
#[derive(Debug, Clone, Default)]
pub struct TransactionExportOptions {
    /// Start date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub to: Option<NaiveDate>,
    /// Restrict to income or expense records
    pub kind: KindFilter,
    /// Restrict to one member's records
    pub member: Option<String>,
}

impl TransactionExportOptions {
    fn includes(&self, tx: &Transaction) -> bool {
        self.from.map_or(true, |from| tx.date >= from)
            && self.to.map_or(true, |to| tx.date <= to)
            && self.kind.matches(tx.kind)
            && self.member.as_deref().map_or(true, |m| tx.user_id == m)
    }
}

/// Transactions selected for export, oldest first
///
/// Records sharing a date keep their stored order.
pub fn select_transactions<'a>(
    household: &'a Household,
    opts: &TransactionExportOptions,
) -> Vec<&'a Transaction> {
    let mut selected: Vec<&Transaction> = household
        .transactions
        .iter()
        .filter(|tx| opts.includes(tx))
        .collect();
    selected.sort_by_key(|tx| tx.date);
    selected
}

/// Write matching transactions as CSV, returning the number of rows
pub fn write_transactions_csv<W: Write>(
    household: &Household,
    opts: &TransactionExportOptions,
    writer: W,
) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "date",
        "description",
        "kind",
        "category",
        "amount",
        "status",
        "member",
    ])?;

    let selected = select_transactions(household, opts);
    for tx in &selected {
        // Fall back to the raw id for members no longer in the family
        let member = household
            .member(&tx.user_id)
            .map(|m| m.name.as_str())
            .unwrap_or(tx.user_id.as_str());

        csv.write_record([
            tx.date.to_string().as_str(),
            tx.description.as_str(),
            tx.kind.as_str(),
            tx.category.as_str(),
            format!("{:.2}", tx.amount).as_str(),
            tx.status.as_str(),
            member,
        ])?;
    }

    csv.flush()?;
    Ok(selected.len())
}

/// Export matching transactions to a CSV string
pub fn export_transactions_csv(
    household: &Household,
    opts: &TransactionExportOptions,
) -> Result<String> {
    let mut buffer = Vec::new();
    write_transactions_csv(household, opts, &mut buffer)?;
    // csv only ever writes the UTF-8 it was given
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
