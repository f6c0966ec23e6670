//! Transaction recording commands
//!
//! - `cmd_transactions_add` - Record a transaction for a member
//! - `cmd_transactions_update` - Change fields of a recorded transaction
//! - `cmd_transactions_delete` - Remove a transaction

use anyhow::{bail, Context, Result};
use hearth_core::format::format_date;
use hearth_core::{Household, HouseholdStore, NewTransaction, Transaction, TransactionUpdate};
use serde_json::json;

use super::core::{load_household, print_json, Output};

fn print_transaction(household: &Household, tx: &Transaction, output: &Output) {
    println!(
        "   [{}] {} │ {:>14} │ {:13} │ {}",
        tx.id,
        format_date(tx.date, output.locale),
        output.money(household, tx.amount),
        tx.kind.as_str(),
        tx.description
    );
}

pub fn cmd_transactions_add(
    store: &dyn HouseholdStore,
    family: &str,
    new: NewTransaction,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let tx = store
        .add_transaction(family, new)
        .context("Failed to record transaction")?;

    if output.json {
        return print_json(&json!(tx));
    }

    println!("✅ Recorded transaction:");
    print_transaction(&household, &tx, output);
    Ok(())
}

pub fn cmd_transactions_update(
    store: &dyn HouseholdStore,
    family: &str,
    id: &str,
    update: TransactionUpdate,
    output: &Output,
) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one field, e.g. --amount or --status");
    }

    let household = load_household(store, family)?;
    let tx = store
        .update_transaction(family, id, update)
        .with_context(|| format!("Failed to update transaction '{}'", id))?;

    if output.json {
        return print_json(&json!(tx));
    }

    println!("✅ Updated transaction:");
    print_transaction(&household, &tx, output);
    Ok(())
}

pub fn cmd_transactions_delete(
    store: &dyn HouseholdStore,
    family: &str,
    id: &str,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let tx = store
        .delete_transaction(family, id)
        .with_context(|| format!("Failed to delete transaction '{}'", id))?;

    if output.json {
        return print_json(&json!(tx));
    }

    println!("✅ Deleted transaction:");
    print_transaction(&household, &tx, output);
    Ok(())
}
