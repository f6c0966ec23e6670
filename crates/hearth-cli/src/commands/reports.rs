//! Report command implementations
//!
//! - `cmd_stats` - Income, expense and balance totals
//! - `cmd_months` - Month-by-month breakdown
//! - `cmd_dashboard` - Family dashboard

use anyhow::Result;
use chrono::NaiveDate;
use hearth_core::export::select_transactions;
use hearth_core::format::format_date;
use hearth_core::models::filter_transactions;
use hearth_core::{
    aggregate_transactions, dashboard_stats, group_by_month, HouseholdStore, KindFilter, Period,
    TransactionExportOptions,
};
use serde_json::json;

use super::core::{load_household, print_json, Output};
use super::truncate;

pub fn cmd_stats(
    store: &dyn HouseholdStore,
    family: &str,
    opts: &TransactionExportOptions,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let selected = select_transactions(&household, opts);
    let stats = aggregate_transactions(&selected);

    if output.json {
        return print_json(&json!(stats));
    }

    println!();
    println!("📊 Transaction Stats");
    println!("   ─────────────────────────────");
    println!("   Transactions: {}", stats.count);
    println!("   Income:       {}", output.money(&household, stats.total_income));
    println!("   Expenses:     {}", output.money(&household, stats.total_expenses));
    println!("   Balance:      {}", output.money(&household, stats.balance));

    Ok(())
}

pub fn cmd_months(
    store: &dyn HouseholdStore,
    family: &str,
    kind: KindFilter,
    details: bool,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let buckets = group_by_month(filter_transactions(&household.transactions, kind));

    if output.json {
        let months: Vec<_> = buckets
            .iter()
            .map(|bucket| {
                json!({
                    "month": bucket.key.to_string(),
                    "label": bucket.key.label(output.locale),
                    "stats": aggregate_transactions(&bucket.records),
                    "transactions": bucket.records,
                })
            })
            .collect();
        return print_json(&json!(months));
    }

    if buckets.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!();
    println!("📅 Monthly Breakdown");

    for bucket in &buckets {
        let stats = aggregate_transactions(&bucket.records);

        println!();
        println!("   {} ({} transactions)", bucket.key.label(output.locale), stats.count);
        println!("   ─────────────────────────────");
        println!("   Income:   {}", output.money(&household, stats.total_income));
        println!("   Expenses: {}", output.money(&household, stats.total_expenses));
        println!("   Balance:  {}", output.money(&household, stats.balance));

        if details {
            println!();
            for tx in &bucket.records {
                let member = household
                    .member(&tx.user_id)
                    .map(|m| m.name.as_str())
                    .unwrap_or(tx.user_id.as_str());
                println!(
                    "     {}  {:30}  {:13}  {:>14}  {}",
                    format_date(tx.date, output.locale),
                    truncate(&tx.description, 30),
                    tx.kind.as_str(),
                    output.money(&household, tx.amount),
                    member
                );
            }
        }
    }

    Ok(())
}

pub fn cmd_dashboard(
    store: &dyn HouseholdStore,
    family: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;

    let period = match (from, to) {
        (None, None) => None,
        (from, to) => Some(Period {
            from: from.unwrap_or(NaiveDate::MIN),
            to: to.unwrap_or(NaiveDate::MAX),
        }),
    };
    let stats = dashboard_stats(&household, period);

    if output.json {
        return print_json(&json!(stats));
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           🏠 Hearth Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", household.family.name);
    if let Some(p) = period {
        let from = if from.is_some() {
            format_date(p.from, output.locale)
        } else {
            "…".to_string()
        };
        let to = if to.is_some() {
            format_date(p.to, output.locale)
        } else {
            "…".to_string()
        };
        println!("  Period: {} - {}", from, to);
    }
    println!();
    println!("  👪 Members:       {}", stats.family_members);
    println!();
    println!("  💵 Income:        {}", output.money(&household, stats.total_income));
    println!("  💸 Expenses:      {}", output.money(&household, stats.total_expenses));
    println!("  ⚖️  Balance:       {}", output.money(&household, stats.balance));
    println!();
    println!("  🫙 Saved in jars: {}", output.money(&household, stats.savings_jars_total));
    println!("  🤝 Active loans:  {}", stats.active_loans);
    println!();

    if stats.balance < 0.0 {
        println!("  Run 'hearth health' to see who needs attention.");
    }

    Ok(())
}
