//! Health scoring commands
//!
//! - `cmd_score` - Score raw monthly numbers
//! - `cmd_health` - Health report per family member

use anyhow::{bail, Result};
use hearth_core::format::format_percent;
use hearth_core::health::{
    compute_health, evaluate_family, evaluate_member, generate_recommendations_localized,
    score_breakdown, FinancialHealth, FinancialSnapshot, HealthStatus,
};
use hearth_core::{Household, HouseholdStore};
use serde_json::json;

use super::core::{load_household, print_json, Output};

fn status_icon(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "🟢",
        HealthStatus::Good => "🔵",
        HealthStatus::Warning => "🟡",
        HealthStatus::Alert => "🔴",
    }
}

pub fn cmd_score(income: f64, expenses: f64, savings: f64, output: &Output) -> Result<()> {
    let snapshot = FinancialSnapshot::new(income, expenses, savings);
    let result = compute_health(&snapshot);
    let breakdown = score_breakdown(&snapshot);
    let recommendations = generate_recommendations_localized(&snapshot, result.status, output.locale);

    if output.json {
        return print_json(&json!({
            "snapshot": snapshot,
            "score": result.score,
            "status": result.status,
            "breakdown": breakdown,
            "recommendations": recommendations,
        }));
    }

    println!();
    println!(
        "{} Health score: {}/100 ({})",
        status_icon(result.status),
        result.score,
        result.status.label(output.locale)
    );
    println!("   ─────────────────────────────");

    match breakdown {
        Some(b) => {
            println!(
                "   Savings rate:  {:>7}  {:+}",
                format_percent(b.savings_rate, output.locale),
                b.savings_points
            );
            println!(
                "   Expense ratio: {:>7}  {:+}",
                format_percent(b.expense_ratio, output.locale),
                b.expense_points
            );
            println!("   Balance:       {:>7.2}  {:+}", b.balance, b.balance_points);
        }
        None => println!("   No income: nothing to score against"),
    }

    print_recommendations(&recommendations);
    Ok(())
}

pub fn cmd_health(
    store: &dyn HouseholdStore,
    family: &str,
    member: Option<&str>,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;

    let reports = match member {
        Some(id) => match household.member(id) {
            Some(m) => vec![evaluate_member(m, &household.transactions, output.locale)],
            None => bail!("Member '{}' not found in family '{}'", id, family),
        },
        None => evaluate_family(&household, output.locale),
    };

    if output.json {
        return print_json(&json!(reports));
    }

    if reports.is_empty() {
        println!("No members in family '{}' yet.", family);
        return Ok(());
    }

    println!();
    println!("🏠 {} - financial health", household.family.name);

    for report in &reports {
        print_report(&household, report, output);
    }

    Ok(())
}

fn print_report(household: &Household, report: &FinancialHealth, output: &Output) {
    let name = household
        .member(&report.user_id)
        .map(|m| m.name.as_str())
        .unwrap_or(report.user_id.as_str());

    println!();
    println!(
        "{} {}: {}/100 ({})",
        status_icon(report.status),
        name,
        report.health_score,
        report.status.label(output.locale)
    );
    println!("   ─────────────────────────────");
    println!("   Income:       {}", output.money(household, report.monthly_income));
    println!("   Expenses:     {}", output.money(household, report.total_expenses));
    println!("   Savings:      {}", output.money(household, report.total_savings));
    println!(
        "   Savings rate: {}",
        format_percent(report.savings_rate, output.locale)
    );
    if let Some(ratio) = report.snapshot().expense_ratio() {
        println!("   Spent:        {}", format_percent(ratio, output.locale));
    }

    print_recommendations(&report.recommendations);
}

fn print_recommendations(recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    println!();
    println!("   💡 Recommendations:");
    for tip in recommendations {
        println!("      • {}", tip);
    }
}
