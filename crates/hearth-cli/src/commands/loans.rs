//! Loan commands
//!
//! - `cmd_loans` - List loans with totals
//! - `cmd_loans_add` / `cmd_loans_pay` / `cmd_loans_settle` / `cmd_loans_delete` - Manage loans

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use hearth_core::format::format_date;
use hearth_core::loans::filter_loans;
use hearth_core::{
    monthly_installments, summarize_loans, Household, HouseholdStore, Loan, LoanFilter,
    LoanStatus, NewLoan,
};
use serde_json::json;

use super::core::{load_household, print_json, Output};

fn status_icon(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Active => "🟡",
        LoanStatus::Paid => "✅",
        LoanStatus::Overdue => "🔴",
    }
}

fn member_name<'a>(household: &'a Household, id: &'a str) -> &'a str {
    household.member(id).map(|m| m.name.as_str()).unwrap_or(id)
}

pub fn cmd_loans(
    store: &dyn HouseholdStore,
    family: &str,
    filter: LoanFilter,
    today: NaiveDate,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let loans = filter_loans(&household.loans, filter);
    let summary = summarize_loans(&household.loans, today);

    if output.json {
        let loans: Vec<_> = loans
            .iter()
            .map(|loan| {
                json!({
                    "loan": loan,
                    "effective_status": loan.effective_status(today),
                    "outstanding": loan.outstanding(),
                    "next_installment_due": loan.next_installment_due(),
                })
            })
            .collect();
        return print_json(&json!({ "loans": loans, "summary": summary }));
    }

    if loans.is_empty() {
        println!("No loans found.");
        return Ok(());
    }

    println!();
    println!("🤝 Family Loans");
    println!("   ─────────────────────────────");

    for loan in &loans {
        let status = loan.effective_status(today);
        println!();
        println!(
            "   {} {} → {}: {} ({})",
            status_icon(status),
            member_name(&household, &loan.lender_id),
            member_name(&household, &loan.borrower_id),
            output.money(&household, loan.amount),
            status
        );
        println!("      id: {}", loan.id);
        if !loan.description.is_empty() {
            println!("      {}", loan.description);
        }
        if let Some(due) = loan.due_date {
            println!("      Due: {}", format_date(due, output.locale));
        }
        if !loan.installments.is_empty() {
            println!(
                "      Installments: {}/{} paid, {} outstanding",
                loan.paid_installments(),
                loan.installments.len(),
                output.money(&household, loan.outstanding())
            );
            if let Some(next) = loan.next_installment_due() {
                println!("      Next installment: {}", format_date(next, output.locale));
            }
        }
    }

    println!();
    println!(
        "   Active: {} ({} loans)",
        output.money(&household, summary.total_active),
        summary.active_count
    );
    println!("   Paid:   {}", output.money(&household, summary.total_paid));
    println!("   Outstanding: {}", output.money(&household, summary.outstanding));
    if summary.overdue_count > 0 {
        println!("   ⚠️  Overdue: {}", summary.overdue_count);
    }

    Ok(())
}

/// Everything needed to record a loan from the command line
#[derive(Debug, Clone)]
pub struct LoanRequest {
    pub lender: String,
    pub borrower: String,
    pub amount: f64,
    pub description: String,
    pub due: Option<NaiveDate>,
    /// Monthly installments to split the amount into
    pub installments: Option<u32>,
    pub notes: Option<String>,
}

pub fn cmd_loans_add(
    store: &dyn HouseholdStore,
    family: &str,
    request: LoanRequest,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;

    let installments = match (request.installments, request.due) {
        (None, _) => Vec::new(),
        (Some(count), Some(first_due)) => monthly_installments(request.amount, count, first_due)?,
        (Some(_), None) => bail!("--installments needs --due for the first installment date"),
    };
    // The last installment is the final due date
    let due_date = installments.last().map(|i| i.due_date).or(request.due);

    let loan = store
        .add_loan(
            family,
            NewLoan {
                lender_id: request.lender,
                borrower_id: request.borrower,
                amount: request.amount,
                description: request.description,
                due_date,
                installments,
                notes: request.notes,
            },
        )
        .context("Failed to record loan")?;

    if output.json {
        return print_json(&json!(loan));
    }

    println!(
        "✅ Recorded loan {} → {}: {} (id: {})",
        member_name(&household, &loan.lender_id),
        member_name(&household, &loan.borrower_id),
        output.money(&household, loan.amount),
        loan.id
    );
    if !loan.installments.is_empty() {
        println!(
            "   {} installments, first due {}",
            loan.installments.len(),
            format_date(loan.installments[0].due_date, output.locale)
        );
    }
    Ok(())
}

fn print_loan_update(household: &Household, loan: &Loan, output: &Output) -> Result<()> {
    if output.json {
        return print_json(&json!({ "loan": loan, "outstanding": loan.outstanding() }));
    }

    if loan.status == LoanStatus::Paid {
        println!(
            "✅ Loan {} → {} is fully paid",
            member_name(household, &loan.lender_id),
            member_name(household, &loan.borrower_id)
        );
    } else {
        println!(
            "✅ Installment paid: {}/{}, {} outstanding",
            loan.paid_installments(),
            loan.installments.len(),
            output.money(household, loan.outstanding())
        );
    }
    Ok(())
}

pub fn cmd_loans_pay(
    store: &dyn HouseholdStore,
    family: &str,
    loan_id: &str,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let loan = store
        .pay_installment(family, loan_id)
        .with_context(|| format!("Failed to pay installment on loan '{}'", loan_id))?;
    print_loan_update(&household, &loan, output)
}

pub fn cmd_loans_settle(
    store: &dyn HouseholdStore,
    family: &str,
    loan_id: &str,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let loan = store
        .mark_loan_paid(family, loan_id)
        .with_context(|| format!("Failed to settle loan '{}'", loan_id))?;
    print_loan_update(&household, &loan, output)
}

pub fn cmd_loans_delete(
    store: &dyn HouseholdStore,
    family: &str,
    loan_id: &str,
    output: &Output,
) -> Result<()> {
    load_household(store, family)?;
    let loan = store
        .delete_loan(family, loan_id)
        .with_context(|| format!("Failed to delete loan '{}'", loan_id))?;

    if output.json {
        return print_json(&json!(loan));
    }

    println!("✅ Deleted loan {}", loan.id);
    Ok(())
}
