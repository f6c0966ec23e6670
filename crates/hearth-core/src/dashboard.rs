//! Family dashboard summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_transactions;
use crate::models::{Household, LoanStatus, Transaction};

/// Headline numbers for the family dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    /// Current amount across every savings jar
    pub savings_jars_total: f64,
    /// Loans not yet paid off
    pub active_loans: usize,
    pub family_members: usize,
}

/// Inclusive date range used to restrict the cash-flow totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Build dashboard stats; cash flow is limited to `period` when given
pub fn dashboard_stats(household: &Household, period: Option<Period>) -> DashboardStats {
    let in_period: Vec<&Transaction> = household
        .transactions
        .iter()
        .filter(|t| period.map_or(true, |p| p.contains(t.date)))
        .collect();
    let cash_flow = aggregate_transactions(&in_period);

    DashboardStats {
        total_income: cash_flow.total_income,
        total_expenses: cash_flow.total_expenses,
        balance: cash_flow.balance,
        savings_jars_total: household.jars.iter().map(|j| j.current_amount).sum(),
        active_loans: household
            .loans
            .iter()
            .filter(|l| l.status != LoanStatus::Paid)
            .count(),
        family_members: household.members.len(),
    }
}
