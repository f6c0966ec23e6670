//! Loans between family members

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::is_overdue;
use crate::models::{Loan, LoanStatus};

impl Loan {
    /// Status as it should be shown today: an active loan past its due date
    /// reads as overdue even if nobody has updated the record yet.
    pub fn effective_status(&self, today: NaiveDate) -> LoanStatus {
        match (self.status, self.due_date) {
            (LoanStatus::Active, Some(due)) if is_overdue(due, today) => LoanStatus::Overdue,
            (status, _) => status,
        }
    }

    pub fn paid_installments(&self) -> usize {
        self.installments.iter().filter(|i| i.paid).count()
    }

    /// Sum of unpaid installments, or the full amount when there is no schedule
    pub fn outstanding(&self) -> f64 {
        if self.status == LoanStatus::Paid {
            return 0.0;
        }
        if self.installments.is_empty() {
            return self.amount;
        }
        self.installments
            .iter()
            .filter(|i| !i.paid)
            .map(|i| i.amount)
            .sum()
    }

    /// Earliest unpaid installment due date
    pub fn next_installment_due(&self) -> Option<NaiveDate> {
        self.installments
            .iter()
            .filter(|i| !i.paid)
            .map(|i| i.due_date)
            .min()
    }
}

/// Which loans to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanFilter {
    #[default]
    All,
    Status(LoanStatus),
}

impl std::str::FromStr for LoanFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<LoanStatus>().map(Self::Status)
    }
}

/// Loans matching `filter` by their stored status, in original order
pub fn filter_loans(loans: &[Loan], filter: LoanFilter) -> Vec<&Loan> {
    loans
        .iter()
        .filter(|l| match filter {
            LoanFilter::All => true,
            LoanFilter::Status(status) => l.status == status,
        })
        .collect()
}

/// Totals across a family's loans
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Principal of loans stored as active
    pub total_active: f64,
    /// Principal of loans stored as paid
    pub total_paid: f64,
    pub active_count: usize,
    /// Loans whose effective status today is overdue
    pub overdue_count: usize,
    /// What is still owed across every unpaid loan
    pub outstanding: f64,
}

pub fn summarize_loans(loans: &[Loan], today: NaiveDate) -> LoanSummary {
    let mut summary = LoanSummary::default();

    for loan in loans {
        match loan.status {
            LoanStatus::Active => {
                summary.total_active += loan.amount;
                summary.active_count += 1;
            }
            LoanStatus::Paid => summary.total_paid += loan.amount,
            LoanStatus::Overdue => {}
        }
        if loan.effective_status(today) == LoanStatus::Overdue {
            summary.overdue_count += 1;
        }
        summary.outstanding += loan.outstanding();
    }

    summary
}
