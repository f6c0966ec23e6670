//! Hearth Core Library
//!
//! Shared functionality for the Hearth household finance tracker:
//! - Financial health scoring and recommendations per member
//! - Transaction statistics and month grouping
//! - Savings jar and family loan summaries
//! - Family dashboard totals
//! - Locale-aware money and date formatting
//! - Household storage with pluggable backends
//! - Record-level edits (transactions, jars, loans, members)
//! - CSV transaction export

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod format;
pub mod health;
pub mod jars;
pub mod loans;
pub mod models;
pub mod records;
pub mod store;

/// Test utilities including a sample household
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    aggregate_transactions, days_between, group_by_month, is_overdue, Dated, LedgerEntry,
    MonthBucket, MonthKey, TransactionStats,
};
pub use config::HearthConfig;
pub use dashboard::{dashboard_stats, DashboardStats, Period};
pub use error::{Error, Result};
pub use export::{export_transactions_csv, write_transactions_csv, TransactionExportOptions};
pub use format::{format_currency, format_date, format_percent, Locale};
pub use health::{
    compute_health, evaluate_family, evaluate_member, generate_recommendations,
    FinancialHealth, FinancialSnapshot, HealthResult, HealthStatus, Recommendation,
};
pub use jars::{summarize_jars, JarSummary};
pub use loans::{summarize_loans, LoanFilter, LoanSummary};
pub use models::{
    Family, Household, KindFilter, Loan, LoanStatus, Member, Role, SavingsJar, Transaction,
    TransactionCategory, TransactionKind, TransactionStatus,
};
pub use records::{monthly_installments, NewJar, NewLoan, NewTransaction, TransactionUpdate};
pub use store::{HouseholdStore, JsonFileStore, MemoryStore};
