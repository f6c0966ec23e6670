//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hearth_core::{
    KindFilter, Locale, LoanFilter, Role, TransactionCategory, TransactionKind, TransactionStatus,
};

/// Hearth - Household finances, one family at a time
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Household finance health scores and family reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/hearth/config/hearth.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding household documents
    ///
    /// Overrides HEARTH_DATA_DIR and the config file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Family id to work on (defaults to store.family from config)
    #[arg(short, long, global = true)]
    pub family: Option<String>,

    /// Display locale: pt-BR or en-US (defaults to config)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new family with its admin member
    Init {
        /// Family display name
        #[arg(long)]
        name: String,

        /// Admin member id
        #[arg(long, default_value = "admin")]
        admin_id: String,

        /// Admin member name
        #[arg(long)]
        admin_name: String,

        /// Admin member email
        #[arg(long)]
        admin_email: String,

        /// Admin monthly income
        #[arg(long, default_value = "0")]
        income: f64,

        /// Family currency (defaults to config)
        #[arg(long)]
        currency: Option<String>,
    },

    /// Score a single set of monthly numbers without touching the store
    Score {
        /// Monthly income
        #[arg(long)]
        income: f64,

        /// Total monthly expenses
        #[arg(long)]
        expenses: f64,

        /// Total monthly savings
        #[arg(long, default_value = "0")]
        savings: f64,
    },

    /// Health report for every member (or one member)
    Health {
        /// Only report on this member id
        #[arg(short, long)]
        member: Option<String>,
    },

    /// Income, expense and balance totals
    Stats {
        /// Transaction filter: all, income, expense
        #[arg(short, long, default_value = "all")]
        kind: KindFilter,

        /// Only this member's transactions
        #[arg(short, long)]
        member: Option<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Transactions grouped by calendar month
    Months {
        /// Transaction filter: all, income, expense
        #[arg(short, long, default_value = "all")]
        kind: KindFilter,

        /// List each transaction under its month
        #[arg(long)]
        details: bool,
    },

    /// Manage family members (list, add)
    Members {
        #[command(subcommand)]
        action: Option<MembersAction>,
    },

    /// Record transactions (add, update, delete)
    Transactions {
        #[command(subcommand)]
        action: TransactionsAction,
    },

    /// Savings jar progress, or manage jars (add, contribute, delete)
    Jars {
        #[command(subcommand)]
        action: Option<JarsAction>,
    },

    /// Loans between family members, or manage loans (add, pay, settle, delete)
    Loans {
        /// Status filter: all, active, paid, overdue
        #[arg(short, long, default_value = "all")]
        status: LoanFilter,

        #[command(subcommand)]
        action: Option<LoansAction>,
    },

    /// Family dashboard summary
    Dashboard {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Export transactions to CSV
    Export {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Transaction filter: all, income, expense
        #[arg(short, long, default_value = "all")]
        kind: KindFilter,

        /// Only this member's transactions
        #[arg(short, long)]
        member: Option<String>,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum MembersAction {
    /// Add a member to the family
    Add {
        /// Member id (unique within the family)
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Monthly income
        #[arg(long, default_value = "0")]
        income: f64,

        /// Role: admin or member
        #[arg(long, default_value = "member")]
        role: Role,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// Record a new transaction
    Add {
        /// Member the transaction belongs to
        #[arg(short, long)]
        member: String,

        /// Type: income, expense, savings, loan_payment, loan_received
        #[arg(short, long)]
        kind: TransactionKind,

        /// Amount (positive)
        #[arg(short, long)]
        amount: f64,

        /// What the money was for
        #[arg(short, long)]
        description: String,

        /// Category: income, expense, savings, loan (defaults from type)
        #[arg(long)]
        category: Option<TransactionCategory>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Status: pending or completed
        #[arg(long, default_value = "completed")]
        status: TransactionStatus,

        /// Payment method (e.g. "pix", "credit card")
        #[arg(long)]
        payment_method: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Change fields of a recorded transaction
    Update {
        /// Transaction ID
        id: String,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,

        /// New type
        #[arg(short, long)]
        kind: Option<TransactionKind>,

        /// New category
        #[arg(long)]
        category: Option<TransactionCategory>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// New status
        #[arg(long)]
        status: Option<TransactionStatus>,

        /// New payment method
        #[arg(long)]
        payment_method: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum JarsAction {
    /// Create a savings jar
    Add {
        /// Jar name
        #[arg(long)]
        name: String,

        /// Target amount
        #[arg(long)]
        target: f64,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,

        /// Icon shown next to the jar
        #[arg(long, default_value = "")]
        icon: String,

        /// Display color
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Put money into a jar
    Contribute {
        /// Jar ID
        id: String,

        /// Contributing member
        #[arg(short, long)]
        member: String,

        /// Amount (positive)
        #[arg(short, long)]
        amount: f64,
    },

    /// Delete a jar
    Delete {
        /// Jar ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum LoansAction {
    /// Record a loan between two members
    Add {
        /// Member lending the money
        #[arg(long)]
        lender: String,

        /// Member receiving the money
        #[arg(long)]
        borrower: String,

        /// Amount lent
        #[arg(short, long)]
        amount: f64,

        /// What the loan is for
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date (YYYY-MM-DD); first installment date when splitting
        #[arg(long)]
        due: Option<NaiveDate>,

        /// Split into this many monthly installments
        #[arg(long)]
        installments: Option<u32>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Pay the next open installment
    Pay {
        /// Loan ID
        id: String,
    },

    /// Mark a loan as fully paid
    Settle {
        /// Loan ID
        id: String,
    },

    /// Delete a loan
    Delete {
        /// Loan ID
        id: String,
    },
}
