//! Domain models for Hearth
//!
//! These are the record shapes the household store hands to the core. Ids are
//! opaque strings assigned by the store.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ========== Household Models ==========

/// Role of a member inside a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person in the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub family_id: String,
    #[serde(default)]
    pub role: Role,
    /// Declared monthly income, the denominator for every health ratio
    pub monthly_income: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Check an email address has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

impl Member {
    /// Reject profiles the health engine cannot reason about
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidData(format!(
                "Member {} has an empty name",
                self.id
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(Error::InvalidData(format!(
                "Member {} has an invalid email: {}",
                self.id, self.email
            )));
        }
        if !self.monthly_income.is_finite() || self.monthly_income < 0.0 {
            return Err(Error::InvalidData(format!(
                "Member {} has an invalid monthly income: {}",
                self.id, self.monthly_income
            )));
        }
        Ok(())
    }
}

/// A family groups members and owns every other record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    /// Member ids
    #[serde(default)]
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// ISO 4217 code, e.g. "BRL"
    pub currency: String,
}

// ========== Transaction Models ==========

/// Broad bucket a transaction is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Income,
    Expense,
    Savings,
    Loan,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
            Self::Loan => "loan",
        }
    }
}

impl std::str::FromStr for TransactionCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "savings" => Ok(Self::Savings),
            "loan" => Ok(Self::Loan),
            _ => Err(format!("Unknown transaction category: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the money movement was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Savings,
    LoanPayment,
    LoanReceived,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
            Self::LoanPayment => "loan_payment",
            Self::LoanReceived => "loan_received",
        }
    }

    /// Category a kind is filed under when none is given
    pub fn default_category(&self) -> TransactionCategory {
        match self {
            Self::Income => TransactionCategory::Income,
            Self::Expense => TransactionCategory::Expense,
            Self::Savings => TransactionCategory::Savings,
            Self::LoanPayment | Self::LoanReceived => TransactionCategory::Loan,
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "savings" => Ok(Self::Savings),
            "loan_payment" => Ok(Self::LoanPayment),
            "loan_received" => Ok(Self::LoanReceived),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Completed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded money movement for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Member who made or received the movement
    pub user_id: String,
    pub family_id: String,
    pub description: String,
    /// Always positive; direction comes from `kind`
    pub amount: f64,
    pub category: TransactionCategory,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter used by the cash-flow view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

impl std::str::FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction filter: {} (valid: all, income, expense)",
                s
            )),
        }
    }
}

/// Keep transactions matching `filter`, in their original order
pub fn filter_transactions(transactions: &[Transaction], filter: KindFilter) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t.kind))
        .collect()
}

// ========== Savings Jar Models ==========

/// How much one member has put into a jar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JarContribution {
    pub user_id: String,
    pub amount: f64,
}

/// A named savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsJar {
    pub id: String,
    pub family_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub contributors: Vec<JarContribution>,
}

// ========== Loan Models ==========

/// Stored state of a loan between members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Active,
    Paid,
    Overdue,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!("Unknown loan status: {}", s)),
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled repayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
}

/// Money lent from one member to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub family_id: String,
    pub lender_id: String,
    pub borrower_id: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installments: Vec<Installment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ========== Household Document ==========

/// Everything stored for one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub family: Family,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub jars: Vec<SavingsJar>,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl Household {
    /// An empty household for a freshly created family
    pub fn new(family: Family) -> Self {
        Self {
            family,
            members: Vec::new(),
            transactions: Vec::new(),
            jars: Vec::new(),
            loans: Vec::new(),
        }
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Transactions belonging to one member, in stored order
    pub fn transactions_for(&self, user_id: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .collect()
    }
}
