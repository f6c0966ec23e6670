//! Household storage with pluggable backends
//!
//! The core never owns persistence: it reads a family's members,
//! transactions, jars and loans through a `HouseholdStore` and hands the
//! updated collections back. Every read and write is keyed by family id.
//!
//! # Architecture
//!
//! - `HouseholdStore` trait defines the interface for storage backends
//! - `MemoryStore` keeps households in process (tests, one-shot CLI runs)
//! - `JsonFileStore` keeps one `<family-id>.json` document per family
//!
//! Writes replace the whole household document; the last write wins.
//! Record-level edits (add, update, delete, contribute, pay) load the
//! household, apply the edit and save it back in one call.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Household, Loan, Member, SavingsJar, Transaction};
use crate::records::{NewJar, NewLoan, NewTransaction, TransactionUpdate};

mod json_file;

pub use json_file::JsonFileStore;

/// Check that a family id is usable as a document key
///
/// Ids are limited to ASCII letters, digits, `-` and `_` so they can double
/// as file names.
pub fn validate_family_id(family_id: &str) -> Result<()> {
    if family_id.is_empty() {
        return Err(Error::InvalidData("Family id must not be empty".into()));
    }
    if !family_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidData(format!(
            "Invalid family id '{}' (use letters, digits, '-' or '_')",
            family_id
        )));
    }
    Ok(())
}

/// Check a household before it is written
fn validate_household(household: &Household) -> Result<()> {
    validate_family_id(&household.family.id)?;
    for member in &household.members {
        member.validate()?;
    }
    Ok(())
}

/// Load a household, apply `edit` and save it only when the edit succeeds
fn edit_household<S, T>(
    store: &S,
    family_id: &str,
    edit: impl FnOnce(&mut Household) -> Result<T>,
) -> Result<T>
where
    S: HouseholdStore + ?Sized,
{
    let mut household = store.load_household(family_id)?;
    let out = edit(&mut household)?;
    store.save_household(&household)?;
    Ok(out)
}

/// Trait for household storage backends
///
/// Only `load_household`, `save_household` and `family_ids` are required;
/// the per-collection accessors read or rewrite one part of the document
/// and the record-level edits build on the same two calls.
pub trait HouseholdStore: Send + Sync {
    /// Human-readable name for this backend
    fn name(&self) -> &str;

    /// Load everything stored for a family
    fn load_household(&self, family_id: &str) -> Result<Household>;

    /// Replace everything stored for the household's family
    fn save_household(&self, household: &Household) -> Result<()>;

    /// Ids of every stored family, sorted
    fn family_ids(&self) -> Result<Vec<String>>;

    fn members(&self, family_id: &str) -> Result<Vec<Member>> {
        Ok(self.load_household(family_id)?.members)
    }

    fn transactions(&self, family_id: &str) -> Result<Vec<Transaction>> {
        Ok(self.load_household(family_id)?.transactions)
    }

    fn jars(&self, family_id: &str) -> Result<Vec<SavingsJar>> {
        Ok(self.load_household(family_id)?.jars)
    }

    fn loans(&self, family_id: &str) -> Result<Vec<Loan>> {
        Ok(self.load_household(family_id)?.loans)
    }

    fn save_members(&self, family_id: &str, members: Vec<Member>) -> Result<()> {
        let mut household = self.load_household(family_id)?;
        household.members = members;
        self.save_household(&household)
    }

    fn save_transactions(&self, family_id: &str, transactions: Vec<Transaction>) -> Result<()> {
        let mut household = self.load_household(family_id)?;
        household.transactions = transactions;
        self.save_household(&household)
    }

    fn save_jars(&self, family_id: &str, jars: Vec<SavingsJar>) -> Result<()> {
        let mut household = self.load_household(family_id)?;
        household.jars = jars;
        self.save_household(&household)
    }

    fn save_loans(&self, family_id: &str, loans: Vec<Loan>) -> Result<()> {
        let mut household = self.load_household(family_id)?;
        household.loans = loans;
        self.save_household(&household)
    }

    // ----- Members -----

    fn add_member(&self, family_id: &str, member: Member) -> Result<Member> {
        let member = edit_household(self, family_id, |h| h.add_member(member))?;
        info!(family = family_id, member = %member.id, "Member added");
        Ok(member)
    }

    // ----- Transactions -----

    fn add_transaction(&self, family_id: &str, new: NewTransaction) -> Result<Transaction> {
        let transaction = edit_household(self, family_id, |h| h.add_transaction(new))?;
        info!(
            family = family_id,
            transaction = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "Transaction added"
        );
        Ok(transaction)
    }

    fn update_transaction(
        &self,
        family_id: &str,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let transaction = edit_household(self, family_id, |h| h.update_transaction(id, update))?;
        info!(family = family_id, transaction = id, "Transaction updated");
        Ok(transaction)
    }

    fn delete_transaction(&self, family_id: &str, id: &str) -> Result<Transaction> {
        let transaction = edit_household(self, family_id, |h| h.delete_transaction(id))?;
        info!(family = family_id, transaction = id, "Transaction deleted");
        Ok(transaction)
    }

    // ----- Savings Jars -----

    fn add_jar(&self, family_id: &str, new: NewJar) -> Result<SavingsJar> {
        let jar = edit_household(self, family_id, |h| h.add_jar(new))?;
        info!(family = family_id, jar = %jar.id, "Savings jar added");
        Ok(jar)
    }

    fn contribute_to_jar(
        &self,
        family_id: &str,
        jar_id: &str,
        user_id: &str,
        amount: f64,
    ) -> Result<SavingsJar> {
        let jar = edit_household(self, family_id, |h| {
            h.contribute_to_jar(jar_id, user_id, amount)
        })?;
        info!(
            family = family_id,
            jar = jar_id,
            member = user_id,
            amount,
            "Jar contribution recorded"
        );
        Ok(jar)
    }

    fn delete_jar(&self, family_id: &str, id: &str) -> Result<SavingsJar> {
        let jar = edit_household(self, family_id, |h| h.delete_jar(id))?;
        info!(family = family_id, jar = id, "Savings jar deleted");
        Ok(jar)
    }

    // ----- Loans -----

    fn add_loan(&self, family_id: &str, new: NewLoan) -> Result<Loan> {
        let loan = edit_household(self, family_id, |h| h.add_loan(new))?;
        info!(family = family_id, loan = %loan.id, amount = loan.amount, "Loan added");
        Ok(loan)
    }

    fn pay_installment(&self, family_id: &str, loan_id: &str) -> Result<Loan> {
        let loan = edit_household(self, family_id, |h| h.pay_installment(loan_id))?;
        info!(family = family_id, loan = loan_id, status = %loan.status, "Installment paid");
        Ok(loan)
    }

    fn mark_loan_paid(&self, family_id: &str, loan_id: &str) -> Result<Loan> {
        let loan = edit_household(self, family_id, |h| h.mark_loan_paid(loan_id))?;
        info!(family = family_id, loan = loan_id, "Loan settled");
        Ok(loan)
    }

    fn delete_loan(&self, family_id: &str, id: &str) -> Result<Loan> {
        let loan = edit_household(self, family_id, |h| h.delete_loan(id))?;
        info!(family = family_id, loan = id, "Loan deleted");
        Ok(loan)
    }
}

/// In-process household store
#[derive(Debug, Default)]
pub struct MemoryStore {
    households: RwLock<BTreeMap<String, Household>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the given households
    pub fn with_households(households: impl IntoIterator<Item = Household>) -> Result<Self> {
        let store = Self::new();
        for household in households {
            store.save_household(&household)?;
        }
        Ok(store)
    }
}

impl HouseholdStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_household(&self, family_id: &str) -> Result<Household> {
        let households = self.households.read().unwrap_or_else(|e| e.into_inner());
        households
            .get(family_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Family {}", family_id)))
    }

    fn save_household(&self, household: &Household) -> Result<()> {
        validate_household(household)?;
        let mut households = self.households.write().unwrap_or_else(|e| e.into_inner());
        households.insert(household.family.id.clone(), household.clone());
        Ok(())
    }

    fn family_ids(&self) -> Result<Vec<String>> {
        let households = self.households.read().unwrap_or_else(|e| e.into_inner());
        Ok(households.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoanStatus, Role, TransactionKind, TransactionStatus};
    use crate::test_utils::{sample_family, sample_household, FAMILY_ID};
    use chrono::NaiveDate;

    #[test]
    fn test_validate_family_id() {
        assert!(validate_family_id("silva").is_ok());
        assert!(validate_family_id("silva_2-costa").is_ok());
        assert!(validate_family_id("").is_err());
        assert!(validate_family_id("../etc").is_err());
        assert!(validate_family_id("with space").is_err());
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();
        assert_eq!(store.load_household(FAMILY_ID).unwrap(), sample_household());
        assert_eq!(store.family_ids().unwrap(), vec![FAMILY_ID.to_string()]);
    }

    #[test]
    fn test_missing_family_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load_household("nobody").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(store.transactions("nobody").is_err());
    }

    #[test]
    fn test_collection_saves_replace_one_part() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();

        let mut transactions = store.transactions(FAMILY_ID).unwrap();
        transactions.retain(|t| t.user_id == "ana");
        store.save_transactions(FAMILY_ID, transactions).unwrap();

        let household = store.load_household(FAMILY_ID).unwrap();
        assert_eq!(household.transactions.len(), 4);
        // Other collections untouched
        assert_eq!(household.jars.len(), 3);
        assert_eq!(household.loans.len(), 3);
        assert_eq!(household.members.len(), 3);

        store.save_jars(FAMILY_ID, vec![]).unwrap();
        store.save_loans(FAMILY_ID, vec![]).unwrap();
        assert!(store.jars(FAMILY_ID).unwrap().is_empty());
        assert!(store.loans(FAMILY_ID).unwrap().is_empty());
    }

    fn rent(user_id: &str) -> NewTransaction {
        NewTransaction {
            user_id: user_id.to_string(),
            description: "Aluguel abril".to_string(),
            amount: 1800.0,
            kind: TransactionKind::Expense,
            category: None,
            date: NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
            payment_method: None,
            status: TransactionStatus::Pending,
            tags: vec![],
        }
    }

    #[test]
    fn test_transaction_edits_are_persisted() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();

        let added = store.add_transaction(FAMILY_ID, rent("carla")).unwrap();
        assert_eq!(store.transactions(FAMILY_ID).unwrap().len(), 14);

        let update = TransactionUpdate {
            status: Some(TransactionStatus::Completed),
            ..Default::default()
        };
        store.update_transaction(FAMILY_ID, &added.id, update).unwrap();
        let stored = store.transactions(FAMILY_ID).unwrap();
        let stored = stored.iter().find(|t| t.id == added.id).unwrap();
        assert_eq!(stored.status, TransactionStatus::Completed);

        store.delete_transaction(FAMILY_ID, &added.id).unwrap();
        assert_eq!(store.transactions(FAMILY_ID).unwrap(), sample_household().transactions);
    }

    #[test]
    fn test_failed_edit_leaves_store_untouched() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();

        let err = store.add_transaction(FAMILY_ID, rent("stranger")).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        let err = store.delete_loan(FAMILY_ID, "missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let err = store.add_jar("nobody", NewJar::default()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        assert_eq!(store.load_household(FAMILY_ID).unwrap(), sample_household());
    }

    #[test]
    fn test_jar_and_loan_edits() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();

        let jar = store
            .add_jar(
                FAMILY_ID,
                NewJar {
                    name: "Intercâmbio".to_string(),
                    target_amount: 8000.0,
                    ..Default::default()
                },
            )
            .unwrap();
        store.contribute_to_jar(FAMILY_ID, &jar.id, "bruno", 400.0).unwrap();
        let jars = store.jars(FAMILY_ID).unwrap();
        assert_eq!(jars.len(), 4);
        assert_eq!(jars[3].current_amount, 400.0);

        let loan = store
            .add_loan(
                FAMILY_ID,
                NewLoan {
                    lender_id: "carla".to_string(),
                    borrower_id: "bruno".to_string(),
                    amount: 300.0,
                    description: String::new(),
                    due_date: None,
                    installments: vec![],
                    notes: None,
                },
            )
            .unwrap();
        store.mark_loan_paid(FAMILY_ID, &loan.id).unwrap();
        store.pay_installment(FAMILY_ID, "emergency").unwrap();

        let loans = store.loans(FAMILY_ID).unwrap();
        assert_eq!(loans.len(), 4);
        assert_eq!(loans[3].status, LoanStatus::Paid);
        assert_eq!(loans[1].paid_installments(), 2);
    }

    #[test]
    fn test_add_member_through_store() {
        let store = MemoryStore::with_households([sample_household()]).unwrap();
        let dora = crate::test_utils::member("dora", "Dora", Role::Member, 2100.0);

        store.add_member(FAMILY_ID, dora).unwrap();
        let household = store.load_household(FAMILY_ID).unwrap();
        assert_eq!(household.members.len(), 4);
        assert_eq!(household.family.members.last().map(String::as_str), Some("dora"));
    }

    #[test]
    fn test_invalid_member_is_rejected() {
        let store = MemoryStore::with_households([Household::new(sample_family())]).unwrap();
        let mut members = sample_household().members;
        members[1].email = "bruno-at-home".to_string();

        let err = store.save_members(FAMILY_ID, members).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(store.members(FAMILY_ID).unwrap().is_empty());
    }
}
