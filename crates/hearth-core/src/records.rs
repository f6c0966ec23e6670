//! Record-level edits on a household
//!
//! Each edit works on a loaded `Household`, checks member references against
//! it and hands back the record as stored. `HouseholdStore` wraps these in a
//! load, edit, save cycle.

use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    Household, Installment, JarContribution, Loan, LoanStatus, Member, SavingsJar, Transaction,
    TransactionCategory, TransactionKind, TransactionStatus,
};

/// Fresh opaque id for a new record
pub fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn check_amount(what: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be a positive amount, got {}",
            what, amount
        )));
    }
    Ok(())
}

// ========== Inputs ==========

/// A transaction before the store has given it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    /// Defaults to the kind's own category
    pub category: Option<TransactionCategory>,
    pub date: NaiveDate,
    pub payment_method: Option<String>,
    pub status: TransactionStatus,
    pub tags: Vec<String>,
}

/// Fields to change on a stored transaction; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<TransactionCategory>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub status: Option<TransactionStatus>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A savings jar before the store has given it an id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewJar {
    pub name: String,
    pub description: String,
    pub target_amount: f64,
    pub icon: String,
    pub color: String,
    pub deadline: Option<NaiveDate>,
}

/// A loan before the store has given it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub lender_id: String,
    pub borrower_id: String,
    pub amount: f64,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    /// Repayment schedule; empty for a single lump-sum repayment
    pub installments: Vec<Installment>,
    pub notes: Option<String>,
}

/// Split `amount` into `count` monthly installments starting at `first_due`.
///
/// Every installment is rounded down to cents and the last one takes the
/// remainder, so the schedule always sums to `amount`.
pub fn monthly_installments(
    amount: f64,
    count: u32,
    first_due: NaiveDate,
) -> Result<Vec<Installment>> {
    check_amount("Loan amount", amount)?;
    if count == 0 {
        return Err(Error::InvalidData("Installment count must be at least 1".into()));
    }

    let share = (amount / f64::from(count) * 100.0).floor() / 100.0;
    let mut schedule = Vec::with_capacity(count as usize);
    for n in 0..count {
        let due_date = first_due.checked_add_months(Months::new(n)).ok_or_else(|| {
            Error::InvalidData(format!("Installment {} is out of date range", n + 1))
        })?;
        let amount = if n + 1 == count {
            amount - share * f64::from(count - 1)
        } else {
            share
        };
        schedule.push(Installment {
            amount,
            due_date,
            paid: false,
        });
    }
    Ok(schedule)
}

// ========== Household Edits ==========

impl Household {
    fn require_member(&self, user_id: &str) -> Result<()> {
        if self.member(user_id).is_none() {
            return Err(Error::InvalidData(format!(
                "Member {} does not belong to family {}",
                user_id, self.family.id
            )));
        }
        Ok(())
    }

    fn transaction_mut(&mut self, id: &str) -> Result<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    fn jar_mut(&mut self, id: &str) -> Result<&mut SavingsJar> {
        self.jars
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| Error::NotFound(format!("Savings jar {}", id)))
    }

    fn loan_mut(&mut self, id: &str) -> Result<&mut Loan> {
        self.loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::NotFound(format!("Loan {}", id)))
    }

    /// Add a member to the family, registering their id on the family record
    pub fn add_member(&mut self, mut member: Member) -> Result<Member> {
        member.family_id = self.family.id.clone();
        member.validate()?;
        if self.member(&member.id).is_some() {
            return Err(Error::InvalidData(format!(
                "Member {} already exists in family {}",
                member.id, self.family.id
            )));
        }

        if !self.family.members.contains(&member.id) {
            self.family.members.push(member.id.clone());
        }
        self.members.push(member.clone());
        Ok(member)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.require_member(&new.user_id)?;
        check_amount("Transaction amount", new.amount)?;
        if new.description.trim().is_empty() {
            return Err(Error::InvalidData(
                "Transaction description must not be empty".into(),
            ));
        }

        let transaction = Transaction {
            id: new_record_id(),
            user_id: new.user_id,
            family_id: self.family.id.clone(),
            description: new.description,
            amount: new.amount,
            category: new.category.unwrap_or_else(|| new.kind.default_category()),
            kind: new.kind,
            date: new.date,
            payment_method: new.payment_method,
            status: new.status,
            tags: new.tags,
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Apply `update` to one transaction.
    ///
    /// Changing the kind without naming a category files the transaction
    /// under the new kind's default category.
    pub fn update_transaction(
        &mut self,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        if let Some(amount) = update.amount {
            check_amount("Transaction amount", amount)?;
        }
        if matches!(update.description.as_deref(), Some(d) if d.trim().is_empty()) {
            return Err(Error::InvalidData(
                "Transaction description must not be empty".into(),
            ));
        }

        let transaction = self.transaction_mut(id)?;
        if let Some(description) = update.description {
            transaction.description = description;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(kind) = update.kind {
            transaction.kind = kind;
            transaction.category = kind.default_category();
        }
        if let Some(category) = update.category {
            transaction.category = category;
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }
        if update.payment_method.is_some() {
            transaction.payment_method = update.payment_method;
        }
        if let Some(status) = update.status {
            transaction.status = status;
        }
        Ok(transaction.clone())
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
        Ok(self.transactions.remove(index))
    }

    pub fn add_jar(&mut self, new: NewJar) -> Result<SavingsJar> {
        if new.name.trim().is_empty() {
            return Err(Error::InvalidData("Jar name must not be empty".into()));
        }
        if !new.target_amount.is_finite() || new.target_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Jar target must not be negative, got {}",
                new.target_amount
            )));
        }

        let jar = SavingsJar {
            id: new_record_id(),
            family_id: self.family.id.clone(),
            name: new.name,
            description: new.description,
            target_amount: new.target_amount,
            current_amount: 0.0,
            icon: new.icon,
            color: new.color,
            deadline: new.deadline,
            created_at: Utc::now(),
            contributors: Vec::new(),
        };
        self.jars.push(jar.clone());
        Ok(jar)
    }

    /// Put money into a jar on behalf of a member.
    ///
    /// Repeat contributions from the same member add up in a single entry.
    pub fn contribute_to_jar(
        &mut self,
        jar_id: &str,
        user_id: &str,
        amount: f64,
    ) -> Result<SavingsJar> {
        self.require_member(user_id)?;
        check_amount("Contribution", amount)?;

        let jar = self.jar_mut(jar_id)?;
        jar.current_amount += amount;
        match jar.contributors.iter_mut().find(|c| c.user_id == user_id) {
            Some(contribution) => contribution.amount += amount,
            None => jar.contributors.push(JarContribution {
                user_id: user_id.to_string(),
                amount,
            }),
        }
        Ok(jar.clone())
    }

    pub fn delete_jar(&mut self, id: &str) -> Result<SavingsJar> {
        let index = self
            .jars
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| Error::NotFound(format!("Savings jar {}", id)))?;
        Ok(self.jars.remove(index))
    }

    pub fn add_loan(&mut self, new: NewLoan) -> Result<Loan> {
        self.require_member(&new.lender_id)?;
        self.require_member(&new.borrower_id)?;
        if new.lender_id == new.borrower_id {
            return Err(Error::InvalidData(format!(
                "Member {} cannot lend to themselves",
                new.lender_id
            )));
        }
        check_amount("Loan amount", new.amount)?;
        for installment in &new.installments {
            check_amount("Installment amount", installment.amount)?;
        }

        let loan = Loan {
            id: new_record_id(),
            family_id: self.family.id.clone(),
            lender_id: new.lender_id,
            borrower_id: new.borrower_id,
            amount: new.amount,
            description: new.description,
            created_at: Utc::now(),
            due_date: new.due_date,
            status: LoanStatus::Active,
            installments: new.installments,
            notes: new.notes,
        };
        self.loans.push(loan.clone());
        Ok(loan)
    }

    /// Mark the earliest unpaid installment as paid.
    ///
    /// Paying the last open installment settles the loan.
    pub fn pay_installment(&mut self, loan_id: &str) -> Result<Loan> {
        let loan = self.loan_mut(loan_id)?;
        if loan.status == LoanStatus::Paid {
            return Err(Error::InvalidData(format!("Loan {} is already paid", loan_id)));
        }

        let next = loan
            .installments
            .iter_mut()
            .filter(|i| !i.paid)
            .min_by_key(|i| i.due_date)
            .ok_or_else(|| {
                Error::InvalidData(format!("Loan {} has no open installments", loan_id))
            })?;
        next.paid = true;

        if loan.installments.iter().all(|i| i.paid) {
            loan.status = LoanStatus::Paid;
        }
        Ok(loan.clone())
    }

    /// Settle a loan in full, closing any open installments
    pub fn mark_loan_paid(&mut self, loan_id: &str) -> Result<Loan> {
        let loan = self.loan_mut(loan_id)?;
        if loan.status == LoanStatus::Paid {
            return Err(Error::InvalidData(format!("Loan {} is already paid", loan_id)));
        }

        loan.status = LoanStatus::Paid;
        for installment in &mut loan.installments {
            installment.paid = true;
        }
        Ok(loan.clone())
    }

    pub fn delete_loan(&mut self, id: &str) -> Result<Loan> {
        let index = self
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| Error::NotFound(format!("Loan {}", id)))?;
        Ok(self.loans.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_utils::{member, sample_household};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn groceries(user_id: &str) -> NewTransaction {
        NewTransaction {
            user_id: user_id.to_string(),
            description: "Mercado".to_string(),
            amount: 250.0,
            kind: TransactionKind::Expense,
            category: None,
            date: date(2026, 3, 21),
            payment_method: Some("pix".to_string()),
            status: TransactionStatus::Completed,
            tags: vec![],
        }
    }

    fn lend(lender: &str, borrower: &str) -> NewLoan {
        NewLoan {
            lender_id: lender.to_string(),
            borrower_id: borrower.to_string(),
            amount: 900.0,
            description: "Conserto do carro".to_string(),
            due_date: Some(date(2026, 6, 30)),
            installments: vec![],
            notes: None,
        }
    }

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
        assert_eq!(new_record_id().len(), 32);
    }

    #[test]
    fn test_add_transaction() {
        let mut household = sample_household();
        let before = household.transactions.len();

        let tx = household.add_transaction(groceries("carla")).unwrap();
        assert_eq!(household.transactions.len(), before + 1);
        assert_eq!(tx.family_id, "silva");
        assert_eq!(tx.category, TransactionCategory::Expense);
        assert_eq!(household.transactions.last(), Some(&tx));
    }

    #[test]
    fn test_add_transaction_rejects_bad_input() {
        let mut household = sample_household();

        let err = household.add_transaction(groceries("stranger")).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        let mut zero = groceries("ana");
        zero.amount = 0.0;
        assert!(household.add_transaction(zero).is_err());

        let mut blank = groceries("ana");
        blank.description = "  ".to_string();
        assert!(household.add_transaction(blank).is_err());

        assert_eq!(household.transactions, sample_household().transactions);
    }

    #[test]
    fn test_update_transaction_merges_fields() {
        let mut household = sample_household();

        let updated = household
            .update_transaction(
                "bruno-car",
                TransactionUpdate {
                    amount: Some(2300.0),
                    status: Some(TransactionStatus::Pending),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 2300.0);
        assert_eq!(updated.status, TransactionStatus::Pending);
        assert_eq!(updated.description, "bruno car");
        assert_eq!(updated.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_update_transaction_kind_resets_category() {
        let mut household = sample_household();

        let moved = household
            .update_transaction(
                "ana-market",
                TransactionUpdate {
                    kind: Some(TransactionKind::Savings),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.category, TransactionCategory::Savings);

        let err = household
            .update_transaction("missing", TransactionUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = household
            .update_transaction(
                "ana-market",
                TransactionUpdate {
                    amount: Some(-5.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_delete_transaction() {
        let mut household = sample_household();
        let removed = household.delete_transaction("carla-school").unwrap();
        assert_eq!(removed.amount, 900.0);
        assert!(household.transactions.iter().all(|t| t.id != "carla-school"));
        assert!(household.delete_transaction("carla-school").is_err());
    }

    #[test]
    fn test_add_member_registers_id() {
        let mut household = sample_household();
        let mut dora = member("dora", "Dora", Role::Member, 1200.0);
        dora.family_id = "elsewhere".to_string();

        let added = household.add_member(dora.clone()).unwrap();
        assert_eq!(added.family_id, "silva");
        assert_eq!(household.members.len(), 4);
        assert!(household.family.members.contains(&"dora".to_string()));

        assert!(household.add_member(dora).is_err());

        let mut invalid = member("eva", "Eva", Role::Member, 0.0);
        invalid.email = "eva".to_string();
        assert!(household.add_member(invalid).is_err());
        assert_eq!(household.members.len(), 4);
    }

    #[test]
    fn test_jar_contributions_accumulate() {
        let mut household = sample_household();
        let jar = household
            .add_jar(NewJar {
                name: "Natal".to_string(),
                target_amount: 1000.0,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(jar.current_amount, 0.0);

        household.contribute_to_jar(&jar.id, "ana", 150.0).unwrap();
        let jar = household.contribute_to_jar(&jar.id, "ana", 50.0).unwrap();
        let jar = household.contribute_to_jar(&jar.id, "carla", 300.0).unwrap();

        assert_eq!(jar.current_amount, 500.0);
        assert_eq!(jar.contributors.len(), 2);
        assert_eq!(jar.contributors[0].amount, 200.0);
        assert_eq!(jar.progress(), 50.0);
    }

    #[test]
    fn test_jar_rejects_bad_input() {
        let mut household = sample_household();
        assert!(household.add_jar(NewJar::default()).is_err());
        assert!(household
            .add_jar(NewJar {
                name: "Negativo".to_string(),
                target_amount: -1.0,
                ..Default::default()
            })
            .is_err());

        assert!(household.contribute_to_jar("vacation", "stranger", 10.0).is_err());
        assert!(household.contribute_to_jar("vacation", "ana", 0.0).is_err());
        let err = household.contribute_to_jar("nope", "ana", 10.0).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let removed = household.delete_jar("house").unwrap();
        assert_eq!(removed.name, "Reforma da Casa");
        assert_eq!(household.jars.len(), 2);
    }

    #[test]
    fn test_monthly_installments_sum_to_amount() {
        let schedule = monthly_installments(1000.0, 3, date(2026, 1, 31)).unwrap();
        let amounts: Vec<f64> = schedule.iter().map(|i| i.amount).collect();
        assert_eq!(amounts[0], 333.33);
        assert_eq!(amounts[1], 333.33);
        assert!((amounts[2] - 333.34).abs() < 1e-9);
        // Month-end dates clamp to the shorter month
        assert_eq!(schedule[1].due_date, date(2026, 2, 28));
        assert_eq!(schedule[2].due_date, date(2026, 3, 31));

        assert!(monthly_installments(1000.0, 0, date(2026, 1, 1)).is_err());
        assert!(monthly_installments(0.0, 2, date(2026, 1, 1)).is_err());
    }

    #[test]
    fn test_add_loan_checks_members() {
        let mut household = sample_household();

        let loan = household.add_loan(lend("ana", "carla")).unwrap();
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.outstanding(), 900.0);
        assert_eq!(household.loans.len(), 4);

        assert!(household.add_loan(lend("ana", "ana")).is_err());
        assert!(household.add_loan(lend("ana", "stranger")).is_err());
        assert_eq!(household.loans.len(), 4);
    }

    #[test]
    fn test_pay_installments_until_settled() {
        let mut household = sample_household();

        // "emergency" has one of three installments paid
        let loan = household.pay_installment("emergency").unwrap();
        assert_eq!(loan.paid_installments(), 2);
        assert_eq!(loan.status, LoanStatus::Active);
        assert_eq!(loan.next_installment_due(), Some(date(2026, 4, 15)));

        let loan = household.pay_installment("emergency").unwrap();
        assert_eq!(loan.status, LoanStatus::Paid);
        assert_eq!(loan.outstanding(), 0.0);

        assert!(household.pay_installment("emergency").is_err());
        // No schedule to pay against
        assert!(household.pay_installment("renovation").is_err());
    }

    #[test]
    fn test_mark_loan_paid() {
        let mut household = sample_household();

        let loan = household.mark_loan_paid("renovation").unwrap();
        assert_eq!(loan.status, LoanStatus::Paid);
        assert!(household.mark_loan_paid("renovation").is_err());
        assert!(household.mark_loan_paid("education").is_err());

        let mut with_schedule = lend("bruno", "ana");
        with_schedule.installments = monthly_installments(900.0, 3, date(2026, 4, 1)).unwrap();
        let id = household.add_loan(with_schedule).unwrap().id;
        let settled = household.mark_loan_paid(&id).unwrap();
        assert_eq!(settled.paid_installments(), 3);

        assert!(household.delete_loan(&id).is_ok());
        assert!(matches!(household.delete_loan(&id), Err(Error::NotFound(_))));
    }
}
