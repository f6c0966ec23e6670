//! Test utilities for hearth-core
//!
//! A small three-member household whose numbers line up with the reference
//! health scenarios: a strong saver, a thin-margin member and an overspender.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::{
    Family, Household, Installment, JarContribution, Loan, LoanStatus, Member, Role, SavingsJar,
    Transaction, TransactionKind, TransactionStatus,
};

pub const FAMILY_ID: &str = "silva";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A completed transaction in the sample family
pub fn transaction(
    id: &str,
    user_id: &str,
    kind: TransactionKind,
    amount: f64,
    date: NaiveDate,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: user_id.to_string(),
        family_id: FAMILY_ID.to_string(),
        description: id.replace('-', " "),
        amount,
        category: kind.default_category(),
        kind,
        date,
        payment_method: None,
        status: TransactionStatus::Completed,
        tags: vec![],
    }
}

/// A member of the sample family
pub fn member(id: &str, name: &str, role: Role, monthly_income: f64) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@silva.example.com", id),
        family_id: FAMILY_ID.to_string(),
        role,
        monthly_income,
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        avatar: None,
    }
}

pub fn sample_family() -> Family {
    Family {
        id: FAMILY_ID.to_string(),
        name: "Família Silva".to_string(),
        admin_id: "ana".to_string(),
        members: vec!["ana".to_string(), "bruno".to_string(), "carla".to_string()],
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
        currency: "BRL".to_string(),
    }
}

pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionKind::*;

    vec![
        // ana: 5000 in, 3500 out, 1500 saved
        transaction("ana-salary", "ana", Income, 5000.0, date(2026, 3, 5)),
        transaction("ana-rent", "ana", Expense, 2000.0, date(2026, 3, 6)),
        transaction("ana-savings", "ana", Savings, 1500.0, date(2026, 3, 10)),
        transaction("ana-market", "ana", Expense, 1500.0, date(2026, 3, 12)),
        // bruno: 3500 in, 3200 out, 300 saved
        transaction("bruno-salary", "bruno", Income, 3500.0, date(2026, 3, 5)),
        transaction("bruno-car", "bruno", Expense, 2500.0, date(2026, 3, 7)),
        transaction("bruno-savings", "bruno", Savings, 300.0, date(2026, 3, 8)),
        transaction("bruno-utilities", "bruno", Expense, 700.0, date(2026, 3, 15)),
        transaction("bruno-loan-payment", "bruno", LoanPayment, 200.0, date(2026, 3, 20)),
        // carla: 2800 in, 2900 out, nothing saved
        transaction("carla-school", "carla", Expense, 900.0, date(2026, 2, 27)),
        transaction("carla-salary", "carla", Income, 2800.0, date(2026, 3, 5)),
        transaction("carla-rent", "carla", Expense, 2000.0, date(2026, 3, 6)),
        transaction("carla-loan", "carla", LoanReceived, 1500.0, date(2026, 3, 9)),
    ]
}

pub fn sample_jars() -> Vec<SavingsJar> {
    let jar = |id: &str, name: &str, target: f64, contributions: &[(&str, f64)]| SavingsJar {
        id: id.to_string(),
        family_id: FAMILY_ID.to_string(),
        name: name.to_string(),
        description: String::new(),
        target_amount: target,
        current_amount: contributions.iter().map(|(_, amount)| amount).sum(),
        icon: String::new(),
        color: String::new(),
        deadline: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        contributors: contributions
            .iter()
            .map(|(user_id, amount)| JarContribution {
                user_id: user_id.to_string(),
                amount: *amount,
            })
            .collect(),
    };

    let mut vacation = jar(
        "vacation",
        "Férias",
        5000.0,
        &[("ana", 1200.0), ("bruno", 1300.0)],
    );
    vacation.deadline = Some(date(2026, 7, 31));

    vec![
        vacation,
        jar("car", "Carro Novo", 25_000.0, &[("ana", 5000.0), ("bruno", 3500.0)]),
        jar("house", "Reforma da Casa", 15_000.0, &[("ana", 2000.0), ("bruno", 2200.0)]),
    ]
}

pub fn sample_loans() -> Vec<Loan> {
    let loan = |id: &str, lender: &str, borrower: &str, amount: f64, status: LoanStatus| Loan {
        id: id.to_string(),
        family_id: FAMILY_ID.to_string(),
        lender_id: lender.to_string(),
        borrower_id: borrower.to_string(),
        amount,
        description: String::new(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        due_date: None,
        status,
        installments: vec![],
        notes: None,
    };

    let mut renovation = loan("renovation", "ana", "bruno", 2000.0, LoanStatus::Active);
    renovation.due_date = Some(date(2026, 4, 15));

    let mut emergency = loan("emergency", "bruno", "carla", 1500.0, LoanStatus::Active);
    emergency.installments = vec![
        Installment {
            amount: 500.0,
            due_date: date(2026, 2, 15),
            paid: true,
        },
        Installment {
            amount: 500.0,
            due_date: date(2026, 3, 15),
            paid: false,
        },
        Installment {
            amount: 500.0,
            due_date: date(2026, 4, 15),
            paid: false,
        },
    ];

    let mut education = loan("education", "ana", "carla", 5000.0, LoanStatus::Paid);
    education.due_date = Some(date(2025, 10, 1));

    vec![renovation, emergency, education]
}

/// The full sample household
pub fn sample_household() -> Household {
    Household {
        family: sample_family(),
        members: vec![
            member("ana", "Ana", Role::Admin, 5000.0),
            member("bruno", "Bruno", Role::Member, 3500.0),
            member("carla", "Carla", Role::Member, 2800.0),
        ],
        transactions: sample_transactions(),
        jars: sample_jars(),
        loans: sample_loans(),
    }
}
