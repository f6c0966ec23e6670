//! Per-member health reports built from household records

use crate::aggregate::total_of_kind;
use crate::format::Locale;
use crate::models::{Household, Member, Transaction, TransactionKind};

use super::recommendations::generate_recommendations_localized;
use super::score::compute_health;
use super::types::{FinancialHealth, FinancialSnapshot};

/// Build a snapshot from a member's declared income and their own transactions.
///
/// Transactions belonging to other members are ignored, so the whole family
/// ledger can be passed in.
pub fn snapshot_for_member<'a, I>(member: &Member, transactions: I) -> FinancialSnapshot
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let own: Vec<&Transaction> = transactions
        .into_iter()
        .filter(|t| t.user_id == member.id)
        .collect();

    FinancialSnapshot::new(
        member.monthly_income,
        total_of_kind(&own, TransactionKind::Expense),
        total_of_kind(&own, TransactionKind::Savings),
    )
}

/// Score a snapshot and wrap it into a full report
pub fn evaluate_snapshot(
    user_id: &str,
    family_id: &str,
    snapshot: &FinancialSnapshot,
    locale: Locale,
) -> FinancialHealth {
    let result = compute_health(snapshot);
    let recommendations = generate_recommendations_localized(snapshot, result.status, locale);

    FinancialHealth {
        user_id: user_id.to_string(),
        family_id: family_id.to_string(),
        monthly_income: snapshot.monthly_income,
        total_expenses: snapshot.total_expenses,
        total_savings: snapshot.total_savings,
        savings_rate: snapshot.savings_rate().unwrap_or(0.0),
        health_score: result.score,
        status: result.status,
        recommendations,
    }
}

/// Health report for one member
pub fn evaluate_member(
    member: &Member,
    transactions: &[Transaction],
    locale: Locale,
) -> FinancialHealth {
    member_report(member, &snapshot_for_member(member, transactions), locale)
}

/// Health reports for every member of a household, in member order
pub fn evaluate_family(household: &Household, locale: Locale) -> Vec<FinancialHealth> {
    household
        .members
        .iter()
        .map(|member| {
            let own = household.transactions_for(&member.id);
            member_report(member, &snapshot_for_member(member, own), locale)
        })
        .collect()
}

fn member_report(member: &Member, snapshot: &FinancialSnapshot, locale: Locale) -> FinancialHealth {
    let report = evaluate_snapshot(&member.id, &member.family_id, snapshot, locale);

    tracing::debug!(
        member = %member.id,
        score = report.health_score,
        status = %report.status,
        recommendations = report.recommendations.len(),
        "Member health evaluated"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::HealthStatus;
    use crate::test_utils::{sample_household, transaction};
    use chrono::NaiveDate;

    #[test]
    fn test_snapshot_ignores_other_members_and_kinds() {
        let household = sample_household();
        let ana = household.member("ana").unwrap();

        let snapshot = snapshot_for_member(ana, &household.transactions);
        assert_eq!(snapshot.monthly_income, 5000.0);
        assert_eq!(snapshot.total_expenses, 3500.0);
        assert_eq!(snapshot.total_savings, 1500.0);
    }

    #[test]
    fn test_evaluate_family_matches_scenarios() {
        let household = sample_household();
        let reports = evaluate_family(&household, Locale::EnUs);
        assert_eq!(reports.len(), 3);

        let ana = &reports[0];
        assert_eq!(ana.user_id, "ana");
        assert_eq!(ana.health_score, 100);
        assert_eq!(ana.status, HealthStatus::Excellent);
        assert_eq!(ana.savings_rate, 30.0);
        assert_eq!(ana.recommendations.len(), 3);

        let bruno = &reports[1];
        assert_eq!(bruno.health_score, 60);
        assert_eq!(bruno.status, HealthStatus::Good);
        assert_eq!(bruno.recommendations.len(), 4);

        let carla = &reports[2];
        assert_eq!(carla.health_score, 40);
        assert_eq!(carla.status, HealthStatus::Warning);
        assert_eq!(carla.recommendations.len(), 5);
        assert_eq!(carla.savings_rate, 0.0);
    }

    #[test]
    fn test_report_snapshot_matches_member_ledger() {
        let household = sample_household();
        let bruno = household.member("bruno").unwrap();
        let own = household.transactions_for("bruno");
        assert_eq!(own.len(), 5);
        assert!(own.iter().all(|t| t.user_id == "bruno"));

        let report = evaluate_member(bruno, &household.transactions, Locale::EnUs);
        let snapshot = report.snapshot();
        assert_eq!(snapshot, snapshot_for_member(bruno, own));
        assert_eq!(snapshot, FinancialSnapshot::new(3500.0, 3200.0, 300.0));
        assert_eq!(compute_health(&snapshot).score, report.health_score);
    }

    #[test]
    fn test_member_without_income() {
        let mut household = sample_household();
        household.members[0].monthly_income = 0.0;

        let report = evaluate_member(
            &household.members[0],
            &household.transactions,
            Locale::PtBr,
        );
        assert_eq!(report.health_score, 0);
        assert_eq!(report.status, HealthStatus::Alert);
        assert_eq!(report.savings_rate, 0.0);
        // Only the absolute overspending rule can fire
        assert_eq!(
            report.recommendations,
            vec!["Suas despesas excedem sua renda - procure ajuda profissional".to_string()]
        );
    }

    #[test]
    fn test_member_with_no_transactions() {
        let household = sample_household();
        let ana = household.member("ana").unwrap();
        let snapshot = snapshot_for_member(ana, &[]);
        assert_eq!(snapshot.total_expenses, 0.0);
        assert_eq!(snapshot.total_savings, 0.0);

        let report = evaluate_member(ana, &[], Locale::EnUs);
        // 0% saved (0), 0% spent (+20), full balance (+20)
        assert_eq!(report.health_score, 90);
        assert_eq!(report.status, HealthStatus::Excellent);
    }

    #[test]
    fn test_pending_transactions_still_count() {
        let household = sample_household();
        let ana = household.member("ana").unwrap();
        let mut extra = transaction(
            "pending",
            "ana",
            TransactionKind::Expense,
            100.0,
            NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
        );
        extra.status = crate::models::TransactionStatus::Pending;

        let mut txs = household.transactions.clone();
        txs.push(extra);
        assert_eq!(snapshot_for_member(ana, &txs).total_expenses, 3600.0);
    }
}
