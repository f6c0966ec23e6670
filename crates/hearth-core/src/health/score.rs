//! Health score calculator
//!
//! Starts from a neutral 50 and adjusts for three signals:
//!
//! | Signal        | Bands                                             |
//! |---------------|---------------------------------------------------|
//! | savings rate  | ≥20 +30, ≥15 +25, ≥10 +20, ≥5 +10, else 0         |
//! | expense ratio | ≤50 +20, ≤70 +10, ≤90 +5, else −20                |
//! | balance       | >0 +20, > −20% of income +10, else 0              |
//!
//! The sum is clamped to 0-100. The balance check is strict (`>`) while the
//! expense bands are inclusive (`≤`); both are kept as-is.

use serde::{Deserialize, Serialize};

use super::types::{FinancialSnapshot, HealthResult, HealthStatus};

const BASE_SCORE: i32 = 50;

/// Fraction of income a member may overspend and still earn balance points
const OVERSPEND_TOLERANCE: f64 = 0.2;

/// Per-signal contributions behind a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub savings_rate: f64,
    pub expense_ratio: f64,
    pub balance: f64,
    pub savings_points: i32,
    pub expense_points: i32,
    pub balance_points: i32,
    /// Score before clamping
    pub raw_score: i32,
}

impl ScoreBreakdown {
    pub fn score(&self) -> u8 {
        // clamped to 0..=100, always fits
        self.raw_score.clamp(0, 100) as u8
    }
}

fn savings_points(savings_rate: f64) -> i32 {
    if savings_rate >= 20.0 {
        30
    } else if savings_rate >= 15.0 {
        25
    } else if savings_rate >= 10.0 {
        20
    } else if savings_rate >= 5.0 {
        10
    } else {
        0
    }
}

fn expense_points(expense_ratio: f64) -> i32 {
    if expense_ratio <= 50.0 {
        20
    } else if expense_ratio <= 70.0 {
        10
    } else if expense_ratio <= 90.0 {
        5
    } else {
        -20
    }
}

fn balance_points(balance: f64, monthly_income: f64) -> i32 {
    if balance > 0.0 {
        20
    } else if balance > -monthly_income * OVERSPEND_TOLERANCE {
        10
    } else {
        0
    }
}

/// Explain how a snapshot scores, or `None` when there is no income to divide by
pub fn score_breakdown(snapshot: &FinancialSnapshot) -> Option<ScoreBreakdown> {
    let savings_rate = snapshot.savings_rate()?;
    let expense_ratio = snapshot.expense_ratio()?;
    let balance = snapshot.balance();

    let savings_points = savings_points(savings_rate);
    let expense_points = expense_points(expense_ratio);
    let balance_points = balance_points(balance, snapshot.monthly_income);

    Some(ScoreBreakdown {
        savings_rate,
        expense_ratio,
        balance,
        savings_points,
        expense_points,
        balance_points,
        raw_score: BASE_SCORE + savings_points + expense_points + balance_points,
    })
}

/// Score a snapshot and map it to a status band.
///
/// Members with no (or negative) income get the `{0, alert}` sentinel. Negative
/// expenses or savings are not rejected; they simply land in whichever band
/// the arithmetic picks.
pub fn compute_health(snapshot: &FinancialSnapshot) -> HealthResult {
    match score_breakdown(snapshot) {
        Some(breakdown) => {
            let score = breakdown.score();
            HealthResult {
                score,
                status: HealthStatus::from_score(score),
            }
        }
        None => HealthResult::no_income(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(income: f64, expenses: f64, savings: f64) -> HealthResult {
        compute_health(&FinancialSnapshot::new(income, expenses, savings))
    }

    #[test]
    fn test_zero_income_is_alert() {
        for (expenses, savings) in [(0.0, 0.0), (500.0, 0.0), (0.0, 10_000.0), (-5.0, -5.0)] {
            let result = health(0.0, expenses, savings);
            assert_eq!(result, HealthResult::no_income());
            assert_eq!(result.score, 0);
            assert_eq!(result.status, HealthStatus::Alert);
        }
    }

    #[test]
    fn test_negative_income_is_alert() {
        assert_eq!(health(-100.0, 50.0, 50.0), HealthResult::no_income());
    }

    #[test]
    fn test_healthy_saver_is_clamped_to_100() {
        // 30% saved (+30), 70% spent (+10), positive balance (+20) → 110
        let snapshot = FinancialSnapshot::new(5000.0, 3500.0, 1500.0);
        let breakdown = score_breakdown(&snapshot).unwrap();
        assert_eq!(breakdown.savings_points, 30);
        assert_eq!(breakdown.expense_points, 10);
        assert_eq!(breakdown.balance_points, 20);
        assert_eq!(breakdown.raw_score, 110);

        let result = compute_health(&snapshot);
        assert_eq!(result.score, 100);
        assert_eq!(result.status, HealthStatus::Excellent);
    }

    #[test]
    fn test_thin_margin_still_scores_good() {
        // ~8.57% saved (+10), ~91.4% spent (−20), positive balance (+20) → 60
        let snapshot = FinancialSnapshot::new(3500.0, 3200.0, 300.0);
        let breakdown = score_breakdown(&snapshot).unwrap();
        assert_eq!(breakdown.savings_points, 10);
        assert_eq!(breakdown.expense_points, -20);
        assert_eq!(breakdown.balance_points, 20);

        let result = compute_health(&snapshot);
        assert_eq!(result.score, 60);
        assert_eq!(result.status, HealthStatus::Good);
    }

    #[test]
    fn test_small_overspend_sits_on_warning_boundary() {
        // 0 saved, ~103.6% spent (−20), balance −100 > −560 (+10) → exactly 40
        let result = health(2800.0, 2900.0, 0.0);
        assert_eq!(result.score, 40);
        assert_eq!(result.status, HealthStatus::Warning);
    }

    #[test]
    fn test_balance_boundary_is_exclusive() {
        // balance −200 is exactly −20% of 1000: no balance points
        let at = score_breakdown(&FinancialSnapshot::new(1000.0, 1200.0, 0.0)).unwrap();
        assert_eq!(at.balance_points, 0);

        let inside = score_breakdown(&FinancialSnapshot::new(1000.0, 1199.0, 0.0)).unwrap();
        assert_eq!(inside.balance_points, 10);

        let zero = score_breakdown(&FinancialSnapshot::new(1000.0, 1000.0, 0.0)).unwrap();
        assert_eq!(zero.balance_points, 10);
    }

    #[test]
    fn test_expense_boundaries_are_inclusive() {
        let points = |expenses: f64| {
            score_breakdown(&FinancialSnapshot::new(1000.0, expenses, 0.0))
                .unwrap()
                .expense_points
        };
        assert_eq!(points(500.0), 20);
        assert_eq!(points(501.0), 10);
        assert_eq!(points(700.0), 10);
        assert_eq!(points(701.0), 5);
        assert_eq!(points(900.0), 5);
        assert_eq!(points(901.0), -20);
    }

    #[test]
    fn test_savings_boundaries_are_inclusive() {
        let points = |savings: f64| {
            score_breakdown(&FinancialSnapshot::new(1000.0, 0.0, savings))
                .unwrap()
                .savings_points
        };
        assert_eq!(points(0.0), 0);
        assert_eq!(points(49.0), 0);
        assert_eq!(points(50.0), 10);
        assert_eq!(points(100.0), 20);
        assert_eq!(points(150.0), 25);
        assert_eq!(points(200.0), 30);
        assert_eq!(points(5000.0), 30);
    }

    #[test]
    fn test_negative_savings_lands_in_lowest_band() {
        // −1000% saved (0), 500% spent (−20), balance far below tolerance (0)
        let result = health(1000.0, 5000.0, -10_000.0);
        assert_eq!(result.score, 30);
        assert_eq!(result.status, HealthStatus::Alert);
    }

    #[test]
    fn test_monotonic_in_savings() {
        let mut previous = 0;
        for savings in (0..=400).map(|s| s as f64 * 5.0) {
            let score = health(2000.0, 1500.0, savings).score;
            assert!(score >= previous, "savings {} lowered the score", savings);
            previous = score;
        }
    }

    #[test]
    fn test_monotonic_in_expenses() {
        let mut previous = u8::MAX;
        for expenses in (0..=600).map(|e| e as f64 * 5.0) {
            let score = health(2000.0, expenses, 100.0).score;
            assert!(score <= previous, "expenses {} raised the score", expenses);
            previous = score;
        }
    }
}
