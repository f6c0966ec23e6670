//! Savings jar progress and household totals

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::days_between;
use crate::models::SavingsJar;

/// Percent of a target reached, capped at 100; 0 when there is no target
pub fn progress_percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

impl SavingsJar {
    pub fn progress(&self) -> f64 {
        progress_percentage(self.current_amount, self.target_amount)
    }

    /// Amount still missing, never negative
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }

    /// Days left until the deadline, `None` without one or once it has passed
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.deadline
            .filter(|deadline| *deadline >= today)
            .map(|deadline| days_between(deadline, today))
    }
}

/// Totals across every jar of a family
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JarSummary {
    pub total_saved: f64,
    pub total_target: f64,
    pub remaining: f64,
    /// Overall percent of the combined target, capped at 100
    pub progress: f64,
    pub jar_count: usize,
    pub completed: usize,
}

pub fn summarize_jars(jars: &[SavingsJar]) -> JarSummary {
    let total_saved: f64 = jars.iter().map(|j| j.current_amount).sum();
    let total_target: f64 = jars.iter().map(|j| j.target_amount).sum();

    JarSummary {
        total_saved,
        total_target,
        remaining: (total_target - total_saved).max(0.0),
        progress: progress_percentage(total_saved, total_target),
        jar_count: jars.len(),
        completed: jars.iter().filter(|j| j.is_complete()).count(),
    }
}

/// How much each member has contributed across all jars, largest first
pub fn contributions_by_member(jars: &[SavingsJar]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for contribution in jars.iter().flat_map(|j| &j.contributors) {
        *totals.entry(contribution.user_id.as_str()).or_default() += contribution.amount;
    }

    let mut totals: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(user_id, amount)| (user_id.to_string(), amount))
        .collect();
    totals.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_jars;

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(2500.0, 5000.0), 50.0);
        assert_eq!(progress_percentage(6000.0, 5000.0), 100.0);
        assert_eq!(progress_percentage(100.0, 0.0), 0.0);
        assert_eq!(progress_percentage(0.0, 300.0), 0.0);
    }

    #[test]
    fn test_jar_helpers() {
        let jars = sample_jars();
        let vacation = &jars[0];
        assert_eq!(vacation.progress(), 50.0);
        assert_eq!(vacation.remaining(), 2500.0);
        assert!(!vacation.is_complete());

        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(vacation.days_left(today), Some(30));
        let later = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(vacation.days_left(later), None);
        assert_eq!(jars[1].days_left(today), None);
    }

    #[test]
    fn test_summarize_jars() {
        let summary = summarize_jars(&sample_jars());
        assert_eq!(summary.total_saved, 15_200.0);
        assert_eq!(summary.total_target, 45_000.0);
        assert_eq!(summary.remaining, 29_800.0);
        assert_eq!(summary.jar_count, 3);
        assert_eq!(summary.completed, 0);
        assert!((summary.progress - 33.777).abs() < 0.01);
    }

    #[test]
    fn test_summarize_no_jars() {
        assert_eq!(summarize_jars(&[]), JarSummary::default());
    }

    #[test]
    fn test_contributions_by_member() {
        let totals = contributions_by_member(&sample_jars());
        assert_eq!(
            totals,
            vec![("ana".to_string(), 8200.0), ("bruno".to_string(), 7000.0)]
        );
    }
}
