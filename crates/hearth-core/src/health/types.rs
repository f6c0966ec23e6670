//! Core types for the Financial Health Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::Locale;

/// Monthly totals for one member, the only input to scoring
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub monthly_income: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
}

impl FinancialSnapshot {
    pub fn new(monthly_income: f64, total_expenses: f64, total_savings: f64) -> Self {
        Self {
            monthly_income,
            total_expenses,
            total_savings,
        }
    }

    /// Income ratios are only defined for strictly positive income
    pub fn has_income(&self) -> bool {
        self.monthly_income > 0.0
    }

    /// Savings as a percentage of income
    pub fn savings_rate(&self) -> Option<f64> {
        self.has_income()
            .then(|| self.total_savings / self.monthly_income * 100.0)
    }

    /// Expenses as a percentage of income
    pub fn expense_ratio(&self) -> Option<f64> {
        self.has_income()
            .then(|| self.total_expenses / self.monthly_income * 100.0)
    }

    /// Income left after expenses (negative when overspending)
    pub fn balance(&self) -> f64 {
        self.monthly_income - self.total_expenses
    }
}

/// Health band derived from the score.
///
/// Variants are declared worst to best so `Ord` follows financial standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Alert,
    Warning,
    Good,
    Excellent,
}

impl HealthStatus {
    /// Map a score onto its band; thresholds are checked high to low
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Warning,
            _ => Self::Alert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }

    /// Human label shown next to the score
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::PtBr, Self::Excellent) => "Excelente",
            (Locale::PtBr, Self::Good) => "Bom",
            (Locale::PtBr, Self::Warning) => "Atenção",
            (Locale::PtBr, Self::Alert) => "Crítico",
            (Locale::EnUs, Self::Excellent) => "Excellent",
            (Locale::EnUs, Self::Good) => "Good",
            (Locale::EnUs, Self::Warning) => "Needs attention",
            (Locale::EnUs, Self::Alert) => "Critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "alert" => Ok(Self::Alert),
            _ => Err(format!("Unknown health status: {}", s)),
        }
    }
}

/// Score and band for one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResult {
    /// 0-100
    pub score: u8,
    pub status: HealthStatus,
}

impl HealthResult {
    /// Sentinel for members without income
    pub fn no_income() -> Self {
        Self {
            score: 0,
            status: HealthStatus::Alert,
        }
    }
}

/// Full per-member health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub user_id: String,
    pub family_id: String,
    pub monthly_income: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    /// Percentage; 0 when the member has no income
    pub savings_rate: f64,
    pub health_score: u8,
    pub status: HealthStatus,
    pub recommendations: Vec<String>,
}

impl FinancialHealth {
    pub fn snapshot(&self) -> FinancialSnapshot {
        FinancialSnapshot::new(self.monthly_income, self.total_expenses, self.total_savings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(HealthStatus::from_score(100), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(80), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(79), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(60), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(59), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(40), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_score(39), HealthStatus::Alert);
        assert_eq!(HealthStatus::from_score(0), HealthStatus::Alert);
    }

    #[test]
    fn test_status_monotonic_in_score() {
        let mut previous = HealthStatus::from_score(0);
        for score in 1..=100u8 {
            let status = HealthStatus::from_score(score);
            assert!(status >= previous, "score {} regressed status", score);
            previous = status;
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            HealthStatus::Excellent,
            HealthStatus::Good,
            HealthStatus::Warning,
            HealthStatus::Alert,
        ] {
            assert_eq!(HealthStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(HealthStatus::from_str("great").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(HealthStatus::Warning.label(Locale::PtBr), "Atenção");
        assert_eq!(HealthStatus::Alert.label(Locale::EnUs), "Critical");
    }

    #[test]
    fn test_snapshot_ratios() {
        let snapshot = FinancialSnapshot::new(4000.0, 3000.0, 400.0);
        assert_eq!(snapshot.savings_rate(), Some(10.0));
        assert_eq!(snapshot.expense_ratio(), Some(75.0));
        assert_eq!(snapshot.balance(), 1000.0);

        let broke = FinancialSnapshot::new(0.0, 100.0, 0.0);
        assert!(!broke.has_income());
        assert_eq!(broke.savings_rate(), None);
        assert_eq!(broke.expense_ratio(), None);
        assert_eq!(broke.balance(), -100.0);
    }
}
