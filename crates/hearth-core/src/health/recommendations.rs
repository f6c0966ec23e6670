//! Recommendation generator
//!
//! Rules look only at the raw ratios in the snapshot. The status passed in is
//! accepted for context but never changes which rules fire.

use serde::{Deserialize, Serialize};

use super::types::{FinancialSnapshot, HealthStatus};
use crate::format::Locale;

/// A single piece of advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Savings rate under 10%
    RaiseSavingsRate,
    /// Expense ratio over 80%
    CutDiscretionarySpending,
    /// Expense ratio over 80%
    ReviewSubscriptions,
    /// Savings under three months of income
    BuildEmergencyFund,
    /// Spending more than earning
    SeekProfessionalHelp,
    /// Savings rate at or above 20%
    KeepSavingDiscipline,
    /// Savings rate at or above 20%
    IncreaseInvestments,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RaiseSavingsRate => "raise_savings_rate",
            Self::CutDiscretionarySpending => "cut_discretionary_spending",
            Self::ReviewSubscriptions => "review_subscriptions",
            Self::BuildEmergencyFund => "build_emergency_fund",
            Self::SeekProfessionalHelp => "seek_professional_help",
            Self::KeepSavingDiscipline => "keep_saving_discipline",
            Self::IncreaseInvestments => "increase_investments",
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::EnUs => match self {
                Self::RaiseSavingsRate => "Increase your savings rate to at least 10-15%",
                Self::CutDiscretionarySpending => "Reduce your discretionary expenses",
                Self::ReviewSubscriptions => "Review recurring subscriptions and services",
                Self::BuildEmergencyFund => {
                    "Build an emergency fund covering 3-6 months of expenses"
                }
                Self::SeekProfessionalHelp => {
                    "Your expenses exceed your income - seek professional help"
                }
                Self::KeepSavingDiscipline => "Keep up your savings discipline",
                Self::IncreaseInvestments => "Consider increasing your investment contributions",
            },
            Locale::PtBr => match self {
                Self::RaiseSavingsRate => "Aumente sua taxa de poupança para pelo menos 10-15%",
                Self::CutDiscretionarySpending => "Reduza suas despesas discricionárias",
                Self::ReviewSubscriptions => "Revise assinaturas e serviços recorrentes",
                Self::BuildEmergencyFund => {
                    "Crie um fundo de emergência com 3-6 meses de despesas"
                }
                Self::SeekProfessionalHelp => {
                    "Suas despesas excedem sua renda - procure ajuda profissional"
                }
                Self::KeepSavingDiscipline => "Continue mantendo sua disciplina de poupança",
                Self::IncreaseInvestments => "Considere aumentar seu aporte em investimentos",
            },
        }
    }
}

/// Which recommendations apply, in their fixed display order.
///
/// With no income the ratio rules are skipped; the emergency-fund and
/// overspending rules compare absolute amounts and still apply.
pub fn recommendations_for(snapshot: &FinancialSnapshot) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let savings_rate = snapshot.savings_rate();
    let expense_ratio = snapshot.expense_ratio();

    if savings_rate.is_some_and(|rate| rate < 10.0) {
        recommendations.push(Recommendation::RaiseSavingsRate);
    }

    if expense_ratio.is_some_and(|ratio| ratio > 80.0) {
        recommendations.push(Recommendation::CutDiscretionarySpending);
        recommendations.push(Recommendation::ReviewSubscriptions);
    }

    if snapshot.total_savings < snapshot.monthly_income * 3.0 {
        recommendations.push(Recommendation::BuildEmergencyFund);
    }

    if snapshot.total_expenses > snapshot.monthly_income {
        recommendations.push(Recommendation::SeekProfessionalHelp);
    }

    if savings_rate.is_some_and(|rate| rate >= 20.0) {
        recommendations.push(Recommendation::KeepSavingDiscipline);
        recommendations.push(Recommendation::IncreaseInvestments);
    }

    recommendations
}

/// Render recommendations in English
pub fn generate_recommendations(snapshot: &FinancialSnapshot, status: HealthStatus) -> Vec<String> {
    generate_recommendations_localized(snapshot, status, Locale::EnUs)
}

/// Render recommendations in the given locale
pub fn generate_recommendations_localized(
    snapshot: &FinancialSnapshot,
    _status: HealthStatus,
    locale: Locale,
) -> Vec<String> {
    recommendations_for(snapshot)
        .into_iter()
        .map(|r| r.message(locale).to_string())
        .collect()
}
