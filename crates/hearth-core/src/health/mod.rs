//! Financial Health Engine
//!
//! Turns a member's monthly income, expenses and savings into a 0-100 health
//! score, a status band and a list of plain-language recommendations.
//!
//! ## Pipeline
//!
//! snapshot → score → status → recommendations, all in one synchronous pass.
//! Every function here is pure: callers own the snapshot and get a fresh
//! result back, so they may cache results keyed on the snapshot if they like.
//!
//! ## Usage
//!
//! ```rust
//! use hearth_core::health::{compute_health, generate_recommendations, FinancialSnapshot, HealthStatus};
//!
//! let snapshot = FinancialSnapshot::new(5000.0, 3500.0, 1500.0);
//! let result = compute_health(&snapshot);
//! assert_eq!(result.score, 100);
//! assert_eq!(result.status, HealthStatus::Excellent);
//!
//! let tips = generate_recommendations(&snapshot, result.status);
//! assert_eq!(tips.len(), 3);
//! ```

pub mod member;
pub mod recommendations;
pub mod score;
pub mod types;

pub use member::{evaluate_family, evaluate_member, evaluate_snapshot, snapshot_for_member};
pub use recommendations::{
    generate_recommendations, generate_recommendations_localized, recommendations_for,
    Recommendation,
};
pub use score::{compute_health, score_breakdown, ScoreBreakdown};
pub use types::{FinancialHealth, FinancialSnapshot, HealthResult, HealthStatus};
