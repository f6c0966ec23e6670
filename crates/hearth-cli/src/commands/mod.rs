//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_store, resolve_family, output) and init
//! - `export` - CSV transaction export
//! - `health` - Health scoring commands (score, health)
//! - `jars` - Savings jar progress
//! - `loans` - Loans between family members
//! - `members` - Family members (list, add)
//! - `reports` - Report commands (stats, months, dashboard)
//! - `transactions` - Record, update and delete transactions

pub mod core;
pub mod export;
pub mod health;
pub mod jars;
pub mod loans;
pub mod members;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use health::*;
pub use jars::*;
pub use loans::*;
pub use members::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
