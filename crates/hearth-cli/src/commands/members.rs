//! Family member commands

use anyhow::{Context, Result};
use chrono::Utc;
use hearth_core::format::format_date_time;
use hearth_core::{HouseholdStore, Member, Role};
use serde_json::json;

use super::core::{load_household, print_json, Output};
use super::truncate;

pub fn cmd_members_list(store: &dyn HouseholdStore, family: &str, output: &Output) -> Result<()> {
    let household = load_household(store, family)?;

    if output.json {
        return print_json(&json!(household.members));
    }

    if household.members.is_empty() {
        println!("No members in family '{}' yet.", family);
        return Ok(());
    }

    println!();
    println!("👪 {} ({} members)", household.family.name, household.members.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for member in &household.members {
        let badge = if member.role == Role::Admin { " ⭐" } else { "" };
        println!(
            "   {:12} {:20} {:28} {:>14}{}",
            truncate(&member.id, 12),
            truncate(&member.name, 20),
            truncate(&member.email, 28),
            output.money(&household, member.monthly_income),
            badge
        );
    }

    Ok(())
}

/// Everything needed to add a member from the command line
#[derive(Debug, Clone)]
pub struct NewMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub monthly_income: f64,
    pub role: Role,
}

pub fn cmd_members_add(
    store: &dyn HouseholdStore,
    family: &str,
    new: NewMember,
    output: &Output,
) -> Result<()> {
    load_household(store, family)?;

    let now = Utc::now();
    let member = store
        .add_member(
            family,
            Member {
                id: new.id,
                name: new.name,
                email: new.email,
                family_id: family.to_string(),
                role: new.role,
                monthly_income: new.monthly_income,
                created_at: now,
                avatar: None,
            },
        )
        .context("Failed to add member")?;

    if output.json {
        return print_json(&json!(member));
    }

    println!("✅ Added {} <{}> as {}", member.name, member.email, member.role);
    println!(
        "   Joined: {}",
        format_date_time(now.naive_utc(), output.locale)
    );
    Ok(())
}
