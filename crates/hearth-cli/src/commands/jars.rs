//! Savings jar commands
//!
//! - `cmd_jars` - Progress of every jar
//! - `cmd_jars_add` / `cmd_jars_contribute` / `cmd_jars_delete` - Manage jars

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hearth_core::format::{format_date, format_percent};
use hearth_core::jars::contributions_by_member;
use hearth_core::{summarize_jars, HouseholdStore, NewJar};
use serde_json::json;

use super::core::{load_household, print_json, Output};

const BAR_WIDTH: usize = 20;

/// Text progress bar for a 0-100 percentage
fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn cmd_jars(
    store: &dyn HouseholdStore,
    family: &str,
    today: NaiveDate,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let summary = summarize_jars(&household.jars);
    let contributions = contributions_by_member(&household.jars);

    if output.json {
        let jars: Vec<_> = household
            .jars
            .iter()
            .map(|jar| {
                json!({
                    "jar": jar,
                    "progress": jar.progress(),
                    "remaining": jar.remaining(),
                    "days_left": jar.days_left(today),
                })
            })
            .collect();
        let contributions: Vec<_> = contributions
            .iter()
            .map(|(user_id, amount)| json!({ "user_id": user_id, "amount": amount }))
            .collect();
        return print_json(&json!({
            "jars": jars,
            "summary": summary,
            "contributions": contributions,
        }));
    }

    if household.jars.is_empty() {
        println!("No savings jars yet.");
        return Ok(());
    }

    println!();
    println!("🫙 Savings Jars");
    println!("   ─────────────────────────────");

    for jar in &household.jars {
        let done = if jar.is_complete() { " ✅" } else { "" };
        println!();
        println!("   {} {}{}  [{}]", jar.icon, jar.name, done, jar.id);
        println!(
            "   {} {}",
            progress_bar(jar.progress()),
            format_percent(jar.progress(), output.locale)
        );
        println!(
            "   {} of {} ({} to go)",
            output.money(&household, jar.current_amount),
            output.money(&household, jar.target_amount),
            output.money(&household, jar.remaining())
        );
        if let Some(deadline) = jar.deadline {
            match jar.days_left(today) {
                Some(days) => println!(
                    "   Deadline: {} ({} days left)",
                    format_date(deadline, output.locale),
                    days
                ),
                None => println!(
                    "   Deadline: {} (passed)",
                    format_date(deadline, output.locale)
                ),
            }
        }
    }

    println!();
    println!("   Total saved:  {}", output.money(&household, summary.total_saved));
    println!("   Total target: {}", output.money(&household, summary.total_target));
    println!(
        "   Progress:     {} ({} of {} jars complete)",
        format_percent(summary.progress, output.locale),
        summary.completed,
        summary.jar_count
    );

    if !contributions.is_empty() {
        println!();
        println!("   Contributions:");
        for (user_id, amount) in &contributions {
            let name = household
                .member(user_id)
                .map(|m| m.name.as_str())
                .unwrap_or(user_id.as_str());
            println!("     {:20} {}", name, output.money(&household, *amount));
        }
    }

    Ok(())
}

pub fn cmd_jars_add(
    store: &dyn HouseholdStore,
    family: &str,
    new: NewJar,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let jar = store
        .add_jar(family, new)
        .context("Failed to create savings jar")?;

    if output.json {
        return print_json(&json!(jar));
    }

    println!(
        "✅ Created jar '{}' with a target of {} (id: {})",
        jar.name,
        output.money(&household, jar.target_amount),
        jar.id
    );
    Ok(())
}

pub fn cmd_jars_contribute(
    store: &dyn HouseholdStore,
    family: &str,
    jar_id: &str,
    member: &str,
    amount: f64,
    output: &Output,
) -> Result<()> {
    let household = load_household(store, family)?;
    let jar = store
        .contribute_to_jar(family, jar_id, member, amount)
        .with_context(|| format!("Failed to contribute to jar '{}'", jar_id))?;

    if output.json {
        return print_json(&json!({ "jar": jar, "progress": jar.progress() }));
    }

    println!(
        "✅ Added {} to '{}': {} of {} ({})",
        output.money(&household, amount),
        jar.name,
        output.money(&household, jar.current_amount),
        output.money(&household, jar.target_amount),
        format_percent(jar.progress(), output.locale)
    );
    if jar.is_complete() {
        println!("🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_jars_delete(
    store: &dyn HouseholdStore,
    family: &str,
    jar_id: &str,
    output: &Output,
) -> Result<()> {
    load_household(store, family)?;
    let jar = store
        .delete_jar(family, jar_id)
        .with_context(|| format!("Failed to delete jar '{}'", jar_id))?;

    if output.json {
        return print_json(&json!(jar));
    }

    println!("✅ Deleted jar '{}'", jar.name);
    Ok(())
}
