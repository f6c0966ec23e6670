//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_store` - Shared utility to open the household store
//! - `resolve_family` - Pick the family id from flags or config
//! - `Output` - Locale and JSON settings shared by every command
//! - `cmd_init` - Create a family with its admin member

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use hearth_core::format::{format_currency, format_date_time};
use hearth_core::store::validate_family_id;
use hearth_core::{
    Error as CoreError, Family, HearthConfig, Household, HouseholdStore, JsonFileStore, Locale,
    Member, Role,
};

/// How command output is rendered
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub locale: Locale,
    /// Print JSON instead of text
    pub json: bool,
}

impl Output {
    /// Format an amount in the household's currency
    pub fn money(&self, household: &Household, value: f64) -> String {
        format_currency(value, &household.family.currency, self.locale)
    }
}

/// Print a JSON value for `--json`
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Open the JSON file store
///
/// Priority: --data-dir > HEARTH_DATA_DIR > config store.data_dir > platform default
pub fn open_store(config: &HearthConfig, data_dir: Option<&Path>) -> Result<JsonFileStore> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => config
            .resolve_data_dir()
            .context("Failed to resolve data directory")?,
    };
    JsonFileStore::new(&dir)
        .with_context(|| format!("Failed to open household store at {}", dir.display()))
}

/// Family id from --family, falling back to config
pub fn resolve_family(flag: Option<&str>, config: &HearthConfig) -> Result<String> {
    let family = flag
        .map(str::to_string)
        .or_else(|| config.family.clone())
        .ok_or_else(|| anyhow!("No family selected. Pass --family or set store.family in config"))?;
    validate_family_id(&family)?;
    Ok(family)
}

/// Load a household, pointing at `init` when it doesn't exist yet
pub fn load_household(store: &dyn HouseholdStore, family: &str) -> Result<Household> {
    match store.load_household(family) {
        Ok(household) => Ok(household),
        Err(CoreError::NotFound(_)) => bail!(
            "Family '{}' not found. Create it with: hearth --family {} init ...",
            family,
            family
        ),
        Err(e) => Err(e).with_context(|| format!("Failed to load family '{}'", family)),
    }
}

/// Everything needed to create a family
#[derive(Debug, Clone)]
pub struct NewFamily {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub admin_name: String,
    pub admin_email: String,
    pub monthly_income: f64,
    pub currency: String,
}

pub fn cmd_init(store: &dyn HouseholdStore, new: &NewFamily, output: &Output) -> Result<()> {
    println!("🔧 Creating family '{}'...", new.id);

    match store.load_household(&new.id) {
        Ok(_) => bail!("Family '{}' already exists", new.id),
        Err(CoreError::NotFound(_)) => {}
        Err(e) => return Err(e).context("Failed to check for an existing family"),
    }

    let now = Utc::now();
    let admin = Member {
        id: new.admin_id.clone(),
        name: new.admin_name.clone(),
        email: new.admin_email.clone(),
        family_id: new.id.clone(),
        role: Role::Admin,
        monthly_income: new.monthly_income,
        created_at: now,
        avatar: None,
    };

    let mut household = Household::new(Family {
        id: new.id.clone(),
        name: new.name.clone(),
        admin_id: admin.id.clone(),
        members: vec![admin.id.clone()],
        created_at: now,
        currency: new.currency.to_uppercase(),
    });
    household.members.push(admin);

    store
        .save_household(&household)
        .context("Failed to save new family")?;

    println!("   Family:   {}", household.family.name);
    println!("   Admin:    {} <{}>", new.admin_name, new.admin_email);
    println!("   Currency: {}", household.family.currency);
    println!(
        "   Created:  {}",
        format_date_time(now.naive_utc(), output.locale)
    );
    println!("✅ Family created successfully!");
    println!();
    println!("Next steps:");
    println!(
        "  1. Add members: hearth --family {} members add --id ... --name ... --email ...",
        new.id
    );
    println!(
        "  2. Record spending: hearth --family {} transactions add --member {} --kind expense ...",
        new.id, new.admin_id
    );
    println!("  3. See how everyone is doing: hearth --family {} health", new.id);

    Ok(())
}
