//! Export command implementation

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::{write_transactions_csv, HouseholdStore, TransactionExportOptions};

use super::core::load_household;

pub fn cmd_export(
    store: &dyn HouseholdStore,
    family: &str,
    opts: &TransactionExportOptions,
    output: Option<&Path>,
) -> Result<()> {
    let household = load_household(store, family)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = write_transactions_csv(&household, opts, BufWriter::new(file))
                .context("Failed to write CSV")?;
            println!("✅ Exported {} transactions to {}", rows, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_transactions_csv(&household, opts, stdout.lock())
                .context("Failed to write CSV")?;
        }
    }

    Ok(())
}
