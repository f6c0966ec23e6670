//! JSON document household store

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{validate_family_id, validate_household, HouseholdStore};
use crate::error::{Error, Result};
use crate::models::Household;

/// Stores each family as `<data_dir>/<family-id>.json`
pub struct JsonFileStore {
    /// Directory holding the household documents
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a new file store
    ///
    /// Creates the data directory if it doesn't exist.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                Error::Config(format!(
                    "Failed to create data directory {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", data_dir.display());
        }

        Ok(Self { data_dir })
    }

    /// Get the document path for a family
    fn document_path(&self, family_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", family_id))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether a document exists for the family
    pub fn contains(&self, family_id: &str) -> bool {
        validate_family_id(family_id).is_ok() && self.document_path(family_id).exists()
    }
}

impl HouseholdStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    fn load_household(&self, family_id: &str) -> Result<Household> {
        validate_family_id(family_id)?;
        let path = self.document_path(family_id);

        if !path.exists() {
            return Err(Error::NotFound(format!(
                "Family {} (no document at {})",
                family_id,
                path.display()
            )));
        }

        let content = fs::read_to_string(&path)?;
        let household: Household = serde_json::from_str(&content)?;

        if household.family.id != family_id {
            return Err(Error::InvalidData(format!(
                "Document {} holds family '{}', expected '{}'",
                path.display(),
                household.family.id,
                family_id
            )));
        }

        debug!(
            family = family_id,
            transactions = household.transactions.len(),
            "Loaded household"
        );
        Ok(household)
    }

    fn save_household(&self, household: &Household) -> Result<()> {
        validate_household(household)?;
        let path = self.document_path(&household.family.id);

        // Write next to the target, then rename over it
        let temp = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, household)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        info!(
            family = %household.family.id,
            members = household.members.len(),
            transactions = household.transactions.len(),
            "Saved household: {}",
            path.display()
        );
        Ok(())
    }

    fn family_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_family_id(stem).is_ok() {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}
