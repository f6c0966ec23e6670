//! Configuration for Hearth
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/hearth/config/hearth.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::format::Locale;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/hearth.toml");

/// Environment variable overriding the household data directory
pub const DATA_DIR_ENV: &str = "HEARTH_DATA_DIR";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HearthConfig {
    /// Display locale for money, dates and recommendations
    pub locale: Locale,
    /// Fallback currency code
    pub currency: String,
    /// Household document directory (None = platform default)
    pub data_dir: Option<PathBuf>,
    /// Family used when none is given on the command line
    pub family: Option<String>,
}

impl Default for HearthConfig {
    fn default() -> Self {
        Self {
            locale: Locale::PtBr,
            currency: "BRL".to_string(),
            data_dir: None,
            family: None,
        }
    }
}

impl HearthConfig {
    /// Load config, preferring `path`, then the default override location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = parse_config(DEFAULT_CONFIG)?;

        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = override_path {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            apply_overrides(&mut config, &content)?;
            tracing::debug!(path = %path.display(), "Loaded config override");
        }

        Ok(config)
    }

    /// Directory holding household documents.
    ///
    /// Priority: HEARTH_DATA_DIR > config `data_dir` > platform data dir.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        self.resolve_data_dir_with(std::env::var(DATA_DIR_ENV).ok().as_deref())
    }

    /// Same as [`resolve_data_dir`](Self::resolve_data_dir) with the env value passed in
    pub fn resolve_data_dir_with(&self, env_dir: Option<&str>) -> Result<PathBuf> {
        if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir().ok_or_else(|| {
            Error::Config(format!(
                "No data directory available; set {} or store.data_dir",
                DATA_DIR_ENV
            ))
        })
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("hearth").join("config").join("hearth.toml"))
}

/// Default household document directory
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("hearth").join("households"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    store: Option<RawStore>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    locale: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStore {
    data_dir: Option<PathBuf>,
    family: Option<String>,
}

/// Parse a complete config from TOML content
pub fn parse_config(content: &str) -> Result<HearthConfig> {
    let mut config = HearthConfig::default();
    apply_overrides(&mut config, content)?;
    Ok(config)
}

fn apply_overrides(config: &mut HearthConfig, content: &str) -> Result<()> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(display) = raw.display {
        if let Some(locale) = display.locale {
            config.locale = locale.parse().map_err(Error::Config)?;
        }
        if let Some(currency) = display.currency {
            if currency.trim().is_empty() {
                return Err(Error::Config("display.currency must not be empty".into()));
            }
            config.currency = currency.to_uppercase();
        }
    }

    if let Some(store) = raw.store {
        if store.data_dir.is_some() {
            config.data_dir = store.data_dir;
        }
        if store.family.is_some() {
            config.family = store.family;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_default_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, HearthConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [display]
            locale = "en-US"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.currency, "BRL");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_store_section() {
        let config = parse_config(
            r#"
            [display]
            currency = "usd"

            [store]
            data_dir = "/srv/hearth"
            family = "silva"
            "#,
        )
        .unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/hearth")));
        assert_eq!(config.family.as_deref(), Some("silva"));
    }

    #[test]
    fn test_invalid_values() {
        let err = parse_config("[display]\nlocale = \"fr-FR\"").unwrap_err();
        assert!(err.to_string().contains("Unknown locale"));

        let err = parse_config("[display]\ncurrency = \" \"").unwrap_err();
        assert!(err.to_string().contains("currency"));

        let err = parse_config("display = [").unwrap_err();
        assert!(err.to_string().contains("Invalid config TOML"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nlocale = \"en-US\"\ncurrency = \"USD\"").unwrap();

        let config = HearthConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = HearthConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_data_dir_beats_config() {
        let config = HearthConfig {
            data_dir: Some(PathBuf::from("/tmp/hearth-households")),
            ..HearthConfig::default()
        };
        assert_eq!(
            config.resolve_data_dir_with(Some("/srv/env-households")).unwrap(),
            PathBuf::from("/srv/env-households")
        );
    }

    #[test]
    fn test_configured_data_dir_is_used() {
        let config = HearthConfig {
            data_dir: Some(PathBuf::from("/tmp/hearth-households")),
            ..HearthConfig::default()
        };
        assert_eq!(
            config.resolve_data_dir_with(None).unwrap(),
            PathBuf::from("/tmp/hearth-households")
        );
        // An empty env value is ignored
        assert_eq!(
            config.resolve_data_dir_with(Some("")).unwrap(),
            PathBuf::from("/tmp/hearth-households")
        );
    }

    #[test]
    fn test_platform_data_dir_is_the_fallback() {
        let config = HearthConfig::default();
        match default_data_dir() {
            Some(dir) => assert_eq!(config.resolve_data_dir_with(None).unwrap(), dir),
            None => assert!(matches!(
                config.resolve_data_dir_with(None),
                Err(Error::Config(_))
            )),
        }
    }
}
