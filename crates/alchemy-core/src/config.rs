//! Studio configuration.
//!
//! | Source | Precedence |
//! |--------|------------|
//! | built-in defaults | lowest |
//! | TOML file at `ALCHEMY_CONFIG` (default `config/alchemy.toml`) | middle |
//! | `ALCHEMY__*` environment variables (e.g. `ALCHEMY__STORAGE_PATH`) | highest |

use crate::catalog::LabCatalog;
use crate::error::AlchemyError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/alchemy.toml";

fn default_history_limit() -> usize {
    200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Application identity shown in exports.
    pub app_name: String,
    /// Directory for the local key-value store.
    pub storage_path: String,
    /// Optional TOML lab catalog; the built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,
    /// History entries kept; the oldest are dropped past this.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Lab opened first by the UI.
    #[serde(default)]
    pub default_lab: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            app_name: "Chip Alchemy".to_string(),
            storage_path: "./data/alchemy".to_string(),
            catalog_path: None,
            history_limit: default_history_limit(),
            default_lab: None,
        }
    }
}

impl StudioConfig {
    /// Load from `ALCHEMY_CONFIG` (or `config/alchemy.toml`) and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("ALCHEMY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    /// Load from an explicit file (skipped when missing) layered under environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("storage_path", defaults.storage_path)?
            .set_default("history_limit", defaults.history_limit as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(config::Environment::with_prefix("ALCHEMY").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Lab catalog from `catalog_path`, or the built-in one.
    pub fn catalog(&self) -> Result<LabCatalog, AlchemyError> {
        match self.catalog_path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => LabCatalog::load_path(Path::new(path)),
            None => Ok(LabCatalog::builtin()),
        }
    }
}
