//! Lab catalog: the immutable set of labs loaded once at startup, either the
//! built-in catalog or a TOML file (`[[labs]]` tables tagged by `kind`).

use crate::builtin;
use crate::error::AlchemyError;
use crate::registry::{AlchemyLab, LabConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabCatalog {
    #[serde(default)]
    labs: Vec<LabConfig>,
}

impl LabCatalog {
    /// Builds a catalog, rejecting duplicate lab ids.
    pub fn new(labs: Vec<LabConfig>) -> Result<Self, AlchemyError> {
        let mut seen = HashSet::new();
        for lab in &labs {
            if !seen.insert(lab.id().to_string()) {
                return Err(AlchemyError::DuplicateLab(lab.id().to_string()));
            }
            if let LabConfig::Alchemy(alchemy) = lab {
                if alchemy.templates.is_empty() {
                    warn!(
                        target: "alchemy::catalog",
                        lab_id = %alchemy.id,
                        "alchemy lab has no templates; it will always render its empty state"
                    );
                }
            }
        }
        Ok(Self { labs })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            labs: builtin::labs(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, AlchemyError> {
        let parsed: LabCatalog = toml::from_str(source)?;
        Self::new(parsed.labs)
    }

    pub fn load_path(path: &Path) -> Result<Self, AlchemyError> {
        let source = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&source)?;
        info!(
            target: "alchemy::catalog",
            path = %path.display(),
            labs = catalog.labs.len(),
            "lab catalog loaded"
        );
        Ok(catalog)
    }

    pub fn labs(&self) -> &[LabConfig] {
        &self.labs
    }

    pub fn lab(&self, lab_id: &str) -> Option<&LabConfig> {
        self.labs.iter().find(|l| l.id() == lab_id)
    }

    /// The lab when it exists and is a sentence-composition lab.
    pub fn alchemy_lab(&self, lab_id: &str) -> Option<&AlchemyLab> {
        self.lab(lab_id).and_then(LabConfig::as_alchemy)
    }

    pub fn alchemy_labs(&self) -> impl Iterator<Item = &AlchemyLab> {
        self.labs.iter().filter_map(LabConfig::as_alchemy)
    }
}
