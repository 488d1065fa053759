//! Workspace settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::diagnostics::CatalogError;

/// Name of the settings file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".spring-props.toml";

/// Helper function for serde default
fn default_true() -> bool {
    true
}

/// Settings for completion, diagnostics and the property catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Extra metadata files (Spring configuration metadata JSON), relative to
    /// the workspace root unless absolute
    pub metadata: Vec<PathBuf>,

    pub completion: CompletionSettings,

    pub diagnostics: DiagnosticsSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Offer the allowed values of enum properties in value position
    #[serde(default = "default_true")]
    pub value_hints: bool,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self { value_hints: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsSettings {
    /// Report YAML syntax errors
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Locate and load the settings file of a workspace root.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an
    /// error.
    pub fn discover(root: &Path) -> anyhow::Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// The built-in catalog extended with this workspace's metadata files.
    pub fn build_catalog(&self, root: &Path) -> Result<Catalog, CatalogError> {
        if self.metadata.is_empty() {
            return Ok(Catalog::builtin().clone());
        }
        Catalog::with_metadata_files(root, &self.metadata)
    }
}
