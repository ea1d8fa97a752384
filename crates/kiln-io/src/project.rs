use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kiln_align::AlignConfig;
use kiln_view::LayoutSettings;

use crate::catalog_file::LocatorPolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access project file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata for a Latent Kiln project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: ProjectSettings,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// URL prefix the assets are served under.
    pub base_url: String,
    /// Directory that `base_url` maps to on disk.
    pub asset_root: String,
    pub fix_extensions: bool,
    pub align: AlignConfig,
    pub layout: LayoutSettings,
    /// Seed for mock data and demo selection.
    pub seed: u64,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            base_url: "/Latent-Kiln/".to_string(),
            asset_root: "public".to_string(),
            fix_extensions: true,
            align: AlignConfig::default(),
            layout: LayoutSettings::default(),
            seed: 1234,
        }
    }
}

impl ProjectSettings {
    pub fn locator_policy(&self) -> LocatorPolicy {
        LocatorPolicy::new(&self.base_url).with_extension_fix(self.fix_extensions)
    }
}

impl ProjectMeta {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: default_version(),
            description: String::new(),
            settings: ProjectSettings::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let meta = Self::from_json(&json)?;
        log::debug!("loaded project '{}' from {}", meta.name, path.as_ref().display());
        Ok(meta)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
