//! TOML configuration with typed sections.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Trait for types loaded from one TOML section.
///
/// If `PREFIX` is "panel", the type deserializes from the `[panel]`
/// section; a missing section yields the default.
pub trait Configurable: DeserializeOwned + Default {
    const PREFIX: &'static str;
}

/// Configuration storage backed by a TOML document.
pub struct ConfigStore {
    data: toml::Value,
    path: Option<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigStore {
    pub fn empty() -> Self {
        Self {
            data: toml::Value::Table(Default::default()),
            path: None,
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let data: toml::Value =
            toml::from_str(content).map_err(|e| anyhow!("failed to parse TOML: {}", e))?;
        Ok(Self { data, path: None })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file '{}': {}", path.display(), e))?;
        let data: toml::Value = toml::from_str(&content)
            .map_err(|e| anyhow!("failed to parse TOML in '{}': {}", path.display(), e))?;

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Typed section lookup; missing sections fall back to the default.
    pub fn get<C: Configurable>(&self) -> Result<C> {
        let section = self
            .data
            .get(C::PREFIX)
            .cloned()
            .unwrap_or(toml::Value::Table(Default::default()));

        debug!("loading config section: {}", C::PREFIX);

        section
            .try_into()
            .map_err(|e| anyhow!("failed to deserialize config section '{}': {}", C::PREFIX, e))
    }

    pub fn has_section(&self, prefix: &str) -> bool {
        self.data.get(prefix).is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// `[panel]` section: where the persistent backends keep their data.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Directory holding every persistent area and the document database.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the document-store database inside `data_dir`.
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
        }
    }
}

impl PanelConfig {
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("storepeek-data")
}

fn default_database_file() -> String {
    "documents.sqlite3".to_string()
}

impl Configurable for PanelConfig {
    const PREFIX: &'static str = "panel";
}
