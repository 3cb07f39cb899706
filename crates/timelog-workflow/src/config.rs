/*
[INPUT]:  Optional YAML configuration file and CLI overrides
[OUTPUT]: Parsed application configuration
[POS]:    Configuration layer - catalog, parser, and export setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use timelog_adapter::{ClientConfig, DEFAULT_BASE_URL};

use crate::export::EXPORT_FILE_NAME;

/// Top-level configuration for the time-log workflow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Project/task catalog file (`.json`, `.yaml` or `.yml`)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Remote parser connection
    #[serde(default)]
    pub parser: ParserConfig,
    /// Where results are exported
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParserConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Target directory; the user's download directory when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            parser: ParserConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: default_file_name(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// File config when a path is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, catalog: Option<PathBuf>, parser_url: Option<String>) -> Self {
        if let Some(catalog) = catalog {
            self.catalog_path = catalog;
        }
        if let Some(url) = parser_url {
            self.parser.base_url = url;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.parser.timeout_secs),
            connect_timeout: Duration::from_secs(self.parser.connect_timeout_secs),
        }
    }

    /// Configured export directory, else the user's download folder, else `.`
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
