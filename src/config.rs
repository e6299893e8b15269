// Configuration file loading

use crate::quick_search::DEFAULT_RESULT_LIMIT;
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, SqliteStorage, UnavailableStorage};
use crate::store::DEFAULT_RELATED_LIMIT;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const APP_DIR: &str = "estatery";
const CONFIG_FILE: &str = "estatery.yml";

/// Which durable storage backs the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Directory for `file`, database file for `sqlite`; unused by `memory`
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            path: None,
        }
    }
}

/// Rows per page on each list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub properties: usize,
    pub payments: usize,
    pub leads: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            properties: 8,
            payments: 10,
            leads: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickSearchConfig {
    pub limit: usize,
}

impl Default for QuickSearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub pages: PageSizes,
    pub quick_search: QuickSearchConfig,
    pub related_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            pages: PageSizes::default(),
            quick_search: QuickSearchConfig::default(),
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

impl Config {
    /// Load from the default location, or defaults if there is no file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context(format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/estatery/estatery.yml`, else the platform config dir
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join(APP_DIR).join(CONFIG_FILE));
        }

        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| eyre!("Could not determine config directory"))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("pages.properties", self.pages.properties),
            ("pages.payments", self.pages.payments),
            ("pages.leads", self.pages.leads),
            ("quick_search.limit", self.quick_search.limit),
        ] {
            if size == 0 {
                return Err(eyre!("{} must be at least 1", name));
            }
        }
        Ok(())
    }

    /// Storage location with `~` expanded, defaulting under the platform data dir
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(expand_home(path)),
            None => {
                let base = dirs::data_dir().ok_or_else(|| eyre!("Could not determine data directory"))?;
                Ok(match self.storage.backend {
                    Backend::Sqlite => base.join(APP_DIR).join("estatery.db"),
                    _ => base.join(APP_DIR),
                })
            }
        }
    }

    /// Open the configured storage backend
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStorage>> {
        let storage: Arc<dyn KeyValueStorage> = match self.storage.backend {
            Backend::Memory => Arc::new(MemoryStorage::new()),
            Backend::File => {
                let dir = self.storage_path()?;
                Arc::new(FileStorage::open(&dir).context(format!("Failed to open storage at {}", dir.display()))?)
            }
            Backend::Sqlite => {
                let db = self.storage_path()?;
                Arc::new(SqliteStorage::open(&db).context(format!("Failed to open database at {}", db.display()))?)
            }
        };
        debug!(backend = ?self.storage.backend, "Opened storage");
        Ok(storage)
    }

    /// `open_storage`, degrading to `UnavailableStorage` when it fails
    ///
    /// Stores opened on the fallback use their seed or default data.
    pub fn open_storage_or_unavailable(&self) -> Arc<dyn KeyValueStorage> {
        match self.open_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!(error = %e, "Storage unavailable, using seed data");
                Arc::new(UnavailableStorage)
            }
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|home| home.join(rest)).unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
