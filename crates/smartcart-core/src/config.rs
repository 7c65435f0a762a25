//! Configuration handling for smartcart
//!
//! Configuration lives in `.smartcart/config.toml`. Every field has a default,
//! so a missing file or a missing section is never an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SmartcartError;

/// Name of the project directory that holds config and data
pub const PROJECT_DIR_NAME: &str = ".smartcart";

/// Config file name inside the project directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Storage slot name inside the project directory
pub const ITEMS_FILE_NAME: &str = "items.json";

/// Smartcart configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where the item list is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote categorizer settings
    #[serde(default)]
    pub categorizer: CategorizerConfig,

    /// Front-end settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Explicit path to the items file; relative paths resolve against the
    /// project directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Categorizer service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizerConfig {
    /// Environment variable that carries the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier passed to the service
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Front-end settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Preferred display language (e.g. "en", "es")
    #[serde(default)]
    pub language: Option<String>,
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CategorizerConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Unset and blank values both count as "no credential".
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, SmartcartError> {
        toml::from_str(content).map_err(|e| SmartcartError::Config(e.to_string()))
    }

    /// Load configuration from a file, returning defaults if it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self, SmartcartError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `.smartcart/config.toml` under the given project root
    pub fn load_from_project(project_root: &Path) -> Result<Self, SmartcartError> {
        Self::load_from_path(&project_root.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

/// Find the nearest ancestor of `start` that contains a `.smartcart` directory
pub fn find_project_root_from(start: &Path) -> Result<PathBuf, SmartcartError> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
        .ok_or(SmartcartError::NotInitialized)
}

/// Find the project root starting from the current directory
pub fn find_project_root() -> Result<PathBuf, SmartcartError> {
    let cwd = std::env::current_dir()?;
    find_project_root_from(&cwd)
}

/// Decide where the item list lives.
///
/// Resolution order:
/// 1. `storage.path` from config (relative to the project directory)
/// 2. `<project_root>/.smartcart/items.json`
/// 3. `<fallback_dir>/smartcart/items.json` when no project exists
pub fn resolve_storage_path(
    config: &Config,
    project_root: Option<&Path>,
    fallback_dir: Option<&Path>,
) -> Result<PathBuf, SmartcartError> {
    let project_dir = project_root.map(|root| root.join(PROJECT_DIR_NAME));

    if let Some(path) = &config.storage.path {
        if path.is_absolute() {
            return Ok(path.clone());
        }
        if let Some(dir) = &project_dir {
            return Ok(dir.join(path));
        }
        return Ok(path.clone());
    }

    if let Some(dir) = project_dir {
        return Ok(dir.join(ITEMS_FILE_NAME));
    }

    fallback_dir
        .map(|dir| dir.join("smartcart").join(ITEMS_FILE_NAME))
        .ok_or(SmartcartError::NotInitialized)
}
