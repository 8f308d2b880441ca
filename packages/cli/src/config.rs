use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pages JSON file, relative to the config
    #[serde(default = "default_pages_file")]
    pub pages_file: String,

    /// Page opened when no --page is given
    #[serde(default = "default_page")]
    pub default_page: String,

    /// Pretty-print the pages file on save
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pages_file() -> String {
    "pages.json".to_string()
}

fn default_page() -> String {
    "home".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages file
    pub fn get_pages_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_file)
    }

    /// The page to open: an explicit choice, else the configured default
    pub fn page<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_page)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_file: default_pages_file(),
            default_page: default_page(),
            pretty: default_pretty(),
        }
    }
}
