use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailcraft.config.json";

/// Mailcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding template .json files
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Pretty-print written templates
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Undo history depth used when applying mutations
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_undo_levels() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the template directory
    pub fn get_template_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.template_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            pretty: default_pretty(),
            undo_levels: default_undo_levels(),
        }
    }
}
