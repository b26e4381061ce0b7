//! Service configuration.
//!
//! Configuration lives in a single TOML file under the user config
//! directory (`deskd/config.toml`). Missing file or unknown fields fall
//! back to defaults; the only secret (the model API key) is never stored
//! here, it is named by `llm.api_key_env` and read from the environment.

use crate::llm::LlmConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "deskd";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "support_tickets.db";

fn default_customer_name() -> String {
    "Customer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    /// Ticket database path. Defaults to the user data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Name used to personalize acknowledgements.
    #[serde(default = "default_customer_name")]
    pub customer_name: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            db_path: None,
            customer_name: default_customer_name(),
        }
    }
}

impl DeskConfig {
    /// Load from the config file, falling back to defaults on any problem.
    pub fn load() -> Self {
        if let Some(path) = config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Database path to use: explicit setting, user data dir, or the
    /// working directory as a last resort.
    pub fn resolved_db_path(&self) -> PathBuf {
        if let Some(path) = &self.db_path {
            return path.clone();
        }
        match dirs::data_dir() {
            Some(data) => data.join(CONFIG_DIR).join(DB_FILE),
            None => PathBuf::from(DB_FILE),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_customer_name_is_generic() {
        let config = DeskConfig::default();
        assert_eq!(config.customer_name, "Customer");
        assert!(config.db_path.is_none());

        let parsed: DeskConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.customer_name, "Customer");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: DeskConfig = toml::from_str(
            r#"
            customer_name = "Dana"

            [llm]
            model = "qwen3:4b"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.customer_name, "Dana");
        assert_eq!(parsed.llm.model, "qwen3:4b");
        assert!(parsed.llm.base_url.starts_with("http://127.0.0.1"));
    }

    #[test]
    fn explicit_db_path_wins() {
        let parsed: DeskConfig = toml::from_str(r#"db_path = "/tmp/desk-test.db""#).unwrap();
        assert_eq!(parsed.resolved_db_path(), PathBuf::from("/tmp/desk-test.db"));
    }
}
