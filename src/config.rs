use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_pronunciation")]
    pub show_pronunciation: bool,
    /// Path to a user deck JSON file. Empty means the bundled deck.
    #[serde(default)]
    pub cards_file: String,
    /// How long footer status messages stay visible, in milliseconds.
    #[serde(default = "default_status_ttl_ms")]
    pub status_ttl_ms: u64,
}

fn default_theme() -> String {
    "wordflow-dark".to_string()
}
fn default_show_pronunciation() -> bool {
    true
}
fn default_status_ttl_ms() -> u64 {
    2500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_pronunciation: default_show_pronunciation(),
            cards_file: String::new(),
            status_ttl_ms: default_status_ttl_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordflow")
            .join("config.toml")
    }

    /// Clamp values after deserialization so a hand-edited config cannot
    /// leave the app in a degenerate state.
    pub fn validate(&mut self, valid_themes: &[String]) {
        if !valid_themes.iter().any(|t| t == &self.theme) {
            self.theme = default_theme();
        }
        self.status_ttl_ms = self.status_ttl_ms.clamp(500, 10_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themes() -> Vec<String> {
        vec!["wordflow-dark".to_string(), "wordflow-light".to_string()]
    }

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "wordflow-dark");
        assert!(config.show_pronunciation);
        assert!(config.cards_file.is_empty());
        assert_eq!(config.status_ttl_ms, 2500);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "wordflow-light"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "wordflow-light");
        assert!(config.show_pronunciation);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.show_pronunciation = false;
        config.cards_file = "/tmp/deck.json".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.show_pronunciation, deserialized.show_pronunciation);
        assert_eq!(config.cards_file, deserialized.cards_file);
    }

    #[test]
    fn test_validate_resets_unknown_theme() {
        let mut config = Config::default();
        config.theme = "solarized".to_string();
        config.validate(&themes());
        assert_eq!(config.theme, "wordflow-dark");
    }

    #[test]
    fn test_validate_clamps_status_ttl() {
        let mut config = Config::default();
        config.status_ttl_ms = 0;
        config.validate(&themes());
        assert_eq!(config.status_ttl_ms, 500);
        config.status_ttl_ms = 60_000;
        config.validate(&themes());
        assert_eq!(config.status_ttl_ms, 10_000);
    }
}
