//! Configuration schema
//!
//! Defines the structure of the configuration file.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// UI theme (dark/light)
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

// Default value functions for serde
fn default_theme() -> String {
    "dark".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dark_theme() {
        let config = Config::default();
        assert_eq!(config.general.theme, "dark");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: Config =
            toml::from_str("[general]\ntheme = \"light\"\nlegacy_option = true\n").unwrap();
        assert_eq!(config.general.theme, "light");
    }
}
