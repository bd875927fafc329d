use serde::{Deserialize, Serialize};

/// User configuration, read from `config.toml` in the data directory.
/// Every field has a default so a missing or partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme for the TUI: "dark" or "light".
    pub theme: String,
    /// Sort key preselected in the sort prompt: "name", "created" or
    /// "priority". Never applied automatically.
    pub default_sort: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: "dark".to_string(),
            default_sort: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.default_sort.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.default_sort.is_none());
    }

    #[test]
    fn empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "dark");
    }
}
