use std::fs;
use std::path::Path;

use crate::model::config::Config;

/// Error type for config I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read `config.toml` from the data directory. A missing file is the
/// default config; a file that exists but does not parse is an error.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path)?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn reads_theme_and_sort() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "theme = \"light\"\ndefault_sort = \"priority\"\n",
        )
        .unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.default_sort.as_deref(), Some("priority"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "theme = [broken").unwrap();
        assert!(matches!(
            read_config(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
