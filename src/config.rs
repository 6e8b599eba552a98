use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ChainError, ChainResult};

pub const CONFIG_PATH_ENV: &str = "MEDIACHAIN_CONFIG";
pub const LOG_LEVEL_ENV: &str = "MEDIACHAIN_LOG_LEVEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub modules: ModulesConfig,
    pub filter: FilterConfig,
}

/// Which modules answer first, and which never answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub priority: Vec<String>,
    pub disabled: Vec<String>,
}

/// Title rules used by the built-in torrent filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            modules: ModulesConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Config {
    /// Loads the file named by `MEDIACHAIN_CONFIG` (defaults otherwise), then
    /// applies `MEDIACHAIN_LOG_LEVEL`.
    pub fn from_env() -> ChainResult<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV).ok() {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ChainResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ChainError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&raw).map_err(|source| ChainError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.modules.priority.is_empty());
        assert!(config.filter.include.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r#"
            [modules]
            priority = ["tmdb", "douban"]
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.modules.priority, vec!["tmdb", "douban"]);
        assert!(config.modules.disabled.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            log_level = "debug"

            [modules]
            disabled = ["slack"]

            [filter]
            include = ["1080p"]
            exclude = ["(?i)cam"]
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.modules.disabled, vec!["slack"]);
        assert_eq!(config.filter.include, vec!["1080p"]);
        assert_eq!(config.filter.exclude, vec!["(?i)cam"]);
    }

    // The only test touching these variables, so it cannot race another.
    #[test]
    fn test_from_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            log_level = "warn"

            [modules]
            priority = ["tmdb"]
            "#
        )
        .unwrap();

        std::env::set_var(CONFIG_PATH_ENV, file.path());
        std::env::remove_var(LOG_LEVEL_ENV);
        let config = Config::from_env().unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.modules.priority, vec!["tmdb"]);

        std::env::set_var(LOG_LEVEL_ENV, "trace");
        let config = Config::from_env().unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.modules.priority, vec!["tmdb"]);

        std::env::remove_var(CONFIG_PATH_ENV);
        let config = Config::from_env().unwrap();
        assert_eq!(config.log_level, "trace");
        assert!(config.modules.priority.is_empty());

        std::env::remove_var(LOG_LEVEL_ENV);
        assert_eq!(Config::from_env().unwrap().log_level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/mediachain.toml").unwrap_err();
        assert!(matches!(err, ChainError::ConfigRead { .. }));
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "modules = 3").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ChainError::ConfigParse { .. }));
    }
}
