use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid filter rule {rule:?}: {source}")]
    InvalidRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("global chain is already initialized")]
    AlreadyInitialized,
}

pub type ChainResult<T> = std::result::Result<T, ChainError>;
