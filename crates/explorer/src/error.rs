use std::path::PathBuf;

use explorer_core::{ExploreError, FenError};
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised by the explorer commands.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Explore(#[from] ExploreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read positions from {path}")]
    Positions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
