//! Explorer configuration, loaded from TOML

use serde::{Deserialize, Serialize};
use std::path::Path;

use explorer_core::{ArenaLimits, SearchConfig, SearchContext};

use crate::error::ConfigError;

/// Complete explorer configuration. Every field has a default, so a config
/// file only needs the values it changes:
///
/// ```toml
/// [search]
/// depth = 4
///
/// [arena]
/// max_positions = 20000000
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub search: SearchConfig,
    pub arena: ArenaLimits,
}

impl ExplorerConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: ExplorerConfig = toml::from_str(contents)?;
        config.validate()?;
        config.clamp_initial_sizes();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if arena.max_positions == 0 || arena.max_moves == 0 {
            return Err(ConfigError::Invalid(
                "arena limits must allow at least one position and one move".to_string(),
            ));
        }
        Ok(())
    }

    /// Lowering a maximum also lowers the default initial size with it.
    fn clamp_initial_sizes(&mut self) {
        let arena = &mut self.arena;
        arena.initial_positions = arena.initial_positions.min(arena.max_positions);
        arena.initial_moves = arena.initial_moves.min(arena.max_moves);
    }

    /// Overrides the search depth when a flag provides one.
    pub fn with_depth(mut self, depth: Option<u8>) -> Self {
        if let Some(depth) = depth {
            self.search.depth = depth;
        }
        self
    }

    /// A fresh search context with these settings.
    pub fn context(&self) -> SearchContext {
        SearchContext::new(self.search, self.arena)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
