use thiserror::Error;

use crate::domain::{AnalysisError, SybilConfig};
use crate::ports::ConfigProvider;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Parsed values failed validation.
    #[error(transparent)]
    Invalid(#[from] AnalysisError),
}

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider.
///
/// Useful for embedding and tests. For operators, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: SybilConfig,
}

impl StaticConfigProvider {
    /// Create with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the specified configuration.
    #[must_use]
    pub fn with_config(mut self, config: SybilConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_sybil_config(&self) -> SybilConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - File-based config (requires "toml-config" feature)
// ============================================================================

#[cfg(feature = "toml-config")]
mod toml_config {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// TOML-based configuration provider.
    ///
    /// Every table and every key is optional; anything left out keeps its
    /// default.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// analyze_all_routers = false
    ///
    /// [clusters]
    /// same_ip = 5.0
    /// same_24 = 4.0
    /// family_exempt_24 = ["dreadnought"]
    ///
    /// [proximity]
    /// min_close = 242.0
    /// pair_max = 20
    /// baseline_samples = 200
    ///
    /// [profile]
    /// banlist = 10.0
    /// min_versions_behind = 3
    ///
    /// [routing]
    /// period_secs = 86400
    /// offset_secs = 0
    ///
    /// [report]
    /// block_threshold = 50.0
    /// min_display_points = 5.0
    /// ```
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: SybilConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed or validated.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                source,
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let config: SybilConfig =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            config.validate()?;
            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_sybil_config(&self) -> SybilConfig {
            self.config.clone()
        }
    }
}

#[cfg(feature = "toml-config")]
pub use toml_config::TomlConfigProvider;
