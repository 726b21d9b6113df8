//! Configuration for the merge CLI
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (merge.toml)
//! - Environment variables (SWAGGER_MERGE_*)
//!
//! The merge engine itself never reads configuration; the binary resolves
//! it here and passes explicit options in.
//!
//! ## Example config file (merge.toml):
//! ```toml
//! [discovery]
//! roots = ["../inference-service", "../management-service"]
//!
//! [output]
//! title = "Platform APIs"
//! version = "v1.0"
//! file = "merged.swagger.json"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the merge CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MergeConfig {
    /// Discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// Root directories, each expected to contain an `api` subdirectory
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Title recorded in the merged document's info block
    #[serde(default = "default_title")]
    pub title: String,

    /// Version recorded in the merged document's info block
    #[serde(default = "default_version")]
    pub version: String,

    /// Where to write the merged document; stdout when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_title() -> String {
    "Platform APIs".to_string()
}

fn default_version() -> String {
    "v1.0".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            file: None,
        }
    }
}

impl MergeConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        for location in ["merge.toml", ".merge.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (SWAGGER_MERGE_*)
        builder = builder.add_source(
            Environment::with_prefix("SWAGGER_MERGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Merge options carried by this configuration
    pub fn options(&self) -> crate::merge::MergeOptions {
        crate::merge::MergeOptions {
            title: self.output.title.clone(),
            version: self.output.version.clone(),
        }
    }
}
