//! Configuration for building schema collections
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (collection.toml)
//! - Environment variables (COLLECTION__*)
//!
//! ## Example config file (collection.toml):
//! ```toml
//! [package]
//! default = "my-schemas"
//!
//! [combine]
//! collisions = "reject"
//!
//! [loader]
//! skip_prefixes = ["drafts/"]
//!
//! [output]
//! format = "compact"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::combine::CollisionPolicy;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Provenance settings
    #[serde(default)]
    pub package: PackageConfig,

    /// Combination settings
    #[serde(default)]
    pub combine: CombineConfig,

    /// Schema file loading
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Package stamping configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package name stamped on schemas that have none
    #[serde(default)]
    pub default: Option<String>,
}

/// How groups and versions are combined
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombineConfig {
    #[serde(default)]
    pub collisions: CollisionPolicy,
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Skip files whose path relative to the schema dir starts with one of these
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "target/".to_string(),
        ".git/".to_string(),
        "node_modules/".to_string(),
    ]
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

impl CollectionConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, with an extra required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "collection.toml",
            ".collection.toml",
            "config/collection.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "schemas", "schema-collection") {
            let xdg_config = dirs.config_dir().join("collection.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("COLLECTION")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectionConfig::default();
        assert!(config.package.default.is_none());
        assert_eq!(config.combine.collisions, CollisionPolicy::Overwrite);
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.loader.skip_prefixes.len(), 3);
    }

    #[test]
    fn test_serialize_config() {
        let config = CollectionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[combine]"));
        assert!(toml_str.contains("collisions = \"overwrite\""));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[package]\ndefault = \"my-pkg\"\n\n[combine]\ncollisions = \"reject\"\n",
        )
        .unwrap();

        let config = CollectionConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.package.default.as_deref(), Some("my-pkg"));
        assert_eq!(config.combine.collisions, CollisionPolicy::Reject);
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = CollectionConfig::default();
        config.output.format = OutputFormat::Compact;

        config.save(path.to_str().unwrap()).unwrap();
        let loaded: CollectionConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Compact);
    }
}
