//! Configuration file support for stig.
//!
//! Provides YAML-based configuration through `stig.config.yml` files,
//! the platform default data directory, and the flag > file > default
//! resolution used by every command.

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use stig_catalog::application::dto::OutputFormat;

pub const CONFIG_FILENAME: &str = "stig.config.yml";

/// Fallback data directory when the platform has no home directory
const LOCAL_DATA_DIR: &str = ".stig";

/// Sub-directory of the data directory holding benchmark XML files
const SOURCE_SUBDIR: &str = "benchmarks";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub workers: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML and that format is 'table' or 'json'.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.workers == Some(0) {
        bail!(
            "Invalid config: workers must be at least 1.\n\n\
             💡 Hint: Remove the 'workers' key to use one worker per CPU."
        );
    }
    for (key, value) in [("data_dir", &config.data_dir), ("source_dir", &config.source_dir)] {
        if value.as_deref().is_some_and(|path| path.as_os_str().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n💡 Hint: Remove the key to use the default location.",
                key
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("unknown config field '{}' will be ignored", key);
    }
}

/// Platform data directory for stig, or `./.stig` when none is available
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "stig")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(LOCAL_DATA_DIR))
}

/// Values from the command line that override the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub workers: Option<NonZeroUsize>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub source_dir: PathBuf,
    pub format: OutputFormat,
    pub workers: Option<NonZeroUsize>,
}

impl Settings {
    /// Applies flag > config file > default precedence
    pub fn resolve(config: Option<ConfigFile>, overrides: Overrides) -> Self {
        let config = config.unwrap_or_default();
        let data_dir = overrides
            .data_dir
            .or(config.data_dir)
            .unwrap_or_else(default_data_dir);
        let source_dir = overrides
            .source_dir
            .or(config.source_dir)
            .unwrap_or_else(|| data_dir.join(SOURCE_SUBDIR));
        let workers = overrides
            .workers
            .or_else(|| config.workers.and_then(NonZeroUsize::new));

        Self {
            data_dir,
            source_dir,
            format: config.format.unwrap_or_default(),
            workers,
        }
    }
}
