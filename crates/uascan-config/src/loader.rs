// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading and processing for uascan.
//!
//! # Loading Pipeline
//!
//! 1. Read the file (format chosen by extension)
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders
//! 3. Parse into [`ScanConfig`]
//! 4. Apply environment variable overrides
//! 5. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! UASCAN_IP=192.168.0.10
//! UASCAN_OUTPUT=/var/tmp/tags.txt
//! UASCAN_START_NODE=ns=2;s=Line1
//! UASCAN_MAX_DEPTH=6
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::schema::ScanConfig;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for uascan.
///
/// # Examples
///
/// ```no_run
/// use uascan_config::loader::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// let config = loader.load("config.json").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Environment variable prefix.
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            env_prefix: "UASCAN".to_string(),
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads configuration from a file.
    ///
    /// The file format is determined by the file extension:
    /// - `.json` - JSON format
    /// - `.yaml` or `.yml` - YAML format
    /// - `.toml` - TOML format
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<ScanConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let format = ConfigFormat::from_path(path)?;
        let content = self.read_file(path)?;
        let mut config = self.parse_content(&content, format, path)?;

        self.apply_env_overrides(&mut config)?;

        config.validate()?;

        debug!(
            ip = config.ip.as_deref().unwrap_or("-"),
            output = %config.output.display(),
            start_node = %config.start_node,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    ///
    /// Environment overrides and validation apply either way.
    pub fn load_or_default(&self, path: impl AsRef<Path>) -> ConfigResult<ScanConfig> {
        let path = path.as_ref();
        if path.exists() {
            return self.load(path);
        }

        debug!("No configuration file at {}, using defaults", path.display());
        let mut config = ScanConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<ScanConfig> {
        let content = self.resolve_env_placeholders(content)?;
        let mut config = parse_str(&content, format)?;

        self.apply_env_overrides(&mut config)?;

        config.validate()?;
        Ok(config)
    }

    /// Reads file content.
    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    /// Parses content based on format.
    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<ScanConfig> {
        let content = self.resolve_env_placeholders(content)?;

        parse_str(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })
    }

    /// Resolves environment variable placeholders in content.
    ///
    /// Supports the format: `${VAR_NAME}` or `${VAR_NAME:default}`
    fn resolve_env_placeholders(&self, content: &str) -> ConfigResult<String> {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                result.push(c);
                continue;
            }
            chars.next();

            let mut var_content = String::new();
            let mut found_close = false;
            for c in chars.by_ref() {
                if c == '}' {
                    found_close = true;
                    break;
                }
                var_content.push(c);
            }

            if !found_close {
                result.push_str("${");
                result.push_str(&var_content);
                continue;
            }

            let (var_name, default_value) = match var_content.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (var_content.as_str(), None),
            };

            match (env::var(var_name), default_value) {
                (Ok(value), _) => result.push_str(&value),
                (Err(_), Some(default)) => result.push_str(default),
                (Err(_), None) => {
                    warn!("Environment variable '{}' not found", var_name);
                    result.push_str(&format!("${{{}}}", var_name));
                }
            }
        }

        Ok(result)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&self, config: &mut ScanConfig) -> ConfigResult<()> {
        if let Some(value) = self.env_value("IP") {
            config.ip = Some(value);
        }
        if let Some(value) = self.env_value("OUTPUT") {
            config.output = PathBuf::from(value);
        }
        if let Some(value) = self.env_value("START_NODE") {
            config.start_node = value;
        }
        if let Some(value) = self.env_value("MAX_DEPTH") {
            config.walk.max_depth = value.parse().map_err(|_| {
                ConfigError::invalid_env_var(
                    format!("{}_MAX_DEPTH", self.env_prefix),
                    "expected a non-negative integer",
                )
            })?;
        }

        Ok(())
    }

    fn env_value(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{}", self.env_prefix, key))
            .ok()
            .filter(|v| !v.is_empty())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parses a string based on format.
fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<ScanConfig> {
    match format {
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Yaml => serde_yaml_parse(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// YAML parsing through the `config` crate's YAML source.
fn serde_yaml_parse<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
///
/// # Examples
///
/// ```no_run
/// use uascan_config::loader::load_config;
///
/// let config = load_config("config.json").unwrap();
/// ```
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ScanConfig> {
    ConfigLoader::new().load(path)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_env_prefix("UASCAN_LOADER_UNIT")
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"{"ip": "192.168.0.10"}"#).unwrap();

        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.ip.as_deref(), Some("192.168.0.10"));
        assert_eq!(config.output, PathBuf::from("opcua_tags.txt"));
    }

    #[test]
    fn test_load_yaml() {
        let yaml = "ip: plc.local:4841\nsession_timeout: 10s\nwalk:\n  max_records: 500\n";
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = loader().load(file.path()).unwrap();
        assert_eq!(config.ip.as_deref(), Some("plc.local:4841"));
        assert_eq!(config.session_timeout, Duration::from_secs(10));
        assert_eq!(config.walk.max_records, 500);
    }

    #[test]
    fn test_load_toml() {
        let toml = "ip = \"10.1.2.3\"\noutput = \"line1.txt\"\n\n[walk]\nmax_depth = 4\n";
        let config = loader().load_from_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.output, PathBuf::from("line1.txt"));
        assert_eq!(config.walk.max_depth, 4);
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.YAML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(ConfigFormat::from_path(Path::new("config.ini")).is_err());
        assert!(ConfigFormat::from_path(Path::new("config")).is_err());
    }

    #[test]
    fn test_env_placeholder_with_default() {
        let result = loader()
            .resolve_env_placeholders(r#"{"ip": "${UASCAN_LOADER_UNSET_VAR:10.0.0.1}"}"#)
            .unwrap();
        assert_eq!(result, r#"{"ip": "10.0.0.1"}"#);
    }

    #[test]
    fn test_env_placeholder_unterminated() {
        let result = loader().resolve_env_placeholders("a ${B").unwrap();
        assert_eq!(result, "a ${B");
    }

    #[test]
    fn test_file_not_found() {
        let result = loader().load("/nonexistent/path/config.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = loader().load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default() {
        let config = loader().load_or_default("/nonexistent/config.json").unwrap();
        assert_eq!(config, ScanConfig::default());
    }
}
