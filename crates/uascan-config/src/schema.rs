// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for uascan.
//!
//! # Schema Structure
//!
//! ```text
//! ScanConfig
//! ├── ip: Option<String>           server address (CLI argument wins)
//! ├── output: PathBuf              report file
//! ├── application_name: String
//! ├── session_timeout: Duration    humantime, e.g. "30s"
//! ├── start_node: String           e.g. "i=85", "ns=2;s=Line1"
//! ├── walk: WalkOptions
//! └── uint32_rendering: Uint32Rendering
//! ```
//!
//! Only `ip` is needed in practice, so the minimal file is:
//!
//! ```json
//! { "ip": "192.168.0.10" }
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uascan_opcua::{
    normalize_endpoint, NodeId, OpcUaConfig, Uint32Rendering, ValueDecoder, WalkOptions,
};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default report file.
pub const DEFAULT_OUTPUT: &str = "opcua_tags.txt";

/// Default configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default start node (the `Objects` folder).
pub const DEFAULT_START_NODE: &str = "i=85";

/// Default application name.
pub const DEFAULT_APPLICATION_NAME: &str = "uascan";

/// Default session timeout in seconds.
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ScanConfig
// =============================================================================

/// The root configuration structure for a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Server address: an `opc.tcp://` URL, `host:port`, or a bare host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Report file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Application name announced to the server.
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Session timeout.
    #[serde(default = "default_session_timeout", with = "humantime_serde")]
    pub session_timeout: Duration,

    /// Node the walk starts from.
    #[serde(default = "default_start_node")]
    pub start_node: String,

    /// Traversal limits and namespace policy.
    #[serde(default)]
    pub walk: WalkOptions,

    /// Rendering of `UInt32` values.
    #[serde(default)]
    pub uint32_rendering: Uint32Rendering,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_application_name() -> String {
    DEFAULT_APPLICATION_NAME.to_string()
}

fn default_session_timeout() -> Duration {
    Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS)
}

fn default_start_node() -> String {
    DEFAULT_START_NODE.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ip: None,
            output: default_output(),
            application_name: default_application_name(),
            session_timeout: default_session_timeout(),
            start_node: default_start_node(),
            walk: WalkOptions::default(),
            uint32_rendering: Uint32Rendering::default(),
        }
    }
}

impl ScanConfig {
    /// Validates the configuration.
    ///
    /// `ip` is optional here because the command line may supply it; when
    /// present it must normalize to an endpoint.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(ref ip) = self.ip {
            normalize_endpoint(ip).map_err(|e| ConfigError::validation("ip", e.to_string()))?;
        }

        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::validation("output", "must not be empty"));
        }

        if self.application_name.trim().is_empty() {
            return Err(ConfigError::validation("application_name", "must not be empty"));
        }

        if self.session_timeout.is_zero() {
            return Err(ConfigError::validation(
                "session_timeout",
                "must be greater than 0",
            ));
        }

        self.start_node_id()?;
        Ok(())
    }

    /// Parses `start_node`.
    pub fn start_node_id(&self) -> ConfigResult<NodeId> {
        NodeId::from_str(&self.start_node)
            .map_err(|e| ConfigError::validation("start_node", e.to_string()))
    }

    /// Returns the decoder configured by `uint32_rendering`.
    pub fn decoder(&self) -> ValueDecoder {
        ValueDecoder::new().with_uint32_rendering(self.uint32_rendering)
    }

    /// Builds the client configuration.
    ///
    /// `address` overrides `ip`; with neither present the result is
    /// [`ConfigError::MissingField`].
    pub fn opcua_config(&self, address: Option<&str>) -> ConfigResult<OpcUaConfig> {
        let address = address
            .or(self.ip.as_deref())
            .ok_or_else(|| ConfigError::missing_field("ip"))?;

        OpcUaConfig::builder()
            .endpoint(address)
            .application_name(self.application_name.as_str())
            .session_timeout(self.session_timeout)
            .build()
            .map_err(|e| ConfigError::validation("ip", e.to_string()))
    }
}

// =============================================================================
// humantime_serde helper
// =============================================================================

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        humantime::format_duration(*duration)
            .to_string()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
