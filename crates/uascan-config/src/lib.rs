// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uascan-config
//!
//! Configuration handling for uascan: the [`ScanConfig`] schema, a loader for
//! JSON, YAML and TOML files, and environment variable overrides.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uascan_config::loader::load_config;
//!
//! let config = load_config("config.json").unwrap();
//! println!("Server: {:?}", config.ip);
//! ```
//!
//! ## Environment Variables
//!
//! ```text
//! UASCAN_IP=192.168.0.10
//! UASCAN_OUTPUT=tags.txt
//! UASCAN_START_NODE=ns=2;s=Line1
//! UASCAN_MAX_DEPTH=6
//! ```
//!
//! Values in config files can reference environment variables:
//!
//! ```json
//! { "ip": "${PLC_ADDRESS:192.168.0.10}" }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, ConfigFormat, ConfigLoader};
pub use schema::{
    ScanConfig, DEFAULT_APPLICATION_NAME, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT,
    DEFAULT_SESSION_TIMEOUT_SECS, DEFAULT_START_NODE,
};
