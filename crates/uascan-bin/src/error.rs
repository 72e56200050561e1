// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the uascan binary.
//!
//! | exit code | cause                                          |
//! |-----------|------------------------------------------------|
//! | 1         | configuration unreadable, invalid or no `ip`   |
//! | 2         | connection could not be established            |
//! | 3         | traversal aborted by a lost connection         |
//! | 4         | report file could not be created or written    |

use thiserror::Error;
use uascan_config::ConfigError;
use uascan_opcua::{OpcUaError, WalkError};

/// Result type alias for uascan-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the uascan binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Config loading error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Connection could not be established.
    #[error("Connection error: {0}")]
    Connection(#[source] OpcUaError),

    /// Traversal aborted.
    #[error("Scan aborted: {0}")]
    Traversal(#[source] OpcUaError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Config(_) => 1,
            Self::Connection(_) => 2,
            Self::Traversal(_) => 3,
            Self::Io(_) => 4,
        }
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<WalkError> for BinError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::Aborted(source) => Self::Traversal(source),
            WalkError::Sink(source) => Self::Io(source.to_string()),
        }
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with appropriate formatting.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    if let BinError::Config(config_error) = error {
        eprintln!("  {}", config_error.user_message());
    }

    for cause in cause_chain(error) {
        eprintln!("  Caused by: {}", cause);
    }

    if let BinError::Connection(opcua_error) | BinError::Traversal(opcua_error) = error {
        for hint in opcua_error.recovery_hints() {
            eprintln!("  Hint: {}", hint);
        }
    }
}

/// Returns the messages of every underlying cause, outermost first.
pub fn cause_chain(error: &BinError) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinError::config("test error");
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::config("test").exit_code(), 1);
        assert_eq!(BinError::from(ConfigError::missing_field("ip")).exit_code(), 1);
        assert_eq!(BinError::Connection(OpcUaError::not_connected()).exit_code(), 2);
        assert_eq!(BinError::io("test").exit_code(), 4);
    }

    #[test]
    fn test_cause_chain_lists_each_cause_once() {
        let err = BinError::Connection(OpcUaError::connection(
            uascan_opcua::ConnectionError::endpoint_not_found("opc.tcp://plc:4840"),
        ));
        assert_eq!(
            cause_chain(&err),
            vec!["Endpoint not found: 'opc.tcp://plc:4840'".to_string()]
        );

        let err = BinError::from(ConfigError::io(
            "config.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert_eq!(cause_chain(&err).last().map(String::as_str), Some("denied"));
    }

    #[test]
    fn test_walk_error_conversion() {
        let err = BinError::from(WalkError::Aborted(OpcUaError::connection_lost("closed")));
        assert_eq!(err.exit_code(), 3);

        let err = BinError::from(WalkError::Sink(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            "short write",
        )));
        assert_eq!(err.exit_code(), 4);
    }
}
