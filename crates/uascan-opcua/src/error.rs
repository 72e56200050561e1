// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for address-space scanning.
//!
//! # Error Categories
//!
//! ```text
//! OpcUaError
//! ├── Connection    - Endpoint and session loss
//! ├── Browse        - A single browse request failed
//! ├── Operation     - A single attribute read failed
//! ├── Conversion    - A wire value could not be represented
//! └── Configuration - Invalid settings or node identifiers
//! ```
//!
//! Only [`OpcUaError::Connection`] ends a traversal. Every other category is
//! handled locally by the walker: a failed browse prunes one subtree and a
//! failed read omits one record field.
//!
//! # Examples
//!
//! ```
//! use uascan_opcua::error::{OpcUaError, BrowseError};
//!
//! let error = OpcUaError::browse(BrowseError::browse_failed("ns=2;s=Line1", "BadNodeIdUnknown"));
//! assert!(!error.aborts_traversal());
//! assert_eq!(error.category(), "browse");
//! ```

use std::fmt;

use thiserror::Error;
use tracing::Level;

// =============================================================================
// OpcUaError - Main Error Type
// =============================================================================

/// The main error type for OPC UA operations.
#[derive(Debug, Error)]
pub enum OpcUaError {
    /// Connection-related errors.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Node browsing errors.
    #[error(transparent)]
    Browse(#[from] BrowseError),

    /// Attribute read errors.
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Data conversion errors.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Configuration errors.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl OpcUaError {
    // =========================================================================
    // Factory Methods
    // =========================================================================

    /// Creates a connection error.
    #[inline]
    pub fn connection(error: ConnectionError) -> Self {
        Self::Connection(error)
    }

    /// Creates a browse error.
    #[inline]
    pub fn browse(error: BrowseError) -> Self {
        Self::Browse(error)
    }

    /// Creates an operation error.
    #[inline]
    pub fn operation(error: OperationError) -> Self {
        Self::Operation(error)
    }

    /// Creates a conversion error.
    #[inline]
    pub fn conversion(error: ConversionError) -> Self {
        Self::Conversion(error)
    }

    /// Creates a configuration error.
    #[inline]
    pub fn configuration(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }

    // =========================================================================
    // Convenience Factory Methods
    // =========================================================================

    /// Creates a not connected error.
    pub fn not_connected() -> Self {
        Self::Connection(ConnectionError::NotConnected)
    }

    /// Creates a connection lost error.
    pub fn connection_lost(reason: impl Into<String>) -> Self {
        Self::Connection(ConnectionError::lost(reason))
    }

    /// Creates a browse failed error.
    pub fn browse_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Browse(BrowseError::browse_failed(node_id, message))
    }

    /// Creates a read failed error.
    pub fn read_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation(OperationError::read_failed(node_id, message))
    }

    /// Creates a bad status error.
    pub fn bad_status(node_id: impl Into<String>, status_code: u32) -> Self {
        Self::Operation(OperationError::bad_status(node_id, status_code))
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        Self::Conversion(ConversionError::type_mismatch(expected, actual))
    }

    /// Creates an invalid node ID error.
    pub fn invalid_node_id(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration(ConfigurationError::invalid_node_id(node_id, reason))
    }

    // =========================================================================
    // Error Properties
    // =========================================================================

    /// Returns `true` if this error ends the whole traversal.
    ///
    /// Only a lost or missing session qualifies. The walker absorbs every
    /// other failure at the node where it happened.
    pub fn aborts_traversal(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Connection(e) => e.severity(),
            Self::Browse(_) => ErrorSeverity::Warning,
            Self::Operation(_) => ErrorSeverity::Info,
            Self::Conversion(_) => ErrorSeverity::Info,
            Self::Configuration(_) => ErrorSeverity::Critical,
        }
    }

    /// Returns the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Browse(_) => "browse",
            Self::Operation(_) => "operation",
            Self::Conversion(_) => "conversion",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Returns a unique error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(e) => e.error_code(),
            Self::Browse(e) => e.error_code(),
            Self::Operation(e) => e.error_code(),
            Self::Conversion(e) => e.error_code(),
            Self::Configuration(e) => e.error_code(),
        }
    }

    /// Returns recovery hints for this error.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::Connection(e) => e.recovery_hints(),
            Self::Browse(_) => vec!["The subtree below this node was skipped"],
            Self::Operation(_) => vec!["The attribute was omitted from the report"],
            Self::Conversion(_) => vec![],
            Self::Configuration(e) => e.recovery_hints(),
        }
    }

    /// Returns the tracing level for this error.
    pub fn tracing_level(&self) -> Level {
        self.severity().to_tracing_level()
    }

    /// Logs this error with appropriate level and context.
    pub fn log(&self, context: &str) {
        let code = self.error_code();

        match self.tracing_level() {
            Level::ERROR => tracing::error!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
            Level::WARN => tracing::warn!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
            _ => tracing::debug!(
                error_code = %code,
                category = self.category(),
                context = context,
                "{self}"
            ),
        }
    }
}

// =============================================================================
// ConnectionError
// =============================================================================

/// Connection-related errors.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The client could not be constructed.
    #[error("Failed to build OPC UA client: {reason}")]
    ClientSetup {
        /// Reason.
        reason: String,
    },

    /// Endpoint discovery failed.
    #[error("Endpoint not found: '{endpoint}'")]
    EndpointNotFound {
        /// The endpoint URL.
        endpoint: String,
    },

    /// The server offers no endpoint without message security.
    #[error("No endpoint with security policy None offered by '{endpoint}'")]
    NoUnsecuredEndpoint {
        /// The endpoint URL.
        endpoint: String,
    },

    /// Session establishment was refused.
    #[error("Connection refused to '{endpoint}': {reason}")]
    Refused {
        /// Target endpoint.
        endpoint: String,
        /// Status reported by the stack.
        reason: String,
    },

    /// An established session stopped answering.
    #[error("Connection lost: {reason}")]
    Lost {
        /// Status reported by the stack.
        reason: String,
    },

    /// Not connected.
    #[error("Not connected to OPC UA server")]
    NotConnected,
}

impl ConnectionError {
    /// Creates a client setup error.
    pub fn client_setup(reason: impl Into<String>) -> Self {
        Self::ClientSetup {
            reason: reason.into(),
        }
    }

    /// Creates an endpoint not found error.
    pub fn endpoint_not_found(endpoint: impl Into<String>) -> Self {
        Self::EndpointNotFound {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a no unsecured endpoint error.
    pub fn no_unsecured_endpoint(endpoint: impl Into<String>) -> Self {
        Self::NoUnsecuredEndpoint {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a connection refused error.
    pub fn refused(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Refused {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a connection lost error.
    pub fn lost(reason: impl Into<String>) -> Self {
        Self::Lost {
            reason: reason.into(),
        }
    }

    /// Returns the severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotConnected => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ClientSetup { .. } => ErrorCode::new(1, 1),
            Self::EndpointNotFound { .. } => ErrorCode::new(1, 2),
            Self::NoUnsecuredEndpoint { .. } => ErrorCode::new(1, 4),
            Self::Refused { .. } => ErrorCode::new(1, 5),
            Self::Lost { .. } => ErrorCode::new(1, 6),
            Self::NotConnected => ErrorCode::new(1, 7),
        }
    }

    /// Returns recovery hints.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::ClientSetup { .. } => {
                vec!["Check the working directory is writable, the client keeps pki/ there"]
            }
            Self::EndpointNotFound { .. } | Self::Refused { .. } => vec![
                "Verify the server is running",
                "Check the address and port (default 4840)",
                "Check firewall settings",
            ],
            Self::NoUnsecuredEndpoint { .. } => {
                vec!["Enable the None security policy on the server"]
            }
            Self::Lost { .. } => vec!["The report is incomplete, run the scan again"],
            Self::NotConnected => vec!["Call connect() before scanning"],
        }
    }
}

// =============================================================================
// BrowseError
// =============================================================================

/// Node browsing errors.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The browse service call failed.
    #[error("Browse failed for node '{node_id}': {message}")]
    BrowseFailed {
        /// Node ID.
        node_id: String,
        /// Error message.
        message: String,
    },

    /// The browse result carried a bad status code.
    #[error("Browse of node '{node_id}' returned status {status_code:#010x}")]
    BadStatus {
        /// Node ID.
        node_id: String,
        /// Status code.
        status_code: u32,
    },

    /// A continuation point could not be followed.
    #[error("Failed to continue browsing node '{node_id}': {message}")]
    ContinuationFailed {
        /// Node ID.
        node_id: String,
        /// Error message.
        message: String,
    },
}

impl BrowseError {
    /// Creates a browse failed error.
    pub fn browse_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BrowseFailed {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Creates a bad status error.
    pub fn bad_status(node_id: impl Into<String>, status_code: u32) -> Self {
        Self::BadStatus {
            node_id: node_id.into(),
            status_code,
        }
    }

    /// Creates a continuation failed error.
    pub fn continuation_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContinuationFailed {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::BrowseFailed { .. } => ErrorCode::new(4, 1),
            Self::BadStatus { .. } => ErrorCode::new(4, 2),
            Self::ContinuationFailed { .. } => ErrorCode::new(4, 3),
        }
    }
}

// =============================================================================
// OperationError
// =============================================================================

/// Attribute read errors.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Read service call failed.
    #[error("Read failed for node '{node_id}': {message}")]
    ReadFailed {
        /// Node ID.
        node_id: String,
        /// Error message.
        message: String,
    },

    /// Bad status code in the returned data value.
    #[error("Bad status code {status_code:#010x} for node '{node_id}'")]
    BadStatus {
        /// Node ID.
        node_id: String,
        /// Status code.
        status_code: u32,
    },

    /// The data value carried no value.
    #[error("Node '{node_id}' returned no value")]
    NoValue {
        /// Node ID.
        node_id: String,
    },
}

impl OperationError {
    /// Creates a read failed error.
    pub fn read_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Creates a bad status error.
    pub fn bad_status(node_id: impl Into<String>, status_code: u32) -> Self {
        Self::BadStatus {
            node_id: node_id.into(),
            status_code,
        }
    }

    /// Creates a no value error.
    pub fn no_value(node_id: impl Into<String>) -> Self {
        Self::NoValue {
            node_id: node_id.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ReadFailed { .. } => ErrorCode::new(5, 1),
            Self::BadStatus { .. } => ErrorCode::new(5, 2),
            Self::NoValue { .. } => ErrorCode::new(5, 3),
        }
    }
}

// =============================================================================
// ConversionError
// =============================================================================

/// Data conversion errors.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The attribute had an unexpected variant type.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Expected type.
        expected: String,
        /// Actual type.
        actual: String,
    },
}

impl ConversionError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ErrorCode::new(7, 1),
        }
    }
}

// =============================================================================
// ConfigurationError
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid node identifier text.
    #[error("Invalid node ID '{node_id}': {reason}")]
    InvalidNodeId {
        /// The node ID text.
        node_id: String,
        /// Reason.
        reason: String,
    },

    /// Invalid endpoint.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The endpoint.
        url: String,
        /// Reason.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required configuration field: {field}")]
    MissingField {
        /// Field name.
        field: String,
    },
}

impl ConfigurationError {
    /// Creates an invalid node ID error.
    pub fn invalid_node_id(node_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid endpoint error.
    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidNodeId { .. } => ErrorCode::new(8, 1),
            Self::InvalidEndpoint { .. } => ErrorCode::new(8, 2),
            Self::MissingField { .. } => ErrorCode::new(8, 3),
        }
    }

    /// Returns recovery hints.
    pub fn recovery_hints(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidNodeId { .. } => vec![
                "Use format: ns=<index>;<type>=<value>",
                "Types: i (numeric), s (string), g (guid), b (opaque)",
            ],
            Self::InvalidEndpoint { .. } => vec!["Use opc.tcp://host:port, host:port, or host"],
            Self::MissingField { .. } => vec!["Add the field to the configuration file"],
        }
    }
}

// =============================================================================
// ErrorSeverity
// =============================================================================

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational - no action required.
    Info,
    /// Warning - action may be required.
    Warning,
    /// Error - action required, but recoverable.
    Error,
    /// Critical - immediate action required.
    Critical,
}

impl ErrorSeverity {
    /// Converts to tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Info => Level::DEBUG,
            Self::Warning => Level::WARN,
            Self::Error | Self::Critical => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
///
/// Format: `UA-XXYY` where XX is category and YY is specific error.
///
/// Categories:
/// - 1: Connection
/// - 4: Browse
/// - 5: Operation
/// - 7: Conversion
/// - 8: Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category.
    pub category: u8,
    /// Specific error within category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UA-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// A Result type with OpcUaError.
pub type OpcUaResult<T> = Result<T, OpcUaError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_abort() {
        assert!(OpcUaError::not_connected().aborts_traversal());
        assert!(OpcUaError::connection_lost("BadConnectionClosed").aborts_traversal());
        assert!(!OpcUaError::browse_failed("ns=1;i=1", "BadNodeIdUnknown").aborts_traversal());
        assert!(!OpcUaError::read_failed("ns=1;i=1", "BadNotReadable").aborts_traversal());
        assert!(!OpcUaError::type_mismatch("NodeId", "String").aborts_traversal());
    }

    #[test]
    fn test_error_code() {
        let code = ErrorCode::new(1, 5);
        assert_eq!(code.to_string(), "UA-0105");

        assert_eq!(
            OpcUaError::bad_status("ns=2;s=X", 0x8034_0000).error_code(),
            ErrorCode::new(5, 2)
        );
    }

    #[test]
    fn test_error_category() {
        assert_eq!(OpcUaError::not_connected().category(), "connection");
        assert_eq!(OpcUaError::browse_failed("i=85", "x").category(), "browse");
        assert_eq!(OpcUaError::read_failed("i=85", "x").category(), "operation");
        assert_eq!(
            OpcUaError::invalid_node_id("bad", "x").category(),
            "configuration"
        );
    }

    #[test]
    fn test_local_failures_log_below_warn() {
        assert_eq!(
            OpcUaError::read_failed("ns=1;i=7", "BadNotReadable").tracing_level(),
            Level::DEBUG
        );
        assert_eq!(
            OpcUaError::browse_failed("ns=1;i=7", "BadNodeIdUnknown").tracing_level(),
            Level::WARN
        );
        assert_eq!(OpcUaError::connection_lost("closed").tracing_level(), Level::ERROR);
    }

    #[test]
    fn test_wrapper_is_transparent() {
        let error = OpcUaError::connection(ConnectionError::endpoint_not_found("opc.tcp://a:4840"));
        assert_eq!(error.to_string(), "Endpoint not found: 'opc.tcp://a:4840'");
        assert!(std::error::Error::source(&error).is_none());
    }

    #[test]
    fn test_display_includes_node() {
        let error = BrowseError::bad_status("ns=2;s=Pump", 0x8033_0000);
        let text = error.to_string();
        assert!(text.contains("ns=2;s=Pump"));
        assert!(text.contains("0x80330000"));
    }

    #[test]
    fn test_recovery_hints() {
        let error = OpcUaError::connection(ConnectionError::refused(
            "opc.tcp://10.0.0.5:4840",
            "BadTcpEndpointUrlInvalid",
        ));
        assert!(error.recovery_hints().iter().any(|h| h.contains("4840")));

        let error = OpcUaError::invalid_node_id("ns=x", "bad namespace");
        assert!(error.recovery_hints().iter().any(|h| h.contains("ns=")));
    }
}
