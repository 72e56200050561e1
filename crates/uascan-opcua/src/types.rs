// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address-space types shared by the walker and the transports.
//!
//! - **NodeId**: node identifiers with structural identity and two text forms
//! - **NodeClass**: the node class tag carried by every reference
//! - **BrowseDescription**: the single browse request shape the walker issues
//! - **NodeReference**: one edge returned by a browse
//! - **OpcUaConfig**: client settings with endpoint normalization
//!
//! # Examples
//!
//! ```
//! use uascan_opcua::types::{NodeId, OpcUaConfig};
//!
//! let node = NodeId::string(2, "Line1.Pump.Speed");
//! assert_eq!(node.canonical_key(), "2:Line1.Pump.Speed");
//!
//! let config = OpcUaConfig::builder().endpoint("192.168.0.10").build().unwrap();
//! assert_eq!(config.endpoint, "opc.tcp://192.168.0.10:4840");
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConfigurationError, OpcUaError, OpcUaResult};

/// Port assumed when an address names only a host.
pub const DEFAULT_PORT: u16 = 4840;

/// URL scheme of the OPC UA binary protocol.
pub const OPC_TCP_SCHEME: &str = "opc.tcp://";

// =============================================================================
// NodeId
// =============================================================================

/// OPC UA Node Identifier.
///
/// Equality and hashing are structural: two identifiers are equal iff they
/// have the same namespace, the same identifier kind and the same payload.
/// A numeric `1:42` and a string `1:"42"` are therefore distinct nodes even
/// though their canonical keys print the same.
///
/// # Examples
///
/// ```
/// use uascan_opcua::types::NodeId;
///
/// let parsed: NodeId = "ns=2;s=Boiler.Temperature".parse().unwrap();
/// assert_eq!(parsed, NodeId::string(2, "Boiler.Temperature"));
/// assert_eq!(parsed.to_string(), "ns=2;s=Boiler.Temperature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a numeric node ID.
    #[inline]
    pub fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node ID.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node ID.
    #[inline]
    pub fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates an opaque (byte string) node ID.
    #[inline]
    pub fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value),
        }
    }

    // =========================================================================
    // Standard Node IDs
    // =========================================================================

    /// Objects folder node (ns=0, i=85). Every scan starts here by default.
    pub const OBJECTS_FOLDER: NodeId = NodeId {
        namespace_index: 0,
        identifier: NodeIdentifier::Numeric(85),
    };

    /// Server node (ns=0, i=2253).
    pub const SERVER: NodeId = NodeId {
        namespace_index: 0,
        identifier: NodeIdentifier::Numeric(2253),
    };

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns `true` if this is in the standard namespace (ns=0).
    #[inline]
    pub const fn is_standard(&self) -> bool {
        self.namespace_index == 0
    }

    /// Returns the null node ID (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self {
            namespace_index: 0,
            identifier: NodeIdentifier::Numeric(0),
        }
    }

    // =========================================================================
    // Text Forms
    // =========================================================================

    /// Returns the compact `<namespace>:<payload>` key used in reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use uascan_opcua::types::NodeId;
    ///
    /// assert_eq!(NodeId::numeric(1, 42).canonical_key(), "1:42");
    /// assert_eq!(NodeId::string(3, "Tank.Level").canonical_key(), "3:Tank.Level");
    /// ```
    pub fn canonical_key(&self) -> String {
        format!("{}:{}", self.namespace_index, self.identifier.payload())
    }

    /// Converts to the OPC UA string format.
    ///
    /// Format: `ns=<namespace>;{i|s|g|b}=<identifier>`, with the namespace
    /// part omitted for namespace 0.
    pub fn to_opc_string(&self) -> String {
        if self.namespace_index == 0 {
            self.identifier.to_string()
        } else {
            format!("ns={};{}", self.namespace_index, self.identifier)
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_opc_string())
    }
}

impl FromStr for NodeId {
    type Err = OpcUaError;

    /// Parses a NodeId from OPC UA string format.
    ///
    /// Supported formats:
    /// - `ns=2;i=1001` (numeric)
    /// - `ns=2;s=MyNode` (string)
    /// - `ns=2;g=550e8400-e29b-41d4-a716-446655440000` (GUID)
    /// - `ns=2;b=SGVsbG8=` (opaque, base64 encoded)
    /// - `i=85` (numeric, namespace 0)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: String| {
            OpcUaError::configuration(ConfigurationError::invalid_node_id(s, reason))
        };

        let (namespace_index, identifier_part) = match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns_str, id) = rest
                    .split_once(';')
                    .ok_or_else(|| invalid("Missing identifier after namespace".to_string()))?;
                let ns: u16 = ns_str
                    .parse()
                    .map_err(|_| invalid("Invalid namespace index".to_string()))?;
                (ns, id)
            }
            None => (0, s),
        };

        let identifier = if let Some(id) = identifier_part.strip_prefix("i=") {
            let value: u32 = id
                .parse()
                .map_err(|_| invalid("Invalid numeric identifier".to_string()))?;
            NodeIdentifier::Numeric(value)
        } else if let Some(id) = identifier_part.strip_prefix("s=") {
            NodeIdentifier::String(id.to_string())
        } else if let Some(id) = identifier_part.strip_prefix("g=") {
            let uuid = Uuid::parse_str(id).map_err(|e| invalid(format!("Invalid GUID: {}", e)))?;
            NodeIdentifier::Guid(uuid)
        } else if let Some(id) = identifier_part.strip_prefix("b=") {
            let bytes = BASE64
                .decode(id)
                .map_err(|e| invalid(format!("Invalid base64: {}", e)))?;
            NodeIdentifier::Opaque(bytes)
        } else {
            return Err(invalid(
                "Unknown identifier type. Expected i=, s=, g=, or b=".to_string(),
            ));
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// OPC UA node identifier payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeIdentifier {
    /// Numeric identifier.
    Numeric(u32),

    /// String identifier.
    String(String),

    /// GUID identifier.
    Guid(Uuid),

    /// Opaque identifier (application-specific byte array).
    Opaque(Vec<u8>),
}

impl NodeIdentifier {
    /// Returns the identifier type prefix for OPC UA string format.
    pub const fn type_prefix(&self) -> char {
        match self {
            Self::Numeric(_) => 'i',
            Self::String(_) => 's',
            Self::Guid(_) => 'g',
            Self::Opaque(_) => 'b',
        }
    }

    /// Returns the payload without its type prefix.
    pub fn payload(&self) -> String {
        match self {
            Self::Numeric(v) => v.to_string(),
            Self::String(v) => v.clone(),
            Self::Guid(v) => v.hyphenated().to_string(),
            Self::Opaque(v) => BASE64.encode(v),
        }
    }
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.type_prefix(), self.payload())
    }
}

// =============================================================================
// NodeClass
// =============================================================================

/// OPC UA node class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// No class reported (mask value 0).
    Unspecified,
    /// Object node.
    Object,
    /// Variable node.
    Variable,
    /// Method node.
    Method,
    /// Object type node.
    ObjectType,
    /// Variable type node.
    VariableType,
    /// Reference type node.
    ReferenceType,
    /// Data type node.
    DataType,
    /// View node.
    View,
}

impl NodeClass {
    /// Returns the OPC UA bit mask value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Unspecified => 0,
            Self::Object => 1,
            Self::Variable => 2,
            Self::Method => 4,
            Self::ObjectType => 8,
            Self::VariableType => 16,
            Self::ReferenceType => 32,
            Self::DataType => 64,
            Self::View => 128,
        }
    }

    /// Creates from OPC UA value. Unknown values map to `Unspecified`.
    pub fn from_value(value: u32) -> Self {
        match value {
            1 => Self::Object,
            2 => Self::Variable,
            4 => Self::Method,
            8 => Self::ObjectType,
            16 => Self::VariableType,
            32 => Self::ReferenceType,
            64 => Self::DataType,
            128 => Self::View,
            _ => Self::Unspecified,
        }
    }

    /// Returns the name used in reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::Object => "Object",
            Self::Variable => "Variable",
            Self::Method => "Method",
            Self::ObjectType => "ObjectType",
            Self::VariableType => "VariableType",
            Self::ReferenceType => "ReferenceType",
            Self::DataType => "DataType",
            Self::View => "View",
        }
    }

    /// Returns `true` if this node class carries a readable value.
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Variable)
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// BrowseDescription
// =============================================================================

/// Result mask requesting every field of a reference description.
pub const RESULT_MASK_ALL: u32 = 0x3F;

/// Node class mask selecting every node class.
pub const NODE_CLASS_MASK_ALL: u32 = 0;

/// Parameters of one forward browse request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseDescription {
    /// Node whose references are requested.
    pub node_id: NodeId,

    /// Reference type to follow. `None` follows every reference type.
    pub reference_type_id: Option<NodeId>,

    /// Include subtypes of the reference type.
    pub include_subtypes: bool,

    /// Node class filter mask (0 = all classes).
    pub node_class_mask: u32,

    /// Fields requested per reference.
    pub result_mask: u32,
}

impl BrowseDescription {
    /// Requests every forward reference of `node_id` with full result detail
    /// and subtypes included.
    pub fn all_forward(node_id: NodeId) -> Self {
        Self {
            node_id,
            reference_type_id: None,
            include_subtypes: true,
            node_class_mask: NODE_CLASS_MASK_ALL,
            result_mask: RESULT_MASK_ALL,
        }
    }
}

// =============================================================================
// NodeReference
// =============================================================================

/// An edge discovered by browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReference {
    /// Target node.
    pub node_id: NodeId,

    /// Node class of the target.
    pub node_class: NodeClass,

    /// Localized display name of the target.
    pub display_name: String,

    /// Browse name of the target.
    pub browse_name: String,
}

impl NodeReference {
    /// Creates a reference with the browse name equal to the display name.
    pub fn new(node_id: NodeId, node_class: NodeClass, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            node_id,
            node_class,
            browse_name: display_name.clone(),
            display_name,
        }
    }

    /// Sets the browse name.
    pub fn with_browse_name(mut self, browse_name: impl Into<String>) -> Self {
        self.browse_name = browse_name.into();
        self
    }
}

impl fmt::Display for NodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.display_name, self.node_id, self.node_class)
    }
}

// =============================================================================
// OpcUaConfig
// =============================================================================

/// OPC UA client configuration.
///
/// Scans always use security policy `None` with an anonymous identity, so
/// only the session parameters are configurable.
#[derive(Debug, Clone)]
pub struct OpcUaConfig {
    /// Server endpoint URL (e.g., "opc.tcp://localhost:4840").
    pub endpoint: String,

    /// Application name announced to the server.
    pub application_name: String,

    /// Session timeout.
    pub session_timeout: Duration,
}

fn default_application_name() -> String {
    "uascan".to_string()
}

fn default_session_timeout() -> Duration {
    Duration::from_secs(30)
}

impl OpcUaConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> OpcUaConfigBuilder {
        OpcUaConfigBuilder::default()
    }

    /// Validates this configuration.
    pub fn validate(&self) -> OpcUaResult<()> {
        if self.endpoint.is_empty() {
            return Err(OpcUaError::configuration(ConfigurationError::missing_field(
                "endpoint",
            )));
        }

        if !self.endpoint.starts_with(OPC_TCP_SCHEME) {
            return Err(OpcUaError::configuration(
                ConfigurationError::invalid_endpoint(
                    &self.endpoint,
                    "Endpoint must start with opc.tcp://",
                ),
            ));
        }

        if self.session_timeout.is_zero() {
            return Err(OpcUaError::configuration(
                ConfigurationError::invalid_endpoint(
                    &self.endpoint,
                    "Session timeout must be greater than 0",
                ),
            ));
        }

        Ok(())
    }

    /// Returns the application URI derived from the application name.
    pub fn application_uri(&self) -> String {
        format!("urn:{}", self.application_name.replace(' ', ""))
    }
}

impl Default for OpcUaConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            application_name: default_application_name(),
            session_timeout: default_session_timeout(),
        }
    }
}

// =============================================================================
// OpcUaConfigBuilder
// =============================================================================

/// Builder for `OpcUaConfig`.
#[derive(Debug, Default)]
pub struct OpcUaConfigBuilder {
    endpoint: Option<String>,
    application_name: Option<String>,
    session_timeout: Option<Duration>,
}

impl OpcUaConfigBuilder {
    /// Sets the server address. Accepts a URL, `host:port` or a bare host.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the application name.
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Sets the session timeout.
    pub fn session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = Some(timeout);
        self
    }

    /// Builds the configuration, normalizing the endpoint.
    pub fn build(self) -> OpcUaResult<OpcUaConfig> {
        let address = self.endpoint.ok_or_else(|| {
            OpcUaError::configuration(ConfigurationError::missing_field("endpoint"))
        })?;

        let config = OpcUaConfig {
            endpoint: normalize_endpoint(&address)?,
            application_name: self
                .application_name
                .unwrap_or_else(default_application_name),
            session_timeout: self.session_timeout.unwrap_or_else(default_session_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Turns an operator-supplied address into an `opc.tcp://` endpoint URL.
///
/// | input                       | endpoint                          |
/// |-----------------------------|-----------------------------------|
/// | `opc.tcp://plc:4841/ua`     | unchanged                         |
/// | `plc:4841`                  | `opc.tcp://plc:4841`              |
/// | `10.0.0.5`                  | `opc.tcp://10.0.0.5:4840`         |
/// | `10.0.0.5/ua/server`        | `opc.tcp://10.0.0.5:4840/ua/server` |
/// | `fe80::1`                   | `opc.tcp://[fe80::1]:4840`        |
pub fn normalize_endpoint(address: &str) -> OpcUaResult<String> {
    let address = address.trim();
    let invalid = |reason: &str| {
        OpcUaError::configuration(ConfigurationError::invalid_endpoint(address, reason))
    };

    if address.is_empty() {
        return Err(invalid("Address is empty"));
    }
    if address.chars().any(char::is_whitespace) {
        return Err(invalid("Address contains whitespace"));
    }

    if let Some((scheme, _)) = address.split_once("://") {
        if address.starts_with(OPC_TCP_SCHEME) {
            return Ok(address.to_string());
        }
        return Err(invalid(&format!("Unsupported scheme '{}'", scheme)));
    }

    let (authority, path) = match address.find('/') {
        Some(pos) => address.split_at(pos),
        None => (address, ""),
    };

    let authority = if let Some(bracketed) = authority.strip_prefix('[') {
        let (_, after) = bracketed
            .split_once(']')
            .ok_or_else(|| invalid("Unterminated IPv6 literal"))?;
        match after.strip_prefix(':') {
            Some(port) => {
                parse_port(port).ok_or_else(|| invalid("Invalid port"))?;
                authority.to_string()
            }
            None if after.is_empty() => format!("{}:{}", authority, DEFAULT_PORT),
            None => return Err(invalid("Unexpected text after IPv6 literal")),
        }
    } else {
        match authority.matches(':').count() {
            0 => format!("{}:{}", authority, DEFAULT_PORT),
            1 => {
                let (host, port) = authority.split_once(':').unwrap_or((authority, ""));
                if host.is_empty() {
                    return Err(invalid("Missing host"));
                }
                parse_port(port).ok_or_else(|| invalid("Invalid port"))?;
                authority.to_string()
            }
            _ => format!("[{}]:{}", authority, DEFAULT_PORT),
        }
    };

    Ok(format!("{}{}{}", OPC_TCP_SCHEME, authority, path))
}

fn parse_port(port: &str) -> Option<u16> {
    port.parse::<u16>().ok().filter(|p| *p != 0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // NodeId Tests
    // =========================================================================

    #[test]
    fn test_canonical_key() {
        assert_eq!(NodeId::numeric(1, 42).canonical_key(), "1:42");
        assert_eq!(NodeId::string(2, "Pump.Speed").canonical_key(), "2:Pump.Speed");

        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            NodeId::guid(4, uuid).canonical_key(),
            "4:550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(NodeId::opaque(5, vec![1, 2, 3, 4]).canonical_key(), "5:AQIDBA==");
    }

    #[test]
    fn test_identity_is_structural() {
        let numeric = NodeId::numeric(1, 42);
        let string = NodeId::string(1, "42");
        assert_eq!(numeric.canonical_key(), string.canonical_key());
        assert_ne!(numeric, string);
        assert_ne!(NodeId::numeric(1, 42), NodeId::numeric(2, 42));
    }

    #[test]
    fn test_node_id_parse() {
        let node: NodeId = "ns=2;i=1001".parse().unwrap();
        assert_eq!(node, NodeId::numeric(2, 1001));

        let node: NodeId = "ns=2;s=MyNode".parse().unwrap();
        assert_eq!(node, NodeId::string(2, "MyNode"));

        let node: NodeId = "i=85".parse().unwrap();
        assert_eq!(node, NodeId::OBJECTS_FOLDER);

        let node: NodeId = "ns=3;b=AQIDBA==".parse().unwrap();
        assert_eq!(node, NodeId::opaque(3, vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_node_id_parse_errors() {
        assert!("ns=2".parse::<NodeId>().is_err());
        assert!("ns=x;i=1".parse::<NodeId>().is_err());
        assert!("ns=2;i=abc".parse::<NodeId>().is_err());
        assert!("ns=2;g=not-a-guid".parse::<NodeId>().is_err());
        assert!("ns=2;q=1".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_opc_string_round_trip() {
        let node = NodeId::string(2, "Line;1");
        assert_eq!(node.to_string(), "ns=2;s=Line;1");
        assert_eq!(node.to_string().parse::<NodeId>().unwrap(), node);
        assert_eq!(NodeId::OBJECTS_FOLDER.to_string(), "i=85");
    }

    // =========================================================================
    // NodeClass / BrowseDescription Tests
    // =========================================================================

    #[test]
    fn test_node_class_values() {
        assert_eq!(NodeClass::from_value(2), NodeClass::Variable);
        assert_eq!(NodeClass::from_value(0), NodeClass::Unspecified);
        assert_eq!(NodeClass::from_value(3), NodeClass::Unspecified);
        assert_eq!(NodeClass::Variable.value(), 2);
        assert_eq!(NodeClass::Variable.to_string(), "Variable");
        assert!(NodeClass::Variable.has_value());
        assert!(!NodeClass::Object.has_value());
    }

    #[test]
    fn test_all_forward_description() {
        let desc = BrowseDescription::all_forward(NodeId::OBJECTS_FOLDER);
        assert!(desc.reference_type_id.is_none());
        assert!(desc.include_subtypes);
        assert_eq!(desc.result_mask, RESULT_MASK_ALL);
        assert_eq!(desc.node_class_mask, NODE_CLASS_MASK_ALL);
    }

    // =========================================================================
    // Endpoint Tests
    // =========================================================================

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("opc.tcp://plc:4841/ua").unwrap(),
            "opc.tcp://plc:4841/ua"
        );
        assert_eq!(normalize_endpoint("plc:4841").unwrap(), "opc.tcp://plc:4841");
        assert_eq!(normalize_endpoint(" 10.0.0.5 ").unwrap(), "opc.tcp://10.0.0.5:4840");
        assert_eq!(
            normalize_endpoint("10.0.0.5/ua/server").unwrap(),
            "opc.tcp://10.0.0.5:4840/ua/server"
        );
        assert_eq!(normalize_endpoint("fe80::1").unwrap(), "opc.tcp://[fe80::1]:4840");
        assert_eq!(normalize_endpoint("[::1]:4850").unwrap(), "opc.tcp://[::1]:4850");
        assert_eq!(normalize_endpoint("[::1]").unwrap(), "opc.tcp://[::1]:4840");
    }

    #[test]
    fn test_normalize_endpoint_rejects() {
        assert!(normalize_endpoint("").is_err());
        assert!(normalize_endpoint("http://plc:80").is_err());
        assert!(normalize_endpoint("plc:notaport").is_err());
        assert!(normalize_endpoint("plc:0").is_err());
        assert!(normalize_endpoint(":4840").is_err());
        assert!(normalize_endpoint("my plc").is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = OpcUaConfig::builder()
            .endpoint("localhost")
            .application_name("Line Scanner")
            .session_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.endpoint, "opc.tcp://localhost:4840");
        assert_eq!(config.application_uri(), "urn:LineScanner");
        assert_eq!(config.session_timeout, Duration::from_secs(5));

        assert!(OpcUaConfig::builder().build().is_err());
        assert!(OpcUaConfig::builder()
            .endpoint("localhost")
            .session_timeout(Duration::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = OpcUaConfig::default();
        assert_eq!(config.session_timeout, Duration::from_secs(30));
        assert_eq!(config.application_name, "uascan");
        assert!(config.validate().is_err());
    }
}
