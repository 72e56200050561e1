// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! [`AddressSpace`] over a live session of the `opcua` crate.
//!
//! Sessions use security policy `None` and an anonymous identity. Browse
//! follows continuation points with `BrowseNext` until the server has
//! returned every reference.
//!
//! # Example
//!
//! ```rust,ignore
//! use uascan_opcua::client::RealOpcUaTransport;
//! use uascan_opcua::types::OpcUaConfig;
//!
//! let config = OpcUaConfig::builder().endpoint("192.168.0.10").build()?;
//! let mut transport = RealOpcUaTransport::new(config);
//! transport.connect()?;
//! ```

use std::sync::Arc;

use tracing::{debug, info, trace};

use opcua::client::prelude::*;
use opcua::sync::RwLock as OpcUaRwLock;

use crate::client::transport::{AddressSpace, TransportState};
use crate::decoder::TaggedVariant;
use crate::error::{
    BrowseError, ConnectionError, ConversionError, OpcUaError, OpcUaResult, OperationError,
};
use crate::types::{
    BrowseDescription, NodeClass, NodeId, NodeIdentifier, NodeReference, OpcUaConfig,
};

/// Status codes that mean the session is gone rather than one node failing.
const CONNECTION_LOSS_CODES: [StatusCode; 9] = [
    StatusCode::BadCommunicationError,
    StatusCode::BadTimeout,
    StatusCode::BadServerNotConnected,
    StatusCode::BadSecureChannelIdInvalid,
    StatusCode::BadSessionIdInvalid,
    StatusCode::BadSessionClosed,
    StatusCode::BadSecureChannelClosed,
    StatusCode::BadNotConnected,
    StatusCode::BadConnectionClosed,
];

// =============================================================================
// RealOpcUaTransport
// =============================================================================

/// Address-space access over a real OPC UA session.
pub struct RealOpcUaTransport {
    /// Configuration for the transport.
    config: OpcUaConfig,

    /// Current connection state.
    state: TransportState,

    /// The underlying OPC UA session.
    session: Option<Arc<OpcUaRwLock<Session>>>,
}

impl RealOpcUaTransport {
    /// Creates a disconnected transport.
    pub fn new(config: OpcUaConfig) -> Self {
        Self {
            config,
            state: TransportState::Disconnected,
            session: None,
        }
    }

    /// Returns the connection state.
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Discovers the server's unsecured endpoint and opens a session on it.
    pub fn connect(&mut self) -> OpcUaResult<()> {
        self.state = TransportState::Connecting;
        info!(endpoint = %self.config.endpoint, "Connecting to OPC UA server");

        match self.open_session() {
            Ok(session) => {
                self.session = Some(session);
                self.state = TransportState::Connected;
                info!(endpoint = %self.config.endpoint, "Connected to OPC UA server");
                Ok(())
            }
            Err(error) => {
                self.state = TransportState::Failed;
                Err(error)
            }
        }
    }

    /// Closes the session if one is open.
    pub fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            session.read().disconnect();
            info!(endpoint = %self.config.endpoint, "Disconnected from OPC UA server");
        }
        self.state = TransportState::Disconnected;
    }

    fn open_session(&self) -> OpcUaResult<Arc<OpcUaRwLock<Session>>> {
        let mut client = self.build_client()?;
        let endpoint_url = self.config.endpoint.as_str();

        let endpoints = client
            .get_server_endpoints_from_url(endpoint_url)
            .map_err(|status| {
                OpcUaError::connection(ConnectionError::endpoint_not_found(format!(
                    "{}: {}",
                    endpoint_url, status
                )))
            })?;

        let policy_uri = SecurityPolicy::None.to_uri();
        let endpoint = endpoints
            .iter()
            .find(|e| {
                e.security_policy_uri.as_ref() == policy_uri
                    && e.security_mode == MessageSecurityMode::None
            })
            .cloned()
            .ok_or_else(|| {
                OpcUaError::connection(ConnectionError::no_unsecured_endpoint(endpoint_url))
            })?;

        debug!(
            endpoint_url = %endpoint.endpoint_url,
            security_policy = %endpoint.security_policy_uri,
            "Found unsecured endpoint"
        );

        client
            .connect_to_endpoint(endpoint, IdentityToken::Anonymous)
            .map_err(|status| {
                OpcUaError::connection(ConnectionError::refused(endpoint_url, status.to_string()))
            })
    }

    fn build_client(&self) -> OpcUaResult<Client> {
        let builder = ClientBuilder::new()
            .application_name(self.config.application_name.as_str())
            .application_uri(self.config.application_uri().as_str())
            .session_retry_limit(0)
            .session_timeout(self.config.session_timeout.as_millis().min(u32::MAX as u128) as u32)
            .create_sample_keypair(false)
            .trust_server_certs(true);

        builder.client().ok_or_else(|| {
            OpcUaError::connection(ConnectionError::client_setup(
                "client configuration rejected by the OPC UA stack",
            ))
        })
    }

    fn session(&self) -> OpcUaResult<Arc<OpcUaRwLock<Session>>> {
        self.session.clone().ok_or_else(OpcUaError::not_connected)
    }

    fn read_attribute(
        &self,
        node_id: &NodeId,
        attribute: AttributeId,
    ) -> OpcUaResult<Variant> {
        let session = self.session()?;
        trace!(node_id = %node_id, attribute = ?attribute, "Reading attribute");

        let read_value_id = ReadValueId {
            node_id: Self::to_opcua_node_id(node_id),
            attribute_id: attribute as u32,
            index_range: UAString::null(),
            data_encoding: QualifiedName::null(),
        };

        let data_values = session
            .read()
            .read(&[read_value_id], TimestampsToReturn::Neither, 0.0)
            .map_err(|status| {
                status_error(status, |message| {
                    OpcUaError::read_failed(node_id.to_string(), message)
                })
            })?;

        let data_value = data_values
            .into_iter()
            .next()
            .ok_or_else(|| OpcUaError::operation(OperationError::no_value(node_id.to_string())))?;

        if let Some(status) = data_value.status {
            if !status.is_good() {
                return Err(OpcUaError::bad_status(node_id.to_string(), status.bits()));
            }
        }

        data_value
            .value
            .ok_or_else(|| OpcUaError::operation(OperationError::no_value(node_id.to_string())))
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    fn to_opcua_node_id(node_id: &NodeId) -> opcua::types::NodeId {
        match &node_id.identifier {
            NodeIdentifier::Numeric(v) => opcua::types::NodeId::new(node_id.namespace_index, *v),
            NodeIdentifier::String(v) => {
                opcua::types::NodeId::new(node_id.namespace_index, v.clone())
            }
            NodeIdentifier::Guid(v) => {
                let guid = opcua::types::Guid::from_bytes(*v.as_bytes());
                opcua::types::NodeId::new(node_id.namespace_index, guid)
            }
            NodeIdentifier::Opaque(v) => opcua::types::NodeId::new(
                node_id.namespace_index,
                opcua::types::ByteString::from(v.as_slice()),
            ),
        }
    }

    fn from_opcua_node_id(node_id: &opcua::types::NodeId) -> NodeId {
        let namespace_index = node_id.namespace;
        match &node_id.identifier {
            opcua::types::Identifier::Numeric(v) => NodeId::numeric(namespace_index, *v),
            opcua::types::Identifier::String(v) => NodeId::string(namespace_index, v.as_ref()),
            opcua::types::Identifier::Guid(v) => {
                NodeId::guid(namespace_index, uuid::Uuid::from_bytes(*v.as_bytes()))
            }
            opcua::types::Identifier::ByteString(v) => {
                NodeId::opaque(namespace_index, v.value.clone().unwrap_or_default())
            }
        }
    }

    fn from_reference(reference: &ReferenceDescription) -> NodeReference {
        NodeReference::new(
            Self::from_opcua_node_id(&reference.node_id.node_id),
            NodeClass::from_value(reference.node_class as u32),
            reference.display_name.text.as_ref(),
        )
        .with_browse_name(reference.browse_name.name.as_ref())
    }

    fn to_tagged_variant(variant: &Variant) -> TaggedVariant {
        match variant {
            Variant::Empty => TaggedVariant::Empty,
            Variant::Boolean(v) => TaggedVariant::Boolean(*v),
            Variant::Int16(v) => TaggedVariant::Int16(*v),
            Variant::UInt16(v) => TaggedVariant::UInt16(*v),
            Variant::Int32(v) => TaggedVariant::Int32(*v),
            Variant::UInt32(v) => TaggedVariant::UInt32(*v),
            Variant::Float(v) => TaggedVariant::Float(*v),
            Variant::Double(v) => TaggedVariant::Double(*v),
            Variant::String(v) => TaggedVariant::String(v.as_ref().as_bytes().to_vec()),
            other => TaggedVariant::unsupported(Self::variant_type_name(other)),
        }
    }

    fn variant_type_name(variant: &Variant) -> &'static str {
        match variant {
            Variant::SByte(_) => "SByte",
            Variant::Byte(_) => "Byte",
            Variant::Int64(_) => "Int64",
            Variant::UInt64(_) => "UInt64",
            Variant::DateTime(_) => "DateTime",
            Variant::Guid(_) => "Guid",
            Variant::StatusCode(_) => "StatusCode",
            Variant::ByteString(_) => "ByteString",
            Variant::XmlElement(_) => "XmlElement",
            Variant::QualifiedName(_) => "QualifiedName",
            Variant::LocalizedText(_) => "LocalizedText",
            Variant::NodeId(_) => "NodeId",
            Variant::ExpandedNodeId(_) => "ExpandedNodeId",
            Variant::ExtensionObject(_) => "ExtensionObject",
            Variant::Array(_) => "Array",
            _ => "Other",
        }
    }
}

impl Drop for RealOpcUaTransport {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Maps a service-level status to a connection loss or a node-local error.
fn status_error(status: StatusCode, local: impl FnOnce(String) -> OpcUaError) -> OpcUaError {
    let code = status.bits() & 0xFFFF_0000;
    if CONNECTION_LOSS_CODES.iter().any(|lost| lost.bits() == code) {
        OpcUaError::connection_lost(status.to_string())
    } else {
        local(status.to_string())
    }
}

fn first_result(results: Option<Vec<BrowseResult>>) -> Option<BrowseResult> {
    results.and_then(|r| r.into_iter().next())
}

fn has_continuation(result: &BrowseResult) -> bool {
    result
        .continuation_point
        .value
        .as_ref()
        .is_some_and(|point| !point.is_empty())
}

impl AddressSpace for RealOpcUaTransport {
    fn browse(&self, description: &BrowseDescription) -> OpcUaResult<Vec<NodeReference>> {
        let session = self.session()?;
        let session = session.read();
        let node_text = description.node_id.to_string();

        let request = opcua::types::BrowseDescription {
            node_id: Self::to_opcua_node_id(&description.node_id),
            browse_direction: opcua::types::BrowseDirection::Forward,
            reference_type_id: description
                .reference_type_id
                .as_ref()
                .map(Self::to_opcua_node_id)
                .unwrap_or_else(opcua::types::NodeId::null),
            include_subtypes: description.include_subtypes,
            node_class_mask: description.node_class_mask,
            result_mask: description.result_mask,
        };

        let mut result = session
            .browse(&[request])
            .map_err(|status| {
                status_error(status, |message| {
                    OpcUaError::browse(BrowseError::browse_failed(&node_text, message))
                })
            })
            .map(first_result)?
            .ok_or_else(|| {
                OpcUaError::browse(BrowseError::browse_failed(
                    &node_text,
                    "No browse results returned",
                ))
            })?;

        let mut references = Vec::new();
        loop {
            if result.status_code.is_bad() {
                return Err(OpcUaError::browse(BrowseError::bad_status(
                    &node_text,
                    result.status_code.bits(),
                )));
            }

            if let Some(ref refs) = result.references {
                references.extend(refs.iter().map(Self::from_reference));
            }

            if !has_continuation(&result) {
                break;
            }

            trace!(
                node_id = %description.node_id,
                received = references.len(),
                "Following continuation point"
            );
            let point = result.continuation_point.clone();
            result = session
                .browse_next(false, &[point])
                .map_err(|status| {
                    status_error(status, |message| {
                        OpcUaError::browse(BrowseError::continuation_failed(&node_text, message))
                    })
                })
                .map(first_result)?
                .ok_or_else(|| {
                    OpcUaError::browse(BrowseError::continuation_failed(
                        &node_text,
                        "No browse results returned",
                    ))
                })?;
        }

        Ok(references)
    }

    fn read_value(&self, node_id: &NodeId) -> OpcUaResult<TaggedVariant> {
        self.read_attribute(node_id, AttributeId::Value)
            .map(|variant| Self::to_tagged_variant(&variant))
    }

    fn read_data_type(&self, node_id: &NodeId) -> OpcUaResult<NodeId> {
        match self.read_attribute(node_id, AttributeId::DataType)? {
            Variant::NodeId(data_type) => Ok(Self::from_opcua_node_id(&data_type)),
            other => Err(OpcUaError::conversion(ConversionError::type_mismatch(
                "NodeId",
                Self::variant_type_name(&other),
            ))),
        }
    }

    fn read_browse_name(&self, node_id: &NodeId) -> OpcUaResult<String> {
        match self.read_attribute(node_id, AttributeId::BrowseName)? {
            Variant::QualifiedName(name) => Ok(name.name.as_ref().to_string()),
            other => Err(OpcUaError::conversion(ConversionError::type_mismatch(
                "QualifiedName",
                Self::variant_type_name(&other),
            ))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
