// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport abstraction for address-space access.
//!
//! The walker only needs four blocking services from a server connection.
//! [`AddressSpace`] names them so that scans can run against the real
//! `opcua` client or against an in-memory graph in tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decoder::TaggedVariant;
use crate::error::OpcUaResult;
use crate::types::{BrowseDescription, NodeId, NodeReference};

// =============================================================================
// TransportState
// =============================================================================

/// Connection state of the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportState {
    /// Transport is not connected.
    #[default]
    Disconnected,

    /// Transport is establishing connection.
    Connecting,

    /// Transport is connected and ready.
    Connected,

    /// Transport connection has failed.
    Failed,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Connected => write!(f, "Connected"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

// =============================================================================
// AddressSpace
// =============================================================================

/// Blocking access to a server's address space.
///
/// Every call is a single request with at most one outstanding at a time.
/// Implementations report a lost session as
/// [`OpcUaError::Connection`](crate::error::OpcUaError::Connection); callers
/// treat every other error as local to the node in question.
pub trait AddressSpace {
    /// Lists the references selected by `description`.
    ///
    /// Implementations must return every matching reference, following
    /// continuation points when the server pages its answer.
    fn browse(&self, description: &BrowseDescription) -> OpcUaResult<Vec<NodeReference>>;

    /// Reads the `Value` attribute.
    fn read_value(&self, node_id: &NodeId) -> OpcUaResult<TaggedVariant>;

    /// Reads the `DataType` attribute.
    fn read_data_type(&self, node_id: &NodeId) -> OpcUaResult<NodeId>;

    /// Reads the `BrowseName` attribute, without its namespace qualifier.
    fn read_browse_name(&self, node_id: &NodeId) -> OpcUaResult<String>;
}

impl<T: AddressSpace + ?Sized> AddressSpace for &T {
    fn browse(&self, description: &BrowseDescription) -> OpcUaResult<Vec<NodeReference>> {
        (**self).browse(description)
    }

    fn read_value(&self, node_id: &NodeId) -> OpcUaResult<TaggedVariant> {
        (**self).read_value(node_id)
    }

    fn read_data_type(&self, node_id: &NodeId) -> OpcUaResult<NodeId> {
        (**self).read_data_type(node_id)
    }

    fn read_browse_name(&self, node_id: &NodeId) -> OpcUaResult<String> {
        (**self).read_browse_name(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_state() {
        assert_eq!(TransportState::default(), TransportState::Disconnected);
        assert_eq!(TransportState::Connected.to_string(), "Connected");
    }
}
