// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA address-space scanning for uascan.
//!
//! This crate walks a server's address space from a start node over forward
//! references, exactly once per node, and turns every Variable it meets into
//! a [`VariableRecord`] carrying the node's data type name and decoded value.
//!
//! # Features
//!
//! - Cycle-safe depth-first traversal with an explicit stack
//! - Closed-set value decoding with an `<unsupported type>` fallback
//! - Failure isolation: a bad node prunes one subtree, a lost session aborts
//! - `real-transport`: an [`AddressSpace`] backed by the `opcua` crate
//!
//! # Error Handling
//!
//! ```text
//! OpcUaError
//! ├── Connection    - Client setup, endpoint discovery, session loss
//! ├── Browse        - Browse and BrowseNext failures
//! ├── Operation     - Attribute read failures
//! ├── Conversion    - Attribute of an unexpected type
//! └── Configuration - Invalid settings
//! ```
//!
//! Only `Connection` errors end a walk. Every other error is logged and
//! confined to the node it concerns.
//!
//! # Example
//!
//! ```rust,ignore
//! use uascan_opcua::{AddressSpaceWalker, NodeId, OpcUaConfig, RealOpcUaTransport};
//!
//! let config = OpcUaConfig::builder().endpoint("192.168.0.10").build()?;
//! let mut transport = RealOpcUaTransport::new(config);
//! transport.connect()?;
//!
//! let mut records = Vec::new();
//! AddressSpaceWalker::new(&transport).run(&NodeId::OBJECTS_FOLDER, &mut records)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod decoder;
pub mod error;
pub mod types;
pub mod walker;

// Re-export commonly used types
pub use error::{
    BrowseError, ConfigurationError, ConnectionError, ConversionError, ErrorCode, ErrorSeverity,
    OpcUaError, OpcUaResult, OperationError,
};

pub use types::{
    normalize_endpoint, BrowseDescription, NodeClass, NodeId, NodeIdentifier,
    NodeReference, OpcUaConfig, OpcUaConfigBuilder, DEFAULT_PORT,
};

pub use client::{AddressSpace, TransportState};

#[cfg(feature = "real-transport")]
pub use client::RealOpcUaTransport;

pub use decoder::{decode, TaggedVariant, Uint32Rendering, ValueDecoder, UNSUPPORTED_SENTINEL};

pub use walker::{
    walk, AddressSpaceWalker, RecordSink, SystemNamespacePolicy, VariableRecord, VisitedSet,
    WalkError, WalkOptions, WalkStatistics,
};
