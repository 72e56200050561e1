// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server access for scans.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     AddressSpaceWalker                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   AddressSpace (trait)                          │
//! │        browse / read_value / read_data_type / read_browse_name  │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        RealOpcUaTransport (feature = "real-transport")          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod transport;

#[cfg(feature = "real-transport")]
mod real_transport;

pub use transport::{AddressSpace, TransportState};

#[cfg(feature = "real-transport")]
pub use real_transport::RealOpcUaTransport;
