// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uascan-bin
//!
//! CLI binary for uascan, the OPC UA tag dumper.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         main.rs                              │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │
//!                    ┌──────▼──────┐
//!                    │    cli.rs   │
//!                    └──────┬──────┘
//!                           │
//!               ┌───────────┼───────────┐
//!               ▼           ▼           ▼
//!        ┌──────────┐ ┌──────────┐ ┌──────────┐
//!        │ commands │ │  report  │ │ logging  │
//!        └────┬─────┘ └──────────┘ └──────────┘
//!             │
//!      ┌──────┴───────┐
//!      │ uascan-opcua │
//!      │ uascan-config│
//!      └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Scan the server named in config.json
//! uascan
//!
//! # Scan an explicit server
//! uascan 192.168.0.10
//! uascan opc.tcp://plc.local:4841 -o line1.txt
//!
//! # Validate configuration
//! uascan -c scan.yaml validate
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;
pub use report::ReportWriter;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
