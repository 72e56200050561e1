// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `scan`: Walk the server and write the report
//! - `validate`: Validate configuration file

mod scan;
mod validate;

pub use scan::{scan, scan_address_space};
pub use validate::validate;

use crate::cli::{Cli, Commands};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub fn execute(cli: &Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Scan(args) => scan::scan(cli, args),
        Commands::Validate(args) => validate::validate(cli, args),
    }
}
