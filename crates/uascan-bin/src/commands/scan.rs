// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `scan` command.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::{info, warn};
use uascan_config::{ConfigError, ConfigLoader, ScanConfig};
use uascan_opcua::{
    AddressSpace, AddressSpaceWalker, NodeId, RealOpcUaTransport, WalkStatistics,
};

use crate::cli::{Cli, ScanArgs};
use crate::error::{BinError, BinResult};
use crate::report::ReportWriter;

/// Executes the `scan` command.
///
/// Connects, creates the report file, walks from the configured start node
/// and prints where the report went.
pub fn scan(cli: &Cli, args: ScanArgs) -> BinResult<()> {
    let config = load_scan_config(cli, &args)?;
    let opcua_config = config.opcua_config(args.address.as_deref())?;
    let start = config.start_node_id()?;

    let mut transport = RealOpcUaTransport::new(opcua_config);
    transport.connect().map_err(BinError::Connection)?;

    let file = File::create(&config.output).map_err(|e| {
        BinError::io(format!("Cannot create {}: {}", config.output.display(), e))
    })?;

    info!(start_node = %start, output = %config.output.display(), "Scanning address space");
    let result = scan_address_space(&transport, &start, &config, BufWriter::new(file));
    transport.disconnect();

    let stats = result?;
    if stats.truncated {
        warn!(records = stats.records, "Record limit reached, report is incomplete");
    }

    println!("All tags in {}", config.output.display());
    Ok(())
}

/// Walks `space` from `start` and writes the report to `out`.
///
/// Whatever was written before an abort is flushed before the error is
/// returned.
pub fn scan_address_space<A, W>(
    space: &A,
    start: &NodeId,
    config: &ScanConfig,
    out: W,
) -> BinResult<WalkStatistics>
where
    A: AddressSpace + ?Sized,
    W: Write,
{
    let mut writer = ReportWriter::new(out);
    let mut walker = AddressSpaceWalker::new(space)
        .with_options(config.walk)
        .with_decoder(config.decoder());

    let outcome = walker.run(start, &mut writer).map(|stats| *stats);
    let flushed = writer.finish();

    let stats = outcome?;
    flushed?;
    Ok(stats)
}

/// Loads the configuration file and applies command-line overrides.
///
/// A missing file is tolerated when the address comes from elsewhere.
fn load_scan_config(cli: &Cli, args: &ScanArgs) -> BinResult<ScanConfig> {
    let config_exists = cli.config.exists();
    let mut config = ConfigLoader::new().load_or_default(&cli.config)?;

    if args.address.is_none() && config.ip.is_none() && !config_exists {
        return Err(ConfigError::file_not_found(&cli.config).into());
    }

    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if let Some(ref start_node) = args.start_node {
        config.start_node = start_node.clone();
    }
    if let Some(max_depth) = args.max_depth {
        config.walk.max_depth = max_depth;
    }
    if let Some(max_records) = args.max_records {
        config.walk.max_records = max_records;
    }

    config.validate()?;
    Ok(config)
}
