// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = uascan_config::load_config(config_path)?;

    let mut warnings: Vec<String> = Vec::new();

    if config.ip.is_none() {
        warnings.push("No 'ip' configured, pass the address on the command line".to_string());
    }

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            warnings.push(format!("Output directory does not exist: {}", parent.display()));
        }
    }

    if config.walk.max_records > 0 {
        warnings.push(format!(
            "Reports stop after {} variables",
            config.walk.max_records
        ));
    }

    let endpoint = config
        .opcua_config(None)
        .map(|c| c.endpoint)
        .unwrap_or_else(|_| "-".to_string());

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Endpoint: {}", endpoint);
            println!("  Output: {}", config.output.display());
            println!("  Start node: {}", config.start_node);
            println!("  Max depth: {}", config.walk.max_depth);
            println!("  System namespace: {:?}", config.walk.system_namespace);
            println!("  UInt32 rendering: {}", config.uint32_rendering);

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", to_pretty_json(&config)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "endpoint": endpoint,
                    "output": config.output.display().to_string(),
                    "start_node": config.start_node,
                    "max_depth": config.walk.max_depth,
                    "max_records": config.walk.max_records,
                },
                "warnings": warnings,
                "config": if args.show_config { Some(&config) } else { None },
            });
            println!("{}", to_pretty_json(&output)?);
        }
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::config(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(())
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> BinResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BinError::config(format!("Cannot serialize configuration: {}", e)))
}
