// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `scan`: Walk the server and write the report (default)
//! - `validate`: Validate the configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// uascan - OPC UA tag dumper
///
/// Connects to an OPC UA server, walks its address space from the Objects
/// folder and writes every Variable with its data type and value to a text
/// report.
#[derive(Parser, Debug)]
#[command(
    name = "uascan",
    author = "Sylvex",
    version = crate::VERSION,
    about = "Dump every Variable of an OPC UA server to a text report",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = uascan_config::DEFAULT_CONFIG_FILE,
        env = "UASCAN_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "UASCAN_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "UASCAN_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Scan arguments when no subcommand is given
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the uascan CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Walk the server and write the report
    ///
    /// This is the default command when no subcommand is specified.
    Scan(ScanArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration file without connecting.
    Validate(ValidateArgs),
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `scan` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ScanArgs {
    /// Server address: opc.tcp:// URL, host:port or host (overrides `ip`)
    pub address: Option<String>,

    /// Report file (overrides `output`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Node to start from, e.g. "i=85" or "ns=2;s=Line1"
    #[arg(long)]
    pub start_node: Option<String>,

    /// Maximum browse depth below the start node (0 = unlimited)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop after this many variables (0 = unlimited)
    #[arg(long)]
    pub max_records: Option<usize>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Scan` with the top-level
    /// arguments if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Scan(self.scan.clone()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["uascan"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config.json"));
        match cli.effective_command() {
            Commands::Scan(args) => assert!(args.address.is_none()),
            other => panic!("Expected Scan command, got {:?}", other),
        }
    }

    #[test]
    fn test_positional_address() {
        let cli = Cli::parse_from(["uascan", "192.168.0.10", "-o", "line1.txt"]);
        match cli.effective_command() {
            Commands::Scan(args) => {
                assert_eq!(args.address.as_deref(), Some("192.168.0.10"));
                assert_eq!(args.output, Some(PathBuf::from("line1.txt")));
            }
            other => panic!("Expected Scan command, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_subcommand() {
        let cli = Cli::parse_from([
            "uascan",
            "scan",
            "opc.tcp://plc:4841",
            "--start-node",
            "ns=2;s=Line1",
            "--max-depth",
            "3",
        ]);
        if let Some(Commands::Scan(args)) = cli.command {
            assert_eq!(args.address.as_deref(), Some("opc.tcp://plc:4841"));
            assert_eq!(args.start_node.as_deref(), Some("ns=2;s=Line1"));
            assert_eq!(args.max_depth, Some(3));
        } else {
            panic!("Expected Scan command");
        }
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["uascan", "-c", "scan.yaml", "validate", "--show-config"]);
        assert_eq!(cli.config, PathBuf::from("scan.yaml"));
        if let Some(Commands::Validate(args)) = cli.command {
            assert!(args.show_config);
            assert_eq!(args.format, OutputFormat::Text);
        } else {
            panic!("Expected Validate command");
        }
    }

    #[test]
    fn test_subcommand_after_global_flags() {
        let cli = Cli::parse_from(["uascan", "-q", "--log-format", "json", "validate", "--strict"]);
        assert!(cli.scan.address.is_none());
        match cli.effective_command() {
            Commands::Validate(args) => assert!(args.strict),
            other => panic!("Expected Validate command, got {:?}", other),
        }

        let cli = Cli::parse_from(["uascan", "-c", "plant.toml", "10.0.0.5"]);
        assert_eq!(cli.scan.address.as_deref(), Some("10.0.0.5"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_log_flags() {
        let cli = Cli::parse_from(["uascan", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "trace");

        let cli = Cli::parse_from(["uascan", "-q"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["uascan", "-v", "--log-format", "json"]);
        assert_eq!(cli.effective_log_level(), "debug");
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
