// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Text report writer.
//!
//! Each record becomes up to three lines, indented two spaces per depth
//! level:
//!
//! ```text
//! Node: Line1.Speed (NodeId: 2:Line1.Speed) [Class: Variable]
//!   DataType: Double
//!   Value: 42.0
//! ```
//!
//! `DataType` and `Value` are left out when the attribute could not be read.

use std::io::{self, Write};

use uascan_opcua::{RecordSink, VariableRecord};

/// Writes records to a text sink in discovery order.
pub struct ReportWriter<W: Write> {
    inner: W,
    records: u64,
}

impl<W: Write> ReportWriter<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    /// Returns the number of records written.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flushes and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> RecordSink for ReportWriter<W> {
    fn accept(&mut self, record: VariableRecord) -> io::Result<()> {
        self.inner.write_all(render_record(&record).as_bytes())?;
        self.records += 1;
        Ok(())
    }
}

/// Renders one record as report lines, each terminated by `\n`.
pub fn render_record(record: &VariableRecord) -> String {
    let indent = "  ".repeat(record.depth);
    let mut text = format!(
        "{}Node: {} (NodeId: {}) [Class: {}]\n",
        indent,
        record.display_name,
        record.node_id.canonical_key(),
        record.node_class.name()
    );

    if let Some(ref data_type) = record.data_type {
        text.push_str(&format!("{}  DataType: {}\n", indent, data_type));
    }
    if let Some(ref value) = record.value {
        text.push_str(&format!("{}  Value: {}\n", indent, value));
    }

    text
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uascan_opcua::{NodeClass, NodeId};

    fn record(depth: usize, data_type: Option<&str>, value: Option<&str>) -> VariableRecord {
        VariableRecord {
            display_name: "Speed".to_string(),
            node_id: NodeId::string(2, "Line1.Speed"),
            node_class: NodeClass::Variable,
            data_type: data_type.map(str::to_string),
            value: value.map(str::to_string),
            depth,
        }
    }

    #[test]
    fn test_render_full_record() {
        assert_eq!(
            render_record(&record(0, Some("Double"), Some("42.0"))),
            concat!(
                "Node: Speed (NodeId: 2:Line1.Speed) [Class: Variable]\n",
                "  DataType: Double\n",
                "  Value: 42.0\n",
            )
        );
    }

    #[test]
    fn test_render_indent_and_missing_fields() {
        assert_eq!(
            render_record(&record(2, None, Some("7"))),
            "    Node: Speed (NodeId: 2:Line1.Speed) [Class: Variable]\n      Value: 7\n"
        );
        assert_eq!(
            render_record(&record(1, Some("Int32"), None)),
            "  Node: Speed (NodeId: 2:Line1.Speed) [Class: Variable]\n    DataType: Int32\n"
        );
    }

    #[test]
    fn test_writer_counts_and_flushes() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.accept(record(0, None, None)).unwrap();
        writer.accept(record(0, None, None)).unwrap();
        assert_eq!(writer.records(), 2);

        let bytes = writer.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 2);
    }
}
