// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! End-to-end report tests: configuration, walk and text output over an
//! in-memory address space.

use std::collections::HashMap;
use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;
use uascan_bin::commands::scan_address_space;
use uascan_bin::BinError;
use uascan_config::{ConfigFormat, ConfigLoader, ScanConfig};
use uascan_opcua::{
    AddressSpace, BrowseDescription, NodeClass, NodeId, NodeReference, OpcUaError, OpcUaResult,
    TaggedVariant,
};

// =============================================================================
// Mock Address Space
// =============================================================================

#[derive(Default)]
struct Plant {
    edges: HashMap<NodeId, Vec<NodeReference>>,
    values: HashMap<NodeId, (NodeId, TaggedVariant)>,
    names: HashMap<NodeId, String>,
    drop_session_at: Option<NodeId>,
}

impl Plant {
    fn new() -> Self {
        let mut plant = Self::default();
        plant.names.insert(NodeId::numeric(0, 11), "Double".to_string());
        plant.names.insert(NodeId::numeric(0, 7), "UInt32".to_string());
        plant.names.insert(NodeId::numeric(0, 12), "String".to_string());
        plant
    }

    fn object(&mut self, parent: &NodeId, id: NodeId, name: &str) -> NodeId {
        self.edges
            .entry(parent.clone())
            .or_default()
            .push(NodeReference::new(id.clone(), NodeClass::Object, name));
        id
    }

    fn variable(
        &mut self,
        parent: &NodeId,
        id: NodeId,
        name: &str,
        data_type: u32,
        value: TaggedVariant,
    ) {
        self.edges
            .entry(parent.clone())
            .or_default()
            .push(NodeReference::new(id.clone(), NodeClass::Variable, name));
        self.values.insert(id, (NodeId::numeric(0, data_type), value));
    }
}

impl AddressSpace for Plant {
    fn browse(&self, description: &BrowseDescription) -> OpcUaResult<Vec<NodeReference>> {
        if self.drop_session_at.as_ref() == Some(&description.node_id) {
            return Err(OpcUaError::connection_lost("BadSessionClosed"));
        }
        Ok(self.edges.get(&description.node_id).cloned().unwrap_or_default())
    }

    fn read_value(&self, node_id: &NodeId) -> OpcUaResult<TaggedVariant> {
        self.values
            .get(node_id)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| OpcUaError::read_failed(node_id.to_string(), "BadAttributeIdInvalid"))
    }

    fn read_data_type(&self, node_id: &NodeId) -> OpcUaResult<NodeId> {
        self.values
            .get(node_id)
            .map(|(data_type, _)| data_type.clone())
            .ok_or_else(|| OpcUaError::read_failed(node_id.to_string(), "BadAttributeIdInvalid"))
    }

    fn read_browse_name(&self, node_id: &NodeId) -> OpcUaResult<String> {
        self.names
            .get(node_id)
            .cloned()
            .ok_or_else(|| OpcUaError::read_failed(node_id.to_string(), "BadNodeIdUnknown"))
    }
}

fn report(plant: &Plant, config: &ScanConfig) -> String {
    let mut out = Vec::new();
    scan_address_space(plant, &NodeId::OBJECTS_FOLDER, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_cycle_report() {
    let mut plant = Plant::new();
    let objects = NodeId::OBJECTS_FOLDER;
    let a = plant.object(&objects, NodeId::string(1, "A"), "A");
    plant.variable(&a, NodeId::string(1, "B"), "B", 11, TaggedVariant::Double(42.0));
    let c = plant.object(&NodeId::string(1, "B"), NodeId::string(1, "C"), "C");
    plant.object(&c, a.clone(), "A");

    assert_eq!(
        report(&plant, &ScanConfig::default()),
        "  Node: B (NodeId: 1:B) [Class: Variable]\n    DataType: Double\n    Value: 42.0\n"
    );
}

#[test]
fn test_mixed_plant_report() {
    let mut plant = Plant::new();
    let objects = NodeId::OBJECTS_FOLDER;
    plant.object(&objects, NodeId::SERVER, "Server");
    let line = plant.object(&objects, NodeId::numeric(2, 100), "Line1");
    plant.variable(
        &line,
        NodeId::numeric(2, 101),
        "Count",
        7,
        TaggedVariant::UInt32(3_000_000_000),
    );
    plant.variable(
        &line,
        NodeId::numeric(2, 102),
        "Stamp",
        13,
        TaggedVariant::unsupported("DateTime"),
    );
    plant.variable(&objects, NodeId::string(2, "Mode"), "Mode", 12, TaggedVariant::string("Auto"));
    // Listed by the server but unreadable.
    plant.edges.get_mut(&objects).unwrap().push(NodeReference::new(
        NodeId::numeric(2, 200),
        NodeClass::Variable,
        "Ghost",
    ));

    let expected = concat!(
        "  Node: Count (NodeId: 2:101) [Class: Variable]\n",
        "    DataType: UInt32\n",
        "    Value: 3000000000\n",
        "  Node: Stamp (NodeId: 2:102) [Class: Variable]\n",
        "    Value: <unsupported type>\n",
        "Node: Mode (NodeId: 2:Mode) [Class: Variable]\n",
        "  DataType: String\n",
        "  Value: Auto\n",
        "Node: Ghost (NodeId: 2:200) [Class: Variable]\n",
    );
    assert_eq!(report(&plant, &ScanConfig::default()), expected);
}

#[test]
fn test_config_drives_rendering() {
    let mut plant = Plant::new();
    let objects = NodeId::OBJECTS_FOLDER;
    let line = plant.object(&objects, NodeId::numeric(2, 1), "Line1");
    plant.variable(&line, NodeId::numeric(2, 2), "Count", 7, TaggedVariant::UInt32(3_000_000_000));
    plant.variable(&objects, NodeId::numeric(2, 3), "Level", 11, TaggedVariant::Double(0.5));

    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    let json = r#"{"uint32_rendering": "signed_reinterpret", "walk": {"max_depth": 1}}"#;
    file.write_all(json.as_bytes()).unwrap();
    let config = ConfigLoader::new()
        .with_env_prefix("UASCAN_BIN_IT")
        .load(file.path())
        .unwrap();

    // Depth 1 reaches Line1 but does not browse it.
    assert_eq!(
        report(&plant, &config),
        "Node: Level (NodeId: 2:3) [Class: Variable]\n  DataType: Double\n  Value: 0.5\n"
    );

    let config = ConfigLoader::new()
        .with_env_prefix("UASCAN_BIN_IT")
        .load_from_str(r#"{"uint32_rendering": "signed_reinterpret"}"#, ConfigFormat::Json)
        .unwrap();
    assert!(report(&plant, &config).contains("Value: -1294967296\n"));
}

#[test]
fn test_abort_keeps_partial_report() {
    let mut plant = Plant::new();
    let objects = NodeId::OBJECTS_FOLDER;
    plant.variable(&objects, NodeId::numeric(2, 1), "First", 11, TaggedVariant::Double(1.0));
    let broken = plant.object(&objects, NodeId::numeric(2, 2), "Broken");
    plant.drop_session_at = Some(broken);

    let file = NamedTempFile::new().unwrap();
    let result = scan_address_space(
        &plant,
        &NodeId::OBJECTS_FOLDER,
        &ScanConfig::default(),
        fs::File::create(file.path()).unwrap(),
    );

    match result {
        Err(error @ BinError::Traversal(_)) => assert_eq!(error.exit_code(), 3),
        other => panic!("Expected Traversal error, got {:?}", other),
    }
    let written = fs::read_to_string(file.path()).unwrap();
    assert!(written.starts_with("Node: First (NodeId: 2:1) [Class: Variable]\n"));
}
