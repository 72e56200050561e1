// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Depth-first address-space walker.
//!
//! The walker visits every node reachable over forward references from a
//! start node, once, in pre-order, and emits a [`VariableRecord`] for each
//! Variable it reaches outside the standard namespace.
//!
//! # Traversal
//!
//! ```text
//!   stack: [start]
//!     pop frame ──► already visited? ──yes──► skip
//!                        │ no
//!                        ▼
//!                  mark visited, emit record if Variable
//!                        │
//!                        ▼
//!                  browse ──fails──► leaf (connection loss aborts)
//!                        │
//!                        ▼
//!                  push children in reverse server order
//! ```
//!
//! An explicit stack replaces recursion, so deep address spaces cannot
//! exhaust the call stack. Children are pushed in reverse, so they pop in the
//! order the server returned them.
//!
//! # Failure Handling
//!
//! - A failed browse prunes that subtree.
//! - A failed `DataType` or `Value` read omits that field from the record.
//! - An [`OpcUaError::Connection`] from any call ends the walk with
//!   [`WalkError::Aborted`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use uascan_opcua::walker::{AddressSpaceWalker, WalkOptions};
//! use uascan_opcua::NodeId;
//!
//! let mut records = Vec::new();
//! let mut walker = AddressSpaceWalker::new(&transport).with_options(WalkOptions::default());
//! walker.run(&NodeId::OBJECTS_FOLDER, &mut records)?;
//! println!("{} variables", records.len());
//! ```

use std::collections::HashSet;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::client::AddressSpace;
use crate::decoder::ValueDecoder;
use crate::error::{OpcUaError, OpcUaResult};
use crate::types::{BrowseDescription, NodeClass, NodeId, NodeReference};

// =============================================================================
// VisitedSet
// =============================================================================

/// Nodes already expanded during one traversal.
///
/// Grows monotonically. Keys are structural [`NodeId`]s.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    nodes: HashSet<NodeId>,
}

impl VisitedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a node as visited. Returns `false` if it already was.
    pub fn insert(&mut self, node_id: NodeId) -> bool {
        self.nodes.insert(node_id)
    }

    /// Returns `true` if the node has been visited.
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains(node_id)
    }

    /// Number of visited nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing has been visited.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// VariableRecord
// =============================================================================

/// One reported Variable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    /// Display name taken from the reference that reached the node.
    pub display_name: String,

    /// Node identifier.
    pub node_id: NodeId,

    /// Node class (always `Variable` for emitted records).
    pub node_class: NodeClass,

    /// Browse name of the node's data type, if it could be read.
    pub data_type: Option<String>,

    /// Decoded value, if it could be read.
    pub value: Option<String>,

    /// Depth of the browse that found the node, for indentation only.
    pub depth: usize,
}

// =============================================================================
// RecordSink
// =============================================================================

/// Receives records in discovery order.
pub trait RecordSink {
    /// Accepts one record.
    fn accept(&mut self, record: VariableRecord) -> io::Result<()>;
}

impl RecordSink for Vec<VariableRecord> {
    fn accept(&mut self, record: VariableRecord) -> io::Result<()> {
        self.push(record);
        Ok(())
    }
}

// =============================================================================
// WalkOptions
// =============================================================================

/// Treatment of references into namespace 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemNamespacePolicy {
    /// Drop the reference: no record, no traversal through it.
    #[default]
    Prune,

    /// Walk through the node but never report it.
    TraverseOnly,
}

/// Options for a walk.
///
/// # Examples
///
/// ```
/// use uascan_opcua::walker::{SystemNamespacePolicy, WalkOptions};
///
/// let options = WalkOptions::default()
///     .with_max_depth(4)
///     .with_system_namespace(SystemNamespacePolicy::TraverseOnly);
/// assert_eq!(options.max_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalkOptions {
    /// Maximum browse depth below the start node (0 = unlimited).
    #[serde(default)]
    pub max_depth: usize,

    /// Stop after this many records (0 = unlimited).
    #[serde(default)]
    pub max_records: usize,

    /// Treatment of namespace 0 references.
    #[serde(default)]
    pub system_namespace: SystemNamespacePolicy,
}

impl WalkOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the record limit.
    pub fn with_max_records(mut self, records: usize) -> Self {
        self.max_records = records;
        self
    }

    /// Sets the system namespace policy.
    pub fn with_system_namespace(mut self, policy: SystemNamespacePolicy) -> Self {
        self.system_namespace = policy;
        self
    }

    fn expands(&self, level: usize) -> bool {
        self.max_depth == 0 || level < self.max_depth
    }

    fn is_full(&self, records: u64) -> bool {
        self.max_records > 0 && records >= self.max_records as u64
    }
}

// =============================================================================
// WalkStatistics
// =============================================================================

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStatistics {
    /// Browse requests issued.
    pub browse_count: u64,

    /// Browse requests that failed and pruned a subtree.
    pub browse_failures: u64,

    /// Records emitted.
    pub records: u64,

    /// Records emitted without a data type.
    pub data_type_failures: u64,

    /// Records emitted without a value.
    pub value_failures: u64,

    /// Values that decoded to the unsupported sentinel.
    pub unsupported_values: u64,

    /// Namespace 0 references dropped.
    pub system_references_skipped: u64,

    /// Frames skipped because the node was already visited.
    pub revisits_skipped: u64,

    /// Nodes not expanded because of the depth limit.
    pub depth_limited: u64,

    /// `true` if the record limit stopped the walk.
    pub truncated: bool,
}

impl WalkStatistics {
    /// Logs the counters at info level.
    pub fn log_summary(&self) {
        info!(
            records = self.records,
            browse_count = self.browse_count,
            browse_failures = self.browse_failures,
            data_type_failures = self.data_type_failures,
            value_failures = self.value_failures,
            unsupported_values = self.unsupported_values,
            system_references_skipped = self.system_references_skipped,
            revisits_skipped = self.revisits_skipped,
            depth_limited = self.depth_limited,
            truncated = self.truncated,
            "Address-space walk finished"
        );
    }
}

// =============================================================================
// WalkError
// =============================================================================

/// Errors that end a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The connection was lost.
    #[error("Traversal aborted: {0}")]
    Aborted(#[from] OpcUaError),

    /// The record sink failed.
    #[error("Failed to write record: {0}")]
    Sink(#[from] io::Error),
}

// =============================================================================
// AddressSpaceWalker
// =============================================================================

struct Frame {
    node_id: NodeId,
    /// Reference that reached the node, `None` for the start node.
    origin: Option<NodeReference>,
    /// Browse depth relative to the start node.
    level: usize,
}

/// Traversal context: connection, visited set, options and decoder.
pub struct AddressSpaceWalker<'a, A: AddressSpace + ?Sized> {
    space: &'a A,
    visited: VisitedSet,
    options: WalkOptions,
    decoder: ValueDecoder,
    stats: WalkStatistics,
}

impl<'a, A: AddressSpace + ?Sized> AddressSpaceWalker<'a, A> {
    /// Creates a walker with an empty visited set.
    pub fn new(space: &'a A) -> Self {
        Self {
            space,
            visited: VisitedSet::new(),
            options: WalkOptions::default(),
            decoder: ValueDecoder::default(),
            stats: WalkStatistics::default(),
        }
    }

    /// Sets the walk options.
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the value decoder.
    pub fn with_decoder(mut self, decoder: ValueDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Continues from an existing visited set.
    pub fn with_visited(mut self, visited: VisitedSet) -> Self {
        self.visited = visited;
        self
    }

    /// Returns the statistics collected so far.
    pub fn stats(&self) -> &WalkStatistics {
        &self.stats
    }

    /// Returns the visited set.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Consumes the walker, returning its visited set.
    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }

    /// Walks from `start`, indenting records from depth 0.
    pub fn run<K>(&mut self, start: &NodeId, sink: &mut K) -> Result<&WalkStatistics, WalkError>
    where
        K: RecordSink + ?Sized,
    {
        self.run_at(start, 0, sink)
    }

    /// Walks from `start`; records found by its browse get depth `depth`.
    pub fn run_at<K>(
        &mut self,
        start: &NodeId,
        depth: usize,
        sink: &mut K,
    ) -> Result<&WalkStatistics, WalkError>
    where
        K: RecordSink + ?Sized,
    {
        let mut stack = vec![Frame {
            node_id: start.clone(),
            origin: None,
            level: 0,
        }];

        while let Some(frame) = stack.pop() {
            if !self.visited.insert(frame.node_id.clone()) {
                self.stats.revisits_skipped += 1;
                trace!(node_id = %frame.node_id, "Already visited");
                continue;
            }

            if let Some(reference) = &frame.origin {
                if reference.node_class.has_value() && !reference.node_id.is_standard() {
                    let record = self.build_record(reference, depth + frame.level - 1)?;
                    sink.accept(record)?;
                    self.stats.records += 1;

                    if self.options.is_full(self.stats.records) {
                        self.stats.truncated = true;
                        info!(limit = self.options.max_records, "Record limit reached");
                        break;
                    }
                }
            }

            if !self.options.expands(frame.level) {
                self.stats.depth_limited += 1;
                continue;
            }

            let Some(references) = self.browse(&frame.node_id)? else {
                continue;
            };

            for reference in references.into_iter().rev() {
                if reference.node_id.is_standard()
                    && self.options.system_namespace == SystemNamespacePolicy::Prune
                {
                    self.stats.system_references_skipped += 1;
                    continue;
                }
                stack.push(Frame {
                    node_id: reference.node_id.clone(),
                    origin: Some(reference),
                    level: frame.level + 1,
                });
            }
        }

        self.stats.log_summary();
        Ok(&self.stats)
    }

    fn browse(&mut self, node_id: &NodeId) -> Result<Option<Vec<NodeReference>>, WalkError> {
        self.stats.browse_count += 1;
        trace!(node_id = %node_id, "Browsing node");

        let result = self
            .space
            .browse(&BrowseDescription::all_forward(node_id.clone()));
        let references = absorb(result, "browse")?;
        match &references {
            Some(refs) => trace!(node_id = %node_id, count = refs.len(), "Browse returned"),
            None => {
                self.stats.browse_failures += 1;
                debug!(node_id = %node_id, "Subtree pruned after failed browse");
            }
        }
        Ok(references)
    }

    fn build_record(
        &mut self,
        reference: &NodeReference,
        depth: usize,
    ) -> Result<VariableRecord, WalkError> {
        let node_id = &reference.node_id;

        let data_type = absorb(
            self.space
                .read_data_type(node_id)
                .and_then(|data_type| self.space.read_browse_name(&data_type)),
            "read_data_type",
        )?;
        if data_type.is_none() {
            self.stats.data_type_failures += 1;
        }

        let value = absorb(self.space.read_value(node_id), "read_value")?.map(|variant| {
            if !variant.is_supported() {
                self.stats.unsupported_values += 1;
                debug!(
                    node_id = %node_id,
                    type_name = variant.type_name(),
                    "Unsupported value type"
                );
            }
            self.decoder.decode(&variant)
        });
        if value.is_none() {
            self.stats.value_failures += 1;
        }

        Ok(VariableRecord {
            display_name: reference.display_name.clone(),
            node_id: node_id.clone(),
            node_class: reference.node_class,
            data_type,
            value,
            depth,
        })
    }
}

/// Keeps a node-local failure local: logs it and yields `None`. Connection
/// loss is passed up.
fn absorb<T>(result: OpcUaResult<T>, context: &str) -> Result<Option<T>, WalkError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.aborts_traversal() => Err(WalkError::Aborted(error)),
        Err(error) => {
            error.log(context);
            Ok(None)
        }
    }
}

/// Walks from `start` with default options, sharing `visited` with the caller.
///
/// Returns the records in pre-order. A start node already in `visited`
/// yields no records.
pub fn walk<A: AddressSpace + ?Sized>(
    space: &A,
    start: &NodeId,
    visited: &mut VisitedSet,
    depth: usize,
) -> Result<Vec<VariableRecord>, WalkError> {
    let mut records = Vec::new();
    let mut walker = AddressSpaceWalker::new(space).with_visited(std::mem::take(visited));
    let result = walker.run_at(start, depth, &mut records).map(|_| ());
    *visited = walker.into_visited();
    result.map(|()| records)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::TaggedVariant;
    use std::collections::HashMap;

    /// Adjacency-list graph; every Variable reads as `Int32(1)` of type `Int32`.
    #[derive(Default)]
    struct Graph {
        edges: HashMap<NodeId, Vec<NodeReference>>,
    }

    impl Graph {
        fn edge(mut self, from: &NodeId, to: NodeReference) -> Self {
            self.edges.entry(from.clone()).or_default().push(to);
            self
        }
    }

    impl AddressSpace for Graph {
        fn browse(&self, description: &BrowseDescription) -> OpcUaResult<Vec<NodeReference>> {
            Ok(self.edges.get(&description.node_id).cloned().unwrap_or_default())
        }

        fn read_value(&self, _node_id: &NodeId) -> OpcUaResult<TaggedVariant> {
            Ok(TaggedVariant::Int32(1))
        }

        fn read_data_type(&self, _node_id: &NodeId) -> OpcUaResult<NodeId> {
            Ok(NodeId::numeric(0, 6))
        }

        fn read_browse_name(&self, _node_id: &NodeId) -> OpcUaResult<String> {
            Ok("Int32".to_string())
        }
    }

    fn var(ns: u16, id: u32) -> NodeReference {
        NodeReference::new(NodeId::numeric(ns, id), NodeClass::Variable, format!("V{}", id))
    }

    fn obj(ns: u16, id: u32) -> NodeReference {
        NodeReference::new(NodeId::numeric(ns, id), NodeClass::Object, format!("O{}", id))
    }

    #[test]
    fn test_visited_set() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.insert(NodeId::numeric(1, 1)));
        assert!(!visited.insert(NodeId::numeric(1, 1)));
        assert!(visited.insert(NodeId::string(1, "1")));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_self_loop_terminates() {
        let root = NodeId::numeric(1, 1);
        let graph = Graph::default().edge(&root, obj(1, 1)).edge(&root, var(1, 2));

        let mut visited = VisitedSet::new();
        let records = walk(&graph, &root, &mut visited, 0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node_id, NodeId::numeric(1, 2));
        assert_eq!(records[0].data_type.as_deref(), Some("Int32"));
        assert_eq!(records[0].value.as_deref(), Some("1"));
    }

    #[test]
    fn test_start_already_visited() {
        let root = NodeId::numeric(1, 1);
        let graph = Graph::default().edge(&root, var(1, 2));

        let mut visited = VisitedSet::new();
        visited.insert(root.clone());
        assert!(walk(&graph, &root, &mut visited, 0).unwrap().is_empty());
    }

    #[test]
    fn test_depths_follow_browse_level() {
        let root = NodeId::OBJECTS_FOLDER;
        let graph = Graph::default()
            .edge(&root, obj(2, 10))
            .edge(&NodeId::numeric(2, 10), var(2, 11))
            .edge(&root, var(2, 12));

        let mut visited = VisitedSet::new();
        let records = walk(&graph, &root, &mut visited, 0).unwrap();
        let depths: Vec<_> = records.iter().map(|r| (r.display_name.as_str(), r.depth)).collect();
        assert_eq!(depths, vec![("V11", 1), ("V12", 0)]);

        let mut visited = VisitedSet::new();
        let records = walk(&graph, &root, &mut visited, 3).unwrap();
        assert_eq!(records[0].depth, 4);
    }

    #[test]
    fn test_walk_options_limits() {
        let options = WalkOptions::default();
        assert!(options.expands(100));
        assert!(!options.is_full(1_000_000));

        let options = WalkOptions::default().with_max_depth(2).with_max_records(3);
        assert!(options.expands(1));
        assert!(!options.expands(2));
        assert!(!options.is_full(2));
        assert!(options.is_full(3));
    }

    #[test]
    fn test_walk_options_deserialize() {
        let options: WalkOptions =
            serde_json::from_str(r#"{"max_depth": 5, "system_namespace": "traverse_only"}"#)
                .unwrap();
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.max_records, 0);
        assert_eq!(options.system_namespace, SystemNamespacePolicy::TraverseOnly);
    }
}
