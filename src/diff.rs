//! Graph diff engine
//!
//! Computes the operations that turn a base graph into a head graph, and
//! replays such operations onto a graph.
//!
//! Removed properties are not represented: a property present in base and
//! missing from head produces no operation.
//!
//! Author: Moroya Sakamoto

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::Graph;
use crate::identity::Identity;
use crate::value::Value;

/// Diff operation on graph nodes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffOp {
    /// A node that exists in head only
    NodeAdded {
        node: Identity,
        type_name: String,
        display_name: Option<String>,
    },
    /// A node that exists in base only
    NodeRemoved {
        node: Identity,
        type_name: String,
        display_name: Option<String>,
    },
    /// Property set to a new value (or added)
    PropertyChanged {
        node: Identity,
        property: String,
        value: Value,
    },
}

/// Kind of a [`DiffOp`], shared by diff, apply and merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffOpKind {
    NodeAdded,
    NodeRemoved,
    PropertyChanged,
}

impl DiffOp {
    /// Node the operation targets
    pub fn node(&self) -> Identity {
        match self {
            DiffOp::NodeAdded { node, .. }
            | DiffOp::NodeRemoved { node, .. }
            | DiffOp::PropertyChanged { node, .. } => *node,
        }
    }

    pub fn kind(&self) -> DiffOpKind {
        match self {
            DiffOp::NodeAdded { .. } => DiffOpKind::NodeAdded,
            DiffOp::NodeRemoved { .. } => DiffOpKind::NodeRemoved,
            DiffOp::PropertyChanged { .. } => DiffOpKind::PropertyChanged,
        }
    }
}

/// Compute diff operations to transform `base` into `head`
///
/// 1. Nodes only in base -> NodeRemoved
/// 2. Nodes only in head -> NodeAdded, followed by one PropertyChanged per property
/// 3. Nodes in both -> PropertyChanged for each head property that is new or differs
///
/// Nodes are visited in identity order, so the result is deterministic.
pub fn diff_graphs(base: &Graph, head: &Graph) -> Vec<DiffOp> {
    let mut ops = Vec::new();

    for node in base.nodes() {
        if !head.contains(node.identity()) {
            ops.push(DiffOp::NodeRemoved {
                node: node.identity(),
                type_name: node.type_name().to_string(),
                display_name: node.display_name().map(|n| n.to_string()),
            });
        }
    }
    let removed = ops.len();

    for node in head.nodes() {
        if base.contains(node.identity()) {
            continue;
        }
        ops.push(DiffOp::NodeAdded {
            node: node.identity(),
            type_name: node.type_name().to_string(),
            display_name: node.display_name().map(|n| n.to_string()),
        });
        for prop in node.properties() {
            ops.push(DiffOp::PropertyChanged {
                node: node.identity(),
                property: prop.name().to_string(),
                value: prop.value.clone(),
            });
        }
    }
    let added = ops.len() - removed;

    for node in head.nodes() {
        let Some(base_node) = base.get_node(node.identity()) else {
            continue;
        };
        for prop in node.properties() {
            if base_node.value_of(prop.name()) != Some(&prop.value) {
                ops.push(DiffOp::PropertyChanged {
                    node: node.identity(),
                    property: prop.name().to_string(),
                    value: prop.value.clone(),
                });
            }
        }
    }

    debug!(
        removed,
        added,
        changed = ops.len() - removed - added,
        "graph diff computed"
    );
    ops
}

/// Outcome counters of [`apply_diff`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub nodes_added: usize,
    pub nodes_removed: usize,
    pub properties_set: usize,
    /// Removals of missing nodes and changes on missing nodes
    pub skipped: usize,
}

/// Apply diff operations to a graph
///
/// Each operation is applied independently: removing a missing node or
/// changing a property on a missing node is skipped. Properties are
/// overwritten when present and appended otherwise.
///
/// # Errors
/// [`GraphError::DuplicateNode`](crate::GraphError::DuplicateNode) if a
/// `NodeAdded` targets an identity that already exists. Operations before
/// it stay applied; the rest are not.
pub fn apply_diff(graph: &mut Graph, ops: &[DiffOp]) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();
    for op in ops {
        match op {
            DiffOp::NodeAdded {
                node,
                type_name,
                display_name,
            } => {
                graph.add_node(*node, type_name, display_name.as_deref())?;
                stats.nodes_added += 1;
            }
            DiffOp::NodeRemoved { node, .. } => {
                if graph.remove_node(*node).is_some() {
                    stats.nodes_removed += 1;
                } else {
                    trace!(%node, "remove of missing node skipped");
                    stats.skipped += 1;
                }
            }
            DiffOp::PropertyChanged {
                node,
                property,
                value,
            } => match graph.get_node_mut(*node) {
                Some(mut target) => {
                    target.set_property(property, value.clone());
                    stats.properties_set += 1;
                }
                None => {
                    trace!(%node, property = property.as_str(), "change on missing node skipped");
                    stats.skipped += 1;
                }
            },
        }
    }
    debug!(
        added = stats.nodes_added,
        removed = stats.nodes_removed,
        set = stats.properties_set,
        skipped = stats.skipped,
        "diff applied"
    );
    Ok(stats)
}
