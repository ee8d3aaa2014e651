//! 3-way diff merge
//!
//! Combines two diffs taken against the same base graph into one. Node
//! removals and additions are unioned; property changes touched by both
//! sides are reconciled, merging arrays against the base graph's current
//! value and otherwise letting rhs win. Conflicts are resolved, never
//! reported.
//!
//! Author: Moroya Sakamoto

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::array_merge::merge_arrays;
use crate::diff::DiffOp;
use crate::graph::Graph;
use crate::identity::Identity;
use crate::value::Value;

/// Last change each side made to one property
#[derive(Default)]
struct PropertyChange<'a> {
    lhs: Option<&'a Value>,
    rhs: Option<&'a Value>,
}

/// Merge diffs from two branches
///
/// `lhs` and `rhs` must both be diffs against `base`. Output order is lhs
/// node removals/additions (in lhs order), then the rhs ones not already
/// covered, then property changes sorted by node and property name.
pub fn merge_diffs(base: &Graph, lhs: &[DiffOp], rhs: &[DiffOp]) -> Vec<DiffOp> {
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    let mut removed: HashSet<Identity> = HashSet::new();
    let mut added: HashMap<Identity, usize> = HashMap::new();
    let mut changes: BTreeMap<(Identity, &str), PropertyChange<'_>> = BTreeMap::new();

    for op in lhs {
        match op {
            DiffOp::NodeRemoved { node, .. } => {
                removed.insert(*node);
                out.push(op.clone());
            }
            DiffOp::NodeAdded { node, .. } => {
                added.insert(*node, out.len());
                out.push(op.clone());
            }
            DiffOp::PropertyChanged {
                node,
                property,
                value,
            } => {
                changes.entry((*node, property.as_str())).or_default().lhs = Some(value);
            }
        }
    }

    for op in rhs {
        match op {
            DiffOp::NodeRemoved { node, .. } => {
                if removed.insert(*node) {
                    out.push(op.clone());
                }
            }
            DiffOp::NodeAdded {
                node,
                type_name,
                display_name,
            } => match added.get(node) {
                Some(&pos) => {
                    // keep lhs position, take rhs type and name
                    if let DiffOp::NodeAdded {
                        type_name: lhs_type,
                        display_name: lhs_name,
                        ..
                    } = &mut out[pos]
                    {
                        lhs_type.clone_from(type_name);
                        lhs_name.clone_from(display_name);
                    }
                }
                None => {
                    added.insert(*node, out.len());
                    out.push(op.clone());
                }
            },
            DiffOp::PropertyChanged {
                node,
                property,
                value,
            } => {
                changes.entry((*node, property.as_str())).or_default().rhs = Some(value);
            }
        }
    }

    let mut conflicts = 0usize;
    for ((node, property), change) in changes {
        let value = match (change.lhs, change.rhs) {
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (Some(left), Some(right)) => {
                conflicts += 1;
                resolve_conflict(base, node, property, left, right)
            }
            (None, None) => continue,
        };
        out.push(DiffOp::PropertyChanged {
            node,
            property: String::from(property),
            value,
        });
    }

    debug!(
        lhs = lhs.len(),
        rhs = rhs.len(),
        merged = out.len(),
        conflicts,
        "diffs merged"
    );
    out
}

/// Both sides changed the property: arrays are merged three-way against
/// the base graph's current value, anything else goes to rhs.
fn resolve_conflict(
    base: &Graph,
    node: Identity,
    property: &str,
    left: &Value,
    right: &Value,
) -> Value {
    let (Value::Array(left_items), Value::Array(right_items)) = (left, right) else {
        return right.clone();
    };
    match base.get_node(node).and_then(|n| n.value_of(property)) {
        Some(Value::Array(base_items)) => {
            trace!(%node, property, "three-way array merge");
            Value::Array(merge_arrays(base_items, left_items, right_items))
        }
        _ => right.clone(),
    }
}
