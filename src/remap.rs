//! Identity remapping
//!
//! Re-keys every node of a graph under a seed, together with every
//! identity reference stored in its properties. The result is isomorphic
//! to the input but lives in a disjoint identity namespace, which is how
//! independent instances of one template graph avoid colliding.
//!
//! Author: Moroya Sakamoto

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::graph::Graph;
use crate::identity::Identity;

impl Graph {
    /// Combine every node identity with `seed`, or revert that combination
    /// when `inverse` is set. References to identities outside the graph
    /// are left as they are.
    ///
    /// `remap_identities(seed, false)` followed by
    /// `remap_identities(seed, true)` restores the original graph.
    pub fn remap_identities(&mut self, seed: Identity, inverse: bool) {
        let map: HashMap<Identity, Identity> = self
            .nodes
            .keys()
            .map(|&old| {
                let new = if inverse {
                    old.revert_combination_with_seed(&seed)
                } else {
                    old.combine_with_seed(&seed)
                };
                (old, new)
            })
            .collect();

        let mut references = 0usize;
        let mut remapped = BTreeMap::new();
        for (old, mut node) in std::mem::take(&mut self.nodes) {
            node.identity = map.get(&old).copied().unwrap_or(old);
            for prop in node.properties_mut() {
                references += prop.value.remap_identities(&map);
            }
            remapped.insert(node.identity, node);
        }
        self.nodes = remapped;

        for identity in self.by_name.values_mut() {
            if let Some(&new) = map.get(identity) {
                *identity = new;
            }
        }

        debug!(nodes = map.len(), references, inverse, "identities remapped");
    }
}
