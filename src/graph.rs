//! Object graph
//!
//! Flat, identity-keyed storage of typed nodes. Each node carries a type
//! name, an optional display name and an ordered list of named properties.
//! Nodes refer to each other only through [`Value::Identity`] tokens,
//! never through live references.
//!
//! Author: Moroya Sakamoto

use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;

use crate::error::{GraphError, Result};
use crate::identity::Identity;
use crate::interner::{StringInterner, Symbol};
use crate::value::Value;

/// Named property on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: Symbol,
    /// Current value
    pub value: Value,
}

impl Property {
    pub fn name(&self) -> &Symbol {
        &self.name
    }
}

/// Graph node
#[derive(Debug)]
pub struct Node {
    pub(crate) identity: Identity,
    type_name: Symbol,
    display_name: Option<Symbol>,
    properties: Vec<Property>,
}

impl Node {
    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn type_name(&self) -> &Symbol {
        &self.type_name
    }

    pub fn display_name(&self) -> Option<&Symbol> {
        self.display_name.as_ref()
    }

    /// Properties in insertion order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// First property called `name`
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| &*p.name == name)
    }

    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.find_property(name).map(|p| &p.value)
    }

    pub(crate) fn properties_mut(&mut self) -> &mut [Property] {
        &mut self.properties
    }
}

/// Property order is not significant for equality. Properties are compared
/// as a multiset of `(name, value)` pairs, so repeated names count.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.type_name == other.type_name
            && self.display_name == other.display_name
            && same_properties(&self.properties, &other.properties)
    }
}

fn same_properties(a: &[Property], b: &[Property]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut claimed = vec![false; b.len()];
    a.iter().all(|p| match (0..b.len()).find(|&i| !claimed[i] && b[i] == *p) {
        Some(i) => {
            claimed[i] = true;
            true
        }
        None => false,
    })
}

/// Mutable access to a node, borrowing the owning graph's interner so
/// property names stay canonical.
pub struct NodeMut<'g> {
    node: &'g mut Node,
    strings: &'g mut StringInterner,
}

impl<'g> NodeMut<'g> {
    /// Append a property. Duplicate names are not checked.
    pub fn add_property(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let name = self.strings.register(name);
        self.node.properties.push(Property {
            name,
            value: value.into(),
        });
        self
    }

    /// Overwrite an existing property
    ///
    /// # Errors
    /// [`GraphError::UnknownProperty`] if the node has no property `name`.
    pub fn change_property(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        match self.find_property_mut(name) {
            Some(prop) => {
                prop.value = value.into();
                Ok(())
            }
            None => Err(GraphError::UnknownProperty {
                node: self.node.identity,
                property: String::from(name),
            }),
        }
    }

    /// Overwrite `name` if present, append it otherwise
    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        match self.find_property_mut(name) {
            Some(prop) => prop.value = value,
            None => {
                self.add_property(name, value);
            }
        }
        self
    }

    /// Remove the first property called `name`, keeping the order of the
    /// rest. Returns its value, or `None` if there was no such property.
    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        let pos = self.node.properties.iter().position(|p| &*p.name == name)?;
        Some(self.node.properties.remove(pos).value)
    }

    pub fn find_property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.node.properties.iter_mut().find(|p| &*p.name == name)
    }

    pub fn value_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.find_property_mut(name).map(|p| &mut p.value)
    }
}

impl Deref for NodeMut<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

/// Object graph: owns every node, indexed by identity and by display name
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) nodes: BTreeMap<Identity, Node>,
    pub(crate) by_name: HashMap<Symbol, Identity>,
    strings: StringInterner,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all nodes and all interned strings
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_name.clear();
        self.strings.clear();
    }

    pub fn register_string(&mut self, text: &str) -> Symbol {
        self.strings.register(text)
    }

    pub fn strings(&self) -> &StringInterner {
        &self.strings
    }

    /// Add a node
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if `identity` is already present. The
    /// graph is left untouched in that case.
    pub fn add_node(
        &mut self,
        identity: Identity,
        type_name: &str,
        display_name: Option<&str>,
    ) -> Result<NodeMut<'_>> {
        if self.nodes.contains_key(&identity) {
            return Err(GraphError::DuplicateNode(identity));
        }
        let type_name = self.strings.register(type_name);
        let display_name = display_name.map(|n| self.strings.register(n));
        Ok(self.insert_node(Node {
            identity,
            type_name,
            display_name,
            properties: Vec::new(),
        }))
    }

    /// Remove a node, returning it. No-op if absent.
    pub fn remove_node(&mut self, identity: Identity) -> Option<Node> {
        let node = self.nodes.remove(&identity)?;
        if let Some(name) = &node.display_name {
            if self.by_name.get(name) == Some(&identity) {
                self.by_name.remove(name);
            }
        }
        Some(node)
    }

    pub fn get_node(&self, identity: Identity) -> Option<&Node> {
        self.nodes.get(&identity)
    }

    pub fn get_node_mut(&mut self, identity: Identity) -> Option<NodeMut<'_>> {
        let node = self.nodes.get_mut(&identity)?;
        Some(NodeMut {
            node,
            strings: &mut self.strings,
        })
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).and_then(|id| self.nodes.get(id))
    }

    pub fn get_node_by_name_mut(&mut self, name: &str) -> Option<NodeMut<'_>> {
        let identity = *self.by_name.get(name)?;
        self.get_node_mut(identity)
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.nodes.contains_key(&identity)
    }

    /// All nodes in identity order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shallow copy of a node from another graph: identity, type, name and
    /// flat property list, with every string re-interned here. Nodes the
    /// copied properties refer to are not copied.
    ///
    /// # Errors
    /// [`GraphError::DuplicateNode`] if the identity already exists here.
    pub fn copy_node_into(&mut self, foreign: &Node) -> Result<NodeMut<'_>> {
        if self.nodes.contains_key(&foreign.identity) {
            return Err(GraphError::DuplicateNode(foreign.identity));
        }
        Ok(self.insert_copy(foreign))
    }

    fn insert_copy(&mut self, foreign: &Node) -> NodeMut<'_> {
        let node = Node {
            identity: foreign.identity,
            type_name: self.strings.register(&foreign.type_name),
            display_name: foreign
                .display_name
                .as_ref()
                .map(|n| self.strings.register(n)),
            properties: foreign
                .properties
                .iter()
                .map(|p| Property {
                    name: self.strings.register(&p.name),
                    value: p.value.clone(),
                })
                .collect(),
        };
        self.insert_node(node)
    }

    fn insert_node(&mut self, node: Node) -> NodeMut<'_> {
        let identity = node.identity;
        if let Some(name) = &node.display_name {
            self.by_name.insert(name.clone(), identity);
        }
        let node = self.nodes.entry(identity).or_insert(node);
        NodeMut {
            node,
            strings: &mut self.strings,
        }
    }
}

/// Deep copy with a fresh interner; no string storage is shared with the
/// source graph.
impl Clone for Graph {
    fn clone(&self) -> Self {
        let mut graph = Graph::new();
        for node in self.nodes.values() {
            graph.insert_copy(node);
        }
        // shared display names must resolve to the same owner as here
        graph.by_name = self
            .by_name
            .iter()
            .map(|(name, &identity)| (graph.strings.register(name), identity))
            .collect();
        graph
    }
}

/// Structural equality: same identities, and per identity equal nodes
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}
