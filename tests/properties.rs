//! Property tests over randomly generated graphs

use std::collections::{BTreeMap, BTreeSet};

use abstract_graph::{apply_diff, diff_graphs, merge_diffs, Graph, Identity, Value};
use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;

type Props = BTreeMap<String, Value>;

#[derive(Debug, Clone)]
struct NodeSpec {
    type_name: String,
    display_name: Option<String>,
    props: Props,
}

type GraphSpec = BTreeMap<u128, NodeSpec>;

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Absent),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(Value::String),
        (0u128..8).prop_map(|n| Value::Identity(Identity::from_u128(n))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| vec(inner, 0..4).prop_map(Value::Array))
}

fn props_strategy() -> impl Strategy<Value = Props> {
    btree_map("[a-e]", value_strategy(), 0..4)
}

fn node_strategy() -> impl Strategy<Value = NodeSpec> {
    (
        prop_oneof![Just("Mesh"), Just("Light"), Just("Group")],
        proptest::option::of("[a-z]{1,4}"),
        props_strategy(),
    )
        .prop_map(|(type_name, display_name, props)| NodeSpec {
            type_name: String::from(type_name),
            display_name,
            props,
        })
}

fn graph_strategy() -> impl Strategy<Value = GraphSpec> {
    btree_map(0u128..8, node_strategy(), 0..6)
}

fn build(spec: &GraphSpec) -> Graph {
    let mut graph = Graph::new();
    for (&n, node) in spec {
        let mut target = graph
            .add_node(Identity::from_u128(n), &node.type_name, node.display_name.as_deref())
            .unwrap();
        for (name, value) in &node.props {
            target.add_property(name, value.clone());
        }
    }
    graph
}

/// Head derived from base by adding nodes and properties, changing values
/// and dropping whole nodes. Properties are never removed.
fn additive_head(base: &GraphSpec, edits: &BTreeMap<u128, Props>, drops: &BTreeSet<u128>) -> GraphSpec {
    let mut head = base.clone();
    for (&n, props) in edits {
        match head.get_mut(&n) {
            Some(node) => node.props.extend(props.clone()),
            None => {
                head.insert(
                    n,
                    NodeSpec {
                        type_name: String::from("New"),
                        display_name: None,
                        props: props.clone(),
                    },
                );
            }
        }
    }
    for n in drops {
        if !edits.contains_key(n) {
            head.remove(n);
        }
    }
    head
}

fn head_inputs() -> impl Strategy<Value = (GraphSpec, BTreeMap<u128, Props>, BTreeSet<u128>)> {
    (
        graph_strategy(),
        btree_map(0u128..10, props_strategy(), 0..5),
        btree_set(0u128..8, 0..3),
    )
}

proptest! {
    #[test]
    fn prop_diff_with_self_is_empty(spec in graph_strategy()) {
        let graph = build(&spec);
        prop_assert!(diff_graphs(&graph, &graph).is_empty());
        prop_assert!(diff_graphs(&graph, &graph.clone()).is_empty());
    }

    #[test]
    fn prop_additive_diff_apply_round_trip((base_spec, edits, drops) in head_inputs()) {
        let base = build(&base_spec);
        let head = build(&additive_head(&base_spec, &edits, &drops));

        let ops = diff_graphs(&base, &head);
        let mut patched = base.clone();
        apply_diff(&mut patched, &ops).unwrap();
        prop_assert_eq!(&patched, &head);
    }

    #[test]
    fn prop_remap_round_trip(spec in graph_strategy(), seed in any::<u128>()) {
        let original = build(&spec);
        let mut graph = build(&spec);
        let seed = Identity::from_u128(seed);
        graph.remap_identities(seed, false);
        graph.remap_identities(seed, true);
        prop_assert_eq!(&graph, &original);
    }

    #[test]
    fn prop_merge_of_equal_diffs_is_equivalent((base_spec, edits, drops) in head_inputs()) {
        let base = build(&base_spec);
        let head = build(&additive_head(&base_spec, &edits, &drops));
        let ops = diff_graphs(&base, &head);
        let merged = merge_diffs(&base, &ops, &ops);

        let mut via_diff = base.clone();
        apply_diff(&mut via_diff, &ops).unwrap();
        let mut via_merge = base.clone();
        apply_diff(&mut via_merge, &merged).unwrap();
        prop_assert_eq!(&via_merge, &via_diff);
    }

    #[test]
    fn prop_merge_with_empty_side_keeps_other((base_spec, edits, drops) in head_inputs()) {
        let base = build(&base_spec);
        let head = build(&additive_head(&base_spec, &edits, &drops));
        let ops = diff_graphs(&base, &head);

        for merged in [merge_diffs(&base, &ops, &[]), merge_diffs(&base, &[], &ops)] {
            let mut patched = base.clone();
            apply_diff(&mut patched, &merged).unwrap();
            prop_assert_eq!(&patched, &head);
        }
    }
}
