//! Abstract object graph
//!
//! Don't diff bytes, diff the objects.
//!
//! Type-erased graph of identified nodes with named, typed properties, for
//! editor scenes, assets and reflected objects:
//! - Structural diff between two graph snapshots
//! - Patch application, best-effort per operation
//! - 3-way merge of two diffs against a shared base, including ordered-set
//!   and positional merges of array properties
//! - Deterministic, invertible identity remapping
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`array_merge`] | 3-way merge of array values (ordered sets and positional arrays) |
//! | [`diff`] | Diff engine and patch applier |
//! | [`error`] | Contract-violation errors |
//! | [`graph`] | Node storage indexed by identity and display name |
//! | [`identity`] | Opaque 128-bit node identities with seed combination |
//! | [`interner`] | Per-graph string interner |
//! | [`merge`] | 3-way merge of diffs |
//! | [`value`] | Recursive property value |
//!
//! Identity remapping lives on [`Graph::remap_identities`].
//!
//! # Feature flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for identities, values and diff ops |
//!
//! # Quick Start
//!
//! ```
//! use abstract_graph::{apply_diff, diff_graphs, Graph, Identity, Value};
//!
//! let base = Graph::new();
//!
//! let mut head = Graph::new();
//! head.add_node(Identity::from_u128(1), "Foo", None)
//!     .unwrap()
//!     .add_property("Count", 1);
//!
//! // NodeAdded followed by one PropertyChanged
//! let ops = diff_graphs(&base, &head);
//! assert_eq!(ops.len(), 2);
//!
//! let mut replay = Graph::new();
//! apply_diff(&mut replay, &ops).unwrap();
//! let node = replay.get_node(Identity::from_u128(1)).unwrap();
//! assert_eq!(node.value_of("Count"), Some(&Value::Int(1)));
//! ```
//!
//! Author: Moroya Sakamoto

pub mod array_merge;
pub mod diff;
pub mod error;
pub mod graph;
pub mod identity;
pub mod interner;
pub mod merge;
mod remap;
pub mod value;

pub use array_merge::merge_arrays;
pub use diff::{apply_diff, diff_graphs, ApplyStats, DiffOp, DiffOpKind};
pub use error::{GraphError, Result};
pub use graph::{Graph, Node, NodeMut, Property};
pub use identity::Identity;
pub use interner::{StringInterner, Symbol};
pub use merge::merge_diffs;
pub use value::{Value, ValueKind};
