//! Graph algorithms for control flow analysis.
//!
//! All algorithms operate on a [`Relation`](crate::utils::sets::Relation): a sorted map
//! from each node to the sorted set of its successors. Ordered containers make every
//! result, and every traversal, independent of insertion order.
//!
//! # Available Algorithms
//!
//! ## Traversal
//!
//! - [`postorder`] - Postorder depth-first traversal
//! - [`reverse_postorder`] - Reverse postorder traversal (useful for data flow)
//! - [`reachable`] - Nodes reachable from a start node
//!
//! ## Dominator Analysis
//!
//! - [`compute_dominators`] - Iterative dominator sets
//! - [`compute_dominance_frontiers`] - Dominance frontiers for phi placement
//! - [`dominator_tree`] - Immediate dominance as a parent → children relation
//! - [`immediate_dominators`] - Child → parent view of a dominator tree
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | Postorder / RPO | O((V + E) log V) | Iteration order for data flow |
//! | Dominators | O(V² · d) | SSA construction, loop analysis |
//! | Frontiers | O(V · E) | Phi placement |
//! | Dominator tree | O(V³) worst case | Scoped renaming |
//!
//! # Examples
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use bril_ssa::utils::{graph::algorithms, sets::{invert, Relation}};
//!
//! let mut successors: Relation<&str> = Relation::new();
//! successors.insert("entry", ["body"].into());
//! successors.insert("body", ["body", "exit"].into());
//! successors.insert("exit", [].into());
//! let predecessors = invert(&successors);
//!
//! let nodes = ["entry", "body", "exit"];
//! let dom = algorithms::compute_dominators(&nodes, &successors, &predecessors, &"entry");
//! let tree = algorithms::dominator_tree(&dom);
//!
//! assert_eq!(tree["body"], BTreeSet::from(["exit"]));
//! ```

mod dominator_tree;
mod dominators;
mod traversal;

pub use dominator_tree::{dominator_tree, immediate_dominators};
pub use dominators::{compute_dominance_frontiers, compute_dominators};
pub use traversal::{postorder, reachable, reverse_postorder};
