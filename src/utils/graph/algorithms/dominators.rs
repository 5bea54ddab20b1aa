//! Dominator and dominance frontier computation.
//!
//! # Theory
//!
//! A node `d` **dominates** a node `n` if every path from the entry node to `n`
//! must pass through `d`. Every node dominates itself; `d` **strictly** dominates
//! `n` if it dominates `n` and `d ≠ n`.
//!
//! The **dominance frontier** of `d` is the set of nodes where `d`'s dominance
//! ends: nodes `m` such that `d` dominates a predecessor of `m` but does not
//! strictly dominate `m`. These are the join points where φ-functions are needed
//! during SSA construction.
//!
//! # Algorithm
//!
//! Dominators are computed with the classic iterative data flow formulation:
//!
//! ```text
//! dom(entry) = {entry}
//! dom(n)     = {n} ∪ ⋂ { dom(p) | p ∈ preds(n) }
//! ```
//!
//! starting from "every node dominates every node" and sweeping the nodes in
//! reverse postorder until nothing changes. Reverse postorder makes the sweep
//! converge in a handful of passes for reducible graphs.
//!
//! Nodes unreachable from the entry are never visited and keep the initial
//! "all nodes" set.

use std::collections::BTreeSet;

use tracing::trace;

use crate::utils::{
    graph::algorithms::reverse_postorder,
    sets::{equal, filter, intersect, invert, Relation},
};

/// Computes, for every node, the set of nodes that dominate it.
///
/// # Arguments
///
/// * `nodes` - All nodes of the graph, reachable or not
/// * `successors` - The successor relation
/// * `predecessors` - The predecessor relation (inverse of `successors`)
/// * `entry` - The entry node
///
/// # Returns
///
/// A relation mapping each node to its dominators (including itself).
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::utils::{
///     graph::algorithms::compute_dominators,
///     sets::{invert, Relation},
/// };
///
/// // Diamond CFG:
/// //      entry
/// //      /   \
/// //     a     b
/// //      \   /
/// //       exit
/// let mut successors: Relation<&str> = Relation::new();
/// successors.insert("entry", ["a", "b"].into());
/// successors.insert("a", ["exit"].into());
/// successors.insert("b", ["exit"].into());
/// successors.insert("exit", [].into());
/// let predecessors = invert(&successors);
///
/// let nodes = ["entry", "a", "b", "exit"];
/// let dom = compute_dominators(&nodes, &successors, &predecessors, &"entry");
///
/// assert_eq!(dom["exit"], BTreeSet::from(["entry", "exit"]));
/// assert_eq!(dom["a"], BTreeSet::from(["entry", "a"]));
/// ```
pub fn compute_dominators<K>(
    nodes: &[K],
    successors: &Relation<K>,
    predecessors: &Relation<K>,
    entry: &K,
) -> Relation<K>
where
    K: Ord + Clone,
{
    let all: BTreeSet<K> = nodes.iter().cloned().collect();
    let mut dom: Relation<K> = nodes
        .iter()
        .map(|node| (node.clone(), all.clone()))
        .collect();
    if !all.contains(entry) {
        return dom;
    }
    dom.insert(entry.clone(), BTreeSet::from([entry.clone()]));

    let order = reverse_postorder(successors, entry);
    let mut iterations = 0usize;
    loop {
        iterations += 1;
        let mut changed = false;
        for node in order.iter().filter(|node| *node != entry) {
            let mut new_dom = intersect(
                predecessors
                    .get(node)
                    .into_iter()
                    .flatten()
                    .filter_map(|pred| dom.get(pred)),
            );
            new_dom.insert(node.clone());

            let unchanged = dom.get(node).is_some_and(|old| equal(old, &new_dom));
            if !unchanged {
                dom.insert(node.clone(), new_dom);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    trace!(
        nodes = nodes.len(),
        reachable = order.len(),
        iterations,
        "dominators converged"
    );
    dom
}

/// Computes the dominance frontier of every node from its dominators.
///
/// For each node `d`, the frontier is taken from the successors of all nodes `d`
/// dominates, keeping those that `d` does not strictly dominate (a successor that
/// is `d` itself, i.e. a loop back to `d`, stays in the frontier).
///
/// # Arguments
///
/// * `dominators` - The relation produced by [`compute_dominators`]
/// * `successors` - The successor relation of the same graph
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::utils::{
///     graph::algorithms::{compute_dominance_frontiers, compute_dominators},
///     sets::{invert, Relation},
/// };
///
/// let mut successors: Relation<&str> = Relation::new();
/// successors.insert("entry", ["left", "right"].into());
/// successors.insert("left", ["join"].into());
/// successors.insert("right", ["join"].into());
/// successors.insert("join", [].into());
/// let predecessors = invert(&successors);
///
/// let nodes = ["entry", "left", "right", "join"];
/// let dom = compute_dominators(&nodes, &successors, &predecessors, &"entry");
/// let frontiers = compute_dominance_frontiers(&dom, &successors);
///
/// assert_eq!(frontiers["left"], BTreeSet::from(["join"]));
/// assert_eq!(frontiers["right"], BTreeSet::from(["join"]));
/// assert!(frontiers["entry"].is_empty());
/// ```
pub fn compute_dominance_frontiers<K>(dominators: &Relation<K>, successors: &Relation<K>) -> Relation<K>
where
    K: Ord + Clone,
{
    let dominates = invert(dominators);

    dominators
        .keys()
        .map(|node| {
            let dominated = dominates.get(node);
            let dominated_succs: BTreeSet<K> = dominated
                .into_iter()
                .flatten()
                .filter_map(|d| successors.get(d))
                .flatten()
                .cloned()
                .collect();
            let frontier = filter(&dominated_succs, |succ| {
                succ == node || !dominated.is_some_and(|set| set.contains(succ))
            });
            (node.clone(), frontier)
        })
        .collect()
}
