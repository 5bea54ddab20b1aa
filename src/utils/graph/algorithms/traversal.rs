//! Graph traversal algorithms.
//!
//! Traversals operate on a successor [`Relation`]: a map from each node to the set of
//! nodes it has edges to. Successors are visited in the relation's (sorted) order, which
//! makes every traversal deterministic.
//!
//! # Algorithms
//!
//! - [`postorder`] - Depth-first search with post-order visitation
//! - [`reverse_postorder`] - Reverse post-order (useful for forward data flow)
//! - [`reachable`] - The set of nodes reachable from a start node

use std::collections::BTreeSet;

use crate::utils::sets::Relation;

/// Computes the postorder traversal of nodes reachable from the start.
///
/// In postorder, a node is visited after all its descendants have been visited.
/// Nodes that appear only as successors (and not as keys of the relation) are
/// visited as leaves.
///
/// # Arguments
///
/// * `successors` - The successor relation to traverse
/// * `start` - The starting node for traversal
///
/// # Returns
///
/// A vector of nodes in postorder. Empty if `start` is not a key of the relation.
///
/// # Complexity
///
/// - Time: O((V + E) log V)
/// - Space: O(V)
///
/// # Examples
///
/// ```rust
/// use bril_ssa::utils::{graph::algorithms::postorder, sets::Relation};
///
/// let mut successors: Relation<&str> = Relation::new();
/// successors.insert("a", ["b"].into());
/// successors.insert("b", ["c"].into());
/// successors.insert("c", [].into());
///
/// // c comes before b, b comes before a
/// assert_eq!(postorder(&successors, &"a"), vec!["c", "b", "a"]);
/// ```
#[allow(clippy::items_after_statements)]
pub fn postorder<K>(successors: &Relation<K>, start: &K) -> Vec<K>
where
    K: Ord + Clone,
{
    if !successors.contains_key(start) {
        return Vec::new();
    }

    let mut visited: BTreeSet<K> = BTreeSet::new();
    let mut result = Vec::with_capacity(successors.len());

    // Iterative postorder using explicit stack with state
    #[derive(Clone, Copy)]
    enum State {
        Enter,
        Exit,
    }

    let mut stack = vec![(start.clone(), State::Enter)];

    while let Some((node, state)) = stack.pop() {
        match state {
            State::Enter => {
                if !visited.insert(node.clone()) {
                    continue;
                }

                let children = successors.get(&node);
                stack.push((node, State::Exit));

                // Push children in reverse order so they're processed in order
                for succ in children.into_iter().flatten().rev() {
                    if !visited.contains(succ) {
                        stack.push((succ.clone(), State::Enter));
                    }
                }
            }
            State::Exit => {
                result.push(node);
            }
        }
    }

    result
}

/// Computes the reverse postorder traversal of nodes reachable from the start.
///
/// Reverse postorder (RPO) visits a node before any of its successors (ignoring
/// back edges). Iterating a forward data flow problem in RPO lets most facts
/// propagate in a single pass, so fixpoints converge in few iterations.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::utils::{graph::algorithms::reverse_postorder, sets::Relation};
///
/// let mut successors: Relation<&str> = Relation::new();
/// successors.insert("a", ["b", "c"].into());
/// successors.insert("b", ["d"].into());
/// successors.insert("c", ["d"].into());
/// successors.insert("d", [].into());
///
/// let order = reverse_postorder(&successors, &"a");
/// assert_eq!(order.first(), Some(&"a"));
/// assert_eq!(order.last(), Some(&"d"));
/// ```
pub fn reverse_postorder<K>(successors: &Relation<K>, start: &K) -> Vec<K>
where
    K: Ord + Clone,
{
    let mut result = postorder(successors, start);
    result.reverse();
    result
}

/// Returns every node reachable from `start`, including `start` itself.
pub fn reachable<K>(successors: &Relation<K>, start: &K) -> BTreeSet<K>
where
    K: Ord + Clone,
{
    postorder(successors, start).into_iter().collect()
}
