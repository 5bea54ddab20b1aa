//! Dominator tree construction from a full dominance relation.
//!
//! The immediate dominator of `n` is the unique strict dominator of `n` that every other
//! strict dominator of `n` also dominates. Rather than searching for it per node, the tree
//! is derived with relation algebra:
//!
//! ```text
//! sdom      = dom \ identity                 (strict dominance)
//! sdom⁻¹    = invert(sdom)                   (parent → strictly dominated)
//! tree      = sdom⁻¹ \ (sdom⁻¹ ∘ sdom⁻¹)     (drop anything two hops away)
//! ```
//!
//! A node strictly dominated through an intermediate dominator is reachable in two hops and
//! therefore not an immediate child.

use std::collections::BTreeSet;

use crate::utils::sets::{compose, invert, Relation};

/// Builds the dominator tree as a parent → children relation.
///
/// Every key of `dominators` is a key of the result; leaves map to the empty set.
/// The relation must only contain nodes reachable from the entry: an unreachable node
/// carries the "all nodes" dominator set and would be attached as a child of every node.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::utils::{graph::algorithms::dominator_tree, sets::Relation};
///
/// // entry -> a -> b
/// let mut dom: Relation<&str> = Relation::new();
/// dom.insert("entry", ["entry"].into());
/// dom.insert("a", ["entry", "a"].into());
/// dom.insert("b", ["entry", "a", "b"].into());
///
/// let tree = dominator_tree(&dom);
/// assert_eq!(tree["entry"], BTreeSet::from(["a"]));
/// assert_eq!(tree["a"], BTreeSet::from(["b"]));
/// assert!(tree["b"].is_empty());
/// ```
pub fn dominator_tree<K>(dominators: &Relation<K>) -> Relation<K>
where
    K: Ord + Clone,
{
    let strict: Relation<K> = dominators
        .iter()
        .map(|(node, doms)| {
            let mut doms = doms.clone();
            doms.remove(node);
            (node.clone(), doms)
        })
        .collect();

    let strictly_dominates = invert(&strict);
    let two_hops = compose(&strictly_dominates, &strictly_dominates);

    strictly_dominates
        .iter()
        .map(|(parent, dominated)| {
            let children: BTreeSet<K> = match two_hops.get(parent) {
                Some(indirect) => dominated.difference(indirect).cloned().collect(),
                None => dominated.clone(),
            };
            (parent.clone(), children)
        })
        .collect()
}

/// Returns the immediate dominator of every node that has one, inverting a tree built by
/// [`dominator_tree`].
pub fn immediate_dominators<K>(tree: &Relation<K>) -> std::collections::BTreeMap<K, K>
where
    K: Ord + Clone,
{
    tree.iter()
        .flat_map(|(parent, children)| {
            children
                .iter()
                .map(move |child| (child.clone(), parent.clone()))
        })
        .collect()
}
