//! Phi placement at iterated dominance frontiers.
//!
//! A variable assigned in block `d` may reach a block `m` in the dominance frontier of `d`
//! together with a different version from another predecessor, so `m` needs a phi for it.
//! The phi is itself a new assignment, so the frontier of `m` needs one as well: placement
//! is the closure of the frontier over the definition sites.

use std::collections::BTreeSet;

use tracing::trace;

use crate::utils::sets::Relation;

/// Computes, for every block, the variables that need a phi at its head.
///
/// # Arguments
///
/// * `definitions` - Variable → blocks assigning it
/// * `frontiers` - Block → its dominance frontier
///
/// # Returns
///
/// Block → variables needing a phi. Every key of `frontiers` is present, mapped to the
/// empty set when the block needs no phis.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use bril_ssa::{analysis::ssa::place_phis, utils::sets::Relation};
///
/// let mut frontiers = Relation::new();
/// frontiers.insert("entry".to_string(), BTreeSet::new());
/// frontiers.insert("left".to_string(), BTreeSet::from(["join".to_string()]));
/// frontiers.insert("right".to_string(), BTreeSet::from(["join".to_string()]));
/// frontiers.insert("join".to_string(), BTreeSet::new());
///
/// let mut definitions = Relation::new();
/// definitions.insert("x".to_string(), BTreeSet::from(["left".to_string(), "right".to_string()]));
///
/// let phis = place_phis(&definitions, &frontiers);
/// assert_eq!(phis["join"], BTreeSet::from(["x".to_string()]));
/// assert!(phis["left"].is_empty());
/// ```
#[must_use]
pub fn place_phis(definitions: &Relation, frontiers: &Relation) -> Relation {
    let mut phis: Relation = frontiers
        .keys()
        .map(|block| (block.clone(), BTreeSet::new()))
        .collect();

    for (variable, sites) in definitions {
        let mut placed: BTreeSet<&String> = BTreeSet::new();
        let mut worklist: Vec<&String> = sites.iter().collect();

        while let Some(block) = worklist.pop() {
            for frontier_block in frontiers.get(block).into_iter().flatten() {
                if placed.insert(frontier_block) {
                    phis.entry(frontier_block.clone())
                        .or_default()
                        .insert(variable.clone());
                    // A phi is a definition too; its frontier needs phis as well.
                    worklist.push(frontier_block);
                }
            }
        }

        if !placed.is_empty() {
            trace!(variable = %variable, phis = placed.len(), "placed phis");
        }
    }

    phis
}
