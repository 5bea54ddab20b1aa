//! Variable renaming over the dominator tree.
//!
//! Renaming walks the dominator tree from the entry with one version stack per original
//! variable. Every assignment pushes a fresh `name.N` version, every use reads the top of
//! its variable's stack, and every block records, for each phi in its successors, the
//! version that flows along that edge. Versions pushed inside a subtree are popped when the
//! walk leaves it, so sibling subtrees never see each other's assignments.
//!
//! The walk uses an explicit work stack; deep dominator trees do not grow the call stack.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::{
    analysis::cfg::Block,
    config::{SsaConfig, UndefinedPolicy},
    error::graph_error,
    utils::sets::Relation,
    Error, Result,
};

/// The phi destinations and operands produced by [`rename`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenameResult {
    /// Block → original variable → version assigned by the block's phi.
    pub phi_dests: BTreeMap<String, BTreeMap<String, String>>,
    /// Block → original variable → `(predecessor, version)` operands, in the order the
    /// predecessors were renamed.
    pub phi_args: BTreeMap<String, BTreeMap<String, Vec<(String, String)>>>,
}

/// A step of the dominator tree walk.
enum Visit {
    /// Rename the block, then its children.
    Enter(String),
    /// Leave a subtree, popping the versions its root pushed.
    Exit(Vec<String>),
}

/// Version stacks and counters of one renaming run.
struct Renamer<'a> {
    config: &'a SsaConfig,
    phis: &'a Relation,
    successors: &'a Relation,
    stacks: HashMap<String, Vec<String>>,
    counters: HashMap<String, usize>,
    result: RenameResult,
}

impl<'a> Renamer<'a> {
    fn new(
        config: &'a SsaConfig,
        phis: &'a Relation,
        successors: &'a Relation,
        params: &[String],
    ) -> Self {
        // Parameters are live on entry under their own names.
        let stacks = params
            .iter()
            .map(|param| (param.clone(), vec![param.clone()]))
            .collect();
        Self {
            config,
            phis,
            successors,
            stacks,
            counters: HashMap::new(),
            result: RenameResult::default(),
        }
    }

    /// Pushes and returns the next version of `variable`.
    fn push_fresh(&mut self, variable: &str) -> String {
        let counter = self.counters.entry(variable.to_string()).or_insert(0);
        let fresh = format!("{variable}.{counter}");
        *counter += 1;
        self.stacks
            .entry(variable.to_string())
            .or_default()
            .push(fresh.clone());
        fresh
    }

    fn current(&self, variable: &str) -> Option<&str> {
        self.stacks
            .get(variable)
            .and_then(|stack| stack.last())
            .map(String::as_str)
    }

    fn pop(&mut self, pushed: Vec<String>) {
        for variable in pushed {
            if let Some(stack) = self.stacks.get_mut(&variable) {
                stack.pop();
            }
        }
    }

    /// Renames one block and records the operands it supplies to successor phis.
    ///
    /// Returns the variables pushed, one entry per push.
    fn rename_block(&mut self, block: &mut Block) -> Result<Vec<String>> {
        let (phis, successors) = (self.phis, self.successors);
        let mut pushed = Vec::new();

        let mut dests = BTreeMap::new();
        for variable in phis.get(&block.name).into_iter().flatten() {
            dests.insert(variable.clone(), self.push_fresh(variable));
            pushed.push(variable.clone());
        }
        self.result.phi_dests.insert(block.name.clone(), dests);

        for instruction in &mut block.instrs {
            for arg in &mut instruction.args {
                // Names with no definition in scope (e.g. globals) stay as they are.
                if let Some(version) = self.current(arg) {
                    *arg = version.to_string();
                }
            }
            if let Some(dest) = &mut instruction.dest {
                let original = std::mem::take(dest);
                *dest = self.push_fresh(&original);
                pushed.push(original);
            }
        }

        for successor in successors.get(&block.name).into_iter().flatten() {
            for variable in phis.get(successor).into_iter().flatten() {
                let version = match (self.current(variable), self.config.undefined) {
                    (Some(version), _) => version.to_string(),
                    (None, UndefinedPolicy::Sentinel) => self.config.undefined_name.clone(),
                    (None, UndefinedPolicy::Error) => {
                        return Err(Error::UndefinedVariable {
                            variable: variable.clone(),
                            block: block.name.clone(),
                        });
                    }
                };
                self.result
                    .phi_args
                    .entry(successor.clone())
                    .or_default()
                    .entry(variable.clone())
                    .or_default()
                    .push((block.name.clone(), version));
            }
        }

        Ok(pushed)
    }
}

/// Renames every variable of the blocks reachable through `tree` into SSA versions.
///
/// Block bodies are rewritten in place; phi instructions are not inserted here (see
/// [`insert_phis`](crate::analysis::ssa::insert_phis)).
///
/// # Arguments
///
/// * `blocks` - The blocks to rewrite
/// * `phis` - Block → variables needing a phi, from [`place_phis`](crate::analysis::ssa::place_phis)
/// * `successors` - The successor relation
/// * `tree` - The dominator tree (parent → children); children are visited in name order
/// * `entry` - Root of the walk
/// * `params` - Function parameters, defined on entry under their own names
/// * `config` - Handling of phi operands without a reaching definition
///
/// # Errors
///
/// Returns [`Error::UndefinedVariable`] under [`UndefinedPolicy::Error`], and
/// [`Error::GraphError`] if the tree names a block that does not exist.
pub fn rename(
    blocks: &mut [Block],
    phis: &Relation,
    successors: &Relation,
    tree: &Relation,
    entry: &str,
    params: &[String],
    config: &SsaConfig,
) -> Result<RenameResult> {
    let positions: HashMap<String, usize> = blocks
        .iter()
        .enumerate()
        .map(|(position, block)| (block.name.clone(), position))
        .collect();

    let mut renamer = Renamer::new(config, phis, successors, params);
    let mut work = vec![Visit::Enter(entry.to_string())];

    while let Some(visit) = work.pop() {
        match visit {
            Visit::Enter(name) => {
                let block = positions
                    .get(&name)
                    .and_then(|&position| blocks.get_mut(position))
                    .ok_or_else(|| graph_error!("Dominator tree names unknown block '{}'", name))?;
                let pushed = renamer.rename_block(block)?;
                trace!(block = %name, versions = pushed.len(), "renamed block");

                work.push(Visit::Exit(pushed));
                // Reversed so the smallest child is popped first.
                for child in tree.get(&name).into_iter().flatten().rev() {
                    work.push(Visit::Enter(child.clone()));
                }
            }
            Visit::Exit(pushed) => renamer.pop(pushed),
        }
    }

    Ok(renamer.result)
}
