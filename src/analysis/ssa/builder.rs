//! SSA construction algorithm (Cytron et al.).
//!
//! This module implements the classic SSA construction algorithm from:
//!
//! > Cytron et al., "Efficiently Computing Static Single Assignment Form and the
//! > Control Dependence Graph", ACM TOPLAS 1991
//!
//! # Algorithm Overview
//!
//! SSA construction proceeds in three phases:
//!
//! 1. **Phi Placement**: Mark the iterated dominance frontier of every variable's
//!    definition sites
//! 2. **Variable Renaming**: Version every assignment and use along a dominator tree walk
//! 3. **Phi Insertion**: Materialize the marked phis from the renaming result
//!
//! All three phases only look at blocks reachable from the entry. Unreachable blocks
//! keep their original names and contribute no phi operands.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    analysis::{
        cfg::{live_subset, Block, ControlFlowGraph},
        ssa::{place_phis, rename, RenameResult},
    },
    config::SsaConfig,
    ir::{Instruction, Type},
    utils::graph::algorithms::{compute_dominance_frontiers, dominator_tree},
    Result,
};

/// Builder converting a [`ControlFlowGraph`] to SSA form in place.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::{
///     analysis::ssa::SsaBuilder,
///     ir::{Argument, Function, Instruction, Type},
///     ControlFlowGraph, SsaConfig,
/// };
///
/// let int = Type::primitive("int");
/// let function = Function::new("main")
///     .with_args([Argument::new("a", int.clone())])
///     .with_instrs([
///         Instruction::value("add", "a", int.clone(), ["a", "a"]),
///         Instruction::value("add", "a", int, ["a", "a"]),
///         Instruction::ret(["a"]),
///     ]);
///
/// let mut cfg = ControlFlowGraph::new(&function)?;
/// SsaBuilder::new(&SsaConfig::default()).build(&mut cfg)?;
///
/// let text: Vec<String> = cfg.blocks()[0].instrs.iter().map(ToString::to_string).collect();
/// assert_eq!(text, ["a.0: int = add a a;", "a.1: int = add a.0 a.0;", "ret a.1;"]);
/// # Ok::<(), bril_ssa::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SsaBuilder<'a> {
    /// Handling of undefined phi operands.
    config: &'a SsaConfig,
}

impl<'a> SsaBuilder<'a> {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: &'a SsaConfig) -> Self {
        Self { config }
    }

    /// Converts the graph's blocks to SSA form.
    ///
    /// An empty graph is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedVariable`](crate::Error::UndefinedVariable) under the
    /// strict undefined-operand policy and propagates graph errors from the edge queries.
    pub fn build(&self, cfg: &mut ControlFlowGraph) -> Result<()> {
        let Some(entry) = cfg.entry().map(str::to_string) else {
            return Ok(());
        };

        let edges = cfg.edges()?;
        let live = cfg.reachable_from(&edges);
        let dominators = cfg.live_dominators(&edges, &live);
        let successors = live_subset(&edges.successors, &live);

        let frontiers = compute_dominance_frontiers(&dominators, &successors);
        let tree = dominator_tree(&dominators);

        let mut definitions = cfg.definitions();
        for sites in definitions.values_mut() {
            sites.retain(|block| live.contains(block));
        }
        definitions.retain(|_, sites| !sites.is_empty());
        let phis = place_phis(&definitions, &frontiers);

        // Types must be read before renaming rewrites the destinations.
        let types = cfg.variable_types();
        let params: Vec<String> = cfg.args().iter().map(|arg| arg.name.clone()).collect();

        let result = rename(
            cfg.blocks_mut(),
            &phis,
            &successors,
            &tree,
            &entry,
            &params,
            self.config,
        )?;
        let inserted = insert_phis(cfg.blocks_mut(), &result, &types);

        debug!(
            function = %cfg.name(),
            blocks = cfg.block_count(),
            reachable = live.len(),
            variables = definitions.len(),
            phis = inserted,
            "converted to SSA"
        );
        Ok(())
    }
}

/// Prepends the phi instructions recorded in `result` to their blocks.
///
/// Phis are ordered by original variable name. Each phi takes its destination from
/// [`RenameResult::phi_dests`], its `labels`/`args` from the `(predecessor, version)`
/// pairs in [`RenameResult::phi_args`], and its type from `types` (keyed by original
/// variable name); a variable without a known type yields an untyped phi.
///
/// Returns the number of phis inserted.
pub fn insert_phis(
    blocks: &mut [Block],
    result: &RenameResult,
    types: &BTreeMap<String, Type>,
) -> usize {
    let mut inserted = 0;

    for block in blocks {
        let Some(dests) = result.phi_dests.get(&block.name) else {
            continue;
        };
        let operands = result.phi_args.get(&block.name);

        let phis: Vec<Instruction> = dests
            .iter()
            .map(|(variable, dest)| {
                let pairs = operands
                    .and_then(|operands| operands.get(variable))
                    .map_or(&[][..], Vec::as_slice);
                Instruction {
                    op: "phi".to_string(),
                    dest: Some(dest.clone()),
                    ty: types.get(variable).cloned(),
                    args: pairs.iter().map(|(_, version)| version.clone()).collect(),
                    labels: pairs.iter().map(|(pred, _)| pred.clone()).collect(),
                    funcs: Vec::new(),
                    value: None,
                }
            })
            .collect();

        inserted += phis.len();
        block.instrs.splice(0..0, phis);
    }

    inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Argument, Code, Function};

    fn int() -> Type {
        Type::primitive("int")
    }

    fn text(block: &Block) -> Vec<String> {
        block.instrs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_insert_phis_sorted_at_head() {
        let mut blocks = vec![Block::new("join", vec![Instruction::ret(["y"])])];

        let mut result = RenameResult::default();
        result.phi_dests.insert(
            "join".to_string(),
            [
                ("y".to_string(), "y.3".to_string()),
                ("a".to_string(), "a.1".to_string()),
            ]
            .into(),
        );
        result.phi_args.insert(
            "join".to_string(),
            [
                (
                    "y".to_string(),
                    vec![
                        ("l".to_string(), "y.1".to_string()),
                        ("r".to_string(), "y.2".to_string()),
                    ],
                ),
                ("a".to_string(), vec![("l".to_string(), "a.0".to_string())]),
            ]
            .into(),
        );
        let types: BTreeMap<String, Type> = [
            ("y".to_string(), int()),
            ("a".to_string(), Type::primitive("bool")),
        ]
        .into();

        let inserted = insert_phis(&mut blocks, &result, &types);

        assert_eq!(inserted, 2);
        assert_eq!(
            text(&blocks[0]),
            vec![
                "a.1: bool = phi a.0 .l;",
                "y.3: int = phi y.1 y.2 .l .r;",
                "ret y;",
            ]
        );
    }

    #[test]
    fn test_build_if_else_join() {
        let function = Function::new("main")
            .with_args([Argument::new("c", Type::primitive("bool"))])
            .with_instrs([
                Code::label("b"),
                Instruction::br("c", "left", "right").into(),
                Code::label("left"),
                Instruction::constant("x", int(), 1).into(),
                Instruction::jmp("end").into(),
                Code::label("right"),
                Instruction::constant("x", int(), 2).into(),
                Instruction::jmp("end").into(),
                Code::label("end"),
                Instruction::ret(["x"]).into(),
            ]);
        let mut cfg = ControlFlowGraph::new(&function).unwrap();
        SsaBuilder::new(&SsaConfig::default()).build(&mut cfg).unwrap();

        assert_eq!(
            text(cfg.block("end").unwrap()),
            vec!["x.0: int = phi x.1 x.2 .left .right;", "ret x.0;"]
        );
        assert_eq!(text(cfg.block("left").unwrap())[0], "x.1: int = const 1;");
        assert_eq!(text(cfg.block("right").unwrap())[0], "x.2: int = const 2;");
    }

    #[test]
    fn test_build_empty_graph() {
        let mut cfg = ControlFlowGraph::new(&Function::new("empty")).unwrap();
        SsaBuilder::new(&SsaConfig::default()).build(&mut cfg).unwrap();
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_build_ignores_unreachable_blocks() {
        let function = Function::new("main").with_instrs([
            Code::label("start"),
            Instruction::constant("x", int(), 1).into(),
            Instruction::ret(["x"]).into(),
            Code::label("dead"),
            Instruction::constant("x", int(), 2).into(),
            Instruction::ret(["x"]).into(),
        ]);
        let mut cfg = ControlFlowGraph::new(&function).unwrap();
        SsaBuilder::new(&SsaConfig::default()).build(&mut cfg).unwrap();

        assert_eq!(text(cfg.block("start").unwrap()), vec!["x.0: int = const 1;", "ret x.0;"]);
        assert_eq!(text(cfg.block("dead").unwrap()), vec!["x: int = const 2;", "ret x;"]);
    }
}
