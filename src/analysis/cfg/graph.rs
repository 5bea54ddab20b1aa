//! Control Flow Graph implementation.
//!
//! This module provides the main [`ControlFlowGraph`] structure: the basic blocks of one
//! function in layout order, plus the derived edge, dominance and variable queries the SSA
//! construction and external visualizers rely on.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::{self, Write},
};

use tracing::debug;

use crate::{
    analysis::{
        cfg::{Block, CfgEdge, CfgEdgeKind},
        ssa::SsaBuilder,
    },
    config::{CfgConfig, SsaConfig},
    error::graph_error,
    ir::{Argument, Code, Function, Instruction, Type},
    utils::{
        escape_dot,
        graph::algorithms::{
            compute_dominance_frontiers, compute_dominators, dominator_tree, reachable,
        },
        sets::{invert, Relation},
    },
    Error, Result,
};

/// Successor and predecessor relations of a CFG.
///
/// Every block is a key of both relations, mapped to the empty set when it has no
/// neighbours in that direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Edges {
    /// Block name → names of the blocks control may flow to.
    pub successors: Relation,
    /// Block name → names of the blocks control may arrive from.
    pub predecessors: Relation,
}

/// A control flow graph over the basic blocks of one function.
///
/// # Construction
///
/// [`ControlFlowGraph::new`] splits the function body into basic blocks:
///
/// 1. A block starts at every label and right after every terminator.
/// 2. Blocks without a label are named `bb1`, `bb2`, ... skipping names used anywhere in
///    the function.
/// 3. If the first block is the target of any instruction's labels, an empty block named
///    `entry1` (or the next free `entryN`) is put in front of it, so the entry never has
///    predecessors.
/// 4. Every block not ending in a terminator gets a `jmp` to the next block, or a `ret`
///    if it is the last one.
///
/// ```rust
/// use bril_ssa::{
///     ir::{Code, Function, Instruction, Type},
///     ControlFlowGraph,
/// };
///
/// let int = Type::primitive("int");
/// let function = Function::new("main").with_instrs([
///     Instruction::constant("i", int.clone(), 0).into(),
///     Code::label("loop"),
///     Instruction::value("add", "i", int, ["i", "i"]).into(),
///     Instruction::jmp("loop").into(),
/// ]);
///
/// let cfg = ControlFlowGraph::new(&function)?;
/// assert_eq!(cfg.block_names().collect::<Vec<_>>(), vec!["bb1", "loop"]);
/// # Ok::<(), bril_ssa::Error>(())
/// ```
///
/// # Derived Views
///
/// Edges, dominators, frontiers and the dominator tree are recomputed from the current
/// block bodies on every call, so they stay correct after the blocks were rewritten (for
/// example by [`convert_to_ssa`](Self::convert_to_ssa)).
///
/// # Thread Safety
///
/// `ControlFlowGraph` owns all of its data and is [`Send`] and [`Sync`]; independent
/// functions can be processed on separate threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlFlowGraph {
    /// Name of the function the graph was built from.
    name: String,
    /// Parameters of the function.
    args: Vec<Argument>,
    /// Return type of the function.
    return_type: Option<Type>,
    /// Blocks in layout order; the first one is the entry.
    blocks: Vec<Block>,
    /// Block name → position in `blocks`.
    index: HashMap<String, usize>,
}

impl ControlFlowGraph {
    /// Builds the CFG of a function with label validation enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateBlock`] if two labels share a name and
    /// [`Error::UnknownBlock`] if a branch or jump targets a label that is not a block.
    pub fn new(function: &Function) -> Result<Self> {
        Self::with_config(function, CfgConfig::default())
    }

    /// Builds the CFG of a function with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateBlock`] if two labels share a name, and
    /// [`Error::UnknownBlock`] for dangling branch targets when
    /// [`CfgConfig::validate_labels`] is set.
    pub fn with_config(function: &Function, config: CfgConfig) -> Result<Self> {
        let mut used = HashSet::new();
        for code in &function.instrs {
            match code {
                Code::Label { label } => {
                    used.insert(label.clone());
                }
                Code::Instruction(instruction) => used.extend(instruction.labels.iter().cloned()),
            }
        }

        let mut cfg = Self {
            name: function.name.clone(),
            args: function.args.clone(),
            return_type: function.return_type.clone(),
            blocks: Vec::new(),
            index: HashMap::new(),
        };

        for (label, instrs) in Self::split_blocks(&function.instrs) {
            let name = match label {
                Some(label) => label,
                None => {
                    let name = generate_name("bb", &used);
                    used.insert(name.clone());
                    name
                }
            };
            if cfg.index.contains_key(&name) {
                return Err(Error::DuplicateBlock(name));
            }
            cfg.index.insert(name.clone(), cfg.blocks.len());
            cfg.blocks.push(Block::new(name, instrs));
        }

        let synthesized_entry = cfg.add_entry(&mut used);
        let synthesized_terminators = cfg.add_terminators();

        if config.validate_labels {
            cfg.validate_labels()?;
        }

        debug!(
            function = %cfg.name,
            blocks = cfg.blocks.len(),
            synthesized_entry,
            synthesized_terminators,
            "built control flow graph"
        );
        Ok(cfg)
    }

    /// Splits a flat body into (label, instructions) runs.
    ///
    /// A run ends before every label and after every terminator. Runs with neither a
    /// label nor instructions are dropped; a label followed directly by another label
    /// still forms an (empty) run.
    fn split_blocks(code: &[Code]) -> Vec<(Option<String>, Vec<Instruction>)> {
        let mut runs = Vec::new();
        let mut label: Option<String> = None;
        let mut body: Vec<Instruction> = Vec::new();

        for item in code {
            match item {
                Code::Label { label: name } => {
                    if label.is_some() || !body.is_empty() {
                        runs.push((label.take(), std::mem::take(&mut body)));
                    }
                    label = Some(name.clone());
                }
                Code::Instruction(instruction) => {
                    body.push(instruction.clone());
                    if instruction.is_terminator() {
                        runs.push((label.take(), std::mem::take(&mut body)));
                    }
                }
            }
        }
        if label.is_some() || !body.is_empty() {
            runs.push((label, body));
        }
        runs
    }

    /// Prepends an empty entry block if the first block is referenced by any label.
    fn add_entry(&mut self, used: &mut HashSet<String>) -> bool {
        let Some(first) = self.blocks.first() else {
            return false;
        };
        let targeted = self
            .blocks
            .iter()
            .flat_map(|block| &block.instrs)
            .any(|instruction| instruction.labels.contains(&first.name));
        if !targeted {
            return false;
        }

        let name = generate_name("entry", used);
        used.insert(name.clone());
        self.blocks.insert(0, Block::new(name, Vec::new()));
        self.reindex();
        true
    }

    /// Appends a fall-through `jmp` or a final `ret` to every unterminated block.
    fn add_terminators(&mut self) -> usize {
        let next_names: Vec<Option<String>> = self
            .blocks
            .iter()
            .skip(1)
            .map(|block| Some(block.name.clone()))
            .chain(std::iter::once(None))
            .collect();

        let mut added = 0;
        for (block, next) in self.blocks.iter_mut().zip(next_names) {
            if block.terminator().is_some() {
                continue;
            }
            let terminator = match next {
                Some(next) => Instruction::jmp(next),
                None => Instruction::ret(std::iter::empty::<String>()),
            };
            block.instrs.push(terminator);
            added += 1;
        }
        added
    }

    fn validate_labels(&self) -> Result<()> {
        for block in &self.blocks {
            if let Some(target) = block
                .successor_labels()
                .iter()
                .find(|target| !self.index.contains_key(*target))
            {
                return Err(Error::UnknownBlock {
                    block: block.name.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .blocks
            .iter()
            .enumerate()
            .map(|(position, block)| (block.name.clone(), position))
            .collect();
    }

    /// Returns the name of the function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameters of the function.
    #[must_use]
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Returns the return type of the function.
    #[must_use]
    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }

    /// Returns the name of the entry block, `None` for an empty function.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.blocks.first().map(|block| block.name.as_str())
    }

    /// Iterates over the block names in layout order.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.name.as_str())
    }

    /// Returns the blocks in layout order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks up a block by name.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.index
            .get(name)
            .and_then(|&position| self.blocks.get(position))
    }

    /// Mutable access to all blocks, for passes that rewrite bodies in place.
    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the graph has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the successors of one block, `None` if there is no such block.
    #[must_use]
    pub fn successors_of(&self, name: &str) -> Option<BTreeSet<String>> {
        self.block(name)
            .map(|block| block.successor_labels().iter().cloned().collect())
    }

    /// Returns the outgoing edges of one block in terminator label order.
    #[must_use]
    pub fn outgoing_edges(&self, name: &str) -> Vec<CfgEdge> {
        self.block(name)
            .and_then(Block::last)
            .map(CfgEdge::from_terminator)
            .unwrap_or_default()
    }

    /// Computes the successor and predecessor relations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if a block branches to a name that is not a block,
    /// which can only happen when the graph was built without label validation.
    pub fn edges(&self) -> Result<Edges> {
        let mut successors: Relation = self
            .blocks
            .iter()
            .map(|block| (block.name.clone(), BTreeSet::new()))
            .collect();
        let mut predecessors = successors.clone();

        for block in &self.blocks {
            for target in block.successor_labels() {
                let Some(preds) = predecessors.get_mut(target) else {
                    return Err(graph_error!(
                        "Block '{}' branches to unknown block '{}'",
                        block.name,
                        target
                    ));
                };
                preds.insert(block.name.clone());
                successors
                    .entry(block.name.clone())
                    .or_default()
                    .insert(target.clone());
            }
        }

        Ok(Edges {
            successors,
            predecessors,
        })
    }

    /// Computes, for every block, the set of blocks that dominate it.
    ///
    /// Blocks unreachable from the entry keep the set of all blocks.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`edges`](Self::edges).
    pub fn dominators(&self) -> Result<Relation> {
        let edges = self.edges()?;
        Ok(self.dominators_from(&edges))
    }

    pub(crate) fn dominators_from(&self, edges: &Edges) -> Relation {
        let Some(entry) = self.entry() else {
            return Relation::new();
        };
        let nodes: Vec<String> = self.block_names().map(str::to_string).collect();
        compute_dominators(
            &nodes,
            &edges.successors,
            &edges.predecessors,
            &entry.to_string(),
        )
    }

    /// Computes, for every block, the set of blocks it dominates (including itself).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`edges`](Self::edges).
    pub fn dominated_by(&self) -> Result<Relation> {
        Ok(invert(&self.dominators()?))
    }

    /// Computes the dominance frontier of every reachable block.
    ///
    /// Unreachable blocks are left out, both as keys and as frontier members, so the
    /// result matches the frontiers SSA construction places phis with.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`edges`](Self::edges).
    pub fn dominance_frontiers(&self) -> Result<Relation> {
        let edges = self.edges()?;
        let live = self.reachable_from(&edges);
        Ok(compute_dominance_frontiers(
            &self.live_dominators(&edges, &live),
            &live_subset(&edges.successors, &live),
        ))
    }

    /// Builds the dominator tree as a parent → children relation.
    ///
    /// Only blocks reachable from the entry take part; unreachable blocks have no
    /// meaningful dominators and are left out of the tree.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`edges`](Self::edges).
    pub fn dominator_tree(&self) -> Result<Relation> {
        let edges = self.edges()?;
        let live = self.reachable_from(&edges);
        Ok(dominator_tree(&self.live_dominators(&edges, &live)))
    }

    /// Dominator sets of the blocks in `live`.
    pub(crate) fn live_dominators(&self, edges: &Edges, live: &BTreeSet<String>) -> Relation {
        live_subset(&self.dominators_from(edges), live)
    }

    /// Returns the blocks reachable from the entry, the entry included.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`edges`](Self::edges).
    pub fn reachable(&self) -> Result<BTreeSet<String>> {
        let edges = self.edges()?;
        Ok(self.reachable_from(&edges))
    }

    pub(crate) fn reachable_from(&self, edges: &Edges) -> BTreeSet<String> {
        match self.entry() {
            Some(entry) => reachable(&edges.successors, &entry.to_string()),
            None => BTreeSet::new(),
        }
    }

    /// Maps every assigned variable to the blocks assigning it.
    #[must_use]
    pub fn definitions(&self) -> Relation {
        let mut definitions = Relation::new();
        for block in &self.blocks {
            for variable in block.definitions() {
                definitions
                    .entry(variable.to_string())
                    .or_default()
                    .insert(block.name.clone());
            }
        }
        definitions
    }

    /// Maps every variable to its type.
    ///
    /// Types come from the typed destinations in the blocks; parameters supply the
    /// type of variables that are never assigned. If a variable is assigned with
    /// different types, the last assignment in layout order wins.
    #[must_use]
    pub fn variable_types(&self) -> BTreeMap<String, Type> {
        let mut types: BTreeMap<String, Type> = self
            .args
            .iter()
            .map(|arg| (arg.name.clone(), arg.ty.clone()))
            .collect();
        for instruction in self.blocks.iter().flat_map(|block| &block.instrs) {
            if let (Some(dest), Some(ty)) = (&instruction.dest, &instruction.ty) {
                types.insert(dest.clone(), ty.clone());
            }
        }
        types
    }

    /// Converts the blocks to SSA form in place.
    ///
    /// See [`SsaBuilder`] for the algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedVariable`] under [`UndefinedPolicy::Error`](crate::UndefinedPolicy::Error)
    /// and propagates graph errors from the analyses.
    pub fn convert_to_ssa(&mut self, config: &SsaConfig) -> Result<()> {
        SsaBuilder::new(config).build(self)
    }

    /// Reads the blocks back out as a flat body: each block's label followed by its
    /// instructions.
    #[must_use]
    pub fn reassemble(&self) -> Vec<Code> {
        let mut code = Vec::with_capacity(self.blocks.len() * 4);
        for block in &self.blocks {
            code.push(Code::label(block.name.as_str()));
            code.extend(block.instrs.iter().cloned().map(Code::Instruction));
        }
        code
    }

    /// Reassembles the graph into a [`Function`] with the original signature.
    #[must_use]
    pub fn to_function(&self) -> Function {
        Function {
            name: self.name.clone(),
            args: self.args.clone(),
            return_type: self.return_type.clone(),
            instrs: self.reassemble(),
        }
    }

    /// Consumes the graph and reassembles it into a [`Function`].
    #[must_use]
    pub fn into_function(self) -> Function {
        let instrs = self.reassemble();
        Function {
            name: self.name,
            args: self.args,
            return_type: self.return_type,
            instrs,
        }
    }

    /// Generates a DOT representation of the CFG for visualization.
    ///
    /// Each block becomes a box listing its instructions, with the block name as an
    /// external label. Blocks in `highlight` are filled, and the `current` block gets a
    /// thick outline. Conditional edges are labelled `true` / `false`.
    ///
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use bril_ssa::{ir::{Function, Instruction}, ControlFlowGraph};
    ///
    /// let function = Function::new("main").with_instrs([Instruction::ret(["x"])]);
    /// let cfg = ControlFlowGraph::new(&function)?;
    ///
    /// let dot = cfg.to_dot(&BTreeSet::new(), Some("bb1"));
    /// assert!(dot.starts_with("digraph \"main\" {"));
    /// assert!(dot.contains("\"bb1\" [label=\"ret x;\\l\", xlabel=\"bb1\", penwidth=3];"));
    /// # Ok::<(), bril_ssa::Error>(())
    /// ```
    #[must_use]
    pub fn to_dot(&self, highlight: &BTreeSet<String>, current: Option<&str>) -> String {
        let mut dot = String::new();

        let _ = writeln!(dot, "digraph \"{}\" {{", escape_dot(&self.name));
        dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n");
        dot.push_str("    edge [fontname=\"Courier\", fontsize=9];\n\n");

        for block in &self.blocks {
            let mut label = String::new();
            for instruction in &block.instrs {
                label.push_str(&escape_dot(&instruction.to_string()));
                label.push_str("\\l"); // Left-align newline
            }

            let mut style = String::new();
            if highlight.contains(&block.name) {
                style.push_str(", style=filled, fillcolor=lightblue");
            }
            if current == Some(block.name.as_str()) {
                style.push_str(", penwidth=3");
            }

            let name = escape_dot(&block.name);
            let _ = writeln!(
                dot,
                "    \"{name}\" [label=\"{label}\", xlabel=\"{name}\"{style}];"
            );
        }

        dot.push('\n');

        for block in &self.blocks {
            for edge in self.outgoing_edges(&block.name) {
                let color = match edge.kind() {
                    CfgEdgeKind::Unconditional => "black",
                    CfgEdgeKind::ConditionalTrue => "green",
                    CfgEdgeKind::ConditionalFalse => "red",
                };
                let _ = writeln!(
                    dot,
                    "    \"{}\" -> \"{}\" [label=\"{}\", color={color}];",
                    escape_dot(&block.name),
                    escape_dot(edge.target()),
                    edge.kind().label()
                );
            }
        }

        dot.push_str("}\n");
        dot
    }
}

impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Keeps the entries of `relation` whose key is in `live`.
pub(crate) fn live_subset(relation: &Relation, live: &BTreeSet<String>) -> Relation {
    relation
        .iter()
        .filter(|(block, _)| live.contains(*block))
        .map(|(block, targets)| (block.clone(), targets.clone()))
        .collect()
}

/// Returns `prefix` followed by the smallest positive integer not yet in `used`.
fn generate_name(prefix: &str, used: &HashSet<String>) -> String {
    let mut counter = 1usize;
    loop {
        let candidate = format!("{prefix}{counter}");
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::primitive("int")
    }

    fn names(cfg: &ControlFlowGraph) -> Vec<&str> {
        cfg.block_names().collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    /// `.b: br c .left .right; .left: jmp .end; .right: jmp .end; .end: ret`
    fn diamond() -> Function {
        Function::new("diamond").with_instrs([
            Code::label("b"),
            Instruction::constant("c", Type::primitive("bool"), true).into(),
            Instruction::br("c", "left", "right").into(),
            Code::label("left"),
            Instruction::constant("x", int(), 1).into(),
            Instruction::jmp("end").into(),
            Code::label("right"),
            Instruction::constant("x", int(), 2).into(),
            Instruction::jmp("end").into(),
            Code::label("end"),
            Instruction::effect("print", ["x"]).into(),
            Instruction::ret(Vec::<String>::new()).into(),
        ])
    }

    #[test]
    fn test_cfg_empty_function() {
        let cfg = ControlFlowGraph::new(&Function::new("empty")).unwrap();

        assert!(cfg.is_empty());
        assert_eq!(cfg.entry(), None);
        assert!(cfg.reassemble().is_empty());
        assert!(cfg.dominators().unwrap().is_empty());
        assert!(cfg.dominator_tree().unwrap().is_empty());
    }

    #[test]
    fn test_cfg_straight_line() {
        let function = Function::new("main").with_instrs([
            Instruction::constant("a", int(), 1),
            Instruction::effect("print", ["a"]),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["bb1"]);
        let block = cfg.block("bb1").unwrap();
        assert_eq!(block.instrs.len(), 3);
        assert_eq!(block.instrs[2], Instruction::ret(Vec::<String>::new()));
    }

    #[test]
    fn test_cfg_split_after_terminator() {
        // The instruction after the jump starts a new, unnamed (and unreachable) block.
        let function = Function::new("main").with_instrs([
            Code::label("start"),
            Instruction::jmp("end").into(),
            Instruction::effect("print", ["x"]).into(),
            Code::label("end"),
            Instruction::ret(Vec::<String>::new()).into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["start", "bb1", "end"]);
        assert_eq!(cfg.block("bb1").unwrap().instrs[1], Instruction::jmp("end"));
    }

    #[test]
    fn test_cfg_generated_names_skip_labels() {
        let function = Function::new("main").with_instrs([
            Instruction::jmp("bb1").into(),
            Code::label("bb1"),
            Instruction::ret(Vec::<String>::new()).into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["bb2", "bb1"]);
    }

    #[test]
    fn test_cfg_consecutive_labels_form_empty_block() {
        let function = Function::new("main").with_instrs([
            Code::label("a"),
            Code::label("b"),
            Instruction::ret(Vec::<String>::new()).into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["a", "b"]);
        assert_eq!(cfg.block("a").unwrap().instrs, vec![Instruction::jmp("b")]);
    }

    #[test]
    fn test_cfg_self_loop_synthesizes_entry() {
        let function = Function::new("main").with_instrs([
            Code::label("l"),
            Instruction::constant("c", Type::primitive("bool"), true).into(),
            Instruction::br("c", "l", "out").into(),
            Code::label("out"),
            Instruction::ret(Vec::<String>::new()).into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["entry1", "l", "out"]);
        assert_eq!(cfg.block("entry1").unwrap().instrs, vec![Instruction::jmp("l")]);
        let edges = cfg.edges().unwrap();
        assert!(edges.predecessors["entry1"].is_empty());
    }

    #[test]
    fn test_cfg_entry_name_avoids_labels() {
        let function = Function::new("main").with_instrs([
            Code::label("entry1"),
            Instruction::jmp("entry1").into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(names(&cfg), vec!["entry2", "entry1"]);
    }

    #[test]
    fn test_cfg_no_entry_without_back_reference() {
        let cfg = ControlFlowGraph::new(&diamond()).unwrap();
        assert_eq!(cfg.entry(), Some("b"));
        assert_eq!(cfg.block_count(), 4);
    }

    #[test]
    fn test_cfg_duplicate_label() {
        let function = Function::new("main").with_instrs([
            Code::label("a"),
            Instruction::jmp("a").into(),
            Code::label("a"),
            Instruction::ret(Vec::<String>::new()).into(),
        ]);
        assert_eq!(
            ControlFlowGraph::new(&function),
            Err(Error::DuplicateBlock("a".to_string()))
        );
    }

    #[test]
    fn test_cfg_unknown_label() {
        let function = Function::new("main").with_instrs([Instruction::jmp("nowhere")]);

        assert_eq!(
            ControlFlowGraph::new(&function),
            Err(Error::UnknownBlock {
                block: "bb1".to_string(),
                target: "nowhere".to_string(),
            })
        );

        let cfg = ControlFlowGraph::with_config(&function, CfgConfig::lenient()).unwrap();
        assert!(matches!(cfg.edges(), Err(Error::GraphError(_))));
        assert!(cfg.dominators().is_err());
    }

    #[test]
    fn test_cfg_edges() {
        let cfg = ControlFlowGraph::new(&diamond()).unwrap();
        let edges = cfg.edges().unwrap();

        assert_eq!(edges.successors["b"], set(&["left", "right"]));
        assert_eq!(edges.successors["left"], set(&["end"]));
        assert!(edges.successors["end"].is_empty());
        assert_eq!(edges.predecessors["end"], set(&["left", "right"]));
        assert!(edges.predecessors["b"].is_empty());

        assert_eq!(cfg.successors_of("b"), Some(set(&["left", "right"])));
        assert_eq!(cfg.successors_of("missing"), None);
    }

    #[test]
    fn test_cfg_outgoing_edge_kinds() {
        let cfg = ControlFlowGraph::new(&diamond()).unwrap();

        let edges = cfg.outgoing_edges("b");
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].kind(), CfgEdgeKind::ConditionalTrue);
        assert_eq!(edges[0].target(), "left");
        assert_eq!(edges[1].kind(), CfgEdgeKind::ConditionalFalse);
        assert!(cfg.outgoing_edges("end").is_empty());
    }

    #[test]
    fn test_cfg_dominance_diamond() {
        let cfg = ControlFlowGraph::new(&diamond()).unwrap();

        let dom = cfg.dominators().unwrap();
        assert_eq!(dom["end"], set(&["b", "end"]));
        assert_eq!(dom["left"], set(&["b", "left"]));

        let frontiers = cfg.dominance_frontiers().unwrap();
        assert_eq!(frontiers["left"], set(&["end"]));
        assert_eq!(frontiers["right"], set(&["end"]));
        assert!(frontiers["b"].is_empty());

        let tree = cfg.dominator_tree().unwrap();
        assert_eq!(tree["b"], set(&["end", "left", "right"]));

        let dominated = cfg.dominated_by().unwrap();
        assert_eq!(dominated["b"], set(&["b", "end", "left", "right"]));
        assert_eq!(dominated["left"], set(&["left"]));
    }

    #[test]
    fn test_cfg_dominator_tree_skips_unreachable() {
        let function = Function::new("main").with_instrs([
            Code::label("a"),
            Instruction::ret(Vec::<String>::new()).into(),
            Code::label("dead"),
            Instruction::jmp("a").into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        // "a" is targeted by the dead block, so an entry is synthesized in front of it
        assert_eq!(names(&cfg), vec!["entry1", "a", "dead"]);
        assert_eq!(cfg.reachable().unwrap(), set(&["entry1", "a"]));

        let tree = cfg.dominator_tree().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree["entry1"], set(&["a"]));
        assert!(!tree.contains_key("dead"));

        // the full relation still reports the trivial set for the unreachable block
        let dom = cfg.dominators().unwrap();
        assert_eq!(dom["dead"], set(&["a", "dead", "entry1"]));
    }

    #[test]
    fn test_cfg_frontiers_ignore_unreachable_predecessor() {
        let mut instrs = diamond().instrs;
        instrs.push(Code::label("dead"));
        instrs.push(Instruction::jmp("left").into());
        let cfg = ControlFlowGraph::new(&Function::new("diamond").with_instrs(instrs)).unwrap();

        let frontiers = cfg.dominance_frontiers().unwrap();
        assert_eq!(frontiers["left"], set(&["end"]));
        assert_eq!(frontiers["right"], set(&["end"]));
        assert!(frontiers["end"].is_empty());
        assert!(frontiers["b"].is_empty());
        assert!(!frontiers.contains_key("dead"));
    }

    #[test]
    fn test_cfg_definitions_and_types() {
        let function = diamond().with_args([Argument::new("n", int())]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        let definitions = cfg.definitions();
        assert_eq!(definitions["x"], set(&["left", "right"]));
        assert_eq!(definitions["c"], set(&["b"]));
        assert!(!definitions.contains_key("n"));

        let types = cfg.variable_types();
        assert_eq!(types["x"], int());
        assert_eq!(types["c"], Type::primitive("bool"));
        assert_eq!(types["n"], int());
    }

    #[test]
    fn test_cfg_reassemble() {
        let function = Function::new("main").with_instrs([
            Instruction::constant("a", int(), 1).into(),
            Code::label("next"),
            Instruction::ret(["a"]).into(),
        ]);
        let cfg = ControlFlowGraph::new(&function).unwrap();

        assert_eq!(
            cfg.reassemble(),
            vec![
                Code::label("bb1"),
                Instruction::constant("a", int(), 1).into(),
                Instruction::jmp("next").into(),
                Code::label("next"),
                Instruction::ret(["a"]).into(),
            ]
        );

        let rebuilt = cfg.into_function();
        assert_eq!(rebuilt.name, "main");
        assert_eq!(rebuilt.instrs.len(), 5);
    }

    #[test]
    fn test_cfg_to_dot() {
        let cfg = ControlFlowGraph::new(&diamond()).unwrap();
        let dot = cfg.to_dot(&set(&["left"]), Some("end"));

        assert!(dot.contains("\"left\" [label=\"x: int = const 1;\\ljmp .end;\\l\", xlabel=\"left\", style=filled, fillcolor=lightblue];"));
        assert!(dot.contains("xlabel=\"end\", penwidth=3];"));
        assert!(dot.contains("\"b\" -> \"left\" [label=\"true\", color=green];"));
        assert!(dot.contains("\"b\" -> \"right\" [label=\"false\", color=red];"));
        assert!(dot.contains("\"left\" -> \"end\" [label=\"\", color=black];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_cfg_display() {
        let function = Function::new("main").with_instrs([Instruction::ret(["x"])]);
        let cfg = ControlFlowGraph::new(&function).unwrap();
        assert_eq!(cfg.to_string(), ".bb1:\n  ret x;\n");
    }
}
