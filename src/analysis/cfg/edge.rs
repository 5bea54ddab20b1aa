//! Control flow edge types for the CFG.
//!
//! The successor relation returned by
//! [`ControlFlowGraph::edges`](crate::analysis::ControlFlowGraph::edges) only records which
//! blocks are connected. [`CfgEdge`] additionally carries how control arrives there, which is
//! what visualizations use to label the arms of a conditional branch.

use crate::ir::{Instruction, Terminator};

/// The kind of control flow represented by an edge.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::analysis::CfgEdgeKind;
///
/// let edge_kind = CfgEdgeKind::ConditionalTrue;
/// assert!(edge_kind.is_conditional());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfgEdgeKind {
    /// Unconditional control flow: a `jmp`, explicit or synthesized for fall-through.
    Unconditional,

    /// The first label of a `br`, taken when the condition is true.
    ConditionalTrue,

    /// The second label of a `br`, taken when the condition is false.
    ConditionalFalse,
}

impl CfgEdgeKind {
    /// Returns `true` if this is a conditional branch edge.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bril_ssa::analysis::CfgEdgeKind;
    ///
    /// assert!(CfgEdgeKind::ConditionalTrue.is_conditional());
    /// assert!(CfgEdgeKind::ConditionalFalse.is_conditional());
    /// assert!(!CfgEdgeKind::Unconditional.is_conditional());
    /// ```
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        matches!(self, Self::ConditionalTrue | Self::ConditionalFalse)
    }

    /// Short label used when rendering the edge, empty for unconditional flow.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unconditional => "",
            Self::ConditionalTrue => "true",
            Self::ConditionalFalse => "false",
        }
    }
}

/// An edge in the control flow graph.
///
/// Each edge names its target block and carries the kind of control flow.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::analysis::{CfgEdge, CfgEdgeKind};
///
/// let edge = CfgEdge::new("loop", CfgEdgeKind::Unconditional);
/// assert_eq!(edge.target(), "loop");
/// assert!(!edge.kind().is_conditional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CfgEdge {
    /// The target block of this edge.
    target: String,
    /// The kind of control flow this edge represents.
    kind: CfgEdgeKind,
}

impl CfgEdge {
    /// Creates a new CFG edge.
    #[must_use]
    pub fn new(target: impl Into<String>, kind: CfgEdgeKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }

    /// Returns the name of the target block.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the kind of control flow this edge represents.
    #[must_use]
    pub const fn kind(&self) -> CfgEdgeKind {
        self.kind
    }

    /// Derives the outgoing edges of a block from its terminator.
    ///
    /// `ret` and non-terminators produce no edges. A `br` whose labels coincide still
    /// produces two edges.
    #[must_use]
    pub fn from_terminator(instruction: &Instruction) -> Vec<Self> {
        match instruction.terminator() {
            Some(Terminator::Jmp) => instruction
                .labels
                .iter()
                .map(|label| Self::new(label.as_str(), CfgEdgeKind::Unconditional))
                .collect(),
            Some(Terminator::Br) => instruction
                .labels
                .iter()
                .zip([CfgEdgeKind::ConditionalTrue, CfgEdgeKind::ConditionalFalse])
                .map(|(label, kind)| Self::new(label.as_str(), kind))
                .collect(),
            Some(Terminator::Ret) | None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_kind_is_conditional() {
        assert!(!CfgEdgeKind::Unconditional.is_conditional());
        assert!(CfgEdgeKind::ConditionalTrue.is_conditional());
        assert!(CfgEdgeKind::ConditionalFalse.is_conditional());
    }

    #[test]
    fn test_edges_from_branch() {
        let edges = CfgEdge::from_terminator(&Instruction::br("c", "then", "else"));
        assert_eq!(
            edges,
            vec![
                CfgEdge::new("then", CfgEdgeKind::ConditionalTrue),
                CfgEdge::new("else", CfgEdgeKind::ConditionalFalse),
            ]
        );
    }

    #[test]
    fn test_edges_from_jump_and_return() {
        let edges = CfgEdge::from_terminator(&Instruction::jmp("exit"));
        assert_eq!(edges, vec![CfgEdge::new("exit", CfgEdgeKind::Unconditional)]);

        assert!(CfgEdge::from_terminator(&Instruction::ret(["x"])).is_empty());
        assert!(CfgEdge::from_terminator(&Instruction::effect("print", ["x"])).is_empty());
    }
}
