//! Basic blocks of a control flow graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ir::{Instruction, Terminator};

/// A named, straight-line sequence of instructions.
///
/// Once a [`ControlFlowGraph`](crate::analysis::ControlFlowGraph) is built, the last
/// instruction of every block is a terminator (`br`, `jmp` or `ret`). The label that
/// started the block becomes its name and is not part of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block name, unique within its CFG.
    pub name: String,
    /// Body instructions, phis first after SSA conversion.
    pub instrs: Vec<Instruction>,
}

impl Block {
    /// Creates a block.
    #[must_use]
    pub fn new(name: impl Into<String>, instrs: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instrs,
        }
    }

    /// Returns the last instruction, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Instruction> {
        self.instrs.last()
    }

    /// Returns the kind of the block's final instruction if it is a terminator.
    #[must_use]
    pub fn terminator(&self) -> Option<Terminator> {
        self.last().and_then(Instruction::terminator)
    }

    /// Returns the labels control may transfer to, in instruction order.
    ///
    /// Empty for blocks ending in `ret` or not ending in a terminator.
    #[must_use]
    pub fn successor_labels(&self) -> &[String] {
        self.last().map_or(&[], Instruction::branch_targets)
    }

    /// Iterates over the variables this block assigns, in order and with repeats.
    pub fn definitions(&self) -> impl Iterator<Item = &str> {
        self.instrs
            .iter()
            .filter_map(|instruction| instruction.dest.as_deref())
    }

    /// Iterates over the phi instructions at the head of the block.
    pub fn phis(&self) -> impl Iterator<Item = &Instruction> {
        self.instrs
            .iter()
            .take_while(|instruction| instruction.op == "phi")
    }

    /// Returns `true` if the block has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".{}:", self.name)?;
        for instruction in &self.instrs {
            writeln!(f, "  {instruction}")?;
        }
        Ok(())
    }
}
