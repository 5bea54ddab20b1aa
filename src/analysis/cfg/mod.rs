//! Control Flow Graph (CFG) construction and analysis.
//!
//! This module splits a function body into basic blocks and exposes the graph queries
//! built on top of them: edges, dominators, dominance frontiers and the dominator tree.
//!
//! # Key Components
//!
//! - [`ControlFlowGraph`] - The blocks of one function and the queries over them
//! - [`Block`] - A named basic block
//! - [`Edges`] - Successor and predecessor relations
//! - [`CfgEdge`] / [`CfgEdgeKind`] - Edges classified by how control flows along them
//!
//! # Examples
//!
//! ## Computing Dominators
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use bril_ssa::{ir::{Code, Function, Instruction}, ControlFlowGraph};
//!
//! let function = Function::new("main").with_instrs([
//!     Code::label("b"),
//!     Instruction::br("c", "left", "right").into(),
//!     Code::label("left"),
//!     Instruction::jmp("end").into(),
//!     Code::label("right"),
//!     Instruction::jmp("end").into(),
//!     Code::label("end"),
//!     Instruction::ret(Vec::<String>::new()).into(),
//! ]);
//!
//! let cfg = ControlFlowGraph::new(&function)?;
//! let dominators = cfg.dominators()?;
//! assert_eq!(dominators["end"], BTreeSet::from(["b".to_string(), "end".to_string()]));
//!
//! // Get dominance frontiers for SSA construction
//! let frontiers = cfg.dominance_frontiers()?;
//! assert_eq!(frontiers["left"], BTreeSet::from(["end".to_string()]));
//! # Ok::<(), bril_ssa::Error>(())
//! ```

mod block;
mod edge;
mod graph;

pub use block::Block;
pub use edge::{CfgEdge, CfgEdgeKind};
pub use graph::{ControlFlowGraph, Edges};
pub(crate) use graph::live_subset;
