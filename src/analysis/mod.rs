//! Program analysis over Bril functions.
//!
//! The analysis module is organized into two sub-modules:
//!
//! - [`cfg`] - Control flow graph construction, edges and dominance
//! - [`ssa`] - Conversion of a control flow graph to SSA form
//!
//! Data flows one way: a [`ControlFlowGraph`] is built from a [`Function`](crate::ir::Function),
//! its dominance views feed the SSA construction, and SSA construction rewrites the graph's
//! blocks in place.

pub mod cfg;
pub mod ssa;

// Re-export primary types at module level
pub use cfg::{Block, CfgEdge, CfgEdgeKind, ControlFlowGraph, Edges};
pub use ssa::SsaBuilder;
