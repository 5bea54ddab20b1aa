//! # bril-ssa Prelude
//!
//! This module provides a convenient prelude for the most commonly used types of the
//! bril-ssa library. Import it to get the data model, the control flow graph and the
//! SSA entry points in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bril-ssa operations
pub use crate::Error;

/// The result type used throughout bril-ssa
pub use crate::Result;

/// Configuration for CFG construction and SSA conversion
pub use crate::config::{CfgConfig, SsaConfig, UndefinedPolicy};

// ================================================================================================
// Data Model
// ================================================================================================

/// Programs, functions and their parameters
pub use crate::ir::{Argument, Function, Program};

/// Instructions, labels and terminators
pub use crate::ir::{Code, Instruction, Terminator};

/// Types and constant values
pub use crate::ir::{Literal, Type};

// ================================================================================================
// Analysis
// ================================================================================================

/// Control flow graph and its building blocks
pub use crate::analysis::cfg::{Block, CfgEdge, CfgEdgeKind, ControlFlowGraph, Edges};

/// SSA construction
pub use crate::analysis::ssa::{convert_program, convert_program_parallel, SsaBuilder};

/// Relations returned by the dominance queries
pub use crate::utils::sets::Relation;
