//! Static Single Assignment (SSA) construction for Bril functions.
//!
//! Conversion rewrites a [`ControlFlowGraph`](crate::analysis::ControlFlowGraph) in place
//! so that every variable is assigned exactly once. Each assignment to `x` gets a fresh
//! version `x.0`, `x.1`, ..., uses refer to the version reaching them, and `phi`
//! instructions at the head of join blocks select between versions arriving from
//! different predecessors.
//!
//! # Architecture
//!
//! - [`place_phis`] - Phi placement at iterated dominance frontiers
//! - [`rename`] - Scoped renaming along the dominator tree
//! - [`insert_phis`] - Materializing phi instructions
//! - [`SsaBuilder`] - Runs the three phases on a CFG
//! - [`convert_program`] / [`convert_program_parallel`] - Whole-program drivers
//!
//! # Undefined Operands
//!
//! A variable assigned on some paths into a join but not on others has no version
//! along the latter. By default the phi operand becomes the sentinel `__undefined`;
//! [`SsaConfig::strict`](crate::SsaConfig::strict) turns this into
//! [`Error::UndefinedVariable`](crate::Error::UndefinedVariable).
//!
//! # Usage
//!
//! ```rust
//! use bril_ssa::{ir::{Code, Function, Instruction, Type}, ControlFlowGraph, SsaConfig};
//!
//! let int = Type::primitive("int");
//! let function = Function::new("main").with_instrs([
//!     Instruction::constant("i", int.clone(), 0).into(),
//!     Code::label("loop"),
//!     Instruction::value("add", "i", int, ["i", "i"]).into(),
//!     Instruction::jmp("loop").into(),
//! ]);
//!
//! let mut cfg = ControlFlowGraph::new(&function)?;
//! cfg.convert_to_ssa(&SsaConfig::default())?;
//!
//! let header = cfg.block("loop").unwrap();
//! assert_eq!(header.instrs[0].to_string(), "i.1: int = phi i.0 i.2 .bb1 .loop;");
//! # Ok::<(), bril_ssa::Error>(())
//! ```

mod builder;
mod phis;
mod program;
mod rename;

pub use builder::{insert_phis, SsaBuilder};
pub use phis::place_phis;
pub use program::{convert_function, convert_program, convert_program_parallel};
pub use rename::{rename, RenameResult};
