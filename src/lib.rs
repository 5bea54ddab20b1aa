// Copyright 2025 The bril-ssa Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bril-ssa
//!
//! Control flow graphs, dominance analysis and SSA construction for the
//! [Bril](https://capra.cs.cornell.edu/bril/) intermediate language.
//!
//! ## Features
//!
//! - **Basic block formation** - Split a flat function body into named blocks with a
//!   single entry and an explicit terminator on every block
//! - **Dominance analysis** - Dominators, dominance frontiers and the dominator tree
//! - **SSA construction** - Cytron-style phi placement and scoped variable renaming
//! - **Deterministic output** - Every result uses ordered containers, so the same input
//!   always produces the same blocks, versions and phi order
//! - **Parallel batch conversion** - Independent functions are converted on a thread pool
//!
//! ## Quick Start
//!
//! ### Using the Prelude
//!
//! ```rust
//! use bril_ssa::prelude::*;
//!
//! let int = Type::primitive("int");
//! let function = Function::new("main")
//!     .with_args([Argument::new("c", Type::primitive("bool"))])
//!     .with_instrs([
//!         Instruction::br("c", "left", "right").into(),
//!         Code::label("left"),
//!         Instruction::constant("x", int.clone(), 1).into(),
//!         Instruction::jmp("end").into(),
//!         Code::label("right"),
//!         Instruction::constant("x", int, 2).into(),
//!         Code::label("end"),
//!         Instruction::effect("print", ["x"]).into(),
//!     ]);
//!
//! let mut cfg = ControlFlowGraph::new(&function)?;
//! cfg.convert_to_ssa(&SsaConfig::default())?;
//!
//! let end = cfg.block("end").unwrap();
//! assert_eq!(end.instrs[0].to_string(), "x.0: int = phi x.1 x.2 .left .right;");
//! # Ok::<(), bril_ssa::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`ir`] - The Bril data model: programs, functions, instructions and types
//! - [`analysis`] - Control flow graphs and SSA construction
//! - [`utils`] - Set/relation helpers and the graph algorithms behind the analyses
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! Parsing Bril text or JSON, rendering graphs and interpreting programs are left to
//! other tools. The data model derives `serde` traits in the Bril JSON shape, and
//! [`ControlFlowGraph::to_dot`] produces Graphviz input.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for per-function summaries, `trace` for
//! per-block and per-variable detail) and never installs a subscriber.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use bril_ssa::{ir::{Function, Instruction}, ControlFlowGraph, Error};
//!
//! let function = Function::new("main").with_instrs([Instruction::jmp("missing")]);
//! match ControlFlowGraph::new(&function) {
//!     Err(Error::UnknownBlock { target, .. }) => assert_eq!(target, "missing"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub(crate) mod error;

pub mod analysis;
pub mod config;
pub mod ir;
pub mod utils;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use bril_ssa::prelude::*;
///
/// let cfg = ControlFlowGraph::new(&Function::new("main"))?;
/// assert!(cfg.is_empty());
/// # Ok::<(), bril_ssa::Error>(())
/// ```
pub mod prelude;

/// `bril-ssa` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bril-ssa` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use analysis::{ControlFlowGraph, SsaBuilder};
pub use config::{CfgConfig, SsaConfig, UndefinedPolicy};
