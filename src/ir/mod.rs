//! In-memory representation of Bril programs.
//!
//! These types mirror the Bril JSON format and are what an external parser hands to the
//! analyses in [`crate::analysis`]. The crate does not read or write text or JSON itself;
//! the types derive `serde` traits so callers can, and implement [`Display`](std::fmt::Display)
//! producing the canonical text form.
//!
//! # Key Components
//!
//! - [`Program`] / [`Function`] / [`Argument`] - Program structure
//! - [`Code`] - A label or an [`Instruction`]
//! - [`Terminator`] - Classification of block-ending op codes
//! - [`Type`] / [`Literal`] - Types and constant values

mod function;
mod instruction;
mod types;

pub use function::{Argument, Function, Program};
pub use instruction::{Code, Instruction, Terminator};
pub use types::{Literal, ParamType, Type};
