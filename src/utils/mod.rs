//! Shared helpers used by the analyses.
//!
//! - [`sets`] - Set and relation operations over ordered containers
//! - [`graph`] - Traversal and dominance algorithms
//! - [`escape_dot`] - DOT label escaping for graph output

mod dot;
pub mod graph;
pub mod sets;

pub use dot::escape_dot;
