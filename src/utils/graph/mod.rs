//! Graph infrastructure for control flow analysis.
//!
//! Graphs are represented as successor [`Relation`](crate::utils::sets::Relation)s keyed by
//! node name; [`algorithms`] holds the traversals and dominance computations built on them.

pub mod algorithms;
