use thiserror::Error;

macro_rules! graph_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::GraphError(format!("{} ({}:{})", $msg, file!(), line!()))
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::GraphError(format!(
            "{} ({}:{})",
            format!($fmt, $($arg)*),
            file!(),
            line!()
        ))
    };
}

pub(crate) use graph_error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The analyses in this crate are pure functions of the control flow graph, so the only
/// recoverable failures come from the shape of the input function (labels that do not resolve,
/// duplicated block names) or from a strict SSA configuration. Everything else indicates a
/// broken internal invariant and is reported as [`Error::GraphError`].
///
/// # Error Categories
///
/// ## Input Topology Errors
/// - [`Error::UnknownBlock`] - A branch targets a label that is not a block
/// - [`Error::DuplicateBlock`] - Two labels of one function share a name
///
/// ## SSA Errors
/// - [`Error::UndefinedVariable`] - A phi operand has no reaching definition (strict mode only)
///
/// ## Internal Errors
/// - [`Error::GraphError`] - An internal graph invariant was violated
///
/// # Examples
///
/// ```rust
/// use bril_ssa::{ir::Function, ControlFlowGraph, Error};
///
/// let function = Function::new("main");
/// match ControlFlowGraph::new(&function) {
///     Ok(cfg) => println!("{} blocks", cfg.block_count()),
///     Err(Error::UnknownBlock { block, target }) => {
///         eprintln!("block {block} jumps to missing label {target}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A branch or jump references a label that does not name any block.
    ///
    /// Raised right after block splitting when label validation is enabled
    /// (see [`CfgConfig`](crate::CfgConfig)).
    ///
    /// # Fields
    ///
    /// * `block` - The block whose terminator holds the reference
    /// * `target` - The label that could not be resolved
    #[error("Block '{block}' references unknown block '{target}'")]
    UnknownBlock {
        /// The block containing the offending branch
        block: String,
        /// The label that does not resolve
        target: String,
    },

    /// Two labels in the same function carry the same name.
    ///
    /// Block names are the keys of the control flow graph and must be unique.
    #[error("Duplicate block name '{0}'")]
    DuplicateBlock(String),

    /// A variable has no reaching definition on some path into a phi node.
    ///
    /// Only produced when the SSA configuration uses
    /// [`UndefinedPolicy::Error`](crate::UndefinedPolicy::Error); the default policy
    /// fills the operand with a sentinel name instead.
    #[error("Variable '{variable}' is undefined on the path from block '{block}'")]
    UndefinedVariable {
        /// The original (pre-SSA) variable name
        variable: String,
        /// The predecessor block the undefined value flows from
        block: String,
    },

    /// An internal graph invariant was violated.
    ///
    /// These errors point at a bug in the graph construction rather than at the
    /// input, e.g. an analysis looking up a block that the builder never created.
    #[error("{0}")]
    GraphError(String),
}
