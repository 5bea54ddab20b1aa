//! Configuration for CFG construction and SSA conversion
//!
//! Both configurations are plain values with presets. The defaults follow the permissive
//! behavior expected by tools that visualize partially written programs: labels are checked,
//! but a variable with no reaching definition on some path becomes a sentinel phi operand
//! instead of an error.

/// Configuration for building a [`ControlFlowGraph`](crate::ControlFlowGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfgConfig {
    /// Check that every branch and jump target names a block of the function
    /// (default: true). When disabled, a dangling target surfaces later as
    /// [`Error::GraphError`](crate::Error::GraphError) from the edge queries.
    pub validate_labels: bool,
}

impl Default for CfgConfig {
    fn default() -> Self {
        Self {
            validate_labels: true,
        }
    }
}

impl CfgConfig {
    /// Creates a configuration that accepts dangling branch targets at construction time
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            validate_labels: false,
        }
    }
}

/// What SSA renaming does with a phi operand that has no reaching definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Fill the operand with [`SsaConfig::undefined_name`]
    #[default]
    Sentinel,
    /// Fail with [`Error::UndefinedVariable`](crate::Error::UndefinedVariable)
    Error,
}

/// Configuration for SSA conversion
///
/// # Examples
///
/// ```rust
/// use bril_ssa::{SsaConfig, UndefinedPolicy};
///
/// let config = SsaConfig::default();
/// assert_eq!(config.undefined, UndefinedPolicy::Sentinel);
/// assert_eq!(config.undefined_name, "__undefined");
///
/// assert_eq!(SsaConfig::strict().undefined, UndefinedPolicy::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsaConfig {
    /// Handling of phi operands without a reaching definition (default: sentinel)
    pub undefined: UndefinedPolicy,

    /// Operand name used by [`UndefinedPolicy::Sentinel`] (default: `__undefined`)
    pub undefined_name: String,

    /// Configuration for the CFG built from each function
    pub cfg: CfgConfig,
}

impl Default for SsaConfig {
    fn default() -> Self {
        Self {
            undefined: UndefinedPolicy::Sentinel,
            undefined_name: "__undefined".to_string(),
            cfg: CfgConfig::default(),
        }
    }
}

impl SsaConfig {
    /// Creates the most permissive configuration: sentinel operands and no label validation
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            cfg: CfgConfig::lenient(),
            ..Self::default()
        }
    }

    /// Creates a configuration that rejects undefined phi operands
    #[must_use]
    pub fn strict() -> Self {
        Self {
            undefined: UndefinedPolicy::Error,
            ..Self::default()
        }
    }

    /// Sets the sentinel operand name
    #[must_use]
    pub fn with_undefined_name(mut self, name: impl Into<String>) -> Self {
        self.undefined_name = name.into();
        self
    }
}
