//! Instructions and labels.
//!
//! A function body is a flat sequence of [`Code`] items: either a [`Code::Label`] marking a
//! block boundary, or a [`Code::Instruction`]. Instructions share one record shape whose
//! optional parts depend on the operation:
//!
//! | Part     | Present for                                  |
//! |----------|----------------------------------------------|
//! | `dest`   | value operations (`add`, `const`, `phi`, ...) |
//! | `ty`     | value operations                             |
//! | `args`   | operations reading variables                 |
//! | `labels` | `br`, `jmp`, `phi`                           |
//! | `funcs`  | `call`                                       |
//! | `value`  | `const`                                      |

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::ir::{Literal, Type};

/// Operations that end a basic block.
///
/// Parsed from an instruction's op code with [`str::parse`]:
///
/// ```rust
/// use bril_ssa::ir::Terminator;
///
/// assert_eq!("br".parse::<Terminator>(), Ok(Terminator::Br));
/// assert!("add".parse::<Terminator>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Terminator {
    /// Conditional branch: `br cond .then .else`.
    Br,
    /// Unconditional jump: `jmp .target`.
    Jmp,
    /// Function return, with an optional value.
    Ret,
}

impl Terminator {
    /// Returns `true` if control may continue at the instruction's labels.
    #[must_use]
    pub const fn is_branch(self) -> bool {
        matches!(self, Terminator::Br | Terminator::Jmp)
    }
}

/// A single IR operation.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::ir::{Instruction, Type};
///
/// let add = Instruction::value("add", "sum", Type::primitive("int"), ["a", "b"]);
/// assert_eq!(add.to_string(), "sum: int = add a b;");
///
/// let jump = Instruction::jmp("loop");
/// assert!(jump.is_terminator());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation code, e.g. `add`, `br`, `const`.
    pub op: String,
    /// Destination variable, for operations producing a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    /// Result type of the destination.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    /// Variables read by the operation, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Block labels referenced by the operation, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Functions referenced by the operation, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<String>,
    /// Literal value of a `const`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
}

impl Instruction {
    /// Creates an effect operation with no destination.
    #[must_use]
    pub fn effect<I, S>(op: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op: op.into(),
            dest: None,
            ty: None,
            args: args.into_iter().map(Into::into).collect(),
            labels: Vec::new(),
            funcs: Vec::new(),
            value: None,
        }
    }

    /// Creates a value operation writing `dest`.
    #[must_use]
    pub fn value<I, S>(op: impl Into<String>, dest: impl Into<String>, ty: Type, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dest: Some(dest.into()),
            ty: Some(ty),
            ..Self::effect(op, args)
        }
    }

    /// Creates `dest: ty = const value`.
    #[must_use]
    pub fn constant(dest: impl Into<String>, ty: Type, value: impl Into<Literal>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::value("const", dest, ty, std::iter::empty::<String>())
        }
    }

    /// Creates `jmp .target`.
    #[must_use]
    pub fn jmp(target: impl Into<String>) -> Self {
        Self::effect("jmp", std::iter::empty::<String>()).with_labels([target])
    }

    /// Creates `br cond .then .else`.
    #[must_use]
    pub fn br(
        cond: impl Into<String>,
        then_label: impl Into<String>,
        else_label: impl Into<String>,
    ) -> Self {
        let labels: [String; 2] = [then_label.into(), else_label.into()];
        Self::effect("br", [Into::<String>::into(cond)]).with_labels(labels)
    }

    /// Creates `ret` with the given (zero or one) arguments.
    #[must_use]
    pub fn ret<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::effect("ret", args)
    }

    /// Replaces the label list.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the function list.
    #[must_use]
    pub fn with_funcs<I, S>(mut self, funcs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.funcs = funcs.into_iter().map(Into::into).collect();
        self
    }

    /// Classifies the op code as a block terminator, if it is one.
    #[must_use]
    pub fn terminator(&self) -> Option<Terminator> {
        self.op.parse().ok()
    }

    /// Returns `true` for `br`, `jmp` and `ret`.
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        self.terminator().is_some()
    }

    /// Returns the control flow targets of this instruction.
    ///
    /// Only branches and jumps transfer control to their labels; every other
    /// instruction (including `ret` and `phi`) has no targets.
    #[must_use]
    pub fn branch_targets(&self) -> &[String] {
        match self.terminator() {
            Some(t) if t.is_branch() => &self.labels,
            _ => &[],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(dest) = &self.dest {
            write!(f, "{dest}")?;
            if let Some(ty) = &self.ty {
                write!(f, ": {ty}")?;
            }
            write!(f, " = ")?;
        }
        write!(f, "{}", self.op)?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        for func in &self.funcs {
            write!(f, " @{func}")?;
        }
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        for label in &self.labels {
            write!(f, " .{label}")?;
        }
        write!(f, ";")
    }
}

/// One element of a function body: a label or an instruction.
///
/// Labels only mark block boundaries; they never appear inside a
/// [`Block`](crate::analysis::Block) body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    /// A block boundary marker, `.name:` in text form.
    Label {
        /// The label name without the leading dot.
        label: String,
    },
    /// An operation.
    Instruction(Instruction),
}

impl Code {
    /// Creates a label.
    #[must_use]
    pub fn label(name: impl Into<String>) -> Self {
        Code::Label { label: name.into() }
    }
}

impl From<Instruction> for Code {
    fn from(instruction: Instruction) -> Self {
        Code::Instruction(instruction)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Label { label } => write!(f, ".{label}:"),
            Code::Instruction(instruction) => write!(f, "{instruction}"),
        }
    }
}
