//! Functions and programs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ir::{Code, Instruction, Type};

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Argument {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function: signature plus a flat body of labels and instructions.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::ir::{Argument, Function, Instruction, Type};
///
/// let function = Function::new("double")
///     .with_args([Argument::new("x", Type::primitive("int"))])
///     .with_return_type(Type::primitive("int"))
///     .with_instrs([
///         Instruction::value("add", "y", Type::primitive("int"), ["x", "x"]),
///         Instruction::ret(["y"]),
///     ]);
///
/// assert_eq!(function.instrs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Function name without the leading `@`.
    pub name: String,
    /// Parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Argument>,
    /// Return type, absent for functions returning nothing.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Type>,
    /// The body before block splitting.
    #[serde(default)]
    pub instrs: Vec<Code>,
}

impl Function {
    /// Creates an empty function with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            return_type: None,
            instrs: Vec::new(),
        }
    }

    /// Sets the parameter list.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_instrs<I, C>(mut self, instrs: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        self.instrs = instrs.into_iter().map(Into::into).collect();
        self
    }

    /// Iterates over the instructions of the body, skipping labels.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.instrs.iter().filter_map(|code| match code {
            Code::Instruction(instruction) => Some(instruction),
            Code::Label { .. } => None,
        })
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.args.is_empty() {
            let params: Vec<String> = self
                .args
                .iter()
                .map(|arg| format!("{}: {}", arg.name, arg.ty))
                .collect();
            write!(f, "({})", params.join(", "))?;
        }
        if let Some(ty) = &self.return_type {
            write!(f, ": {ty}")?;
        }
        writeln!(f, " {{")?;
        for code in &self.instrs {
            match code {
                Code::Label { .. } => writeln!(f, "{code}")?,
                Code::Instruction(_) => writeln!(f, "  {code}")?,
            }
        }
        write!(f, "}}")
    }
}

/// A whole program: an ordered list of functions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// The functions, in source order.
    pub functions: Vec<Function>,
}

impl Program {
    /// Creates a program from its functions.
    #[must_use]
    pub fn new(functions: impl IntoIterator<Item = Function>) -> Self {
        Self {
            functions: functions.into_iter().collect(),
        }
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{function}")?;
        }
        Ok(())
    }
}
