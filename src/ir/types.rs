//! Value types and literals of the IR.
//!
//! Bril types are either primitive (`int`, `bool`, `float`, `char`, ...) or a type
//! constructor applied to one inner type, such as the pointer type `ptr<T>`. In JSON they
//! appear as a bare string or as a one-key object mapping the constructor to the inner type:
//!
//! ```json
//! "int"
//! {"ptr": "int"}
//! ```

use std::{collections::BTreeMap, fmt};

use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

/// The type of a variable, parameter, or function result.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::ir::Type;
///
/// let int = Type::primitive("int");
/// let ptr = Type::pointer(Type::primitive("int"));
/// assert_eq!(int.to_string(), "int");
/// assert_eq!(ptr.to_string(), "ptr<int>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Type {
    /// A primitive type such as `int` or `bool`.
    Primitive(String),
    /// A parameterized type such as `ptr<int>`.
    Parameterized(ParamType),
}

/// A type constructor applied to one type parameter, `constructor<inner>`.
///
/// Serialized as the single-entry map `{constructor: inner}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamType {
    /// Constructor name, e.g. `ptr`.
    pub constructor: String,
    /// The type parameter.
    pub inner: Box<Type>,
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.constructor, self.inner.as_ref())?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<String, Type>::deserialize(deserializer)?.into_iter();
        match (entries.next(), entries.next()) {
            (Some((constructor, inner)), None) => Ok(ParamType {
                constructor,
                inner: Box::new(inner),
            }),
            _ => Err(<D::Error as de::Error>::custom(
                "parameterized type must have exactly one constructor",
            )),
        }
    }
}

impl Type {
    /// Creates a primitive type from its name.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Type::Primitive(name.into())
    }

    /// Applies the type constructor `constructor` to `inner`.
    #[must_use]
    pub fn parameterized(constructor: impl Into<String>, inner: Type) -> Self {
        Type::Parameterized(ParamType {
            constructor: constructor.into(),
            inner: Box::new(inner),
        })
    }

    /// Creates a pointer to `inner`.
    #[must_use]
    pub fn pointer(inner: Type) -> Self {
        Self::parameterized("ptr", inner)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(name) => write!(f, "{name}"),
            Type::Parameterized(ParamType { constructor, inner }) => {
                write!(f, "{constructor}<{inner}>")
            }
        }
    }
}

/// A constant value carried by a `const` instruction.
///
/// Integers are tried before floats when deserializing, so `1` becomes
/// [`Literal::Int`] and `1.5` becomes [`Literal::Float`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean constant.
    Bool(bool),
    /// Integer constant.
    Int(i64),
    /// Floating point constant.
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}
