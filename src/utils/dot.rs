//! DOT format utilities for graph visualization.
//!
//! Block labels hold instruction text, which may contain angle brackets (`ptr<int>`).
//! Block and function names end up inside quoted DOT identifiers.

/// Escapes text for a quoted DOT identifier or record-free label.
///
/// Backslashes, quotes and angle brackets are escaped; line breaks become `\n` and
/// carriage returns are dropped.
///
/// # Examples
///
/// ```rust
/// use bril_ssa::utils::escape_dot;
///
/// let escaped = escape_dot("x: ptr<int> = alloc n;");
/// assert_eq!(escaped, "x: ptr\\<int\\> = alloc n;");
/// ```
#[must_use]
pub fn escape_dot(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Instruction, Type};

    #[test]
    fn test_escape_plain_instruction() {
        let add = Instruction::value("add", "v", Type::primitive("int"), ["a", "b"]);
        assert_eq!(escape_dot(&add.to_string()), "v: int = add a b;");
    }

    #[test]
    fn test_escape_pointer_types() {
        let load = Instruction::value(
            "load",
            "p",
            Type::pointer(Type::pointer(Type::primitive("bool"))),
            ["q"],
        );
        assert_eq!(
            escape_dot(&load.to_string()),
            "p: ptr\\<ptr\\<bool\\>\\> = load q;"
        );
    }

    #[test]
    fn test_escape_block_body() {
        assert_eq!(
            escape_dot("v: int = const 1;\r\nret v;"),
            "v: int = const 1;\\nret v;"
        );
    }

    #[test]
    fn test_escape_quoted_name() {
        assert_eq!(escape_dot("say \"hi\"\\"), "say \\\"hi\\\"\\\\");
    }
}
