//! Navigation steps
//!
//! A parsed path is a flat list of [`Step`]s. The three path syntaxes all
//! produce the same step model, and everything downstream (walker,
//! query resolution, handlers) only ever sees steps.

use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;

/// One navigation step within a stored value
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Map member access
    ///
    /// A name made only of decimal digits is treated as a list position
    /// when the node being walked is a list.
    Field(String),
    /// List position
    Index(usize),
    /// One past the end of a list (write-only target)
    Append,
    /// Every child of the current node (query syntax only)
    Wildcard,
    /// Every child matching a predicate (query syntax only)
    Filter(Predicate),
}

impl Step {
    /// Whether this step can select more than one node
    pub fn is_query(&self) -> bool {
        matches!(self, Step::Wildcard | Step::Filter(_))
    }

    /// Interpret a field name as a list position, if it is all digits
    pub fn digits_as_index(name: &str) -> Option<usize> {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            name.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => {
                if !name.is_empty()
                    && name
                        .chars()
                        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
                {
                    write!(f, ".{}", name)
                } else {
                    write!(f, "['{}']", name.replace('\\', "\\\\").replace('\'', "\\'"))
                }
            }
            Step::Index(i) => write!(f, "[{}]", i),
            Step::Append => f.write_str("[]"),
            Step::Wildcard => f.write_str("[*]"),
            Step::Filter(pred) => write!(f, "[?({})]", pred),
        }
    }
}

/// Equality predicate of a filter step: `@.a.b == literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field chain relative to the candidate element (empty means `@` itself)
    pub fields: Vec<String>,
    /// Literal the resolved member must equal
    pub literal: Value,
}

impl Predicate {
    /// Create a predicate
    pub fn new(fields: Vec<String>, literal: Value) -> Self {
        Predicate { fields, literal }
    }

    /// Check whether a candidate element satisfies this predicate
    ///
    /// Missing members and members of a different kind never match.
    pub fn matches(&self, candidate: &Value) -> bool {
        let mut current = candidate;
        for field in &self.fields {
            current = match current {
                Value::Object(map) => match map.get(field) {
                    Some(child) => child,
                    None => return false,
                },
                Value::Array(items) => {
                    match Step::digits_as_index(field).and_then(|i| items.get(i)) {
                        Some(child) => child,
                        None => return false,
                    }
                }
                _ => return false,
            };
        }
        *current == self.literal
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@")?;
        for field in &self.fields {
            write!(f, ".{}", field)?;
        }
        match &self.literal {
            Value::String(s) => write!(f, " == '{}'", s),
            other => write!(f, " == {}", other),
        }
    }
}

/// Total order over concrete steps used to sequence multi-match deletes
///
/// Indices compare numerically and fields by name; an index sorts before a
/// field. Query steps never appear in concrete paths and sort last.
pub fn compare_steps(a: &[Step], b: &[Step]) -> Ordering {
    fn rank(step: &Step) -> u8 {
        match step {
            Step::Index(_) => 0,
            Step::Field(_) => 1,
            Step::Append => 2,
            Step::Wildcard | Step::Filter(_) => 3,
        }
    }

    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (Step::Index(i), Step::Index(j)) => i.cmp(j),
            (Step::Field(m), Step::Field(n)) => m.cmp(n),
            _ => rank(x).cmp(&rank(y)),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
