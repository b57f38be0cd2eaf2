//! Query resolution
//!
//! Expands wildcard and filter steps into the concrete paths they select.
//! Before the first fan-out step, resolution is strict: a step applied to a
//! node of the wrong kind is a type mismatch, exactly as in the walker.
//! Once a wildcard or filter has fanned out, branches that do not fit the
//! remaining steps simply select nothing.
//!
//! Matches are produced in document order: list elements by position, map
//! members by key.

use crate::path::Step;
use crate::value::{Value, ValueKind};
use crate::walk::WalkError;

/// One node selected by a query
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Concrete steps (fields and indices only) leading to the node
    pub steps: Vec<Step>,
    /// The selected node
    pub value: &'a Value,
}

/// Resolve `steps` against `root`
pub fn resolve<'a>(root: &'a Value, steps: &[Step]) -> Result<Vec<Match<'a>>, WalkError> {
    let mut out = Vec::new();
    let mut prefix = Vec::with_capacity(steps.len());
    resolve_into(root, steps, &mut prefix, true, &mut out)?;
    Ok(out)
}

fn resolve_into<'a>(
    node: &'a Value,
    steps: &[Step],
    prefix: &mut Vec<Step>,
    strict: bool,
    out: &mut Vec<Match<'a>>,
) -> Result<(), WalkError> {
    let (step, rest) = match steps.split_first() {
        Some(split) => split,
        None => {
            out.push(Match {
                steps: prefix.clone(),
                value: node,
            });
            return Ok(());
        }
    };

    match (step, node) {
        (Step::Field(name), Value::Object(map)) => match map.get(name) {
            Some(child) => descend(child, Step::Field(name.clone()), rest, prefix, strict, out),
            None => Ok(()),
        },
        (Step::Field(name), Value::Array(arr)) => match Step::digits_as_index(name) {
            Some(i) => match arr.get(i) {
                Some(child) => descend(child, Step::Index(i), rest, prefix, strict, out),
                None => Ok(()),
            },
            None => mismatch(strict, ValueKind::Object, node),
        },
        (Step::Field(_), _) => mismatch(strict, ValueKind::Object, node),
        (Step::Index(i), Value::Array(arr)) => match arr.get(*i) {
            Some(child) => descend(child, Step::Index(*i), rest, prefix, strict, out),
            None => Ok(()),
        },
        (Step::Index(_), _) => mismatch(strict, ValueKind::Array, node),
        // one past the end never holds a value
        (Step::Append, Value::Array(_)) => Ok(()),
        (Step::Append, _) => mismatch(strict, ValueKind::Array, node),
        (Step::Wildcard, Value::Array(arr)) => {
            for (i, child) in arr.iter().enumerate() {
                descend(child, Step::Index(i), rest, prefix, false, out)?;
            }
            Ok(())
        }
        (Step::Wildcard, Value::Object(map)) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                descend(&map[key], Step::Field(key.clone()), rest, prefix, false, out)?;
            }
            Ok(())
        }
        (Step::Filter(pred), Value::Array(arr)) => {
            for (i, child) in arr.iter().enumerate() {
                if pred.matches(child) {
                    descend(child, Step::Index(i), rest, prefix, false, out)?;
                }
            }
            Ok(())
        }
        (Step::Filter(pred), Value::Object(map)) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                let child = &map[key];
                if pred.matches(child) {
                    descend(child, Step::Field(key.clone()), rest, prefix, false, out)?;
                }
            }
            Ok(())
        }
        // scalars have no children to fan out over
        (Step::Wildcard | Step::Filter(_), _) => Ok(()),
    }
}

fn descend<'a>(
    child: &'a Value,
    step: Step,
    rest: &[Step],
    prefix: &mut Vec<Step>,
    strict: bool,
    out: &mut Vec<Match<'a>>,
) -> Result<(), WalkError> {
    if child.is_null() && !rest.is_empty() {
        return Ok(());
    }
    prefix.push(step);
    let result = resolve_into(child, rest, prefix, strict, out);
    prefix.pop();
    result
}

fn mismatch(strict: bool, expected: ValueKind, node: &Value) -> Result<(), WalkError> {
    if strict {
        Err(WalkError::TypeMismatch {
            expected,
            actual: node.kind(),
        })
    } else {
        Ok(())
    }
}
