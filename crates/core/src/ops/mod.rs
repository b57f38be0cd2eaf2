//! Path operations over an in-memory value
//!
//! Each operation works on a tree that the caller has materialized for this
//! one call. Reads consume the tree; writes mutate it in place and the
//! caller persists it only when the operation succeeds.
//!
//! | Operation | Missing target | Type conflict on the way | Query steps |
//! |-----------|----------------|--------------------------|-------------|
//! | [`get`] | `NotFound` | `TypeMismatch` | first match |
//! | [`get_all`] | empty list | `TypeMismatch` | all matches |
//! | [`exists`] | `false` | `false` | any match |
//! | [`delete`] | no-op | `TypeMismatch` | every match |
//! | [`set`] | created | `TypeMismatch` | `QueryNotAllowed` |

mod delete;
mod exists;
mod get;
mod resolve;
mod set;

pub use delete::DeleteHandler;
pub use exists::ExistsHandler;
pub use get::GetHandler;
pub use resolve::{resolve, Match};
pub use set::SetHandler;

use crate::path::{compare_steps, Path, Step};
use crate::value::Value;
use crate::walk::{walk, WalkError};

/// Read the value at `path`
///
/// For query paths the first match (in document order) is returned.
pub fn get(mut root: Value, path: &Path) -> Result<Value, WalkError> {
    if path.has_query_steps() {
        let first = resolve(&root, path.steps())?
            .into_iter()
            .next()
            .map(|m| m.steps)
            .ok_or(WalkError::NotFound)?;
        return walk(&mut root, &first, &mut GetHandler);
    }
    walk(&mut root, path.steps(), &mut GetHandler)
}

/// Read every value selected by `path`
///
/// A concrete path selects at most one value; a missing target yields an
/// empty list.
pub fn get_all(root: &Value, path: &Path) -> Result<Vec<Value>, WalkError> {
    Ok(resolve(root, path.steps())?
        .into_iter()
        .map(|m| m.value.clone())
        .collect())
}

/// Check whether `path` addresses a present value
///
/// Never fails: absence and type conflicts both read as `false`.
pub fn exists(mut root: Value, path: &Path) -> bool {
    if path.has_query_steps() {
        return resolve(&root, path.steps())
            .map(|matches| !matches.is_empty())
            .unwrap_or(false);
    }
    walk(&mut root, path.steps(), &mut ExistsHandler).unwrap_or(false)
}

/// Remove the value at `path`
///
/// Idempotent: absent targets are a successful no-op. For query paths every
/// match is removed; see [`delete_order`] for the sequencing.
pub fn delete(root: &mut Value, path: &Path) -> Result<(), WalkError> {
    if !path.has_query_steps() {
        return walk(root, path.steps(), &mut DeleteHandler);
    }

    let targets = delete_order(
        resolve(root, path.steps())?
            .into_iter()
            .map(|m| m.steps)
            .collect(),
    );
    for steps in targets {
        walk(root, &steps, &mut DeleteHandler)?;
    }
    Ok(())
}

/// Sequence concrete match paths for removal
///
/// Paths are removed in reverse lexicographic order of their steps, with
/// positions compared numerically: descendants go before their ancestors
/// and, within one list, higher positions go before lower ones, so no
/// removal shifts a position that is still pending.
pub fn delete_order(mut targets: Vec<Vec<Step>>) -> Vec<Vec<Step>> {
    targets.sort_by(|a, b| compare_steps(b, a));
    targets.dedup();
    targets
}

/// Write `value` at `path`, creating intermediate containers
pub fn set(root: &mut Value, path: &Path, value: Value) -> Result<(), WalkError> {
    if let Some(step) = path.steps().iter().find(|s| s.is_query()) {
        return Err(WalkError::QueryNotAllowed(step.to_string()));
    }
    walk(root, path.steps(), &mut SetHandler::new(value))
}
