//! Get handler: move the target out of the tree

use crate::path::Step;
use crate::value::Value;
use crate::walk::{walk, ArrayPos, WalkError, WalkHandler};
use std::collections::HashMap;

/// Returns the addressed value; missing nodes are [`WalkError::NotFound`]
///
/// The tree is consumed by the read, so the target is taken rather than
/// cloned.
#[derive(Debug, Default)]
pub struct GetHandler;

impl WalkHandler for GetHandler {
    type Output = Value;

    fn on_root(&mut self, node: &mut Value) -> Result<Value, WalkError> {
        Ok(std::mem::take(node))
    }

    fn on_array_last(&mut self, arr: &mut Vec<Value>, pos: ArrayPos) -> Result<Value, WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() => Ok(std::mem::take(&mut arr[i])),
            _ => Err(WalkError::NotFound),
        }
    }

    fn on_array_continue(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
        rest: &[Step],
    ) -> Result<Value, WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() && !arr[i].is_null() => walk(&mut arr[i], rest, self),
            _ => Err(WalkError::NotFound),
        }
    }

    fn on_map_last(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
    ) -> Result<Value, WalkError> {
        map.remove(key).ok_or(WalkError::NotFound)
    }

    fn on_map_continue(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
        rest: &[Step],
    ) -> Result<Value, WalkError> {
        match map.get_mut(key) {
            Some(child) if !child.is_null() => walk(child, rest, self),
            _ => Err(WalkError::NotFound),
        }
    }
}
