//! Delete handler: remove the target, tolerating absence at any depth

use crate::path::Step;
use crate::value::Value;
use crate::walk::{walk, ArrayPos, WalkError, WalkHandler};
use std::collections::HashMap;

/// Removes the addressed node
///
/// Removing a list element shifts the following elements down by one.
/// Absent targets and absent intermediate nodes are a successful no-op.
#[derive(Debug, Default)]
pub struct DeleteHandler;

impl WalkHandler for DeleteHandler {
    type Output = ();

    fn on_root(&mut self, node: &mut Value) -> Result<(), WalkError> {
        *node = Value::Null;
        Ok(())
    }

    fn on_array_last(&mut self, arr: &mut Vec<Value>, pos: ArrayPos) -> Result<(), WalkError> {
        if let ArrayPos::At(i) = pos {
            if i < arr.len() {
                arr.remove(i);
            }
        }
        Ok(())
    }

    fn on_array_continue(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
        rest: &[Step],
    ) -> Result<(), WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() && !arr[i].is_null() => walk(&mut arr[i], rest, self),
            _ => Ok(()),
        }
    }

    fn on_map_last(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
    ) -> Result<(), WalkError> {
        map.remove(key);
        Ok(())
    }

    fn on_map_continue(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
        rest: &[Step],
    ) -> Result<(), WalkError> {
        match map.get_mut(key) {
            Some(child) if !child.is_null() => walk(child, rest, self),
            _ => Ok(()),
        }
    }
}
