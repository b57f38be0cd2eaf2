//! Exists handler: report presence without producing errors for absence

use crate::path::Step;
use crate::value::Value;
use crate::walk::{walk, ArrayPos, WalkError, WalkHandler};
use std::collections::HashMap;

/// Returns whether the addressed node is present
///
/// Missing nodes yield `Ok(false)`; type mismatches still surface from the
/// walker and are folded into `false` by [`exists`](super::exists).
#[derive(Debug, Default)]
pub struct ExistsHandler;

impl WalkHandler for ExistsHandler {
    type Output = bool;

    fn on_root(&mut self, _node: &mut Value) -> Result<bool, WalkError> {
        Ok(true)
    }

    fn on_array_last(&mut self, arr: &mut Vec<Value>, pos: ArrayPos) -> Result<bool, WalkError> {
        Ok(matches!(pos, ArrayPos::At(i) if i < arr.len()))
    }

    fn on_array_continue(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
        rest: &[Step],
    ) -> Result<bool, WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() && !arr[i].is_null() => walk(&mut arr[i], rest, self),
            _ => Ok(false),
        }
    }

    fn on_map_last(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
    ) -> Result<bool, WalkError> {
        Ok(map.contains_key(key))
    }

    fn on_map_continue(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
        rest: &[Step],
    ) -> Result<bool, WalkError> {
        match map.get_mut(key) {
            Some(child) if !child.is_null() => walk(child, rest, self),
            _ => Ok(false),
        }
    }
}
