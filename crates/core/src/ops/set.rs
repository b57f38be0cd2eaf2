//! Set handler: insert, overwrite or append, creating containers on demand

use crate::path::Step;
use crate::value::Value;
use crate::walk::{walk, ArrayPos, WalkError, WalkHandler};
use std::collections::HashMap;

/// Writes a value at the addressed node
///
/// Missing intermediate nodes are created as a list when the next step is a
/// position or append marker, and as a map otherwise. A newly created
/// container is attached to its parent only after the rest of the walk
/// succeeds.
#[derive(Debug)]
pub struct SetHandler {
    value: Option<Value>,
}

impl SetHandler {
    /// Create a handler that writes `value`
    pub fn new(value: Value) -> Self {
        SetHandler { value: Some(value) }
    }

    fn take_value(&mut self) -> Value {
        // a walk reaches exactly one terminal callback
        self.value.take().unwrap_or_default()
    }
}

/// Empty container suited to the next step
fn container_for(rest: &[Step]) -> Value {
    match rest.first() {
        Some(Step::Index(_) | Step::Append) => Value::array(),
        _ => Value::object(),
    }
}

impl WalkHandler for SetHandler {
    type Output = ();

    fn on_root(&mut self, node: &mut Value) -> Result<(), WalkError> {
        *node = self.take_value();
        Ok(())
    }

    fn on_array_last(&mut self, arr: &mut Vec<Value>, pos: ArrayPos) -> Result<(), WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() => {
                arr[i] = self.take_value();
                Ok(())
            }
            ArrayPos::At(i) => Err(WalkError::IndexOutOfBounds {
                index: i,
                len: arr.len(),
            }),
            ArrayPos::Append => {
                arr.push(self.take_value());
                Ok(())
            }
        }
    }

    fn on_array_continue(
        &mut self,
        arr: &mut Vec<Value>,
        pos: ArrayPos,
        rest: &[Step],
    ) -> Result<(), WalkError> {
        match pos {
            ArrayPos::At(i) if i < arr.len() => {
                if arr[i].is_null() {
                    let mut child = container_for(rest);
                    walk(&mut child, rest, self)?;
                    arr[i] = child;
                    Ok(())
                } else {
                    walk(&mut arr[i], rest, self)
                }
            }
            ArrayPos::At(i) => Err(WalkError::IndexOutOfBounds {
                index: i,
                len: arr.len(),
            }),
            ArrayPos::Append => {
                let mut child = container_for(rest);
                walk(&mut child, rest, self)?;
                arr.push(child);
                Ok(())
            }
        }
    }

    fn on_map_last(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
    ) -> Result<(), WalkError> {
        map.insert(key.to_string(), self.take_value());
        Ok(())
    }

    fn on_map_continue(
        &mut self,
        map: &mut HashMap<String, Value>,
        key: &str,
        rest: &[Step],
    ) -> Result<(), WalkError> {
        if let Some(child) = map.get_mut(key) {
            if !child.is_null() {
                return walk(child, rest, self);
            }
        }
        let mut child = container_for(rest);
        walk(&mut child, rest, self)?;
        map.insert(key.to_string(), child);
        Ok(())
    }
}
