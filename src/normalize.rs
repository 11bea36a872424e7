// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{AssertionError, Side};
use crate::ignore::IgnoreList;
use crate::json_diff::path::{Key, Trail};

/// Resets every field targeted by `ignore` to the zero value of its type.
///
/// Plain paths are applied first, in order, then all wildcard fields in a
/// single walk over the tree. Keys that do not exist are skipped. Applying
/// the same list twice gives the same tree as applying it once.
///
/// # Examples
///
/// ```
/// use json_exact::{normalize, IgnoreList};
/// use serde_json::json;
///
/// let mut tree = json!({ "data": [{ "id": 1, "x": 1 }, { "id": 2, "x": 2 }] });
/// normalize(&mut tree, &IgnoreList::parse(["data.id"]).unwrap()).unwrap();
/// assert_eq!(tree, json!({ "data": [{ "id": 0, "x": 1 }, { "id": 0, "x": 2 }] }));
/// ```
pub fn normalize(tree: &mut Value, ignore: &IgnoreList) -> Result<(), AssertionError> {
    let Value::Object(root) = tree else {
        return Err(AssertionError::NotAnObject { side: Side::Actual });
    };

    for segments in ignore.paths() {
        reset_path(root, segments, &Trail::root())?;
    }

    if !ignore.wildcards().is_empty() {
        reset_wildcards(root, ignore.wildcards(), &Trail::root())?;
    }

    Ok(())
}

/// Zero value of a scalar's type, `None` for null and containers. Floats
/// reset to `0.0` and integers to `0`.
pub(crate) fn zero_value(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(Value::Bool(false)),
        Value::Number(number) if number.is_f64() => Some(Value::from(0.0)),
        Value::Number(_) => Some(Value::from(0)),
        Value::String(_) => Some(Value::String(String::new())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn reset_path(
    map: &mut Map<String, Value>,
    segments: &[String],
    at: &Trail<'_>,
) -> Result<(), AssertionError> {
    let Some((field, rest)) = segments.split_first() else {
        return Ok(());
    };
    let Some(value) = map.get_mut(field) else {
        return Ok(());
    };
    let at = at.push(Key::Field(field));

    if rest.is_empty() {
        return reset_value(value, &at);
    }

    match value {
        Value::Object(child) => reset_path(child, rest, &at),
        Value::Array(items) => {
            // broadcast one level deep: nested arrays and scalars are skipped
            for (idx, item) in items.iter_mut().enumerate() {
                if let Value::Object(child) = item {
                    reset_path(child, rest, &at.push(Key::Idx(idx)))?;
                }
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
    }
}

/// Full recursive reset: scalars become zero values, containers keep their
/// shape and have every leaf beneath them zeroed.
fn reset_value(value: &mut Value, at: &Trail<'_>) -> Result<(), AssertionError> {
    match value {
        Value::Null => Ok(()),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            if let Some(zero) = zero_value(value) {
                trace!(path = %at, "reset field");
                *value = zero;
            }
            Ok(())
        }
        Value::Object(map) => reset_all(map, at),
        Value::Array(items) => {
            for (idx, item) in items.iter_mut().enumerate() {
                let at = at.push(Key::Idx(idx));
                match item {
                    Value::Array(_) => return Err(unsupported_shape(&at)),
                    _ => reset_value(item, &at)?,
                }
            }
            Ok(())
        }
    }
}

fn reset_all(map: &mut Map<String, Value>, at: &Trail<'_>) -> Result<(), AssertionError> {
    for (key, value) in map.iter_mut() {
        reset_value(value, &at.push(Key::Field(key)))?;
    }
    Ok(())
}

fn reset_wildcards(
    map: &mut Map<String, Value>,
    fields: &HashSet<String>,
    at: &Trail<'_>,
) -> Result<(), AssertionError> {
    for (key, value) in map.iter_mut() {
        let at = at.push(Key::Field(key));

        if fields.contains(key) {
            reset_value(value, &at)?;
            continue;
        }

        match value {
            Value::Object(child) => reset_wildcards(child, fields, &at)?,
            Value::Array(items) => {
                for (idx, item) in items.iter_mut().enumerate() {
                    let at = at.push(Key::Idx(idx));
                    match item {
                        Value::Object(child) => reset_wildcards(child, fields, &at)?,
                        Value::Array(_) => return Err(unsupported_shape(&at)),
                        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
    Ok(())
}

fn unsupported_shape(at: &Trail<'_>) -> AssertionError {
    AssertionError::UnsupportedShape {
        path: at.to_string(),
    }
}
