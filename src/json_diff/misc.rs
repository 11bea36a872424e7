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

use serde_json::{Number, Value};

pub trait Indent {
    fn indent(&self, level: usize) -> String;
}

impl<T> Indent for T
where
    T: ToString,
{
    fn indent(&self, level: usize) -> String {
        let indent = " ".repeat(level);

        self.to_string()
            .lines()
            .map(|line| format!("{}{}", indent, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rewrites every float with no fractional part as an integer, so `3.0`
/// and `3` print the same way.
pub(crate) fn integral_floats_as_ints(value: &mut Value) {
    match value {
        Value::Number(number) => {
            if let Some(int) = as_integral(number) {
                *number = Number::from(int);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_as_ints),
        Value::Object(map) => map.values_mut().for_each(integral_floats_as_ints),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

fn as_integral(number: &Number) -> Option<i64> {
    if !number.is_f64() {
        return None;
    }
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}
