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

mod misc;
pub mod path;
mod render;

use misc::Indent;
use path::{Key, Path};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{collections::BTreeSet, fmt};

pub(crate) use render::render;

/// How should numbers be compared.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMode {
    /// Different numeric types aren't considered equal.
    Strict,
    /// All numeric types are converted to float before comparison, so `3`
    /// and `3.0` are equal.
    #[default]
    AssumeFloat,
}

/// Configuration for how JSON values should be compared.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct Config {
    pub(crate) numeric_mode: NumericMode,
}

impl Config {
    /// Create a new [`Config`] using the given [`NumericMode`].
    pub fn new(numeric_mode: NumericMode) -> Self {
        Self { numeric_mode }
    }
}

/// Compares `actual` against `expected` for exact equality and returns every
/// place where they disagree.
///
/// Object keys are visited in sorted order and array elements by ascending
/// index, so the output is stable between runs.
pub(crate) fn diff<'a>(
    actual: &'a Value,
    expected: &'a Value,
    config: Config,
) -> Vec<Difference<'a>> {
    let mut acc = vec![];
    diff_with(actual, expected, config, Path::Root, &mut acc);
    acc
}

fn diff_with<'a>(
    actual: &'a Value,
    expected: &'a Value,
    config: Config,
    path: Path<'a>,
    acc: &mut Vec<Difference<'a>>,
) {
    let mut folder = DiffFolder {
        expected,
        path,
        acc,
        config,
    };

    fold_json(actual, &mut folder);
}

#[derive(Debug)]
struct DiffFolder<'a, 'b> {
    expected: &'a Value,
    path: Path<'a>,
    acc: &'b mut Vec<Difference<'a>>,
    config: Config,
}

macro_rules! direct_compare {
    ($name:ident) => {
        fn $name(&mut self, actual: &'a Value) {
            if self.expected != actual {
                self.mismatch(actual);
            }
        }
    };
}

impl<'a, 'b> DiffFolder<'a, 'b> {
    direct_compare!(on_null);
    direct_compare!(on_bool);
    direct_compare!(on_string);

    fn on_number(&mut self, actual: &'a Value) {
        let is_equal = match self.config.numeric_mode {
            NumericMode::Strict => self.expected == actual,
            NumericMode::AssumeFloat => {
                self.expected.is_number() && self.expected.as_f64() == actual.as_f64()
            }
        };

        if !is_equal {
            self.mismatch(actual);
        }
    }

    fn on_array(&mut self, actual: &'a Value, actual_items: &'a [Value]) {
        let Some(expected_items) = self.expected.as_array() else {
            self.mismatch(actual);
            return;
        };

        for idx in 0..actual_items.len().max(expected_items.len()) {
            let path = self.path.append(Key::Idx(idx));
            self.compare_child(path, actual_items.get(idx), expected_items.get(idx));
        }
    }

    fn on_object(&mut self, actual: &'a Value, actual_map: &'a Map<String, Value>) {
        let Some(expected_map) = self.expected.as_object() else {
            self.mismatch(actual);
            return;
        };

        let all_keys = expected_map
            .keys()
            .chain(actual_map.keys())
            .collect::<BTreeSet<_>>();
        for key in all_keys {
            let path = self.path.append(Key::Field(key));
            self.compare_child(path, actual_map.get(key), expected_map.get(key));
        }
    }

    fn compare_child(
        &mut self,
        path: Path<'a>,
        actual: Option<&'a Value>,
        expected: Option<&'a Value>,
    ) {
        match (actual, expected) {
            (Some(actual), Some(expected)) => {
                diff_with(actual, expected, self.config, path, self.acc);
            }
            (None, None) => unreachable!("at least one side should have the entry"),
            (actual, expected) => self.acc.push(Difference {
                path,
                actual,
                expected,
            }),
        }
    }

    fn mismatch(&mut self, actual: &'a Value) {
        self.acc.push(Difference {
            path: self.path.clone(),
            actual: Some(actual),
            expected: Some(self.expected),
        });
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct Difference<'a> {
    path: Path<'a>,
    actual: Option<&'a Value>,
    expected: Option<&'a Value>,
}

impl<'a> fmt::Display for Difference<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.actual, &self.expected) {
            (Some(actual), Some(expected)) => {
                writeln!(f, "json atoms at path \"{}\" are not equal:", self.path)?;
                writeln!(f, "    expected:")?;
                writeln!(f, "{}", format!("{:#}", expected).indent(8))?;
                writeln!(f, "    actual:")?;
                write!(f, "{}", format!("{:#}", actual).indent(8))?;
            }
            (None, Some(_)) => {
                write!(
                    f,
                    "json atom at path \"{}\" is missing from actual",
                    self.path
                )?;
            }
            (Some(_), None) => {
                write!(
                    f,
                    "json atom at path \"{}\" is missing from expected",
                    self.path
                )?;
            }
            (None, None) => unreachable!("can't both be missing"),
        }

        Ok(())
    }
}

fn fold_json<'a>(json: &'a Value, folder: &mut DiffFolder<'a, '_>) {
    match json {
        Value::Null => folder.on_null(json),
        Value::Bool(_) => folder.on_bool(json),
        Value::Number(_) => folder.on_number(json),
        Value::String(_) => folder.on_string(json),
        Value::Array(items) => folder.on_array(json, items),
        Value::Object(map) => folder.on_object(json, map),
    }
}
