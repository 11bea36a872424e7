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

use serde_json::Value;
use similar::TextDiff;

use super::misc::integral_floats_as_ints;
use super::NumericMode;

/// Renders a unified diff between the two trees, `-` lines coming from
/// `expected` and `+` lines from `actual`.
pub(crate) fn render(actual: &Value, expected: &Value, numeric_mode: NumericMode) -> String {
    let expected_text = pretty(expected, numeric_mode);
    let actual_text = pretty(actual, numeric_mode);

    let diff = TextDiff::from_lines(&expected_text, &actual_text);
    let mut unified = diff.unified_diff();
    unified.context_radius(3).header("expected", "actual");
    unified.to_string()
}

fn pretty(value: &Value, numeric_mode: NumericMode) -> String {
    let mut text = match numeric_mode {
        NumericMode::Strict => format!("{:#}", value),
        NumericMode::AssumeFloat => {
            let mut value = value.clone();
            integral_floats_as_ints(&mut value);
            format!("{:#}", value)
        }
    };
    text.push('\n');
    text
}
