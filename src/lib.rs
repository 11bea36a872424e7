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

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::json_diff::Config;

mod error;
mod ignore;
mod json_diff;
mod normalize;
mod reporter;

pub use error::{AssertionError, MismatchReport, Side};
pub use ignore::IgnoreList;
pub use json_diff::NumericMode;
pub use normalize::normalize;
pub use reporter::{Failure, Recorder, Reporter, SoftAssertions};

/// Builder for exact JSON comparisons.
///
/// # Examples
///
/// ```
/// use json_exact::JsonExact;
///
/// let exact = JsonExact::new()
///     .ignore_path("id")
///     .ignore_path("*.created_at");
///
/// let actual = r#"{"id":"1234","entity":{"created_at":"2023-05-04T15:13:15Z","name":"dummy"}}"#;
/// let expected = r#"{"id":"","entity":{"created_at":"","name":"dummy"}}"#;
/// assert!(exact.compare(actual, expected).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonExact {
    ignore_paths: Vec<String>,
    numeric_mode: NumericMode,
}

impl JsonExact {
    /// Constructs a builder with no ignored paths that compares numbers as
    /// floats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a builder from loaded [`Options`].
    pub fn from_options(options: Options) -> Self {
        Self {
            ignore_paths: options.ignore,
            numeric_mode: options.numeric_mode,
        }
    }

    /// Adds a path whose value is reset to its zero value in the actual
    /// document before comparing.
    ///
    /// Paths are dot separated (`data.entity.id`). When a path crosses an
    /// array, the rest of it is applied to every object element of that
    /// array. `*.name` resets every field called `name` at any depth.
    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.push(path.into());
        self
    }

    /// Adds several paths, see [`JsonExact::ignore_path`].
    pub fn ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Changes how numbers are compared.
    ///
    /// The default is [`NumericMode::AssumeFloat`].
    pub fn numeric_mode(mut self, numeric_mode: NumericMode) -> Self {
        self.numeric_mode = numeric_mode;
        self
    }

    /// Decodes both documents, normalizes the actual one and compares it to
    /// the expected one.
    ///
    /// The expected document is never normalized. Keys missing from either
    /// side, extra keys, and differing array lengths are all mismatches.
    pub fn compare(&self, actual: &str, expected: &str) -> Result<(), AssertionError> {
        let expected = decode(expected, Side::Expected)?;
        let mut actual = decode(actual, Side::Actual)?;

        let ignore = IgnoreList::parse(&self.ignore_paths)?;
        normalize(&mut actual, &ignore)?;

        let differences = json_diff::diff(&actual, &expected, Config::new(self.numeric_mode));
        if differences.is_empty() {
            debug!("documents are equal");
            return Ok(());
        }

        debug!(count = differences.len(), "documents differ");
        Err(AssertionError::Mismatch(MismatchReport {
            diff: json_diff::render(&actual, &expected, self.numeric_mode),
            differences: differences.iter().map(|d| d.to_string()).collect(),
        }))
    }

    /// Runs [`JsonExact::compare`] and hands any failure to `reporter`.
    ///
    /// Returns `true` when the documents are equal.
    pub fn assert_with<R: Reporter + ?Sized>(
        &self,
        reporter: &mut R,
        actual: &str,
        expected: &str,
    ) -> bool {
        match self.compare(actual, expected) {
            Ok(()) => true,
            Err(AssertionError::Mismatch(report)) => {
                reporter.error(report);
                false
            }
            Err(err) => {
                reporter.fatal(err);
                false
            }
        }
    }
}

/// Comparison options as they are stored in a JSON config file.
///
/// # Examples
///
/// ```
/// use json_exact::{NumericMode, Options};
///
/// let options = Options::from_json_str(r#"{"ignore": ["id"], "numeric_mode": "strict"}"#).unwrap();
/// assert_eq!(options.ignore, vec!["id".to_string()]);
/// assert_eq!(options.numeric_mode, NumericMode::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Ignore paths, same syntax as [`JsonExact::ignore_path`].
    pub ignore: Vec<String>,
    pub numeric_mode: NumericMode,
}

impl Options {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compares two JSON documents for exact equality after resetting the fields
/// named in `ignore_paths` in `actual`.
///
/// # Examples
///
/// ```
/// use json_exact::{compare_json_exact, AssertionError};
///
/// assert!(compare_json_exact(r#"{"a":3}"#, r#"{"a":3.0}"#, &[]).is_ok());
///
/// let err = compare_json_exact(r#"{"a":1,"b":2}"#, r#"{"a":1}"#, &[]).unwrap_err();
/// assert!(matches!(err, AssertionError::Mismatch(_)));
/// ```
pub fn compare_json_exact(
    actual: &str,
    expected: &str,
    ignore_paths: &[&str],
) -> Result<(), AssertionError> {
    JsonExact::new()
        .ignore_paths(ignore_paths.iter().copied())
        .compare(actual, expected)
}

/// Same as [`compare_json_exact`], routing failures to `reporter`.
pub fn assert_json_exact_with<R: Reporter + ?Sized>(
    reporter: &mut R,
    actual: &str,
    expected: &str,
    ignore_paths: &[&str],
) -> bool {
    JsonExact::new()
        .ignore_paths(ignore_paths.iter().copied())
        .assert_with(reporter, actual, expected)
}

/// Panics with the rendered report unless the two documents are exactly
/// equal after normalization.
///
/// # Examples
///
/// ```
/// use json_exact::assert_json_exact;
///
/// assert_json_exact!(r#"{"a":1}"#, r#"{"a":1}"#);
/// assert_json_exact!(
///     r#"{"data":[{"name":"taro","age":10}]}"#,
///     r#"{"data":[{"name":"","age":10}]}"#,
///     ignore = ["data.name"],
/// );
/// ```
#[macro_export]
macro_rules! assert_json_exact {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_json_exact!($actual, $expected, ignore = [])
    };
    ($actual:expr, $expected:expr, ignore = [$($path:expr),* $(,)?] $(,)?) => {
        if let Err(err) = $crate::compare_json_exact(&$actual, &$expected, &[$($path),*]) {
            panic!("{}", err);
        }
    };
}

fn decode(json: &str, side: Side) -> Result<Value, AssertionError> {
    let value = serde_json::from_str::<Value>(json).map_err(|source| AssertionError::Decode {
        side,
        source,
        json: json.to_string(),
    })?;

    if !value.is_object() {
        return Err(AssertionError::NotAnObject { side });
    }

    Ok(value)
}
