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

use std::fmt;

use thiserror::Error;

/// Which of the two compared documents a failure refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Actual,
    Expected,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Actual => write!(f, "actual"),
            Side::Expected => write!(f, "expected"),
        }
    }
}

/// Error type for a comparison run.
///
/// Everything except [`AssertionError::Mismatch`] is fatal: the inputs or the
/// ignore list break the contract of the comparison and no verdict is possible.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// One of the documents is not valid JSON.
    #[error("failed to decode {side} JSON: {source}\njson:\n{json}")]
    Decode {
        side: Side,
        #[source]
        source: serde_json::Error,
        json: String,
    },

    /// Only documents with an object at the root can be compared.
    #[error("{side} JSON must have an object at the root")]
    NotAnObject { side: Side },

    #[error("invalid ignore path \"{path}\": {reason}")]
    InvalidIgnorePath { path: String, reason: String },

    /// A full reset reached an array nested directly inside another array.
    #[error("cannot reset nested array at path \"{path}\"")]
    UnsupportedShape { path: String },

    /// The documents differ after normalization.
    #[error("{0}")]
    Mismatch(MismatchReport),
}

impl AssertionError {
    /// Returns `true` for errors that abort the comparison instead of
    /// producing a verdict.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AssertionError::Mismatch(_))
    }
}

/// Outcome of a failed comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    /// Unified diff of the two documents, `-` for expected and `+` for actual.
    pub diff: String,
    /// One entry per path at which the documents disagree.
    pub differences: Vec<String>,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compare value is mismatch (-expected +actual):\n{}",
            self.diff
        )
    }
}
