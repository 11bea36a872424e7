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

use std::thread;

use crate::error::{AssertionError, MismatchReport};

/// Sink for comparison failures.
///
/// `fatal` receives errors that stop the comparison (bad input, bad ignore
/// list). `error` receives mismatches; the caller may keep asserting after it.
pub trait Reporter {
    fn fatal(&mut self, error: AssertionError);
    fn error(&mut self, report: MismatchReport);
}

/// A failure collected by [`Recorder`].
#[derive(Debug)]
pub enum Failure {
    Fatal(AssertionError),
    Mismatch(MismatchReport),
}

/// Reporter that keeps every failure for later inspection.
#[derive(Debug, Default)]
pub struct Recorder {
    failures: Vec<Failure>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

impl Reporter for Recorder {
    fn fatal(&mut self, error: AssertionError) {
        self.failures.push(Failure::Fatal(error));
    }

    fn error(&mut self, report: MismatchReport) {
        self.failures.push(Failure::Mismatch(report));
    }
}

/// Reporter for use inside `#[test]` functions.
///
/// Fatal errors panic right away. Mismatches are recorded and the test keeps
/// running; when the value is dropped it panics with every recorded mismatch.
///
/// # Examples
///
/// ```should_panic
/// use json_exact::{JsonExact, SoftAssertions};
///
/// let mut soft = SoftAssertions::new();
/// let exact = JsonExact::new();
/// exact.assert_with(&mut soft, r#"{"a":1}"#, r#"{"a":2}"#);
/// exact.assert_with(&mut soft, r#"{"b":1}"#, r#"{"b":1}"#);
/// // panics here, reporting the first comparison
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    mismatches: Vec<MismatchReport>,
}

impl SoftAssertions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mismatches(&self) -> &[MismatchReport] {
        &self.mismatches
    }
}

impl Reporter for SoftAssertions {
    fn fatal(&mut self, error: AssertionError) {
        panic!("{}", error);
    }

    fn error(&mut self, report: MismatchReport) {
        self.mismatches.push(report);
    }
}

impl Drop for SoftAssertions {
    fn drop(&mut self) {
        if self.mismatches.is_empty() || thread::panicking() {
            return;
        }

        let failures = self
            .mismatches
            .iter()
            .map(|report| report.to_string())
            .collect::<Vec<_>>()
            .join("\n-------------\n");
        panic!(
            "{} JSON comparison(s) failed:\n{}",
            self.mismatches.len(),
            failures
        );
    }
}
