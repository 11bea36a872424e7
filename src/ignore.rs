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
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::AssertionError;

const WILDCARD: &str = "*";

/// Parsed ignore list, split into the two families that are applied
/// separately during normalization.
///
/// Entries are dot separated field paths such as `data.entity.id`. A path
/// that crosses an array applies to every object element of that array. The
/// form `*.name` targets every field called `name` at any depth.
///
/// # Examples
///
/// ```
/// use json_exact::IgnoreList;
///
/// let ignore = IgnoreList::parse(["id", "data.user", "*.created_at"]).unwrap();
/// assert_eq!(ignore.paths().len(), 2);
/// assert!(ignore.wildcards().contains("created_at"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    paths: Vec<Vec<String>>,
    wildcards: HashSet<String>,
}

impl IgnoreList {
    /// Parses and validates every entry. Nothing is kept if any entry is
    /// invalid.
    pub fn parse<I, S>(entries: I) -> Result<Self, AssertionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ignore = IgnoreList::default();

        for entry in entries {
            match classify(entry.as_ref())? {
                Entry::Wildcard(field) => {
                    ignore.wildcards.insert(field);
                }
                Entry::Path(segments) => ignore.paths.push(segments),
            }
        }

        debug!(
            paths = ignore.paths.len(),
            wildcards = ignore.wildcards.len(),
            "parsed ignore list"
        );

        Ok(ignore)
    }

    /// Plain dotted paths, in the order they were given.
    pub fn paths(&self) -> &[Vec<String>] {
        &self.paths
    }

    /// Field names given in the `*.name` form.
    pub fn wildcards(&self) -> &HashSet<String> {
        &self.wildcards
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.wildcards.is_empty()
    }
}

enum Entry {
    Wildcard(String),
    Path(Vec<String>),
}

/// Segments may be empty: `""` and `a..b` address the JSON key `""`.
fn classify(entry: &str) -> Result<Entry, AssertionError> {
    static WILDCARD_FORM: OnceLock<Regex> = OnceLock::new();
    let wildcard_form = WILDCARD_FORM.get_or_init(|| Regex::new(r"^\*\.([^.]*)$").unwrap());

    let invalid = |reason: &str| AssertionError::InvalidIgnorePath {
        path: entry.to_string(),
        reason: reason.to_string(),
    };

    if let Some(captures) = wildcard_form.captures(entry) {
        let field = &captures[1];
        if field == WILDCARD {
            return Err(invalid("`*` cannot be used as a field name"));
        }
        return Ok(Entry::Wildcard(field.to_string()));
    }

    let segments = entry.split('.').map(str::to_string).collect::<Vec<_>>();

    match segments.iter().position(|segment| segment == WILDCARD) {
        Some(0) => Err(invalid("`*` must be followed by exactly one field name")),
        Some(_) => Err(invalid("`*` is only allowed as the first of two segments")),
        None => Ok(Entry::Path(segments)),
    }
}
