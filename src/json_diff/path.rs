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

/// Location of a node inside a JSON tree, rendered as `.a.b[0].c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path<'a> {
    Root,
    Keys(Vec<Key<'a>>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key<'a> {
    Idx(usize),
    Field(&'a str),
}

impl<'a> fmt::Display for Key<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Idx(idx) => write!(f, "[{}]", idx),
            Key::Field(key) => write!(f, ".{}", key),
        }
    }
}

impl<'a> Path<'a> {
    pub(crate) fn append(&self, next: Key<'a>) -> Path<'a> {
        match self {
            Path::Root => Path::Keys(vec![next]),
            Path::Keys(list) => {
                let mut copy = list.clone();
                copy.push(next);
                Path::Keys(copy)
            }
        }
    }
}

impl<'a> fmt::Display for Path<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Path::Root => write!(f, "(root)"),
            Path::Keys(keys) => {
                for key in keys {
                    write!(f, "{}", key)?;
                }
                Ok(())
            }
        }
    }
}

/// Chain of keys from the root, borrowed from the callers' stack frames.
///
/// Extending it does not allocate; [`Trail::to_path`] builds the owned
/// [`Path`] only when a location has to be shown.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Trail<'a> {
    parent: Option<&'a Trail<'a>>,
    key: Option<Key<'a>>,
}

impl Trail<'static> {
    pub(crate) fn root() -> Self {
        Trail {
            parent: None,
            key: None,
        }
    }
}

impl<'a> Trail<'a> {
    pub(crate) fn push(&'a self, key: Key<'a>) -> Trail<'a> {
        Trail {
            parent: Some(self),
            key: Some(key),
        }
    }

    pub(crate) fn to_path(&self) -> Path<'a> {
        let mut keys = vec![];
        let mut current = Some(self);
        while let Some(trail) = current {
            if let Some(key) = trail.key {
                keys.push(key);
            }
            current = trail.parent;
        }

        if keys.is_empty() {
            return Path::Root;
        }
        keys.reverse();
        Path::Keys(keys)
    }
}

impl<'a> fmt::Display for Trail<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
