// Benchgroup - Benchmark result filtering and grouping
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Extractors pull one component out of a [`Record`].
//!
//! Keys take one of these forms:
//!
//! - `.name`: the base benchmark name, without sub-name configuration.
//! - `.fullname`: the full benchmark name.
//! - `/key`: a sub-name configuration key. `/gomaxprocs` also recognizes
//!   the trailing `-N` suffix.
//! - anything else: a file configuration key.
//!
//! A key that is absent from a record extracts as the empty string.

use std::borrow::Cow;

use thiserror::Error;

use crate::record::Record;

/// Error resolving an extractor key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("key must not be empty")]
    EmptyKey,
}

/// A resolved key extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extractor {
    /// `.name`
    Name,
    /// `.fullname`
    FullName,
    /// `.fullname` with some components normalized to wildcards.
    FullNameExcluding(FullNameRewrite),
    /// A `/key` sub-name part. Holds the `/key=` prefix to search for.
    NamePart { prefix: String, gomaxprocs: bool },
    /// A file configuration key.
    FileKey(String),
}

/// Which components of a full name to replace with wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullNameRewrite {
    /// `/key=` prefixes whose values become `*`.
    replace: Vec<String>,
    name: bool,
    gomaxprocs: bool,
}

impl Extractor {
    /// Resolve a key to its extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::EmptyKey`] for an empty key.
    pub fn resolve(key: &str) -> Result<Self, ExtractError> {
        Ok(match key {
            "" => return Err(ExtractError::EmptyKey),
            ".name" => Extractor::Name,
            ".fullname" => Extractor::FullName,
            _ if key.starts_with('/') => Extractor::NamePart {
                prefix: format!("{}=", key),
                gomaxprocs: key == "/gomaxprocs",
            },
            _ => Extractor::FileKey(key.to_string()),
        })
    }

    /// An extractor for the full name with the given keys normalized away.
    ///
    /// Each excluded `/key` part becomes `/key=*`, an excluded
    /// `/gomaxprocs` suffix becomes `-*`, and excluding `.name` replaces
    /// the base name with `*`. Other keys in `exclude` are ignored.
    pub fn full_name_excluding<S: AsRef<str>>(exclude: &[S]) -> Self {
        let mut rewrite = FullNameRewrite {
            replace: Vec::new(),
            name: false,
            gomaxprocs: false,
        };
        for key in exclude.iter().map(AsRef::as_ref) {
            if key == ".name" {
                rewrite.name = true;
            }
            if !key.starts_with('/') {
                continue;
            }
            rewrite.replace.push(format!("{}=", key));
            if key == "/gomaxprocs" {
                rewrite.gomaxprocs = true;
            }
        }
        if rewrite.replace.is_empty() && !rewrite.name {
            return Extractor::FullName;
        }
        Extractor::FullNameExcluding(rewrite)
    }

    /// Extract this component from `rec`.
    pub fn extract<'r>(&self, rec: &'r Record) -> Cow<'r, str> {
        match self {
            Extractor::Name => Cow::Borrowed(rec.name.base()),
            Extractor::FullName => Cow::Borrowed(rec.name.full()),
            Extractor::FullNameExcluding(rewrite) => rewrite.apply(rec),
            Extractor::NamePart { prefix, gomaxprocs } => {
                Cow::Borrowed(name_part(rec, prefix, *gomaxprocs))
            }
            Extractor::FileKey(key) => Cow::Borrowed(rec.file_config_value(key).unwrap_or("")),
        }
    }
}

fn name_part<'r>(rec: &'r Record, prefix: &str, gomaxprocs: bool) -> &'r str {
    let (_, parts) = rec.name.parts();
    if gomaxprocs {
        if let Some(procs) = parts.last().and_then(|last| last.strip_prefix('-')) {
            return procs;
        }
    }
    parts
        .iter()
        .find_map(|part| part.strip_prefix(prefix))
        .unwrap_or("")
}

impl FullNameRewrite {
    fn apply<'r>(&self, rec: &'r Record) -> Cow<'r, str> {
        let full = rec.name.full();
        let touched = self.name
            || self.replace.iter().any(|k| full.contains(k.as_str()))
            || (self.gomaxprocs && memchr::memchr(b'-', full.as_bytes()).is_some());
        if !touched {
            return Cow::Borrowed(full);
        }

        let (base, parts) = rec.name.parts();
        let mut out = String::with_capacity(full.len());
        out.push_str(if self.name { "*" } else { base });
        'parts: for part in parts {
            for k in &self.replace {
                if part.starts_with(k.as_str()) {
                    out.push_str(k);
                    out.push('*');
                    continue 'parts;
                }
            }
            if self.gomaxprocs && part.starts_with('-') {
                out.push_str("-*");
                continue;
            }
            out.push_str(part);
        }
        Cow::Owned(out)
    }
}
