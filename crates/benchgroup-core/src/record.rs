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

//! Benchmark result records.
//!
//! A [`Record`] is one benchmark result line together with the file-level
//! configuration in effect for it. Readers of the benchmark text format
//! produce records; this crate only consumes them.
//!
//! # Examples
//!
//! ```
//! use benchgroup_core::Record;
//!
//! let rec = Record::new("Copy/size=4k-16")
//!     .with_file_config("goos", "linux")
//!     .with_value(120.0, "sec/op");
//!
//! assert_eq!(rec.name.base(), "Copy");
//! assert_eq!(rec.file_config_value("goos"), Some("linux"));
//! assert_eq!(rec.value("sec/op"), Some(120.0));
//! ```

use std::collections::HashMap;
use std::fmt;

/// A single file-level configuration pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub key: String,
    pub value: String,
}

/// A single measurement of a benchmark result.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Measured value, in tidied base units.
    pub value: f64,
    /// Tidied unit, such as "sec/op".
    pub unit: String,
    /// Value as it appeared in the input, if it was tidied.
    pub orig_value: f64,
    /// Unit as it appeared in the input, such as "ns/op". Empty if the
    /// unit was not transformed.
    pub orig_unit: String,
}

impl Value {
    /// Create a measurement with no separate original unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            orig_value: 0.0,
            orig_unit: String::new(),
        }
    }

    /// Record the untidied value and unit this measurement came from.
    pub fn with_original(mut self, orig_value: f64, orig_unit: impl Into<String>) -> Self {
        self.orig_value = orig_value;
        self.orig_unit = orig_unit.into();
        self
    }
}

/// A full benchmark name, including all sub-benchmark configuration.
///
/// For example, `Copy/size=4k/align=8-16` has base name `Copy`, sub-name
/// parts `/size=4k` and `/align=8`, and the GOMAXPROCS part `-16`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(full: impl Into<String>) -> Self {
        Self(full.into())
    }

    /// The full name, verbatim.
    #[inline]
    pub fn full(&self) -> &str {
        &self.0
    }

    /// The base name, without configuration keys or GOMAXPROCS.
    pub fn base(&self) -> &str {
        match memchr::memchr(b'/', self.0.as_bytes()) {
            Some(slash) => &self.0[..slash],
            None => self.split_gomaxprocs().0,
        }
    }

    /// Split the name into the base name and its configuration parts.
    ///
    /// Each part is `/key=value`, a positional `/value`, or the trailing
    /// `-N` GOMAXPROCS suffix. Concatenating the base and all parts
    /// reconstructs the full name.
    pub fn parts(&self) -> (&str, Vec<&str>) {
        let (buf, gomaxprocs) = self.split_gomaxprocs();
        let mut parts = Vec::new();
        let mut prev = 0;
        for slash in memchr::memchr_iter(b'/', buf.as_bytes()) {
            parts.push(&buf[prev..slash]);
            prev = slash;
        }
        parts.push(&buf[prev..]);
        if let Some(procs) = gomaxprocs {
            parts.push(procs);
        }
        let base = parts.remove(0);
        (base, parts)
    }

    /// Split off a trailing `-N` suffix, where N is one or more digits.
    fn split_gomaxprocs(&self) -> (&str, Option<&str>) {
        let bytes = self.0.as_bytes();
        for i in (0..bytes.len()).rev() {
            if bytes[i] == b'-' && i < bytes.len() - 1 {
                return (&self.0[..i], Some(&self.0[i..]));
            }
            if !bytes[i].is_ascii_digit() {
                break;
            }
        }
        (&self.0, None)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single benchmark result and all of its measurements.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Full benchmark name.
    pub name: Name,
    /// Number of iterations the measurements were averaged over.
    pub iters: u64,
    /// Measurements of this result.
    pub values: Vec<Value>,

    // File configuration in the order keys were first set. Keys are
    // unique; `config_pos` indexes them.
    file_config: Vec<FileConfig>,
    config_pos: HashMap<String, usize>,
}

impl Record {
    /// Create a record with the given full name, one iteration, and no
    /// configuration or measurements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Name::new(name),
            iters: 1,
            ..Self::default()
        }
    }

    /// Builder form of [`Record::set_file_config`].
    pub fn with_file_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_file_config(key, value);
        self
    }

    /// Append a measurement.
    pub fn with_value(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.values.push(Value::new(value, unit));
        self
    }

    /// The file configuration pairs, in order.
    pub fn file_config(&self) -> &[FileConfig] {
        &self.file_config
    }

    /// Index of `key` in [`Record::file_config`].
    pub fn file_config_index(&self, key: &str) -> Option<usize> {
        self.config_pos.get(key).copied()
    }

    /// Value of file configuration `key`, if present.
    pub fn file_config_value(&self, key: &str) -> Option<&str> {
        self.file_config_index(key)
            .map(|pos| self.file_config[pos].value.as_str())
    }

    /// Set file configuration `key` to `value`, adding the key if needed.
    ///
    /// An empty `value` deletes the key. Deletion swaps the last pair into
    /// the deleted slot, so the order of the remaining keys stays
    /// deterministic.
    pub fn set_file_config(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.delete_file_config(&key);
            return;
        }
        match self.config_pos.get(&key) {
            Some(&pos) => self.file_config[pos].value = value,
            None => {
                self.config_pos.insert(key.clone(), self.file_config.len());
                self.file_config.push(FileConfig { key, value });
            }
        }
    }

    fn delete_file_config(&mut self, key: &str) {
        let Some(pos) = self.config_pos.remove(key) else {
            return;
        };
        self.file_config.swap_remove(pos);
        if let Some(moved) = self.file_config.get(pos) {
            self.config_pos.insert(moved.key.clone(), pos);
        }
    }

    /// The measurement with the given unit.
    pub fn value(&self, unit: &str) -> Option<f64> {
        self.values.iter().find(|v| v.unit == unit).map(|v| v.value)
    }
}
