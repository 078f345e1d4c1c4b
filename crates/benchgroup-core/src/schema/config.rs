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

//! Interned configuration tuples.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{Field, SchemaId};

/// An immutable tuple of field values produced by a [`Schema`].
///
/// Configs are interned: projecting equal values through one schema
/// always returns the same handle, so equality and hashing are by
/// identity and cost O(1). Configs are cheap to clone and can be shared
/// across threads.
///
/// [`Schema`]: super::Schema
#[derive(Clone)]
pub struct Config(Arc<ConfigNode>);

struct ConfigNode {
    schema: SchemaId,
    id: u64,
    // Indexed by field storage index, not display order. Trailing
    // empties are trimmed.
    values: Box<[Option<Arc<str>>]>,
}

impl Config {
    pub(crate) fn new(schema: SchemaId, id: u64, values: &[Option<Arc<str>>]) -> Self {
        Self(Arc::new(ConfigNode {
            schema,
            id,
            values: values.into(),
        }))
    }

    /// The id of the schema that produced this config.
    #[inline]
    pub fn schema_id(&self) -> SchemaId {
        self.0.schema
    }

    /// The value of `field`, or `""` if unset.
    ///
    /// # Panics
    ///
    /// Panics if `field` belongs to a different schema.
    pub fn get(&self, field: &Field) -> &str {
        assert!(
            field.schema == self.0.schema,
            "Config and Field have different Schemas"
        );
        self.raw(field.index)
    }

    /// Number of stored values, up to the last non-empty one.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.values.len()
    }

    /// Whether every value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.values.is_empty()
    }

    #[inline]
    pub(crate) fn raw(&self, index: usize) -> &str {
        self.0
            .values
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or("")
    }

    pub(crate) fn values_eq(&self, row: &[Option<Arc<str>>]) -> bool {
        *self.0.values == *row
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.0.schema == other.0.schema && self.0.id == other.0.id
    }
}

impl Eq for Config {}

impl Hash for Config {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.schema.hash(state);
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = (0..self.len()).map(|i| self.raw(i)).collect();
        f.debug_struct("Config")
            .field("schema", &self.0.schema)
            .field("id", &self.0.id)
            .field("values", &values)
            .finish()
    }
}
