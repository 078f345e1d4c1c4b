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

//! Ordering of configs.
//!
//! Configs sort lexicographically by field, in display order. Each field
//! compares with the order its projection named (`@alpha`, `@num`, a fixed
//! list, or order of first observation). Values that differ but compare
//! equal under the field's order fall back to byte-wise order, so the
//! overall order is total.

use std::cmp::Ordering;

use crate::schema::{Config, Schema};

impl Schema {
    /// Compare two configs of this schema.
    ///
    /// # Panics
    ///
    /// Panics if either config belongs to a different schema.
    pub fn compare(&self, a: &Config, b: &Config) -> Ordering {
        assert!(
            a.schema_id() == self.id() && b.schema_id() == self.id(),
            "cannot compare Configs from different Schemas"
        );
        self.compare_unchecked(a, b)
    }

    /// Whether `a` sorts before `b`.
    pub fn less(&self, a: &Config, b: &Config) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Sort configs of this schema.
    ///
    /// # Panics
    ///
    /// Panics if any config belongs to a different schema.
    pub fn sort_configs(&self, configs: &mut [Config]) {
        assert!(
            configs.iter().all(|c| c.schema_id() == self.id()),
            "cannot compare Configs from different Schemas"
        );
        configs.sort_by(|a, b| self.compare_unchecked(a, b));
    }

    fn compare_unchecked(&self, a: &Config, b: &Config) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        for field in self.fields() {
            let x = a.raw(field.index());
            let y = b.raw(field.index());
            if x != y {
                return self
                    .field_order(field)
                    .compare(x, y)
                    .then_with(|| x.cmp(y));
            }
        }
        Ordering::Equal
    }
}
