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

use crate::schema::{Config, Field, Schema};

impl Schema {
    /// The fields, in display order, on which at least two of `configs`
    /// differ.
    ///
    /// Useful for warning that aggregating results hid configuration
    /// differences, typically over configs from
    /// [`ProjectionParser::residue`](crate::ProjectionParser::residue).
    ///
    /// # Panics
    ///
    /// Panics if any config belongs to a different schema.
    pub fn non_singular_fields(&self, configs: &[Config]) -> Vec<Field> {
        let Some((first, rest)) = configs.split_first() else {
            return Vec::new();
        };
        for config in configs {
            self.check_config(config);
        }
        self.fields()
            .iter()
            .filter(|field| {
                let base = first.get(field);
                rest.iter().any(|c| c.get(field) != base)
            })
            .cloned()
            .collect()
    }
}
