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

//! Prefix-merged headers over sorted config sequences.

use crate::schema::{Config, Schema};

/// One cell of a config header: a run of configs that agree on every
/// field up to and including `field`.
///
/// `configs[start..start + len]` all have `value` for field number
/// `field` (in display order) and share the values of the cell above.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigHeader {
    /// Index of the field in [`Schema::fields`].
    pub field: usize,
    /// Index of the first config covered.
    pub start: usize,
    /// Number of configs covered. Visually, the cell span.
    pub len: usize,
    /// The value shared by the covered configs.
    pub value: String,
}

impl ConfigHeader {
    /// Combine a sequence of configs by common prefixes.
    ///
    /// Given the configs
    ///
    /// ```text
    /// a:1 b:1 c:1
    /// a:1 b:1 c:2
    /// a:2 b:2 c:2
    /// a:2 b:3 c:3
    /// ```
    ///
    /// the levels are
    ///
    /// ```text
    ///         +-----------+-----------+
    /// Level 0 |    a:1    |    a:2    |
    ///         +-----------+-----+-----+
    /// Level 1 |    b:1    | b:2 | b:3 |
    ///         +-----+-----+-----+-----+
    /// Level 2 | c:1 | c:2 | c:2 | c:3 |
    ///         +-----+-----+-----+-----+
    /// ```
    ///
    /// There is one level per schema field. Each level partitions the
    /// whole sequence and refines the level above it. An empty sequence
    /// yields no levels.
    ///
    /// # Panics
    ///
    /// Panics if any config belongs to a different schema.
    pub fn build(schema: &Schema, configs: &[Config]) -> Vec<Vec<ConfigHeader>> {
        if configs.is_empty() {
            return Vec::new();
        }
        for config in configs {
            schema.check_config(config);
        }

        let fields = schema.fields();
        let mut levels: Vec<Vec<ConfigHeader>> = Vec::with_capacity(fields.len());
        let mut parents = vec![(0, configs.len())];
        for (level, field) in fields.iter().enumerate() {
            let mut cells: Vec<ConfigHeader> = Vec::new();
            for &(start, len) in &parents {
                // Runs never cross a parent boundary.
                let mut run: Option<usize> = None;
                for (j, config) in configs[start..start + len].iter().enumerate() {
                    let value = config.get(field);
                    match run {
                        Some(i) if cells[i].value == value => cells[i].len += 1,
                        _ => {
                            run = Some(cells.len());
                            cells.push(ConfigHeader {
                                field: level,
                                start: start + j,
                                len: 1,
                                value: value.to_string(),
                            });
                        }
                    }
                }
            }
            parents = cells.iter().map(|c| (c.start, c.len)).collect();
            levels.push(cells);
        }
        levels
    }
}
