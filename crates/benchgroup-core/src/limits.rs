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

//! Resource limits for expression parsing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configurable limits for filter and projection parsing.
///
/// Expressions usually come from command-line flags, but tools may also
/// accept them from less trusted sources. These limits bound the work a
/// single expression can cause, in particular the recursion depth of the
/// filter parser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// Maximum expression length in bytes (default: 64KB).
    pub max_expression_len: usize,
    /// Maximum nesting of parentheses and negations (default: 128).
    pub max_depth: usize,
    /// Maximum values in a `key:(...)` list or fixed order (default: 10k).
    pub max_values: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_expression_len: 64 * 1024, // 64KB
            max_depth: 128,
            max_values: 10_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_expression_len: usize::MAX,
            max_depth: usize::MAX,
            max_values: usize::MAX,
        }
    }
}
