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

//! Error types for filter and projection expressions.

use thiserror::Error;

/// A syntax error in a filter or projection expression.
///
/// The error records the full expression text and the byte offset of the
/// offending token, so callers can point at the exact character. Its
/// `Display` form renders a caret under that character:
///
/// ```text
/// syntax error: missing ")"
///     (a:b
///         ^
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("syntax error: {message}\n\t{query}\n\t{caret}", caret = caret_line(.query, .offset))]
pub struct SyntaxError {
    /// The original expression text.
    pub query: String,
    /// Byte offset of the error in `query`.
    pub offset: usize,
    /// Human-readable error message.
    pub message: String,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(query: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            offset,
            message: message.into(),
        }
    }

    /// The printable-character column of the error, for display.
    pub fn column(&self) -> usize {
        char_column(&self.query, self.offset)
    }
}

fn char_column(query: &str, offset: usize) -> usize {
    query
        .char_indices()
        .take_while(|&(i, _)| i < offset)
        .filter(|&(_, c)| !c.is_control())
        .count()
}

fn caret_line(query: &str, offset: &usize) -> String {
    format!("{}^", " ".repeat(char_column(query, *offset)))
}

/// Result type for expression parsing.
pub type ParseResult<T> = Result<T, SyntaxError>;
