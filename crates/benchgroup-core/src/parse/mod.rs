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

//! Recursive-descent parsers for filter and projection expressions.
//!
//! # Filters
//!
//! ```text
//! expr    = andExpr {"OR" andExpr}
//! andExpr = match {"AND"? match}
//! match   = "(" expr ")"
//!         | "-" match
//!         | "*"
//!         | key ":" value
//!         | key ":" "(" value {value} ")"
//! key     = word
//! value   = word | "/" regexp "/"
//! ```
//!
//! # Projections
//!
//! ```text
//! expr  = part {","? part}
//! part  = key
//!       | key "@" order
//!       | key "@" "(" word {word} ")"
//! order = word
//! ```
//!
//! Both parsers return a [`SyntaxError`](crate::SyntaxError) locating the
//! first offending token; no partial result is ever returned.

mod filter;
mod projection;

pub use filter::{parse_filter, parse_filter_with_limits, FilterExpr, Op};
pub use projection::{parse_projection, parse_projection_with_limits, Projection, ProjectionOrder};

use crate::error::{ParseResult, SyntaxError};
use crate::limits::Limits;

/// Reject expressions longer than the configured limit before lexing.
fn check_length(q: &str, limits: &Limits) -> ParseResult<()> {
    if q.len() > limits.max_expression_len {
        tracing::debug!(
            len = q.len(),
            max = limits.max_expression_len,
            "rejecting oversized expression"
        );
        let message = format!(
            "expression too long: {} bytes exceeds maximum {}",
            q.len(),
            limits.max_expression_len
        );
        return Err(SyntaxError::new(q, 0, message));
    }
    Ok(())
}
