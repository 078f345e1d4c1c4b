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

//! Projection expression parser.

use std::fmt;

use super::check_length;
use crate::error::ParseResult;
use crate::lex::{quote_word, TokenKind, Tokenizer};
use crate::limits::Limits;

/// How the values of a projected key are ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionOrder {
    /// Order of first observation. Also spelled `@first`.
    First,
    /// An explicit `@(v1 v2 ...)` list. Values outside the list are
    /// filtered out.
    Fixed(Vec<String>),
    /// A named order such as `@alpha` or `@num`.
    Named(String),
}

/// One comma-separated part of a projection expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    pub key: String,
    pub order: ProjectionOrder,
    /// Byte offset of the key.
    pub key_offset: usize,
    /// Byte offset of the order, or of the end of the key when no order
    /// was written.
    pub order_offset: usize,
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_word(&self.key))?;
        match &self.order {
            ProjectionOrder::First => Ok(()),
            ProjectionOrder::Named(name) => write!(f, "@{}", quote_word(name)),
            ProjectionOrder::Fixed(values) => {
                f.write_str("@(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(&quote_word(v))?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parse a projection expression with default [`Limits`].
///
/// An empty expression yields no parts.
///
/// # Examples
///
/// ```
/// use benchgroup_core::parse::{parse_projection, ProjectionOrder};
///
/// let parts = parse_projection("a, b@alpha c@(x y)").unwrap();
/// assert_eq!(parts.len(), 3);
/// assert_eq!(parts[1].order, ProjectionOrder::Named("alpha".into()));
/// assert_eq!(parts[2].to_string(), "c@(x y)");
/// ```
pub fn parse_projection(q: &str) -> ParseResult<Vec<Projection>> {
    parse_projection_with_limits(q, &Limits::default())
}

/// Parse a projection expression.
pub fn parse_projection_with_limits(q: &str, limits: &Limits) -> ParseResult<Vec<Projection>> {
    check_length(q, limits)?;
    let mut parts = Vec::new();
    let mut toks = Tokenizer::new(q);
    loop {
        let (tok, rest) = toks.key()?;
        if tok.kind == TokenKind::Eof {
            break;
        }
        // The separating comma is optional, but can't lead.
        if tok.kind == TokenKind::Comma && !parts.is_empty() {
            toks = rest;
        }
        let (part, rest) = parse_part(toks, limits)?;
        parts.push(part);
        toks = rest;
    }
    toks.end()?;
    Ok(parts)
}

fn parse_part<'a>(toks: Tokenizer<'a>, limits: &Limits) -> ParseResult<(Projection, Tokenizer<'a>)> {
    let (key, rest) = toks.key()?;
    if !key.is_word() {
        return Err(toks.error("expected key"));
    }
    let key_offset = key.offset;
    let mut part = Projection {
        order_offset: key.offset + key.text.len(),
        key: key.text,
        order: ProjectionOrder::First,
        key_offset,
    };

    let (at, after_at) = rest.key()?;
    if at.kind != TokenKind::At {
        return Ok((part, rest));
    }

    let (order, mut toks) = after_at.key()?;
    part.order_offset = order.offset;
    if order.is_word() {
        part.order = match order.text.as_str() {
            "first" => ProjectionOrder::First,
            _ => ProjectionOrder::Named(order.text),
        };
        return Ok((part, toks));
    }
    if order.kind != TokenKind::LParen {
        return Err(after_at.error("expected named sort order or parenthesized list"));
    }

    let mut fixed = Vec::new();
    loop {
        let (tok, next) = toks.key()?;
        if tok.is_word() {
            if fixed.len() >= limits.max_values {
                return Err(toks.error("too many values"));
            }
            fixed.push(tok.text);
        } else if tok.kind == TokenKind::RParen {
            if fixed.is_empty() {
                return Err(toks.error("nothing to match"));
            }
            part.order = ProjectionOrder::Fixed(fixed);
            return Ok((part, next));
        } else {
            return Err(toks.error("missing )"));
        }
        toks = next;
    }
}
