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

//! Filter expression AST and parser.

use std::fmt;

use regex::Regex;

use super::check_length;
use crate::error::ParseResult;
use crate::lex::{quote, quote_value, quote_word, Token, TokenKind, Tokenizer};
use crate::limits::Limits;

/// A boolean operator in a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    Not,
}

/// A parsed filter expression.
#[derive(Debug, Clone)]
pub enum FilterExpr {
    /// `key:value`, matching when the key's value equals `value`.
    Literal {
        key: String,
        value: String,
        offset: usize,
    },
    /// `key:/regexp/`, matching when the key's value matches `regex`
    /// anywhere.
    Regexp {
        key: String,
        /// Pattern source as written between the slashes.
        source: String,
        regex: Regex,
        offset: usize,
    },
    /// A boolean combination. `Not` has exactly one term. An `And` with no
    /// terms matches everything (`*`).
    Op { op: Op, terms: Vec<FilterExpr> },
}

impl FilterExpr {
    /// The expression `*`, which matches everything.
    pub fn all() -> Self {
        FilterExpr::Op {
            op: Op::And,
            terms: Vec::new(),
        }
    }

    /// Test a key value against a `Literal` or `Regexp` match. Boolean
    /// combinations never match a single value.
    pub fn matches_value(&self, value: &str) -> bool {
        match self {
            FilterExpr::Literal { value: lit, .. } => lit == value,
            FilterExpr::Regexp { regex, .. } => regex.is_match(value),
            FilterExpr::Op { .. } => false,
        }
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::Literal { key, value, .. } => {
                write!(f, "{}:{}", quote_word(key), quote_value(value))
            }
            FilterExpr::Regexp { key, source, .. } => write!(f, "{}:/{}/", quote_word(key), source),
            FilterExpr::Op { op: Op::Not, terms } => match terms.first() {
                Some(term) => write!(f, "-{}", term),
                None => f.write_str("-*"),
            },
            FilterExpr::Op { op, terms } => {
                let sep = match (op, terms.is_empty()) {
                    (Op::And, true) => return f.write_str("*"),
                    (_, true) => return f.write_str("-*"),
                    (Op::And, false) => " AND ",
                    (_, false) => " OR ",
                };
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    write!(f, "{}", term)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parse a filter expression with default [`Limits`].
///
/// # Examples
///
/// ```
/// use benchgroup_core::parse::parse_filter;
///
/// let expr = parse_filter("a:b c:(d e) -f:/g?/").unwrap();
/// assert_eq!(expr.to_string(), "(a:b AND (c:d OR c:e) AND -f:/g?/)");
///
/// let err = parse_filter("(a:b").unwrap_err();
/// assert_eq!(err.message, "missing \")\"");
/// assert_eq!(err.offset, 4);
/// ```
pub fn parse_filter(q: &str) -> ParseResult<FilterExpr> {
    parse_filter_with_limits(q, &Limits::default())
}

/// Parse a filter expression.
pub fn parse_filter_with_limits(q: &str, limits: &Limits) -> ParseResult<FilterExpr> {
    check_length(q, limits)?;
    let parser = FilterParser { limits };
    let (expr, toks) = parser.expr(Tokenizer::new(q), 0)?;
    toks.end()?;
    Ok(expr)
}

struct FilterParser<'l> {
    limits: &'l Limits,
}

type Step<'a> = ParseResult<(FilterExpr, Tokenizer<'a>)>;

impl FilterParser<'_> {
    fn expr<'a>(&self, mut toks: Tokenizer<'a>, depth: usize) -> Step<'a> {
        let mut terms = Vec::new();
        loop {
            let (term, rest) = self.and_expr(toks, depth)?;
            terms.push(term);
            toks = rest;
            let (op, rest) = toks.key()?;
            if op.kind != TokenKind::Or {
                break;
            }
            toks = rest;
        }
        Ok((collapse(Op::Or, terms), toks))
    }

    fn and_expr<'a>(&self, toks: Tokenizer<'a>, depth: usize) -> Step<'a> {
        let (term, mut toks) = self.match_expr(toks, depth)?;
        let mut terms = vec![term];
        loop {
            let (op, rest) = toks.key()?;
            match op.kind {
                // "AND" between matches is the same as no operator.
                TokenKind::And => toks = rest,
                TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Word
                | TokenKind::Quoted => {
                    let (term, rest) = self.match_expr(toks, depth)?;
                    terms.push(term);
                    toks = rest;
                }
                TokenKind::RParen | TokenKind::Or | TokenKind::Eof => break,
                _ => return Err(toks.error(format!("unexpected {}", quote(&op.text)))),
            }
        }
        Ok((collapse(Op::And, terms), toks))
    }

    fn match_expr<'a>(&self, start: Tokenizer<'a>, depth: usize) -> Step<'a> {
        if depth >= self.limits.max_depth {
            return Err(start.error("expression nests too deeply"));
        }
        let (tok, rest) = start.key()?;
        match tok.kind {
            TokenKind::LParen => {
                let (expr, rest) = self.expr(rest, depth + 1)?;
                let (close, after) = rest.key()?;
                if close.kind != TokenKind::RParen {
                    return Err(rest.error("missing \")\""));
                }
                Ok((expr, after))
            }
            TokenKind::Minus => {
                let (expr, rest) = self.match_expr(rest, depth + 1)?;
                let not = FilterExpr::Op {
                    op: Op::Not,
                    terms: vec![expr],
                };
                Ok((not, rest))
            }
            TokenKind::Star => Ok((FilterExpr::all(), rest)),
            TokenKind::Word | TokenKind::Quoted => {
                let key = tok.text;
                let offset = tok.offset;
                let (colon, rest) = rest.key()?;
                if colon.kind != TokenKind::Colon {
                    return Err(start.error("expected key:value"));
                }
                let (val, rest) = rest.value()?;
                match val.kind {
                    TokenKind::Word | TokenKind::Quoted | TokenKind::Regexp => {
                        Ok((make_match(offset, key, val), rest))
                    }
                    TokenKind::LParen => self.match_list(offset, &key, rest),
                    _ => Err(start.error("expected key:value")),
                }
            }
            _ => Err(start.error("expected key:value or subexpression")),
        }
    }

    /// Parse the values of `key:(v1 v2 ...)` after the opening paren.
    fn match_list<'a>(&self, offset: usize, key: &str, mut rest: Tokenizer<'a>) -> Step<'a> {
        let mut terms = Vec::new();
        loop {
            let (val, after) = rest.value()?;
            match val.kind {
                TokenKind::RParen => {
                    if terms.is_empty() {
                        return Err(rest.error("nothing to match"));
                    }
                    return Ok((FilterExpr::Op { op: Op::Or, terms }, after));
                }
                TokenKind::Word | TokenKind::Quoted | TokenKind::Regexp => {
                    if terms.len() >= self.limits.max_values {
                        return Err(rest.error("too many values"));
                    }
                    terms.push(make_match(offset, key.to_string(), val));
                }
                _ => return Err(rest.error("expected value")),
            }
            rest = after;
        }
    }
}

fn collapse(op: Op, mut terms: Vec<FilterExpr>) -> FilterExpr {
    if terms.len() == 1 {
        if let Some(term) = terms.pop() {
            return term;
        }
    }
    FilterExpr::Op { op, terms }
}

fn make_match(offset: usize, key: String, val: Token) -> FilterExpr {
    match (val.kind, val.regex) {
        (TokenKind::Regexp, Some(regex)) => FilterExpr::Regexp {
            key,
            source: val.text,
            regex,
            offset,
        },
        _ => FilterExpr::Literal {
            key,
            value: val.text,
            offset,
        },
    }
}
