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

//! Compiled record filters.
//!
//! A [`Filter`] decides which records, and which measurements within a
//! record, to keep. Most keys decide for a whole record. The `.unit` key
//! instead decides per measurement, so a filter can keep some values of a
//! record and drop others.
//!
//! # Examples
//!
//! ```
//! use benchgroup_core::{Filter, Record};
//!
//! let filter = Filter::new("goos:linux .unit:(sec/op B/op)").unwrap();
//!
//! let mut rec = Record::new("Copy")
//!     .with_file_config("goos", "linux")
//!     .with_value(10.0, "sec/op")
//!     .with_value(3.0, "allocs/op");
//! assert!(filter.apply(&mut rec));
//! assert_eq!(rec.values.len(), 1);
//!
//! let mut rec = Record::new("Copy")
//!     .with_file_config("goos", "darwin")
//!     .with_value(10.0, "sec/op");
//! assert!(!filter.apply(&mut rec));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ParseResult, SyntaxError};
use crate::extract::Extractor;
use crate::limits::Limits;
use crate::parse::{parse_filter_with_limits, FilterExpr, Op};
use crate::record::{Record, Value};

/// A compiled filter expression.
#[derive(Debug, Clone)]
pub struct Filter {
    query: String,
    pred: Predicate,
}

#[derive(Debug, Clone)]
pub(crate) enum Predicate {
    /// Test an extracted key against a literal or regexp.
    Key { ext: Extractor, test: FilterExpr },
    /// Test each measurement's unit.
    Unit { test: FilterExpr },
    /// Keep records whose key is one of a fixed set of values.
    In {
        ext: Extractor,
        values: Arc<HashMap<String, usize>>,
    },
    Not(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

/// Result of evaluating a predicate: either one verdict for the whole
/// record, or one per measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Uniform(bool),
    Mask(Mask),
}

impl Filter {
    /// Compile a filter expression with default [`Limits`].
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the expression does not parse, names an
    /// empty key, or uses the `.config` group key.
    pub fn new(query: &str) -> ParseResult<Self> {
        Self::with_limits(query, &Limits::default())
    }

    /// Compile a filter expression.
    pub fn with_limits(query: &str, limits: &Limits) -> ParseResult<Self> {
        let expr = parse_filter_with_limits(query, limits)?;
        let pred = compile(query, &expr)?;
        tracing::debug!(query, canonical = %expr, "compiled filter");
        Ok(Self {
            query: query.to_string(),
            pred,
        })
    }

    /// A filter that keeps everything.
    pub fn match_all() -> Self {
        Self {
            query: "*".to_string(),
            pred: Predicate::And(Vec::new()),
        }
    }

    /// The expression this filter was compiled from.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Evaluate this filter against `rec`.
    pub fn matches(&self, rec: &Record) -> Match {
        Match {
            len: rec.values.len(),
            verdict: self.pred.eval(rec),
        }
    }

    /// Evaluate this filter and drop the measurements of `rec` that don't
    /// match. Returns whether the record matched; see [`Match::apply`].
    pub fn apply(&self, rec: &mut Record) -> bool {
        self.matches(rec).apply(rec)
    }

    /// AND additional terms in front of this filter.
    pub(crate) fn and_also(&mut self, mut terms: Vec<Predicate>) {
        if terms.is_empty() {
            return;
        }
        let pred = std::mem::replace(&mut self.pred, Predicate::And(Vec::new()));
        terms.push(pred);
        self.pred = Predicate::And(terms);
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::match_all()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

fn compile(query: &str, expr: &FilterExpr) -> ParseResult<Predicate> {
    match expr {
        FilterExpr::Literal { key, offset, .. } | FilterExpr::Regexp { key, offset, .. } => {
            match key.as_str() {
                ".config" => Err(SyntaxError::new(
                    query,
                    *offset,
                    ".config is only allowed in projections",
                )),
                ".unit" => Ok(Predicate::Unit { test: expr.clone() }),
                _ => {
                    let ext = Extractor::resolve(key)
                        .map_err(|err| SyntaxError::new(query, *offset, err.to_string()))?;
                    Ok(Predicate::Key {
                        ext,
                        test: expr.clone(),
                    })
                }
            }
        }
        FilterExpr::Op { op, terms } => {
            let mut subs = terms
                .iter()
                .map(|t| compile(query, t))
                .collect::<ParseResult<Vec<_>>>()?;
            Ok(match op {
                Op::And => Predicate::And(subs),
                Op::Or => Predicate::Or(subs),
                Op::Not => match subs.pop() {
                    Some(sub) => Predicate::Not(Box::new(sub)),
                    None => Predicate::Or(Vec::new()),
                },
            })
        }
    }
}

impl Predicate {
    fn eval(&self, rec: &Record) -> Verdict {
        match self {
            Predicate::Key { ext, test } => Verdict::Uniform(test.matches_value(&ext.extract(rec))),
            Predicate::Unit { test } => {
                Verdict::Mask(Mask::from_fn(rec.values.len(), |i| unit_matches(test, &rec.values[i])))
            }
            Predicate::In { ext, values } => {
                Verdict::Uniform(values.contains_key(ext.extract(rec).as_ref()))
            }
            Predicate::Not(sub) => match sub.eval(rec) {
                Verdict::Uniform(x) => Verdict::Uniform(!x),
                Verdict::Mask(mut m) => {
                    m.not();
                    Verdict::Mask(m)
                }
            },
            Predicate::And(subs) => {
                let mut mask: Option<Mask> = None;
                for sub in subs {
                    match sub.eval(rec) {
                        Verdict::Uniform(false) => return Verdict::Uniform(false),
                        Verdict::Uniform(true) => {}
                        Verdict::Mask(m) => match &mut mask {
                            Some(acc) => acc.and(&m),
                            None => mask = Some(m),
                        },
                    }
                }
                mask.map_or(Verdict::Uniform(true), Verdict::Mask)
            }
            Predicate::Or(subs) => {
                let mut mask: Option<Mask> = None;
                for sub in subs {
                    match sub.eval(rec) {
                        Verdict::Uniform(true) => return Verdict::Uniform(true),
                        Verdict::Uniform(false) => {}
                        Verdict::Mask(m) => match &mut mask {
                            Some(acc) => acc.or(&m),
                            None => mask = Some(m),
                        },
                    }
                }
                mask.map_or(Verdict::Uniform(false), Verdict::Mask)
            }
        }
    }
}

fn unit_matches(test: &FilterExpr, value: &Value) -> bool {
    test.matches_value(&value.unit)
        || (!value.orig_unit.is_empty() && test.matches_value(&value.orig_unit))
}

/// The outcome of matching a [`Filter`] against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    len: usize,
    verdict: Verdict,
}

impl Match {
    /// Whether measurement `i` matched.
    pub fn test(&self, i: usize) -> bool {
        match &self.verdict {
            Verdict::Uniform(x) => *x,
            Verdict::Mask(m) => m.get(i),
        }
    }

    /// Whether every measurement matched.
    pub fn all(&self) -> bool {
        match &self.verdict {
            Verdict::Uniform(x) => *x,
            Verdict::Mask(m) => m.count() == self.len,
        }
    }

    /// Whether any measurement matched.
    pub fn any(&self) -> bool {
        match &self.verdict {
            Verdict::Uniform(x) => *x,
            Verdict::Mask(m) => m.count() > 0,
        }
    }

    /// Drop the measurements of `rec` that didn't match. Returns
    /// [`Match::any`]: whether the record matched at all.
    ///
    /// A record without measurements is kept exactly when the filter
    /// matched it as a whole. `rec` should be the record this match was
    /// computed from.
    pub fn apply(&self, rec: &mut Record) -> bool {
        let keep = self.any();
        match &self.verdict {
            Verdict::Uniform(true) => {}
            Verdict::Uniform(false) => rec.values.clear(),
            Verdict::Mask(m) => {
                let mut i = 0;
                rec.values.retain(|_| {
                    let keep = m.get(i);
                    i += 1;
                    keep
                });
            }
        }
        keep
    }
}

/// A fixed-size bit set over a record's measurements.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mask {
    bits: Vec<u64>,
    len: usize,
}

impl Mask {
    fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = vec![0u64; len.div_ceil(64)];
        for i in 0..len {
            if f(i) {
                bits[i / 64] |= 1 << (i % 64);
            }
        }
        Self { bits, len }
    }

    fn get(&self, i: usize) -> bool {
        i < self.len && self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn and(&mut self, other: &Mask) {
        for (a, b) in self.bits.iter_mut().zip(&other.bits) {
            *a &= b;
        }
    }

    fn or(&mut self, other: &Mask) {
        for (a, b) in self.bits.iter_mut().zip(&other.bits) {
            *a |= b;
        }
    }

    fn not(&mut self) {
        for w in &mut self.bits {
            *w = !*w;
        }
        // Keep bits past the end clear so count() stays exact.
        let tail = self.len % 64;
        if tail != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}
