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

//! Building schemas from projection expressions.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{NodeId, Schema};
use crate::error::{ParseResult, SyntaxError};
use crate::extract::Extractor;
use crate::filter::{Filter, Predicate};
use crate::lex::quote;
use crate::limits::Limits;
use crate::order::Order;
use crate::parse::{parse_projection_with_limits, Projection, ProjectionOrder};

/// Keys claimed by specific projections, which group projections skip.
#[derive(Debug, Default)]
pub(crate) struct Exclusions {
    config_keys: HashSet<String>,
    fullname_keys: Vec<String>,
    // Built on the first projected record and shared by every schema of
    // the session.
    full_extractor: Option<Extractor>,
}

impl Exclusions {
    pub(crate) fn excludes_config_key(&self, key: &str) -> bool {
        self.config_keys.contains(key)
    }
}

pub(crate) type SharedExclusions = Arc<RwLock<Exclusions>>;

/// The `.fullname` extractor for a session, building it from the keys
/// claimed so far if no schema has needed it yet.
pub(crate) fn full_name_extractor(exclusions: &SharedExclusions) -> Extractor {
    if let Some(ext) = &exclusions.read().full_extractor {
        return ext.clone();
    }
    let mut ex = exclusions.write();
    let Exclusions {
        fullname_keys,
        full_extractor,
        ..
    } = &mut *ex;
    full_extractor
        .get_or_insert_with(|| {
            tracing::debug!(excluded = ?fullname_keys, "resolving .fullname extractor");
            Extractor::full_name_excluding(fullname_keys.as_slice())
        })
        .clone()
}

/// Parses projection expressions into [`Schema`]s.
///
/// All schemas parsed by one `ProjectionParser` form a group: a key
/// projected specifically by any of them is excluded from the `.config`
/// and `.fullname` group projections of all of them. For example, after
/// parsing `.config` and then `commit,date`, the first schema no longer
/// produces `commit` or `date` fields.
///
/// # Examples
///
/// ```
/// use benchgroup_core::{Filter, ProjectionParser, Record};
///
/// let mut filter = Filter::match_all();
/// let mut parser = ProjectionParser::new();
/// let mut rows = parser.parse(".config", &mut filter).unwrap();
/// let mut cols = parser.parse("commit", &mut filter).unwrap();
///
/// let rec = Record::new("Copy")
///     .with_file_config("goos", "linux")
///     .with_file_config("commit", "abc");
/// let row = rows.project(&rec);
/// let col = cols.project(&rec);
/// assert_eq!(rows.display(&row), "goos:linux");
/// assert_eq!(cols.display(&col), "commit:abc");
/// ```
#[derive(Debug, Default)]
pub struct ProjectionParser {
    limits: Limits,
    have_config: bool,
    have_fullname: bool,
    exclusions: SharedExclusions,
}

impl ProjectionParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that applies `limits` to every expression.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Parse a projection expression such as `.name,/size@num`.
    ///
    /// Fixed orders such as `goos@(linux darwin)` also filter out records
    /// whose value is not listed; those terms are ANDed into `filter`, but
    /// only once the whole expression is known to be valid.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] for malformed expressions, unknown named
    /// orders, empty keys, and fixed orders on `.config`.
    pub fn parse(&mut self, text: &str, filter: &mut Filter) -> ParseResult<Schema> {
        let parts = parse_projection_with_limits(text, &self.limits)?;
        // Session state only changes once every part is known to be valid.
        let parts = parts
            .iter()
            .map(|proj| resolve(text, proj))
            .collect::<ParseResult<Vec<_>>>()?;

        let mut schema = Schema::new();
        let implicit: Vec<Predicate> = parts
            .into_iter()
            .filter_map(|part| self.project(&mut schema, part))
            .collect();
        if !implicit.is_empty() {
            tracing::debug!(
                projection = text,
                terms = implicit.len(),
                "adding fixed-order filter terms"
            );
            filter.and_also(implicit);
        }
        Ok(schema)
    }

    /// A schema over whatever no parsed projection has covered yet.
    ///
    /// `.config` and `.fullname` together cover every record component,
    /// so the residue is whichever of them was never projected, with all
    /// specifically projected keys excluded. The residue's order is not
    /// meaningful.
    pub fn residue(&mut self) -> Schema {
        let mut schema = Schema::new();
        if !self.have_config {
            self.config_group(&mut schema, Order::default());
        }
        if !self.have_fullname {
            self.full_name(&mut schema, Order::default());
        }
        schema
    }

    fn project(&mut self, schema: &mut Schema, part: Part<'_>) -> Option<Predicate> {
        match part {
            Part::Config(order) => {
                self.config_group(schema, order);
                None
            }
            Part::FullName(order) => {
                let pred = fixed_filter(Extractor::FullName, &order);
                self.full_name(schema, order);
                pred
            }
            Part::Key { key, ext, order } => {
                self.exclude(key);
                let pred = fixed_filter(ext.clone(), &order);
                let field = schema.add_field(NodeId::ROOT, key, order);
                schema.push_key(ext, &field);
                pred
            }
        }
    }

    fn config_group(&mut self, schema: &mut Schema, order: Order) {
        self.have_config = true;
        let group = schema.add_group(NodeId::ROOT);
        schema.push_config_group(group, order, Arc::clone(&self.exclusions));
    }

    fn full_name(&mut self, schema: &mut Schema, order: Order) {
        self.have_fullname = true;
        let field = schema.add_field(NodeId::ROOT, ".fullname", order);
        schema.push_full_name(&field, Arc::clone(&self.exclusions));
    }

    fn exclude(&mut self, key: &str) {
        let mut ex = self.exclusions.write();
        if key == ".name" || key.starts_with('/') {
            ex.fullname_keys.push(key.to_string());
        } else {
            ex.config_keys.insert(key.to_string());
        }
        tracing::debug!(key, "excluding key from group projections");
    }
}

/// A validated projection part.
enum Part<'p> {
    Config(Order),
    FullName(Order),
    Key {
        key: &'p str,
        ext: Extractor,
        order: Order,
    },
}

fn resolve<'p>(q: &str, proj: &'p Projection) -> ParseResult<Part<'p>> {
    let order = match &proj.order {
        ProjectionOrder::First => Order::default(),
        ProjectionOrder::Fixed(values) => Order::fixed(values),
        ProjectionOrder::Named(name) => Order::builtin(name).ok_or_else(|| {
            SyntaxError::new(q, proj.order_offset, format!("unknown order {}", quote(name)))
        })?,
    };
    match proj.key.as_str() {
        ".config" => {
            if matches!(order, Order::Fixed(_)) {
                return Err(SyntaxError::new(
                    q,
                    proj.order_offset,
                    "fixed order not allowed for .config",
                ));
            }
            Ok(Part::Config(order))
        }
        ".fullname" => Ok(Part::FullName(order)),
        key => {
            let ext = Extractor::resolve(key)
                .map_err(|err| SyntaxError::new(q, proj.key_offset, err.to_string()))?;
            Ok(Part::Key { key, ext, order })
        }
    }
}

/// The filter term implied by a fixed order: values outside the list are
/// dropped.
fn fixed_filter(ext: Extractor, order: &Order) -> Option<Predicate> {
    match order {
        Order::Fixed(values) => Some(Predicate::In {
            ext,
            values: Arc::clone(values),
        }),
        _ => None,
    }
}
