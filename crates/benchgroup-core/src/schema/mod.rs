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

//! Schemas project records into interned [`Config`] tuples.
//!
//! A [`Schema`] is a tree of fields built from a projection expression.
//! Group projections (`.config`) grow new fields as records with new keys
//! are projected. Every field gets the next storage index when it is
//! created, so configs produced before the schema grew stay valid and
//! compare equal to configs produced after it.
//!
//! # Examples
//!
//! ```
//! use benchgroup_core::{Filter, ProjectionParser, Record};
//!
//! let mut filter = Filter::match_all();
//! let mut parser = ProjectionParser::new();
//! let mut schema = parser.parse(".name, .config", &mut filter).unwrap();
//!
//! let a = schema.project(&Record::new("Copy").with_file_config("goos", "linux"));
//! let b = schema.project(&Record::new("Copy").with_file_config("goos", "linux"));
//! assert_eq!(a, b);
//! assert_eq!(schema.display(&a), ".name:Copy goos:linux");
//! ```

mod config;
mod parser;

pub use config::Config;
pub use parser::ProjectionParser;

use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};

use crate::extract::Extractor;
use crate::order::Order;
use crate::record::Record;
use parser::SharedExclusions;

/// Identifies one [`Schema`]. Configs and fields carry the id of the
/// schema that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SchemaId(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// A single dimension of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: Arc<str>,
    schema: SchemaId,
    index: usize,
}

impl Field {
    /// The field's key, such as `.name`, `/size`, or a file config key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The id of the schema this field belongs to.
    #[inline]
    pub fn schema_id(&self) -> SchemaId {
        self.schema
    }

    /// Storage index of this field's values in a [`Config`].
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Node index in a schema tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

#[derive(Debug)]
enum Node {
    Group { children: Vec<NodeId> },
    Leaf(usize),
}

#[derive(Debug)]
struct FieldInfo {
    name: Arc<str>,
    order: Order,
}

/// Tree structure and per-field state.
#[derive(Debug)]
struct Layout {
    nodes: Vec<Node>,
    // Indexed by storage index.
    fields: Vec<FieldInfo>,
    flat: OnceLock<Vec<Field>>,
}

impl Layout {
    fn new() -> Self {
        Self {
            nodes: vec![Node::Group {
                children: Vec::new(),
            }],
            fields: Vec::new(),
            flat: OnceLock::new(),
        }
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        match &mut self.nodes[parent.0] {
            Node::Group { children } => children.push(id),
            Node::Leaf(_) => panic!("field's parent is not a group"),
        }
        self.nodes.push(node);
        id
    }

    fn add_group(&mut self, parent: NodeId) -> NodeId {
        self.attach(
            parent,
            Node::Group {
                children: Vec::new(),
            },
        )
    }

    /// Add a leaf and return its storage index.
    fn add_field(&mut self, parent: NodeId, name: &str, order: Order) -> usize {
        let index = self.fields.len();
        self.attach(parent, Node::Leaf(index));
        self.fields.push(FieldInfo {
            name: Arc::from(name),
            order,
        });
        self.flat.take();
        index
    }

    fn flat(&self, schema: SchemaId) -> &[Field] {
        self.flat.get_or_init(|| {
            let mut out = Vec::with_capacity(self.fields.len());
            self.walk(NodeId::ROOT, schema, &mut out);
            out
        })
    }

    fn walk(&self, node: NodeId, schema: SchemaId, out: &mut Vec<Field>) {
        match &self.nodes[node.0] {
            Node::Leaf(index) => out.push(Field {
                name: Arc::clone(&self.fields[*index].name),
                schema,
                index: *index,
            }),
            Node::Group { children } => {
                for child in children {
                    self.walk(*child, schema, out);
                }
            }
        }
    }
}

/// String interner and config index.
#[derive(Debug)]
struct Pool {
    strings: HashSet<Arc<str>>,
    empty: Arc<str>,
    hasher: RandomState,
    configs: HashMap<u64, Vec<Config>>,
    next_id: u64,
}

impl Pool {
    fn new() -> Self {
        Self {
            strings: HashSet::new(),
            empty: Arc::from(""),
            hasher: RandomState::new(),
            configs: HashMap::new(),
            next_id: 0,
        }
    }

    /// Intern `s`. The empty string interns to `None`.
    fn intern(&mut self, s: &str) -> Option<Arc<str>> {
        if s.is_empty() {
            return None;
        }
        if let Some(found) = self.strings.get(s) {
            return Some(Arc::clone(found));
        }
        let new: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&new));
        Some(new)
    }
}

/// How one projection fills in the row.
#[derive(Debug)]
enum Projector {
    /// A single extracted key.
    Key { ext: Extractor, field: usize },
    /// One field per file config key not claimed by a specific
    /// projection.
    ConfigGroup {
        group: NodeId,
        order: Order,
        seen: HashMap<String, usize>,
        exclusions: SharedExclusions,
    },
    /// The full name, with claimed sub-name keys normalized away. The
    /// extractor is resolved on the first record.
    FullName {
        field: usize,
        ext: Option<Extractor>,
        exclusions: SharedExclusions,
    },
}

/// Projects records into interned [`Config`]s and orders them.
///
/// Schemas are created by [`ProjectionParser::parse`] and
/// [`ProjectionParser::residue`].
#[derive(Debug)]
pub struct Schema {
    id: SchemaId,
    layout: Layout,
    projectors: Vec<Projector>,
    row: Vec<Option<Arc<str>>>,
    pool: Pool,
    unit_field: Option<Field>,
}

impl Schema {
    pub(crate) fn new() -> Self {
        Self {
            id: SchemaId::next(),
            layout: Layout::new(),
            projectors: Vec::new(),
            row: Vec::new(),
            pool: Pool::new(),
            unit_field: None,
        }
    }

    /// This schema's id.
    #[inline]
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// The fields of this schema in display order.
    ///
    /// Group projections contribute zero or more fields, and projecting a
    /// record may add more.
    pub fn fields(&self) -> &[Field] {
        self.layout.flat(self.id)
    }

    /// The `.unit` field, if [`Schema::add_values`] was called.
    pub fn unit_field(&self) -> Option<&Field> {
        self.unit_field.as_ref()
    }

    pub(crate) fn add_group(&mut self, parent: NodeId) -> NodeId {
        self.layout.add_group(parent)
    }

    pub(crate) fn add_field(&mut self, parent: NodeId, name: &str, order: Order) -> Field {
        let index = self.layout.add_field(parent, name, order);
        self.row.push(None);
        Field {
            name: Arc::clone(&self.layout.fields[index].name),
            schema: self.id,
            index,
        }
    }

    pub(crate) fn push_key(&mut self, ext: Extractor, field: &Field) {
        self.projectors.push(Projector::Key {
            ext,
            field: field.index,
        });
    }

    pub(crate) fn push_config_group(&mut self, group: NodeId, order: Order, exclusions: SharedExclusions) {
        self.projectors.push(Projector::ConfigGroup {
            group,
            order,
            seen: HashMap::new(),
            exclusions,
        });
    }

    pub(crate) fn push_full_name(&mut self, field: &Field, exclusions: SharedExclusions) {
        self.projectors.push(Projector::FullName {
            field: field.index,
            ext: None,
            exclusions,
        });
    }

    /// Append a `.unit` field, which [`Schema::project_values`] fills with
    /// each measurement's unit. Units are ordered by first observation.
    ///
    /// # Panics
    ///
    /// Panics if this schema already has a `.unit` field.
    pub fn add_values(&mut self) -> Field {
        assert!(self.unit_field.is_none(), "Schema already has a .unit field");
        let field = self.add_field(NodeId::ROOT, ".unit", Order::default());
        self.unit_field = Some(field.clone());
        field
    }

    /// Project `rec` into a config.
    ///
    /// A `.unit` field is left empty; use [`Schema::project_values`] for
    /// schemas that have one.
    pub fn project(&mut self, rec: &Record) -> Config {
        self.populate_row(rec);
        self.intern_row()
    }

    /// Project each measurement of `rec` into a config. The result has one
    /// entry per measurement.
    ///
    /// Without a `.unit` field all entries are the same config.
    pub fn project_values(&mut self, rec: &Record) -> Vec<Config> {
        self.populate_row(rec);
        let Some(unit) = self.unit_field.as_ref().map(|f| f.index) else {
            let config = self.intern_row();
            return vec![config; rec.values.len()];
        };
        rec.values
            .iter()
            .map(|v| {
                self.row[unit] = self.pool.intern(&v.unit);
                self.intern_row()
            })
            .collect()
    }

    fn populate_row(&mut self, rec: &Record) {
        self.row.iter_mut().for_each(|v| *v = None);
        for proj in &mut self.projectors {
            match proj {
                Projector::Key { ext, field } => {
                    self.row[*field] = self.pool.intern(&ext.extract(rec));
                }
                Projector::ConfigGroup {
                    group,
                    order,
                    seen,
                    exclusions,
                } => {
                    for cfg in rec.file_config() {
                        let index = match seen.get(&cfg.key) {
                            Some(&index) => index,
                            None => {
                                if exclusions.read().excludes_config_key(&cfg.key) {
                                    continue;
                                }
                                let index = self.layout.add_field(*group, &cfg.key, order.fresh());
                                self.row.push(None);
                                tracing::debug!(schema = self.id.0, key = %cfg.key, index, "new .config field");
                                seen.insert(cfg.key.clone(), index);
                                index
                            }
                        };
                        self.row[index] = self.pool.intern(&cfg.value);
                    }
                }
                Projector::FullName {
                    field,
                    ext,
                    exclusions,
                } => {
                    let ext = ext.get_or_insert_with(|| parser::full_name_extractor(exclusions));
                    self.row[*field] = self.pool.intern(&ext.extract(rec));
                }
            }
        }
    }

    fn intern_row(&mut self) -> Config {
        // Trailing empties don't count, so configs made before the schema
        // grew still match.
        let len = self
            .row
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1);
        let row = &self.row[..len];
        let hash = self.pool.hasher.hash_one(row);

        if let Some(found) = self
            .pool
            .configs
            .get(&hash)
            .and_then(|bucket| bucket.iter().find(|c| c.values_eq(row)))
        {
            return found.clone();
        }

        for (index, field) in self.layout.fields.iter_mut().enumerate() {
            let value = row
                .get(index)
                .and_then(Option::as_ref)
                .unwrap_or(&self.pool.empty);
            field.order.observe(value);
        }

        let id = self.pool.next_id;
        self.pool.next_id += 1;
        let config = Config::new(self.id, id, row);
        tracing::trace!(schema = self.id.0, id, "new config");
        self.pool.configs.entry(hash).or_default().push(config.clone());
        config
    }

    pub(crate) fn field_order(&self, field: &Field) -> &Order {
        &self.layout.fields[field.index].order
    }

    pub(crate) fn check_config(&self, config: &Config) {
        assert!(
            config.schema_id() == self.id,
            "Config does not belong to this Schema"
        );
    }

    /// Render `config` as space-separated `field:value` pairs in display
    /// order, omitting empty values.
    ///
    /// # Panics
    ///
    /// Panics if `config` belongs to a different schema.
    pub fn display(&self, config: &Config) -> String {
        self.render(config, true)
    }

    /// Like [`Schema::display`], but values only.
    pub fn display_values(&self, config: &Config) -> String {
        self.render(config, false)
    }

    fn render(&self, config: &Config, keys: bool) -> String {
        self.check_config(config);
        let mut out = String::new();
        for field in self.fields() {
            let value = config.raw(field.index);
            if value.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            if keys {
                out.push_str(field.name());
                out.push(':');
            }
            out.push_str(value);
        }
        out
    }
}
