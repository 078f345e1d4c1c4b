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

//! Filtering, projection, and grouping of benchmark results.
//!
//! This crate decides which benchmark records to keep and how to group
//! and order the rest:
//!
//! - A [`Filter`] compiled from an expression such as
//!   `goos:linux -.name:/^Old/` keeps or drops records, and with `.unit`
//!   keys, individual measurements.
//! - A [`ProjectionParser`] turns expressions such as `.name,/size@num`
//!   into [`Schema`]s, which project records into interned [`Config`]
//!   tuples that can key a map.
//! - Schemas sort configs ([`Schema::sort_configs`]), compact them into
//!   headers ([`ConfigHeader::build`]), and report which fields vary
//!   ([`Schema::non_singular_fields`]).
//!
//! # Keys
//!
//! | Key         | Meaning                                        |
//! |-------------|------------------------------------------------|
//! | `.name`     | Base benchmark name                            |
//! | `.fullname` | Full benchmark name                            |
//! | `/key`      | Sub-name key, including `/gomaxprocs`          |
//! | `.config`   | Every file config key (projections only)       |
//! | `.unit`     | Measurement unit (filters only)                |
//! | other       | A file config key                              |
//!
//! # Example
//!
//! ```
//! use benchgroup_core::{ConfigHeader, Filter, ProjectionParser, Record};
//!
//! let mut filter = Filter::new("goos:linux").unwrap();
//! let mut parser = ProjectionParser::new();
//! let mut schema = parser.parse("/size@num", &mut filter).unwrap();
//!
//! let records = [
//!     Record::new("Copy/size=4k-8").with_file_config("goos", "linux"),
//!     Record::new("Copy/size=64-8").with_file_config("goos", "linux"),
//!     Record::new("Copy/size=1M-8").with_file_config("goos", "darwin"),
//! ];
//! let mut configs = Vec::new();
//! for rec in &records {
//!     if filter.matches(rec).any() {
//!         configs.push(schema.project(rec));
//!     }
//! }
//! schema.sort_configs(&mut configs);
//!
//! let sizes: Vec<String> = configs.iter().map(|c| schema.display_values(c)).collect();
//! assert_eq!(sizes, ["64", "4k"]);
//! assert_eq!(ConfigHeader::build(&schema, &configs).len(), 1);
//! ```
//!
//! # Limits
//!
//! Expression parsing is bounded by [`Limits`]; use
//! [`Filter::with_limits`] and [`ProjectionParser::with_limits`] to
//! change them.

mod error;
mod extract;
mod filter;
mod header;
pub mod lex;
mod limits;
mod nonsingular;
mod order;
pub mod parse;
mod record;
mod schema;
mod sort;

pub use error::{ParseResult, SyntaxError};
pub use extract::{ExtractError, Extractor, FullNameRewrite};
pub use filter::{Filter, Match};
pub use header::ConfigHeader;
pub use limits::Limits;
pub use order::parse_num;
pub use record::{FileConfig, Name, Record, Value};
pub use schema::{Config, Field, ProjectionParser, Schema, SchemaId};
