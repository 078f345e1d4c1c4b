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

//! Property tests for the filter and projection parsers.

use benchgroup_core::parse::{parse_filter, parse_projection};
use benchgroup_core::{Filter, ProjectionParser};
use proptest::prelude::*;

const FILTER_TOKENS: &[&str] = &[
    "a:b", "goos:linux", ".name:Copy", "/size:4k", "x:(1 2)", "k:/^B/", "u:\"x y\"",
    ".unit:sec/op", "-", "*", "(", ")", "AND", "OR",
];

const PROJECTION_TOKENS: &[&str] = &[
    "a", ".name", "/size", ".fullname", ".config", "goos", "@num", "@alpha", "@(x y)", "@bogus",
    ",", "(", ")", "\"q\"",
];

fn joined(tokens: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(tokens), 0..10).prop_map(|t| t.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: the filter parser never panics and errors point inside
    /// the query.
    #[test]
    fn prop_filter_errors_in_range(q in "\\PC{0,32}") {
        if let Err(err) = parse_filter(&q) {
            prop_assert!(err.offset <= q.len());
            prop_assert_eq!(&err.query, &q);
        }
        if let Err(err) = Filter::new(&q) {
            prop_assert!(err.offset <= q.len());
        }
    }

    /// Property: the projection parser never panics and errors point
    /// inside the query.
    #[test]
    fn prop_projection_errors_in_range(q in "\\PC{0,32}") {
        if let Err(err) = parse_projection(&q) {
            prop_assert!(err.offset <= q.len());
        }
        let mut filter = Filter::match_all();
        if let Err(err) = ProjectionParser::new().parse(&q, &mut filter) {
            prop_assert!(err.offset <= q.len());
        }
    }

    /// Property: a parsed filter's canonical form parses back to itself.
    #[test]
    fn prop_filter_canonical_form_reparses(q in joined(FILTER_TOKENS)) {
        if let Ok(expr) = parse_filter(&q) {
            let canonical = expr.to_string();
            let again = parse_filter(&canonical);
            prop_assert!(again.is_ok(), "{:?} -> {:?}", q, canonical);
            if let Ok(again) = again {
                prop_assert_eq!(again.to_string(), canonical);
            }
        }
    }

    /// Property: schema parsing succeeds exactly when the projection
    /// syntax is valid and every order is known.
    #[test]
    fn prop_schema_parse_agrees_with_syntax(q in joined(PROJECTION_TOKENS)) {
        let syntax = parse_projection(&q);
        let mut filter = Filter::match_all();
        let schema = ProjectionParser::new().parse(&q, &mut filter);
        if syntax.is_err() {
            prop_assert!(schema.is_err());
        }
        if schema.is_ok() {
            prop_assert!(!q.contains("@bogus"));
        }
    }
}
