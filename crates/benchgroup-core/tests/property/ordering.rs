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

//! Property tests for config ordering.

use std::cmp::Ordering;

use benchgroup_core::{parse_num, Config, Filter, ProjectionParser, Record, Schema};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "", "1", "2", "10", "1k", "1000", "1Ki", "1.5", "-3", "NaN", "inf", "abc", "x2", "B",
    ])
}

fn rows() -> impl Strategy<Value = Vec<(&'static str, &'static str, &'static str)>> {
    prop::collection::vec((value(), value(), value()), 1..30)
}

fn project(s: &mut Schema, rows: &[(&str, &str, &str)]) -> Vec<Config> {
    rows.iter()
        .map(|(a, b, c)| {
            s.project(
                &Record::new("Bench")
                    .with_file_config("a", *a)
                    .with_file_config("b", *b)
                    .with_file_config("c", *c),
            )
        })
        .collect()
}

fn schema() -> Schema {
    ProjectionParser::new()
        .parse("a@num,b@alpha,c", &mut Filter::match_all())
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: sorting is independent of input order.
    #[test]
    fn prop_sort_ignores_input_order(
        (original, shuffled) in rows().prop_flat_map(|r| (Just(r.clone()), Just(r).prop_shuffle()))
    ) {
        let mut s = schema();
        let mut a = project(&mut s, &original);
        let mut b = project(&mut s, &shuffled);
        s.sort_configs(&mut a);
        s.sort_configs(&mut b);
        prop_assert_eq!(a, b);
    }

    /// Property: comparison is antisymmetric and only equal configs
    /// compare equal.
    #[test]
    fn prop_compare_is_total(rows in rows()) {
        let mut s = schema();
        let configs = project(&mut s, &rows);
        for x in &configs {
            for y in &configs {
                let xy = s.compare(x, y);
                prop_assert_eq!(xy, s.compare(y, x).reverse());
                prop_assert_eq!(xy == Ordering::Equal, x == y);
            }
        }
    }

    /// Property: sorted output is non-decreasing.
    #[test]
    fn prop_sorted_is_non_decreasing(rows in rows()) {
        let mut s = schema();
        let mut configs = project(&mut s, &rows);
        s.sort_configs(&mut configs);
        for pair in configs.windows(2) {
            prop_assert!(!s.less(&pair[1], &pair[0]));
        }
    }

    /// Property: anything that is already a float parses to itself.
    #[test]
    fn prop_parse_num_accepts_floats(v in -1e12f64..1e12) {
        let text = v.to_string();
        prop_assert_eq!(parse_num(&text), Some(v));
    }

    /// Property: parse_num never panics on arbitrary text.
    #[test]
    fn prop_parse_num_total(x in "\\PC{0,16}") {
        let _ = parse_num(&x);
    }
}
