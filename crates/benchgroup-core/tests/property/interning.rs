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

//! Property tests for config interning.

use benchgroup_core::{Config, Filter, ProjectionParser, Record, Schema};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "x", "y", "1", "10", "linux"])
}

fn row() -> impl Strategy<Value = (&'static str, &'static str, &'static str)> {
    (value(), value(), value())
}

fn record(keys: &[&str], row: &(&str, &str, &str)) -> Record {
    let values = [row.0, row.1, row.2];
    keys.iter()
        .zip(values)
        .fold(Record::new("Bench"), |r, (k, v)| r.with_file_config(*k, v))
}

fn schema(proj: &str) -> Schema {
    ProjectionParser::new()
        .parse(proj, &mut Filter::match_all())
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: two records project to the same config exactly when
    /// their projected values are equal.
    #[test]
    fn prop_equal_tuples_intern_to_equal_configs(rows in prop::collection::vec(row(), 1..40)) {
        let mut s = schema("a,b,c");
        let configs: Vec<Config> = rows.iter().map(|r| s.project(&record(&["a", "b", "c"], r))).collect();
        for i in 0..rows.len() {
            for j in 0..rows.len() {
                prop_assert_eq!(rows[i] == rows[j], configs[i] == configs[j]);
            }
        }
    }

    /// Property: projecting the same record twice yields the same config.
    #[test]
    fn prop_projection_is_stable(r in row()) {
        let mut s = schema(".config");
        let rec = record(&["a", "b", "c"], &r);
        let first = s.project(&rec);
        let second = s.project(&rec);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(s.display(&first), s.display(&second));
    }

    /// Property: configs interned before a config group grows stay equal
    /// to re-projections after it grows.
    #[test]
    fn prop_interning_survives_schema_growth(
        early in prop::collection::vec(row(), 1..10),
        late in prop::collection::vec(row(), 1..10),
    ) {
        let mut s = schema(".config");
        let before: Vec<Config> = early.iter().map(|r| s.project(&record(&["a", "b"], r))).collect();
        let fields_before = s.fields().len();

        for r in &late {
            s.project(&record(&["c", "d", "e"], r));
        }
        prop_assert!(s.fields().len() >= fields_before);

        for (r, old) in early.iter().zip(&before) {
            let again = s.project(&record(&["a", "b"], r));
            prop_assert_eq!(old, &again);
        }
    }

    /// Property: when a config group grows ahead of an existing field,
    /// earlier configs keep their identity, rendering, and sort order.
    #[test]
    fn prop_growth_ahead_of_field_preserves_configs(
        early in prop::collection::vec(row(), 1..12),
        late in prop::collection::vec(row(), 1..12),
    ) {
        let mut s = schema(".config,x");
        let before: Vec<Config> = early.iter().map(|r| s.project(&record(&["a", "b", "x"], r))).collect();
        let shown: Vec<String> = before.iter().map(|c| s.display(c)).collect();
        let mut sorted = before.clone();
        s.sort_configs(&mut sorted);

        for r in &late {
            s.project(&record(&["c", "d", "x"], r));
        }

        // The group's fields still come before `x`.
        prop_assert_eq!(s.fields().last().map(|f| f.name()), Some("x"));
        for ((r, old), text) in early.iter().zip(&before).zip(&shown) {
            let again = s.project(&record(&["a", "b", "x"], r));
            prop_assert_eq!(old, &again);
            prop_assert_eq!(&s.display(old), text);
        }
        let mut resorted = before.clone();
        s.sort_configs(&mut resorted);
        prop_assert_eq!(sorted, resorted);
    }

    /// Property: a config reports the value each field was projected from.
    #[test]
    fn prop_config_get_returns_projected_values(r in row()) {
        let mut s = schema("a,b,c");
        let config = s.project(&record(&["a", "b", "c"], &r));
        let fields = s.fields().to_vec();
        prop_assert_eq!(config.get(&fields[0]), r.0);
        prop_assert_eq!(config.get(&fields[1]), r.1);
        prop_assert_eq!(config.get(&fields[2]), r.2);
    }
}
